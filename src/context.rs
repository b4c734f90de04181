use crate::command::{DrawingOperation, OperationStack};
use crate::drawing::Drawing;
use crate::error::EngineResult;
use crate::settings::{ToolSettings, UserSettings};

/// Dependency bundle passed by `&mut` into every tool and drag-handler call:
/// the drawing, the operation stack, the tool-facing selection state, and
/// the current user style settings.
///
/// Kept as an explicit parameter struct rather than ambient state so each
/// call site says exactly what it can touch.
pub struct ToolOperationContext<'a> {
    pub drawing: &'a mut Drawing,
    pub operation_stack: &'a mut OperationStack,
    pub tool_settings: &'a mut ToolSettings,
    pub user_settings: &'a UserSettings,
}

impl ToolOperationContext<'_> {
    /// Routes an operation through the stack onto the drawing.
    pub fn apply(&mut self, operation: DrawingOperation) -> EngineResult {
        self.operation_stack.apply(self.drawing, operation)
    }
}
