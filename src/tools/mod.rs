use egui::{Pos2, Vec2};
use uuid::Uuid;

mod eraser_tool;
mod handlers;
mod selection_tool;
mod stamp_tool;
mod text_tool;
mod two_point_tool;

pub use eraser_tool::EraserTool;
pub use handlers::{ChangeImageHandler, DragHandler, MoveHandler, ResizeRotateHandler};
pub use selection_tool::SelectionTool;
pub use stamp_tool::StampTool;
pub use text_tool::TextTool;
pub use two_point_tool::{FreehandTool, TwoPointKind, TwoPointTool};

use crate::context::ToolOperationContext;
use crate::overlay::EditingOverlay;

/// Per-tool gesture state machine: idle → editing → dragging and back.
///
/// The host routes raw pointer gestures here; the tool mutates live shapes
/// for immediate feedback and commits reversible operations through the
/// context's operation stack. Every handler tolerates a `continue` or `end`
/// arriving with no active drag (a no-op), since platform gesture delivery
/// is not always well ordered.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Activate the tool, optionally entering editing on an existing shape
    /// (e.g. re-selecting after a tool switch).
    fn activate(&mut self, _ctx: &mut ToolOperationContext<'_>, _existing_shape: Option<Uuid>) {}

    /// Force exit of editing/dragging back to idle, discarding transient
    /// gesture state.
    fn deactivate(&mut self, _ctx: &mut ToolOperationContext<'_>) {}

    fn handle_tap(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Pos2) {}

    fn handle_drag_start(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Pos2) {}

    fn handle_drag_continue(
        &mut self,
        _ctx: &mut ToolOperationContext<'_>,
        _point: Pos2,
        _velocity: Vec2,
    ) {
    }

    fn handle_drag_end(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Pos2) {}

    fn handle_drag_cancel(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Pos2) {}

    /// The ambient user settings changed; re-apply them to the shape being
    /// edited, if any.
    fn apply_settings(&mut self, _ctx: &mut ToolOperationContext<'_>) {}
}

/// All available tools, dispatched without boxing.
#[derive(Debug, Clone)]
pub enum ToolKind {
    Selection(SelectionTool),
    TwoPoint(TwoPointTool),
    Freehand(FreehandTool),
    Text(TextTool),
    Stamp(StampTool),
    Eraser(EraserTool),
}

impl ToolKind {
    fn as_tool(&mut self) -> &mut dyn Tool {
        match self {
            Self::Selection(tool) => tool,
            Self::TwoPoint(tool) => tool,
            Self::Freehand(tool) => tool,
            Self::Text(tool) => tool,
            Self::Stamp(tool) => tool,
            Self::Eraser(tool) => tool,
        }
    }
}

impl Tool for ToolKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Selection(tool) => tool.name(),
            Self::TwoPoint(tool) => tool.name(),
            Self::Freehand(tool) => tool.name(),
            Self::Text(tool) => tool.name(),
            Self::Stamp(tool) => tool.name(),
            Self::Eraser(tool) => tool.name(),
        }
    }

    fn activate(&mut self, ctx: &mut ToolOperationContext<'_>, existing_shape: Option<Uuid>) {
        self.as_tool().activate(ctx, existing_shape);
    }

    fn deactivate(&mut self, ctx: &mut ToolOperationContext<'_>) {
        self.as_tool().deactivate(ctx);
    }

    fn handle_tap(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        self.as_tool().handle_tap(ctx, point);
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        self.as_tool().handle_drag_start(ctx, point);
    }

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Pos2,
        velocity: Vec2,
    ) {
        self.as_tool().handle_drag_continue(ctx, point, velocity);
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        self.as_tool().handle_drag_end(ctx, point);
    }

    fn handle_drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        self.as_tool().handle_drag_cancel(ctx, point);
    }

    fn apply_settings(&mut self, ctx: &mut ToolOperationContext<'_>) {
        self.as_tool().apply_settings(ctx);
    }
}

/// Recomputes the selected shape's overlay after its transform changed, so
/// the handle anchors track the shape.
pub(crate) fn refresh_overlay(ctx: &mut ToolOperationContext<'_>) {
    let Some(id) = ctx.tool_settings.selected_shape else {
        return;
    };
    ctx.tool_settings.overlay = ctx.drawing.get(id).map(EditingOverlay::for_shape);
}
