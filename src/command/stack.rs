use super::DrawingOperation;
use crate::drawing::Drawing;
use crate::error::EngineResult;

/// Undo/redo manager: two chronological operation histories, most recent
/// last. Invariant: the redo history is empty immediately after any
/// [`apply`](Self::apply) — new operations invalidate the redo horizon.
#[derive(Debug, Default)]
pub struct OperationStack {
    pub(crate) undo_stack: Vec<DrawingOperation>,
    pub(crate) redo_stack: Vec<DrawingOperation>,
}

impl OperationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an operation to the drawing and records it for undo.
    ///
    /// If the operation declines to be recorded (`should_add` false), only
    /// its `apply` runs: state changes but is not undoable, and the redo
    /// history is left untouched.
    pub fn apply(&mut self, drawing: &mut Drawing, operation: DrawingOperation) -> EngineResult {
        if !operation.should_add(self, drawing) {
            return operation.apply(drawing);
        }
        operation.apply(drawing)?;
        self.undo_stack.push(operation);
        self.redo_stack.clear();
        Ok(())
    }

    /// Reverts the most recent operation. A defined no-op when the history
    /// is empty. Never consults `should_add`.
    ///
    /// An operation whose revert fails is dropped rather than pushed to the
    /// redo history; redoing it would re-apply over inconsistent state.
    pub fn undo(&mut self, drawing: &mut Drawing) -> EngineResult {
        let Some(operation) = self.undo_stack.pop() else {
            return Ok(());
        };
        operation.revert(drawing)?;
        self.redo_stack.push(operation);
        Ok(())
    }

    /// Re-applies the most recently undone operation. A defined no-op when
    /// the redo history is empty. A failed re-apply is dropped, matching
    /// [`undo`](Self::undo).
    pub fn redo(&mut self, drawing: &mut Drawing) -> EngineResult {
        let Some(operation) = self.redo_stack.pop() else {
            return Ok(());
        };
        operation.apply(drawing)?;
        self.undo_stack.push(operation);
        Ok(())
    }

    /// Reverts and discards the most recent operation without recording it
    /// for redo. Used when the gesture that produced it is cancelled.
    pub fn cancel_last(&mut self, drawing: &mut Drawing) -> EngineResult {
        let Some(operation) = self.undo_stack.pop() else {
            return Ok(());
        };
        operation.revert(drawing)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable operations; the source of truth for "has unsaved
    /// changes".
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
