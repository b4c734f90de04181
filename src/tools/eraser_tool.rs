use egui::{Pos2, Vec2};

use super::Tool;
use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::shape::Shape;

/// Removes whole shapes: every tap or drag sample that hits a shape pushes
/// one remove operation for the topmost hit, so each erased shape is
/// independently undoable.
#[derive(Debug, Clone, Default)]
pub struct EraserTool;

impl EraserTool {
    pub fn new() -> Self {
        Self
    }

    fn erase_at(ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        // Selection indicators are host chrome, not erasable content.
        let Some(id) = ctx
            .drawing
            .shape_at_where(point, |shape| !matches!(shape, Shape::Selection(_)))
            .map(Shape::id)
        else {
            return;
        };
        match DrawingOperation::remove(ctx.drawing, id) {
            Ok(operation) => {
                if let Err(err) = ctx.apply(operation) {
                    log::warn!("failed to erase shape {id}: {err}");
                }
            }
            Err(err) => log::warn!("failed to erase shape {id}: {err}"),
        }
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn handle_tap(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        Self::erase_at(ctx, point);
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        Self::erase_at(ctx, point);
    }

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Pos2,
        _velocity: Vec2,
    ) {
        Self::erase_at(ctx, point);
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        Self::erase_at(ctx, point);
    }
}
