use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::handlers::{DragHandler, MoveHandler, ResizeRotateHandler};
use super::{Tool, refresh_overlay};
use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::overlay::{EditingOverlay, OverlayRegion};
use crate::shape::Shape;

/// Selects existing shapes and moves/resizes/rotates them.
///
/// States: idle (nothing selected) → editing (a shape is selected and the
/// host draws its overlay) → dragging (a [`DragHandler`] owns the gesture)
/// → back to editing. The selected shape lives in the shared
/// [`ToolSettings`](crate::ToolSettings) so the host can see it too.
#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    handler: Option<DragHandler>,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        if let Some(shape) = ctx.drawing.get(id) {
            let overlay = EditingOverlay::for_shape(shape);
            ctx.tool_settings.select(id, overlay);
            ctx.drawing.mark_dirty();
        }
    }

    fn deselect(ctx: &mut ToolOperationContext<'_>) {
        if ctx.tool_settings.selected_shape.is_some() {
            ctx.tool_settings.clear_selection();
            ctx.drawing.mark_dirty();
        }
    }

    fn remove_selected(ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        match DrawingOperation::remove(ctx.drawing, id) {
            Ok(operation) => {
                if let Err(err) = ctx.apply(operation) {
                    log::warn!("failed to remove selected shape {id}: {err}");
                }
            }
            Err(err) => log::warn!("failed to remove selected shape {id}: {err}"),
        }
        Self::deselect(ctx);
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn activate(&mut self, ctx: &mut ToolOperationContext<'_>, existing_shape: Option<Uuid>) {
        if let Some(id) = existing_shape {
            Self::select(ctx, id);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolOperationContext<'_>) {
        self.handler = None;
        Self::deselect(ctx);
    }

    fn handle_tap(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(selected) = ctx.tool_settings.selected_shape {
            let region = ctx
                .tool_settings
                .overlay
                .as_ref()
                .and_then(|overlay| overlay.region_at(point));
            if region == Some(OverlayRegion::Delete) {
                Self::remove_selected(ctx, selected);
                return;
            }
        }

        match ctx
            .drawing
            .shape_at_where(point, |shape| !matches!(shape, Shape::Selection(_)))
            .map(Shape::id)
        {
            Some(id) => Self::select(ctx, id),
            None => Self::deselect(ctx),
        }
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let Some(selected) = ctx.tool_settings.selected_shape else {
            return;
        };
        let Some(shape) = ctx.drawing.get(selected) else {
            return;
        };
        let transform = shape.transform();

        let region = ctx
            .tool_settings
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.region_at(point));
        self.handler = if region == Some(OverlayRegion::ResizeAndRotate) {
            Some(DragHandler::ResizeRotate(ResizeRotateHandler::new(
                selected, point, transform,
            )))
        } else if shape.hit_test(point) {
            Some(DragHandler::Move(MoveHandler::new(selected, point, transform)))
        } else {
            // Drag began outside the shape and its handles; ignore it.
            None
        };
    }

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Pos2,
        velocity: Vec2,
    ) {
        if let Some(handler) = &mut self.handler {
            handler.drag_continue(ctx, point, velocity);
            refresh_overlay(ctx);
        }
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(mut handler) = self.handler.take() {
            handler.drag_end(ctx, point);
            refresh_overlay(ctx);
            ctx.drawing.mark_dirty();
        }
    }

    fn handle_drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>, _point: Pos2) {
        if let Some(mut handler) = self.handler.take() {
            handler.drag_cancel(ctx);
            refresh_overlay(ctx);
        }
    }

    fn apply_settings(&mut self, ctx: &mut ToolOperationContext<'_>) {
        let Some(selected) = ctx.tool_settings.selected_shape else {
            return;
        };
        if let Some(shape) = ctx.drawing.get_mut(selected) {
            shape.apply_settings(ctx.user_settings);
            ctx.drawing.mark_dirty();
        }
    }
}
