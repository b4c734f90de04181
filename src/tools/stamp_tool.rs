use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::handlers::{ChangeImageHandler, DragHandler, MoveHandler, ResizeRotateHandler};
use super::{Tool, refresh_overlay};
use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::overlay::{EditingOverlay, OverlayRegion};
use crate::shape::Shape;

/// Creates and edits stamp (image) shapes.
///
/// Same editing machine as the text tool, with one extra gesture: dragging
/// from the change-image handle swaps the stamp to the image currently
/// picked in the user settings.
#[derive(Debug, Clone, Default)]
pub struct StampTool {
    /// Image name as of the last committed operation.
    original_image_name: String,
    handler: Option<DragHandler>,
}

impl StampTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live image swap from the host's picker. Not undo-tracked; committed
    /// when editing finishes.
    pub fn update_image(&mut self, ctx: &mut ToolOperationContext<'_>, image_name: &str) {
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        if let Some(Shape::Stamp(shape)) = ctx.drawing.get_mut(id) {
            shape.image_name = image_name.to_owned();
            ctx.drawing.mark_dirty();
        }
    }

    fn begin_editing(&mut self, ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        let Some(shape) = ctx.drawing.get_mut(id) else {
            return;
        };
        let Shape::Stamp(stamp) = &*shape else {
            return;
        };
        self.original_image_name = stamp.image_name.clone();
        shape.set_being_edited(true);
        let overlay = EditingOverlay::for_shape(shape);
        ctx.tool_settings.select(id, overlay);
        ctx.drawing.mark_dirty();
    }

    fn finish_editing(&mut self, ctx: &mut ToolOperationContext<'_>) {
        self.commit_pending_edit(ctx);
        if let Some(id) = ctx.tool_settings.selected_shape {
            if let Some(shape) = ctx.drawing.get_mut(id) {
                shape.set_being_edited(false);
            }
        }
        ctx.tool_settings.clear_selection();
        ctx.drawing.mark_dirty();
    }

    /// If the stamp image changed since the last committed operation, notify
    /// the operation stack so undo works properly.
    fn commit_pending_edit(&mut self, ctx: &mut ToolOperationContext<'_>) {
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        let Some(Shape::Stamp(shape)) = ctx.drawing.get(id) else {
            return;
        };
        let image_name = shape.image_name.clone();
        if image_name == self.original_image_name {
            return;
        }
        let operation =
            DrawingOperation::edit_stamp(id, self.original_image_name.clone(), image_name.clone());
        if let Err(err) = ctx.apply(operation) {
            log::warn!("failed to commit stamp edit on {id}: {err}");
        }
        self.original_image_name = image_name;
    }

    fn remove_selected(&mut self, ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        if let Some(shape) = ctx.drawing.get_mut(id) {
            shape.set_being_edited(false);
        }
        match DrawingOperation::remove(ctx.drawing, id) {
            Ok(operation) => {
                if let Err(err) = ctx.apply(operation) {
                    log::warn!("failed to remove stamp shape {id}: {err}");
                }
            }
            Err(err) => log::warn!("failed to remove stamp shape {id}: {err}"),
        }
        ctx.tool_settings.clear_selection();
        ctx.drawing.mark_dirty();
    }

    fn create_shape(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let mut shape = Shape::Stamp(Default::default());
        shape.apply_settings(ctx.user_settings);
        let mut transform = shape.transform();
        transform.translation = point.to_vec2();
        shape.set_transform(transform);
        let id = shape.id();
        if let Err(err) = ctx.apply(DrawingOperation::add(shape)) {
            log::warn!("failed to add stamp shape: {err}");
            return;
        }
        self.begin_editing(ctx, id);
    }
}

impl Tool for StampTool {
    fn name(&self) -> &'static str {
        "Stamp"
    }

    fn activate(&mut self, ctx: &mut ToolOperationContext<'_>, existing_shape: Option<Uuid>) {
        if let Some(id) = existing_shape {
            self.begin_editing(ctx, id);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolOperationContext<'_>) {
        self.handler = None;
        self.finish_editing(ctx);
    }

    fn handle_tap(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(id) = ctx.tool_settings.selected_shape {
            let region = ctx
                .tool_settings
                .overlay
                .as_ref()
                .and_then(|overlay| overlay.region_at(point));
            if region == Some(OverlayRegion::Delete) {
                self.remove_selected(ctx, id);
            } else if ctx.drawing.get(id).is_some_and(|shape| shape.hit_test(point)) {
                // Tap inside the content: the host's picker owns it.
            } else {
                self.finish_editing(ctx);
            }
            return;
        }

        match ctx
            .drawing
            .shape_at_where(point, |shape| matches!(shape, Shape::Stamp(_)))
            .map(Shape::id)
        {
            Some(id) => self.begin_editing(ctx, id),
            None => self.create_shape(ctx, point),
        }
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        let Some(shape) = ctx.drawing.get(id) else {
            return;
        };
        let transform = shape.transform();
        let hit = shape.hit_test(point);
        let original_image_name = match shape {
            Shape::Stamp(stamp) => stamp.image_name.clone(),
            _ => String::new(),
        };
        let region = ctx
            .tool_settings
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.region_at(point));

        let handler = match region {
            Some(OverlayRegion::ResizeAndRotate) => Some(DragHandler::ResizeRotate(
                ResizeRotateHandler::new(id, point, transform),
            )),
            Some(OverlayRegion::ChangeImage) => Some(DragHandler::ChangeImage(
                ChangeImageHandler::new(id, original_image_name),
            )),
            _ if hit => Some(DragHandler::Move(MoveHandler::new(id, point, transform))),
            _ => None,
        };

        if handler.is_some() {
            self.commit_pending_edit(ctx);
        }
        self.handler = handler;
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
            return;
        }
        // Momentum affordance, same as the text tool.
        let region = ctx
            .tool_settings
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.region_at(point));
        if matches!(
            region,
            Some(OverlayRegion::ResizeAndRotate | OverlayRegion::ChangeImage)
        ) {
            self.handle_drag_start(ctx, point);
        }
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(mut handler) = self.handler.take() {
            handler.drag_end(ctx, point);
            // A change-image drag just committed its own swap; move the
            // baseline so finishing the edit doesn't commit it twice.
            let selected = ctx.tool_settings.selected_shape;
            if let Some(Shape::Stamp(shape)) = selected.and_then(|id| ctx.drawing.get(id)) {
                self.original_image_name = shape.image_name.clone();
            }
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
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        if let Some(shape) = ctx.drawing.get_mut(id) {
            shape.apply_settings(ctx.user_settings);
            ctx.drawing.mark_dirty();
            refresh_overlay(ctx);
        }
    }
}
