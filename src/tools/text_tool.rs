use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::handlers::{DragHandler, MoveHandler, ResizeRotateHandler};
use super::{Tool, refresh_overlay};
use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::overlay::{EditingOverlay, OverlayRegion};
use crate::shape::Shape;

/// Creates and edits text shapes.
///
/// While a shape is being edited its static render is suppressed and the
/// host shows a live text widget in the overlay; the widget streams content
/// in through [`update_text`](Self::update_text), and the accumulated change
/// is reconciled into one edit operation when editing finishes or a drag
/// takes over.
#[derive(Debug, Clone, Default)]
pub struct TextTool {
    /// Text as of the last committed operation; the baseline the pending
    /// edit is measured against.
    original_text: String,
    handler: Option<DragHandler>,
}

impl TextTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live content mutation from the host's text widget. Not undo-tracked;
    /// committed when editing finishes.
    pub fn update_text(&mut self, ctx: &mut ToolOperationContext<'_>, text: &str) {
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        if let Some(Shape::Text(shape)) = ctx.drawing.get_mut(id) {
            shape.text = text.to_owned();
            ctx.drawing.mark_dirty();
        }
    }

    fn begin_editing(&mut self, ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        let Some(shape) = ctx.drawing.get_mut(id) else {
            return;
        };
        let Shape::Text(text_shape) = &*shape else {
            return;
        };
        self.original_text = text_shape.text.clone();
        shape.set_being_edited(true);
        let overlay = EditingOverlay::for_shape(shape);
        ctx.tool_settings.select(id, overlay);
        ctx.drawing.mark_dirty();
    }

    /// Commits the pending edit so undo history stays ordered, then leaves
    /// editing.
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

    /// If the text changed since the last committed operation, notify the
    /// operation stack so undo works properly.
    fn commit_pending_edit(&mut self, ctx: &mut ToolOperationContext<'_>) {
        let Some(id) = ctx.tool_settings.selected_shape else {
            return;
        };
        let Some(Shape::Text(shape)) = ctx.drawing.get(id) else {
            return;
        };
        let text = shape.text.clone();
        if text == self.original_text {
            return;
        }
        let operation = DrawingOperation::edit_text(id, self.original_text.clone(), text.clone());
        if let Err(err) = ctx.apply(operation) {
            log::warn!("failed to commit text edit on {id}: {err}");
        }
        self.original_text = text;
    }

    fn remove_selected(&mut self, ctx: &mut ToolOperationContext<'_>, id: Uuid) {
        if let Some(shape) = ctx.drawing.get_mut(id) {
            shape.set_being_edited(false);
        }
        match DrawingOperation::remove(ctx.drawing, id) {
            Ok(operation) => {
                if let Err(err) = ctx.apply(operation) {
                    log::warn!("failed to remove text shape {id}: {err}");
                }
            }
            Err(err) => log::warn!("failed to remove text shape {id}: {err}"),
        }
        ctx.tool_settings.clear_selection();
        ctx.drawing.mark_dirty();
    }

    fn create_shape(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let mut shape = Shape::Text(Default::default());
        shape.apply_settings(ctx.user_settings);
        let mut transform = shape.transform();
        transform.translation = point.to_vec2();
        shape.set_transform(transform);
        let id = shape.id();
        if let Err(err) = ctx.apply(DrawingOperation::add(shape)) {
            log::warn!("failed to add text shape: {err}");
            return;
        }
        self.begin_editing(ctx, id);
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
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
                // Tap inside the content: the host's text widget owns the
                // caret, nothing for the engine to do.
            } else {
                self.finish_editing(ctx);
            }
            return;
        }

        match ctx
            .drawing
            .shape_at_where(point, |shape| matches!(shape, Shape::Text(_)))
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
        let region = ctx
            .tool_settings
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.region_at(point));

        let handler = if region == Some(OverlayRegion::ResizeAndRotate) {
            Some(DragHandler::ResizeRotate(ResizeRotateHandler::new(
                id, point, transform,
            )))
        } else if hit {
            Some(DragHandler::Move(MoveHandler::new(id, point, transform)))
        } else {
            None
        };

        if handler.is_some() {
            // Commit pending content changes before the transform gesture so
            // the two edits undo in the order they happened.
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
        // The pan gesture is finicky at the start; if momentum began over a
        // handle before the start event landed, start the drag now.
        let over_handle = ctx
            .tool_settings
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.region_at(point))
            == Some(OverlayRegion::ResizeAndRotate);
        if over_handle {
            self.handle_drag_start(ctx, point);
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
