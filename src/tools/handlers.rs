use egui::{Pos2, Vec2};
use uuid::Uuid;

use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::transform::ShapeTransform;

/// Per-gesture strategy translating continuous pointer motion into live
/// shape mutation and one committed operation at the end.
///
/// A handler is created at drag start and owned by the active tool until the
/// gesture ends or cancels. Live updates write the shape's transform
/// directly (transient, not undo-tracked); `drag_end` reconciles the gesture
/// into a single `ChangeTransform` (or `EditStamp`) operation and
/// `drag_cancel` restores the transform captured at drag start.
#[derive(Debug, Clone)]
pub enum DragHandler {
    Move(MoveHandler),
    ResizeRotate(ResizeRotateHandler),
    ChangeImage(ChangeImageHandler),
}

impl DragHandler {
    pub fn shape_id(&self) -> Uuid {
        match self {
            Self::Move(h) => h.shape_id,
            Self::ResizeRotate(h) => h.shape_id,
            Self::ChangeImage(h) => h.shape_id,
        }
    }

    pub fn drag_continue(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2, velocity: Vec2) {
        let _ = velocity;
        match self {
            Self::Move(h) => h.drag_continue(ctx, point),
            Self::ResizeRotate(h) => h.drag_continue(ctx, point),
            Self::ChangeImage(_) => {}
        }
    }

    pub fn drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        match self {
            Self::Move(h) => h.drag_end(ctx, point),
            Self::ResizeRotate(h) => h.drag_end(ctx, point),
            Self::ChangeImage(h) => h.drag_end(ctx),
        }
    }

    pub fn drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>) {
        match self {
            Self::Move(h) => h.drag_cancel(ctx),
            Self::ResizeRotate(h) => h.drag_cancel(ctx),
            Self::ChangeImage(_) => {}
        }
    }
}

/// User is dragging the shape itself to a new location.
#[derive(Debug, Clone)]
pub struct MoveHandler {
    shape_id: Uuid,
    start_point: Pos2,
    original_transform: ShapeTransform,
}

impl MoveHandler {
    pub fn new(shape_id: Uuid, start_point: Pos2, original_transform: ShapeTransform) -> Self {
        Self {
            shape_id,
            start_point,
            original_transform,
        }
    }

    fn moved_transform(&self, point: Pos2) -> ShapeTransform {
        self.original_transform.translated(point - self.start_point)
    }

    fn drag_continue(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let transform = self.moved_transform(point);
        if let Some(shape) = ctx.drawing.get_mut(self.shape_id) {
            shape.set_transform(transform);
            ctx.drawing.mark_dirty();
        }
    }

    fn drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let result = ctx.apply(DrawingOperation::change_transform(
            self.shape_id,
            self.moved_transform(point),
            self.original_transform,
        ));
        if let Err(err) = result {
            log::warn!("move gesture could not be committed: {err}");
        }
    }

    fn drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>) {
        if let Some(shape) = ctx.drawing.get_mut(self.shape_id) {
            shape.set_transform(self.original_transform);
            ctx.drawing.mark_dirty();
        }
    }
}

/// User is dragging the corner handle to change the shape's size and
/// rotation around its translation point.
#[derive(Debug, Clone)]
pub struct ResizeRotateHandler {
    shape_id: Uuid,
    start_point: Pos2,
    original_transform: ShapeTransform,
}

impl ResizeRotateHandler {
    pub fn new(shape_id: Uuid, start_point: Pos2, original_transform: ShapeTransform) -> Self {
        Self {
            shape_id,
            start_point,
            original_transform,
        }
    }

    /// Transform for the pointer at `point`: scale by the ratio of the new
    /// and original distances from the shape's translation, rotate by the
    /// angle between them.
    ///
    /// Returns `None` when the original distance is zero — the reference
    /// vector has no length or direction, so the update is treated as a
    /// no-op instead of dividing by zero.
    fn resized_transform(&self, ctx: &ToolOperationContext<'_>, point: Pos2) -> Option<ShapeTransform> {
        let translation = ctx.drawing.get(self.shape_id)?.transform().translation;
        let original_delta = self.start_point - translation.to_pos2();
        let new_delta = point - translation.to_pos2();
        let original_distance = original_delta.length();
        if original_distance == 0.0 {
            return None;
        }
        let scale_change = new_delta.length() / original_distance;
        let angle_change =
            new_delta.y.atan2(new_delta.x) - original_delta.y.atan2(original_delta.x);
        Some(
            self.original_transform
                .scaled(scale_change)
                .rotated(angle_change),
        )
    }

    fn drag_continue(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(transform) = self.resized_transform(ctx, point) {
            if let Some(shape) = ctx.drawing.get_mut(self.shape_id) {
                shape.set_transform(transform);
                ctx.drawing.mark_dirty();
            }
        }
    }

    fn drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        // Degenerate gesture: nothing moved, nothing to record.
        let Some(transform) = self.resized_transform(ctx, point) else {
            return;
        };
        let result = ctx.apply(DrawingOperation::change_transform(
            self.shape_id,
            transform,
            self.original_transform,
        ));
        if let Err(err) = result {
            log::warn!("resize-rotate gesture could not be committed: {err}");
        }
    }

    fn drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>) {
        if let Some(shape) = ctx.drawing.get_mut(self.shape_id) {
            shape.set_transform(self.original_transform);
            ctx.drawing.mark_dirty();
        }
    }
}

/// User is dragging the change-image handle of a stamp; releasing swaps the
/// stamp to the image currently picked in the user settings.
#[derive(Debug, Clone)]
pub struct ChangeImageHandler {
    shape_id: Uuid,
    original_image_name: String,
}

impl ChangeImageHandler {
    pub fn new(shape_id: Uuid, original_image_name: String) -> Self {
        Self {
            shape_id,
            original_image_name,
        }
    }

    fn drag_end(&mut self, ctx: &mut ToolOperationContext<'_>) {
        let image_name = ctx.user_settings.stamp_image_name.clone();
        if image_name == self.original_image_name {
            return;
        }
        let result = ctx.apply(DrawingOperation::edit_stamp(
            self.shape_id,
            self.original_image_name.clone(),
            image_name,
        ));
        if let Err(err) = result {
            log::warn!("change-image gesture could not be committed: {err}");
        }
    }
}
