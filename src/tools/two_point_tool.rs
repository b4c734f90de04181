use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::Tool;
use crate::command::DrawingOperation;
use crate::context::ToolOperationContext;
use crate::shape::{Shape, factory};

/// Which shape the generic two-point machine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoPointKind {
    Line,
    Arrow,
    Rect,
    Ellipse,
    Ngon(u32),
    Star(u32),
}

impl TwoPointKind {
    fn make_shape(self, point: Pos2) -> Shape {
        match self {
            Self::Line => factory::line(point, point),
            Self::Arrow => factory::arrow(point, point),
            Self::Rect => factory::rect(point, point),
            Self::Ellipse => factory::ellipse(point, point),
            Self::Ngon(sides) => factory::ngon(point, point, sides),
            Self::Star(points) => factory::star(point, point, points),
        }
    }
}

/// One state machine shared by the line/arrow/rect/ellipse/polygon/star
/// tools: drag start creates the shape with zero size and pushes its add
/// operation; drag continue tracks the pointer with the second point. The
/// resize during creation is live mutation, so the add stays the sole undo
/// entry for the whole gesture.
#[derive(Debug, Clone)]
pub struct TwoPointTool {
    kind: TwoPointKind,
    in_progress: Option<Uuid>,
}

impl TwoPointTool {
    pub fn new(kind: TwoPointKind) -> Self {
        Self {
            kind,
            in_progress: None,
        }
    }

    fn set_second_point(ctx: &mut ToolOperationContext<'_>, id: Uuid, point: Pos2) {
        if let Some(shape) = ctx.drawing.get_mut(id) {
            match shape {
                Shape::Line(s) => s.b = point,
                Shape::Rect(s) => s.b = point,
                Shape::Ellipse(s) => s.b = point,
                Shape::Ngon(s) => s.b = point,
                _ => {}
            }
            ctx.drawing.mark_dirty();
        }
    }
}

impl Tool for TwoPointTool {
    fn name(&self) -> &'static str {
        match self.kind {
            TwoPointKind::Line => "Line",
            TwoPointKind::Arrow => "Arrow",
            TwoPointKind::Rect => "Rectangle",
            TwoPointKind::Ellipse => "Ellipse",
            TwoPointKind::Ngon(_) => "Polygon",
            TwoPointKind::Star(_) => "Star",
        }
    }

    fn deactivate(&mut self, _ctx: &mut ToolOperationContext<'_>) {
        self.in_progress = None;
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let mut shape = self.kind.make_shape(point);
        shape.apply_settings(ctx.user_settings);
        let id = shape.id();
        if ctx.apply(DrawingOperation::add(shape)).is_ok() {
            self.in_progress = Some(id);
        }
    }

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Pos2,
        _velocity: Vec2,
    ) {
        if let Some(id) = self.in_progress {
            Self::set_second_point(ctx, id, point);
        }
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(id) = self.in_progress.take() {
            Self::set_second_point(ctx, id, point);
        }
    }

    fn handle_drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>, _point: Pos2) {
        if self.in_progress.take().is_some() {
            // The add pushed at drag start is the gesture's only footprint;
            // cancelling unwinds it without leaving a redo entry.
            if let Err(err) = ctx.operation_stack.cancel_last(ctx.drawing) {
                log::warn!("failed to unwind cancelled shape creation: {err}");
            }
        }
    }
}

/// Freehand tool: same creation machine as [`TwoPointTool`] but the gesture
/// appends pointer samples instead of moving a second corner.
#[derive(Debug, Clone)]
pub struct FreehandTool {
    in_progress: Option<Uuid>,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self { in_progress: None }
    }
}

impl Default for FreehandTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for FreehandTool {
    fn name(&self) -> &'static str {
        "Freehand"
    }

    fn deactivate(&mut self, _ctx: &mut ToolOperationContext<'_>) {
        self.in_progress = None;
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        let mut shape = factory::freehand(point);
        shape.apply_settings(ctx.user_settings);
        let id = shape.id();
        if ctx.apply(DrawingOperation::add(shape)).is_ok() {
            self.in_progress = Some(id);
        }
    }

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Pos2,
        _velocity: Vec2,
    ) {
        let Some(id) = self.in_progress else { return };
        if let Some(Shape::Freehand(shape)) = ctx.drawing.get_mut(id) {
            shape.add_point(point);
            ctx.drawing.mark_dirty();
        }
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Pos2) {
        if let Some(id) = self.in_progress.take() {
            if let Some(Shape::Freehand(shape)) = ctx.drawing.get_mut(id) {
                shape.add_point(point);
                ctx.drawing.mark_dirty();
            }
        }
    }

    fn handle_drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>, _point: Pos2) {
        if self.in_progress.take().is_some() {
            if let Err(err) = ctx.operation_stack.cancel_last(ctx.drawing) {
                log::warn!("failed to unwind cancelled freehand stroke: {err}");
            }
        }
    }
}
