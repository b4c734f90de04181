use egui::{Pos2, Rect};
use uuid::Uuid;

mod common;
pub mod ellipse;
pub mod freehand;
pub mod line;
pub mod ngon;
pub mod rect;
pub mod selection;
pub mod stamp;
pub mod text;

pub use ellipse::EllipseShape;
pub use freehand::FreehandShape;
pub use line::LineShape;
pub use ngon::NgonShape;
pub use rect::RectShape;
pub use selection::SelectionShape;
pub use stamp::{DEFAULT_STAMP_SIZE, StampShape};
pub use text::TextShape;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Closed set of shape variants owned by a [`Drawing`](crate::Drawing).
///
/// Every variant owns a stable id, a [`ShapeTransform`] and bounding
/// geometry, and answers the `render` / `hit_test` / `apply_settings`
/// contract; dispatch is a `match` per method rather than a trait object so
/// shapes stay plain cloneable data.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Rect(RectShape),
    Ellipse(EllipseShape),
    Ngon(NgonShape),
    Freehand(FreehandShape),
    Text(TextShape),
    Stamp(StampShape),
    Selection(SelectionShape),
}

impl Shape {
    /// Stable for the shape's lifetime; the only field operations use to
    /// correlate a shape across apply/revert cycles.
    pub fn id(&self) -> Uuid {
        match self {
            Shape::Line(s) => s.id,
            Shape::Rect(s) => s.id,
            Shape::Ellipse(s) => s.id,
            Shape::Ngon(s) => s.id,
            Shape::Freehand(s) => s.id,
            Shape::Text(s) => s.id,
            Shape::Stamp(s) => s.id,
            Shape::Selection(s) => s.id,
        }
    }

    /// Persisted `type` discriminator for this variant.
    pub fn shape_type(&self) -> &'static str {
        match self {
            Shape::Line(_) => "Line",
            Shape::Rect(_) => "Rect",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Ngon(_) => "Ngon",
            Shape::Freehand(_) => "Freehand",
            Shape::Text(_) => "Text",
            Shape::Stamp(_) => "Stamp",
            Shape::Selection(_) => "Selection",
        }
    }

    pub fn transform(&self) -> ShapeTransform {
        match self {
            Shape::Line(s) => s.transform,
            Shape::Rect(s) => s.transform,
            Shape::Ellipse(s) => s.transform,
            Shape::Ngon(s) => s.transform,
            Shape::Freehand(s) => s.transform,
            Shape::Text(s) => s.transform,
            Shape::Stamp(s) => s.transform,
            Shape::Selection(s) => s.transform,
        }
    }

    pub fn set_transform(&mut self, transform: ShapeTransform) {
        match self {
            Shape::Line(s) => s.transform = transform,
            Shape::Rect(s) => s.transform = transform,
            Shape::Ellipse(s) => s.transform = transform,
            Shape::Ngon(s) => s.transform = transform,
            Shape::Freehand(s) => s.transform = transform,
            Shape::Text(s) => s.transform = transform,
            Shape::Stamp(s) => s.transform = transform,
            Shape::Selection(s) => s.transform = transform,
        }
    }

    /// Local-space bounding rectangle, before the transform is applied.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounding_rect(),
            Shape::Rect(s) => s.bounding_rect(),
            Shape::Ellipse(s) => s.bounding_rect(),
            Shape::Ngon(s) => s.bounding_rect(),
            Shape::Freehand(s) => s.bounding_rect(),
            Shape::Text(s) => s.bounding_rect,
            Shape::Stamp(s) => s.bounding_rect,
            Shape::Selection(s) => s.rect,
        }
    }

    /// Whether a canvas-space point hits this shape: the point is mapped
    /// into local space through the inverse transform and tested against
    /// the variant's local geometry.
    pub fn hit_test(&self, point: Pos2) -> bool {
        let local = self.transform().inverse_apply(point);
        match self {
            Shape::Line(s) => s.hit_test_local(local),
            Shape::Rect(s) => s.hit_test_local(local),
            Shape::Ellipse(s) => s.hit_test_local(local),
            Shape::Ngon(s) => s.hit_test_local(local),
            Shape::Freehand(s) => s.hit_test_local(local),
            Shape::Text(s) => s.hit_test_local(local),
            Shape::Stamp(s) => s.hit_test_local(local),
            Shape::Selection(s) => s.hit_test_local(local),
        }
    }

    /// Draws the shape into the surface. A no-op for a shape that is
    /// currently being edited; its live representation is drawn by the
    /// interactive overlay instead, never both.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        match self {
            Shape::Line(s) => s.render(surface),
            Shape::Rect(s) => s.render(surface),
            Shape::Ellipse(s) => s.render(surface),
            Shape::Ngon(s) => s.render(surface),
            Shape::Freehand(s) => s.render(surface),
            Shape::Text(s) => s.render(surface),
            Shape::Stamp(s) => s.render(surface),
            Shape::Selection(s) => s.render(surface),
        }
    }

    /// Copies the ambient user style onto the shape.
    pub fn apply_settings(&mut self, settings: &UserSettings) {
        match self {
            Shape::Line(s) => s.apply_settings(settings),
            Shape::Rect(s) => s.apply_settings(settings),
            Shape::Ellipse(s) => s.apply_settings(settings),
            Shape::Ngon(s) => s.apply_settings(settings),
            Shape::Freehand(s) => s.apply_settings(settings),
            Shape::Text(s) => s.apply_settings(settings),
            Shape::Stamp(s) => s.apply_settings(settings),
            Shape::Selection(_) => {}
        }
    }

    pub fn is_being_edited(&self) -> bool {
        match self {
            Shape::Text(s) => s.is_being_edited,
            Shape::Stamp(s) => s.is_being_edited,
            _ => false,
        }
    }

    pub fn set_being_edited(&mut self, editing: bool) {
        match self {
            Shape::Text(s) => s.is_being_edited = editing,
            Shape::Stamp(s) => s.is_being_edited = editing,
            _ => {}
        }
    }
}

/// Factory functions for creating shapes
pub mod factory {
    use super::*;

    pub fn line(a: Pos2, b: Pos2) -> Shape {
        Shape::Line(LineShape::new(a, b))
    }

    pub fn arrow(a: Pos2, b: Pos2) -> Shape {
        let mut shape = LineShape::new(a, b);
        shape.arrow = true;
        Shape::Line(shape)
    }

    pub fn rect(a: Pos2, b: Pos2) -> Shape {
        Shape::Rect(RectShape::new(a, b))
    }

    pub fn ellipse(a: Pos2, b: Pos2) -> Shape {
        Shape::Ellipse(EllipseShape::new(a, b))
    }

    pub fn ngon(a: Pos2, b: Pos2, sides: u32) -> Shape {
        Shape::Ngon(NgonShape::new(a, b, sides, false))
    }

    pub fn star(a: Pos2, b: Pos2, points: u32) -> Shape {
        Shape::Ngon(NgonShape::new(a, b, points, true))
    }

    pub fn freehand(start: Pos2) -> Shape {
        Shape::Freehand(FreehandShape::new(start))
    }

    pub fn text() -> Shape {
        Shape::Text(TextShape::new())
    }

    pub fn stamp() -> Shape {
        Shape::Stamp(StampShape::new())
    }
}
