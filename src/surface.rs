use egui::{Color32, Pos2, Rect};

use crate::transform::ShapeTransform;

/// Opaque drawing surface the host hands to [`Shape::render`](crate::Shape::render).
///
/// The engine draws only through these primitives; concrete rendering
/// backends (egui painter, raster canvas, SVG writer, ...) live in the host.
/// Pushed transforms nest: a point passed to a drawing primitive is in the
/// local space of the most recently pushed, not-yet-popped transform.
pub trait RenderSurface {
    fn push_transform(&mut self, transform: &ShapeTransform);
    fn pop_transform(&mut self);

    /// Stroke an open or closed polyline.
    fn stroke_path(&mut self, points: &[Pos2], closed: bool, width: f32, color: Color32);

    /// Fill a closed polygon.
    fn fill_path(&mut self, points: &[Pos2], color: Color32);

    /// Lay out and draw text inside `rect`.
    fn draw_text(&mut self, text: &str, rect: Rect, font_name: &str, font_size: f32, color: Color32);

    /// Draw a named image asset into `rect`. Returns `false` when the asset
    /// is unavailable; the caller skips that shape's visual output and the
    /// render pass continues.
    fn draw_image(&mut self, image_name: &str, rect: Rect) -> bool;
}
