use egui::{Color32, Pos2, Rect, Vec2};
use uuid::Uuid;

use super::common;
use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Straight line between two local-space endpoints, with an optional
/// standard arrowhead at the second endpoint. The arrow tool produces a
/// `LineShape` with `arrow: true`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub a: Pos2,
    pub b: Pos2,
    pub arrow: bool,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl LineShape {
    pub fn new(a: Pos2, b: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            a,
            b,
            arrow: false,
            stroke_color: Color32::BLACK,
            stroke_width: 4.0,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        common::calculate_bounds(&[self.a, self.b], self.stroke_width / 2.0)
    }

    pub fn hit_test_local(&self, point: Pos2) -> bool {
        common::distance_to_line_segment(point, self.a, self.b)
            <= self.stroke_width / 2.0 + common::HIT_SLOP
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let mut scope = self.transform.begin(surface);
        scope
            .surface()
            .stroke_path(&[self.a, self.b], false, self.stroke_width, self.stroke_color);
        if self.arrow {
            if let Some(head) = self.arrowhead() {
                scope.surface().fill_path(&head, self.stroke_color);
            }
        }
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
    }

    /// Triangular arrowhead at `b`, sized from the stroke width. `None` for
    /// a zero-length line, which has no direction to point in.
    fn arrowhead(&self) -> Option<[Pos2; 3]> {
        let dir = self.b - self.a;
        if dir.length() == 0.0 {
            return None;
        }
        let dir = dir.normalized();
        let length = (self.stroke_width * 3.0).max(8.0);
        let half_width = length * 0.5;
        let back = self.b - dir * length;
        let normal = Vec2::new(-dir.y, dir.x);
        Some([
            self.b,
            back + normal * half_width,
            back - normal * half_width,
        ])
    }
}
