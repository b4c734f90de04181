use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Axis-aligned (in local space) rectangle spanned by two corner points.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub a: Pos2,
    pub b: Pos2,
    pub fill_color: Option<Color32>,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl RectShape {
    pub fn new(a: Pos2, b: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            a,
            b,
            fill_color: None,
            stroke_color: Color32::BLACK,
            stroke_width: 4.0,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_two_pos(self.a, self.b)
    }

    pub fn hit_test_local(&self, point: Pos2) -> bool {
        self.bounding_rect()
            .expand(self.stroke_width / 2.0)
            .contains(point)
    }

    fn corners(&self) -> [Pos2; 4] {
        let rect = self.bounding_rect();
        [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let corners = self.corners();
        let mut scope = self.transform.begin(surface);
        if let Some(fill) = self.fill_color {
            scope.surface().fill_path(&corners, fill);
        }
        scope
            .surface()
            .stroke_path(&corners, true, self.stroke_width, self.stroke_color);
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
        self.fill_color = settings.fill_color;
    }
}
