use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

const SEGMENTS: usize = 64;

/// Ellipse inscribed in the rectangle spanned by two corner points.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub a: Pos2,
    pub b: Pos2,
    pub fill_color: Option<Color32>,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl EllipseShape {
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
        let rect = self.bounding_rect();
        let rx = rect.width() / 2.0 + self.stroke_width / 2.0;
        let ry = rect.height() / 2.0 + self.stroke_width / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let center = rect.center();
        let dx = (point.x - center.x) / rx;
        let dy = (point.y - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }

    fn outline(&self) -> Vec<Pos2> {
        let rect = self.bounding_rect();
        let center = rect.center();
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        (0..SEGMENTS)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / SEGMENTS as f32;
                Pos2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
            })
            .collect()
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let outline = self.outline();
        let mut scope = self.transform.begin(surface);
        if let Some(fill) = self.fill_color {
            scope.surface().fill_path(&outline, fill);
        }
        scope
            .surface()
            .stroke_path(&outline, true, self.stroke_width, self.stroke_color);
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
        self.fill_color = settings.fill_color;
    }
}
