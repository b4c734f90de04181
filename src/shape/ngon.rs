use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Ratio of a star's inner radius to its outer radius.
const STAR_INNER_RATIO: f32 = 0.5;

/// Regular polygon or star inscribed in the rectangle spanned by two corner
/// points. Triangle, pentagon and star tools all create this shape with
/// different `sides`/`star` values.
#[derive(Debug, Clone, PartialEq)]
pub struct NgonShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub a: Pos2,
    pub b: Pos2,
    pub sides: u32,
    pub star: bool,
    pub fill_color: Option<Color32>,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl NgonShape {
    pub fn new(a: Pos2, b: Pos2, sides: u32, star: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            a,
            b,
            sides: sides.max(3),
            star,
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

    /// Vertex ring, first point at twelve o'clock. Stars interleave an inner
    /// ring at half the outer radius.
    fn vertices(&self) -> Vec<Pos2> {
        let rect = self.bounding_rect();
        let center = rect.center();
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let count = if self.star { self.sides * 2 } else { self.sides };
        (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count as f32
                    - std::f32::consts::FRAC_PI_2;
                let ratio = if self.star && i % 2 == 1 {
                    STAR_INNER_RATIO
                } else {
                    1.0
                };
                Pos2::new(
                    center.x + rx * ratio * angle.cos(),
                    center.y + ry * ratio * angle.sin(),
                )
            })
            .collect()
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let vertices = self.vertices();
        let mut scope = self.transform.begin(surface);
        if let Some(fill) = self.fill_color {
            scope.surface().fill_path(&vertices, fill);
        }
        scope
            .surface()
            .stroke_path(&vertices, true, self.stroke_width, self.stroke_color);
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
        self.fill_color = settings.fill_color;
    }
}
