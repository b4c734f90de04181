use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use super::common;
use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Freehand stroke: a polyline of pointer samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub points: Vec<Pos2>,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl FreehandShape {
    pub fn new(start: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            points: vec![start],
            stroke_color: Color32::BLACK,
            stroke_width: 4.0,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn bounding_rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.stroke_width / 2.0)
    }

    pub fn hit_test_local(&self, point: Pos2) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let tolerance = self.stroke_width / 2.0 + common::HIT_SLOP;
        self.points
            .windows(2)
            .any(|pair| common::distance_to_line_segment(point, pair[0], pair[1]) <= tolerance)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if self.points.len() < 2 {
            return;
        }
        let mut scope = self.transform.begin(surface);
        scope
            .surface()
            .stroke_path(&self.points, false, self.stroke_width, self.stroke_color);
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
    }
}
