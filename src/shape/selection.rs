use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Selection indicator drawn around the shape currently being edited.
/// Host-facing only: never persisted and never part of undo history.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub rect: Rect,
}

impl SelectionShape {
    pub fn around(rect: Rect, transform: ShapeTransform) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform,
            rect: rect.expand(4.0),
        }
    }

    pub fn hit_test_local(&self, point: Pos2) -> bool {
        self.rect.contains(point)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let corners = [
            self.rect.left_top(),
            self.rect.right_top(),
            self.rect.right_bottom(),
            self.rect.left_bottom(),
        ];
        let mut scope = self.transform.begin(surface);
        scope
            .surface()
            .stroke_path(&corners, true, 1.0, Color32::from_rgb(0x3d, 0x7e, 0xff));
    }
}
