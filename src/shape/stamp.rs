use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Default edge length of a freshly stamped image box.
pub const DEFAULT_STAMP_SIZE: f32 = 100.0;

/// Image stamp positioned entirely by `transform.translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct StampShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub image_name: String,
    pub bounding_rect: Rect,
    /// While true the shape is shown by the host's interactive overlay and
    /// the static render pass skips it.
    pub is_being_edited: bool,
}

impl StampShape {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            image_name: String::new(),
            bounding_rect: Rect::from_center_size(
                Pos2::ZERO,
                Vec2::splat(DEFAULT_STAMP_SIZE),
            ),
            is_being_edited: false,
        }
    }

    pub fn hit_test_local(&self, point: Pos2) -> bool {
        self.bounding_rect.contains(point)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if self.is_being_edited {
            return;
        }
        let mut scope = self.transform.begin(surface);
        // A missing asset degrades to skipping this shape's output; the
        // render pass keeps going for the rest of the drawing.
        if !scope.surface().draw_image(&self.image_name, self.bounding_rect) {
            log::debug!("stamp {}: image {:?} unavailable, skipped", self.id, self.image_name);
        }
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        if !settings.stamp_image_name.is_empty() {
            self.image_name = settings.stamp_image_name.clone();
        }
    }
}

impl Default for StampShape {
    fn default() -> Self {
        Self::new()
    }
}
