use egui::{Color32, Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::settings::UserSettings;
use crate::surface::RenderSurface;
use crate::transform::ShapeTransform;

/// Text block positioned entirely by `transform.translation`; the bounding
/// rect is centered on the local origin and sized by the host's text layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub id: Uuid,
    pub transform: ShapeTransform,
    pub text: String,
    pub font_name: String,
    pub font_size: f32,
    pub fill_color: Color32,
    /// Set when the user drags the text box to an exact width; the host
    /// respects it instead of sizing the box to fit the text.
    pub explicit_width: Option<f32>,
    pub bounding_rect: Rect,
    /// While true the shape is shown by the host's text-editing widget and
    /// the static render pass skips it.
    pub is_being_edited: bool,
}

impl TextShape {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: ShapeTransform::IDENTITY,
            text: String::new(),
            font_name: "Helvetica Neue".to_owned(),
            font_size: 24.0,
            fill_color: Color32::BLACK,
            explicit_width: None,
            bounding_rect: Rect::from_center_size(Pos2::ZERO, Vec2::new(100.0, 40.0)),
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
        scope.surface().draw_text(
            &self.text,
            self.bounding_rect,
            &self.font_name,
            self.font_size,
            self.fill_color,
        );
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.fill_color = settings.stroke_color;
        self.font_name = settings.font_name.clone();
        self.font_size = settings.font_size;
    }
}

impl Default for TextShape {
    fn default() -> Self {
        Self::new()
    }
}
