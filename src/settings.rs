use egui::Color32;
use uuid::Uuid;

use crate::overlay::EditingOverlay;

/// Ambient style settings chosen by the user. Tools copy these onto shapes
/// at creation time and again when the settings change while a shape is
/// selected for editing.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub stroke_color: Color32,
    pub fill_color: Option<Color32>,
    pub stroke_width: f32,
    pub font_name: String,
    pub font_size: f32,
    /// Asset name stamped by the stamp tool.
    pub stamp_image_name: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            fill_color: None,
            stroke_width: 4.0,
            font_name: "Helvetica Neue".to_owned(),
            font_size: 24.0,
            stamp_image_name: String::new(),
        }
    }
}

/// Mutable state shared between the active tool and the host: which shape is
/// selected, and the interactive overlay the host should draw for it.
///
/// The selected shape is a non-owning id into the [`Drawing`](crate::Drawing);
/// a stale id resolves to a checked lookup failure, never a dangling access.
#[derive(Debug, Clone, Default)]
pub struct ToolSettings {
    pub selected_shape: Option<Uuid>,
    pub overlay: Option<EditingOverlay>,
}

impl ToolSettings {
    /// Select `shape` and attach its editing overlay.
    pub fn select(&mut self, shape: Uuid, overlay: EditingOverlay) {
        self.selected_shape = Some(shape);
        self.overlay = Some(overlay);
    }

    /// Drop the selection and its overlay.
    pub fn clear_selection(&mut self) {
        self.selected_shape = None;
        self.overlay = None;
    }
}
