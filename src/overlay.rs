use egui::Pos2;

use crate::shape::Shape;

/// Radius around an overlay handle within which a pointer event counts as
/// hitting that handle.
pub const HANDLE_HIT_RADIUS: f32 = 15.0;

/// Interactive hit-regions of the host-drawn editing overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRegion {
    /// Delete button; a tap here removes the shape.
    Delete,
    /// Resize-and-rotate handle; a drag from here scales and spins the shape.
    ResizeAndRotate,
    /// Stamp-only handle; a drag from here swaps the stamp image.
    ChangeImage,
}

/// Hit-testing model of the editing overlay shown while a shape is selected.
///
/// The engine only classifies pointer positions against handle anchors; the
/// host is responsible for rendering the controls at these positions.
#[derive(Debug, Clone)]
pub struct EditingOverlay {
    delete_anchor: Pos2,
    resize_anchor: Pos2,
    change_image_anchor: Option<Pos2>,
}

impl EditingOverlay {
    /// Builds the overlay for `shape` from its transformed bounding rect:
    /// delete at the top-left corner, resize-and-rotate at the bottom-right,
    /// change-image (stamps only) at the top-right.
    pub fn for_shape(shape: &Shape) -> Self {
        let rect = shape.bounding_rect();
        let transform = shape.transform();
        Self {
            delete_anchor: transform.apply(rect.left_top()),
            resize_anchor: transform.apply(rect.right_bottom()),
            change_image_anchor: matches!(shape, Shape::Stamp(_))
                .then(|| transform.apply(rect.right_top())),
        }
    }

    /// Where the host should center the delete control.
    pub fn delete_anchor(&self) -> Pos2 {
        self.delete_anchor
    }

    /// Where the host should center the resize-and-rotate control.
    pub fn resize_anchor(&self) -> Pos2 {
        self.resize_anchor
    }

    /// Where the host should center the change-image control, if any.
    pub fn change_image_anchor(&self) -> Option<Pos2> {
        self.change_image_anchor
    }

    /// Classifies a pointer position against the overlay's handles. Handle
    /// order matters: delete wins over resize when the shape is tiny enough
    /// for the regions to overlap.
    pub fn region_at(&self, point: Pos2) -> Option<OverlayRegion> {
        if point.distance(self.delete_anchor) <= HANDLE_HIT_RADIUS {
            return Some(OverlayRegion::Delete);
        }
        if point.distance(self.resize_anchor) <= HANDLE_HIT_RADIUS {
            return Some(OverlayRegion::ResizeAndRotate);
        }
        if let Some(anchor) = self.change_image_anchor {
            if point.distance(anchor) <= HANDLE_HIT_RADIUS {
                return Some(OverlayRegion::ChangeImage);
            }
        }
        None
    }
}
