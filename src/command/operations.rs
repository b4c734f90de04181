use uuid::Uuid;

use super::OperationStack;
use crate::drawing::Drawing;
use crate::error::{EngineError, EngineResult};
use crate::shape::Shape;
use crate::transform::ShapeTransform;

/// Reversible commands mutating the [`Drawing`], tracked by the
/// [`OperationStack`].
///
/// Operations are immutable once constructed; "before" state (original
/// transform, original text, removal index) is captured at construction
/// time. Shapes are correlated by id lookup into the drawing, so a stale
/// operation fails with [`EngineError::ShapeNotFound`] instead of touching
/// the wrong shape.
#[derive(Debug, Clone)]
pub enum DrawingOperation {
    /// Add a shape at the top of the z-order; revert removes it.
    AddShape { shape: Shape },

    /// Remove a shape; revert re-inserts it at its original z-order index.
    RemoveShape { shape: Shape, index: usize },

    /// Swap a shape's transform; constructed by drag handlers with both the
    /// final and the originally captured transform.
    ChangeTransform {
        shape_id: Uuid,
        transform: ShapeTransform,
        original_transform: ShapeTransform,
    },

    /// Swap a text shape's content.
    EditText {
        shape_id: Uuid,
        original_text: String,
        text: String,
    },

    /// Swap a stamp shape's image.
    EditStamp {
        shape_id: Uuid,
        original_image_name: String,
        image_name: String,
    },
}

impl DrawingOperation {
    pub fn add(shape: Shape) -> Self {
        Self::AddShape { shape }
    }

    /// Captures the shape and its current z-order index so the removal can
    /// be reverted position-preserving.
    pub fn remove(drawing: &Drawing, shape_id: Uuid) -> EngineResult<Self> {
        let index = drawing
            .index_of(shape_id)
            .ok_or(EngineError::ShapeNotFound(shape_id))?;
        let shape = drawing.shapes()[index].clone();
        Ok(Self::RemoveShape { shape, index })
    }

    pub fn change_transform(
        shape_id: Uuid,
        transform: ShapeTransform,
        original_transform: ShapeTransform,
    ) -> Self {
        Self::ChangeTransform {
            shape_id,
            transform,
            original_transform,
        }
    }

    pub fn edit_text(shape_id: Uuid, original_text: String, text: String) -> Self {
        Self::EditText {
            shape_id,
            original_text,
            text,
        }
    }

    pub fn edit_stamp(shape_id: Uuid, original_image_name: String, image_name: String) -> Self {
        Self::EditStamp {
            shape_id,
            original_image_name,
            image_name,
        }
    }

    /// Coalescing predicate, consulted exactly once, when the operation is
    /// first applied (never on undo/redo).
    ///
    /// An edit whose *original* value was empty, arriving right after the
    /// add of the same shape, declines to be recorded: it sets the content
    /// directly (both on the live shape and on the add operation's stored
    /// copy) so the add alone carries the final value. Undoing then removes
    /// the shape in one step instead of reverting to a pointless empty
    /// intermediate.
    pub(super) fn should_add(&self, stack: &mut OperationStack, drawing: &mut Drawing) -> bool {
        match self {
            Self::EditText {
                shape_id,
                original_text,
                text,
            } => {
                if !original_text.is_empty() {
                    return true;
                }
                !coalesce_into_pending_add(stack, drawing, *shape_id, |shape| {
                    if let Shape::Text(s) = shape {
                        s.text = text.clone();
                    }
                })
            }
            Self::EditStamp {
                shape_id,
                original_image_name,
                image_name,
            } => {
                if !original_image_name.is_empty() {
                    return true;
                }
                !coalesce_into_pending_add(stack, drawing, *shape_id, |shape| {
                    if let Shape::Stamp(s) = shape {
                        s.image_name = image_name.clone();
                    }
                })
            }
            _ => true,
        }
    }

    pub fn apply(&self, drawing: &mut Drawing) -> EngineResult {
        match self {
            Self::AddShape { shape } => {
                drawing.add(shape.clone());
                Ok(())
            }
            Self::RemoveShape { shape, .. } => {
                drawing
                    .remove(shape.id())
                    .ok_or(EngineError::ShapeNotFound(shape.id()))?;
                Ok(())
            }
            Self::ChangeTransform {
                shape_id,
                transform,
                ..
            } => {
                let shape = drawing
                    .get_mut(*shape_id)
                    .ok_or(EngineError::ShapeNotFound(*shape_id))?;
                shape.set_transform(*transform);
                drawing.mark_dirty();
                Ok(())
            }
            Self::EditText { shape_id, text, .. } => {
                set_text(drawing, *shape_id, text)
            }
            Self::EditStamp {
                shape_id,
                image_name,
                ..
            } => set_image(drawing, *shape_id, image_name),
        }
    }

    pub fn revert(&self, drawing: &mut Drawing) -> EngineResult {
        match self {
            Self::AddShape { shape } => {
                drawing
                    .remove(shape.id())
                    .ok_or(EngineError::ShapeNotFound(shape.id()))?;
                Ok(())
            }
            Self::RemoveShape { shape, index } => {
                drawing.insert(*index, shape.clone());
                Ok(())
            }
            Self::ChangeTransform {
                shape_id,
                original_transform,
                ..
            } => {
                let shape = drawing
                    .get_mut(*shape_id)
                    .ok_or(EngineError::ShapeNotFound(*shape_id))?;
                shape.set_transform(*original_transform);
                drawing.mark_dirty();
                Ok(())
            }
            Self::EditText {
                shape_id,
                original_text,
                ..
            } => set_text(drawing, *shape_id, original_text),
            Self::EditStamp {
                shape_id,
                original_image_name,
                ..
            } => set_image(drawing, *shape_id, original_image_name),
        }
    }
}

/// If the most recent undo entry is an add of `shape_id`, writes the final
/// content through `set_content` on both the live shape and the add's stored
/// copy, and returns true. The stored copy matters for redo: the re-added
/// shape must carry the final content, not the empty value it was created
/// with.
fn coalesce_into_pending_add(
    stack: &mut OperationStack,
    drawing: &mut Drawing,
    shape_id: Uuid,
    set_content: impl Fn(&mut Shape),
) -> bool {
    match stack.undo_stack.last_mut() {
        Some(DrawingOperation::AddShape { shape }) if shape.id() == shape_id => {
            set_content(shape);
            if let Some(live) = drawing.get_mut(shape_id) {
                set_content(live);
            }
            drawing.mark_dirty();
            true
        }
        _ => false,
    }
}

fn set_text(drawing: &mut Drawing, shape_id: Uuid, text: &str) -> EngineResult {
    match drawing.get_mut(shape_id) {
        Some(Shape::Text(shape)) => {
            shape.text = text.to_owned();
            drawing.mark_dirty();
            Ok(())
        }
        Some(_) => {
            log::warn!("edit-text operation targeted non-text shape {shape_id}");
            Ok(())
        }
        None => Err(EngineError::ShapeNotFound(shape_id)),
    }
}

fn set_image(drawing: &mut Drawing, shape_id: Uuid, image_name: &str) -> EngineResult {
    match drawing.get_mut(shape_id) {
        Some(Shape::Stamp(shape)) => {
            shape.image_name = image_name.to_owned();
            drawing.mark_dirty();
            Ok(())
        }
        Some(_) => {
            log::warn!("edit-stamp operation targeted non-stamp shape {shape_id}");
            Ok(())
        }
        None => Err(EngineError::ShapeNotFound(shape_id)),
    }
}
