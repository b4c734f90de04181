use egui::Pos2;
use uuid::Uuid;

use crate::shape::Shape;
use crate::surface::RenderSurface;

/// Ordered shape list owned by the editor session, plus the flag telling the
/// host its cached raster output is stale.
///
/// Shapes are added and removed only through operations routed via the
/// [`OperationStack`](crate::OperationStack); the one sanctioned exception is
/// a drag handler mutating a shape's transform live, which is reconciled into
/// an operation at gesture end.
#[derive(Debug, Default)]
pub struct Drawing {
    shapes: Vec<Shape>,
    is_persistent_buffer_dirty: bool,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Appends a shape at the top of the z-order.
    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.mark_dirty();
    }

    /// Re-inserts a shape at a specific z-order index. Used by undo of a
    /// remove so the shape returns to its original position, not the top.
    pub fn insert(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
        self.mark_dirty();
    }

    /// Removes a shape by id, returning its former z-order index alongside
    /// it so the removal can be reverted position-preserving.
    pub fn remove(&mut self, id: Uuid) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        self.mark_dirty();
        Some((index, self.shapes.remove(index)))
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    /// Topmost shape hit by `point`, if any.
    pub fn shape_at(&self, point: Pos2) -> Option<&Shape> {
        self.shapes.iter().rev().find(|shape| shape.hit_test(point))
    }

    /// Topmost shape at `point` matching `predicate` (e.g. only text shapes
    /// when the text tool is looking for something to re-select).
    pub fn shape_at_where(
        &self,
        point: Pos2,
        predicate: impl Fn(&Shape) -> bool,
    ) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| predicate(shape) && shape.hit_test(point))
    }

    /// Static render pass: draws every shape in z-order. Shapes flagged as
    /// being edited skip themselves (their live representation belongs to
    /// the interactive overlay).
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        for shape in &self.shapes {
            shape.render(surface);
        }
    }

    /// Signals the host that cached raster output is stale.
    pub fn mark_dirty(&mut self) {
        self.is_persistent_buffer_dirty = true;
    }

    /// Reads and clears the dirty flag; the host calls this once per frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.is_persistent_buffer_dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.is_persistent_buffer_dirty
    }
}
