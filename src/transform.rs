use egui::{Pos2, Vec2};

use crate::surface::RenderSurface;

/// Affine transform applied to a shape's local geometry: uniform scale,
/// then rotation, then translation. That order is load-bearing — it must
/// match between [`apply`](Self::apply) and [`inverse_apply`](Self::inverse_apply),
/// and between render bracketing and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTransform {
    pub translation: Vec2,
    pub scale: f32,
    /// Radians, counter-clockwise.
    pub rotation: f32,
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ShapeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns this transform translated by `delta`. The delta is added to
    /// the stored translation directly, not pre-multiplied by scale or
    /// rotation.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            translation: self.translation + delta,
            ..*self
        }
    }

    /// Returns this transform with its scale multiplied by `factor`.
    ///
    /// `scale > 0` is expected but not enforced; a non-positive factor is
    /// carried through unchanged from the input.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            scale: self.scale * factor,
            ..*self
        }
    }

    /// Returns this transform rotated by `radians`.
    pub fn rotated(&self, radians: f32) -> Self {
        Self {
            rotation: self.rotation + radians,
            ..*self
        }
    }

    /// Maps a shape-local point to canvas space: scale, rotate, translate.
    pub fn apply(&self, point: Pos2) -> Pos2 {
        let (sin, cos) = self.rotation.sin_cos();
        let x = self.scale * point.x;
        let y = self.scale * point.y;
        Pos2::new(
            x * cos - y * sin + self.translation.x,
            x * sin + y * cos + self.translation.y,
        )
    }

    /// Maps a canvas point back into shape-local space. Exact inverse of
    /// [`apply`](Self::apply) for `scale > 0`; used by hit-testing.
    pub fn inverse_apply(&self, point: Pos2) -> Pos2 {
        let (sin, cos) = self.rotation.sin_cos();
        let x = point.x - self.translation.x;
        let y = point.y - self.translation.y;
        Pos2::new(
            (x * cos + y * sin) / self.scale,
            (-x * sin + y * cos) / self.scale,
        )
    }

    /// The forward 2D affine matrix as `[a, b, c, d, tx, ty]`, where a point
    /// maps to `(a*x + c*y + tx, b*x + d*y + ty)`. Handed to the host
    /// renderer when it wants the matrix form instead of the components.
    pub fn affine_matrix(&self) -> [f32; 6] {
        let (sin, cos) = self.rotation.sin_cos();
        [
            self.scale * cos,
            self.scale * sin,
            -self.scale * sin,
            self.scale * cos,
            self.translation.x,
            self.translation.y,
        ]
    }

    /// Pushes this transform onto the surface for the duration of the
    /// returned scope. The surface's transform state is restored when the
    /// scope drops, on every exit path.
    pub fn begin<'a>(&self, surface: &'a mut dyn RenderSurface) -> TransformScope<'a> {
        surface.push_transform(self);
        TransformScope { surface }
    }
}

/// RAII bracket around a transformed render pass. See [`ShapeTransform::begin`].
pub struct TransformScope<'a> {
    surface: &'a mut dyn RenderSurface,
}

impl TransformScope<'_> {
    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        self.surface
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.surface.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Pos2, b: Pos2) {
        assert!((a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_maps_points_to_themselves() {
        let p = Pos2::new(3.5, -2.0);
        approx(ShapeTransform::IDENTITY.apply(p), p);
        approx(ShapeTransform::IDENTITY.inverse_apply(p), p);
    }

    #[test]
    fn applies_scale_then_rotation_then_translation() {
        let transform = ShapeTransform::IDENTITY
            .scaled(2.0)
            .rotated(FRAC_PI_2)
            .translated(Vec2::new(10.0, 0.0));
        // (1, 0) -> scaled (2, 0) -> rotated (0, 2) -> translated (10, 2)
        approx(transform.apply(Pos2::new(1.0, 0.0)), Pos2::new(10.0, 2.0));
    }

    #[test]
    fn inverse_round_trips() {
        let transform = ShapeTransform {
            translation: Vec2::new(-4.0, 7.5),
            scale: 0.75,
            rotation: 1.1,
        };
        let p = Pos2::new(12.0, -3.0);
        approx(transform.inverse_apply(transform.apply(p)), p);
        approx(transform.apply(transform.inverse_apply(p)), p);
    }

    #[test]
    fn translation_delta_is_not_premultiplied() {
        let transform = ShapeTransform::IDENTITY
            .scaled(3.0)
            .rotated(1.0)
            .translated(Vec2::new(1.0, 2.0))
            .translated(Vec2::new(4.0, -2.0));
        assert_eq!(transform.translation, Vec2::new(5.0, 0.0));
    }
}
