//! Transform constructors and the [`Transformable`] trait.
//!
//! SVG exposes three transform functions the importer honours:
//! - `matrix(a, b, c, d, e, f)` maps to [`from_svg_matrix`]
//! - `translate(tx [ty])` maps to [`translation`]
//! - `scale(sx [sy])` maps to [`scaling`]
//!
//! [`mirror_z`] and [`normalization`] build the final placement of an
//! imported drawing.

use crate::types::{Point, Scalar, Transform, Vec2};

// ---------------------------------------------------------------------------
// Transformable trait
// ---------------------------------------------------------------------------

/// A type that can be transformed by an affine [`Transform`].
pub trait Transformable {
    /// Apply a transform, returning the transformed value.
    #[must_use]
    fn transformed(&self, t: &Transform) -> Self;
}

impl Transformable for Point {
    #[inline]
    fn transformed(&self, t: &Transform) -> Self {
        t.apply(*self)
    }
}

impl Transformable for Vec2 {
    /// Only the linear part applies to a direction.
    #[inline]
    fn transformed(&self, t: &Transform) -> Self {
        Self::new(
            t.txx.mul_add(self.x, t.txy * self.y),
            t.tyx.mul_add(self.x, t.tyy * self.y),
        )
    }
}

impl Transformable for Transform {
    /// Equivalent to `self.then(t)`.
    #[inline]
    fn transformed(&self, t: &Transform) -> Self {
        self.then(t)
    }
}

impl<T: Transformable> Transformable for Vec<T> {
    fn transformed(&self, t: &Transform) -> Self {
        self.iter().map(|item| item.transformed(t)).collect()
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Translate by `(dx, dy)`.
#[must_use]
pub const fn translation(dx: Scalar, dy: Scalar) -> Transform {
    Transform {
        tx: dx,
        ty: dy,
        ..Transform::IDENTITY
    }
}

/// Scale each axis independently.
#[must_use]
pub const fn scaling(sx: Scalar, sy: Scalar) -> Transform {
    Transform {
        txx: sx,
        tyy: sy,
        ..Transform::IDENTITY
    }
}

/// Build from SVG `matrix(a, b, c, d, e, f)` coefficients.
///
/// SVG maps `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
#[must_use]
pub const fn from_svg_matrix(m: [Scalar; 6]) -> Transform {
    Transform {
        txx: m[0],
        tyx: m[1],
        txy: m[2],
        tyy: m[3],
        tx: m[4],
        ty: m[5],
        tzz: 1.0,
    }
}

/// Mirror through the drawing plane (z becomes -z).
#[must_use]
pub const fn mirror_z() -> Transform {
    Transform {
        tzz: -1.0,
        ..Transform::IDENTITY
    }
}

/// Uniformly scale by `s`, flip Y, mirror Z and shift so that the source
/// point `(min_x, max_y)` lands at the origin.
///
/// The result keeps face winding: the Y flip and the Z mirror cancel.
#[must_use]
pub fn normalization(s: Scalar, min_x: Scalar, max_y: Scalar) -> Transform {
    Transform {
        txx: s,
        txy: 0.0,
        tyx: 0.0,
        tyy: -s,
        tzz: -1.0,
        tx: -min_x * s,
        ty: max_y * s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
