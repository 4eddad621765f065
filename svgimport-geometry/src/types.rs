//! Core types shared across the importer.
//!
//! Source documents are planar, so points live in the XY plane and the
//! third axis only shows up as the `tzz` component of a [`Transform`] and
//! as the sign of a face normal.

pub use kurbo::{Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for coordinates and parameters.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1.0 / 65536.0;

/// Threshold below which lengths, areas and determinants count as zero.
pub const NEAR_ZERO: Scalar = 1e-12;

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An 8-bit RGB colour, as written in `fill:#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`. Anything else (including the three-digit form)
    /// returns `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// An affine transform of the drawing plane embedded in 3-space at z = 0.
///
/// Maps `(x, y, z)` to:
///   `(txx*x + txy*y + tx, tyx*x + tyy*y + ty, tzz*z)`
///
/// As a 4x4 matrix the z column is `(0, 0, tzz, 0)` and the w row is the
/// identity row; `tzz` is normally 1 and becomes -1 when the result must be
/// mirrored through the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: Scalar,
    pub ty: Scalar,
    pub txx: Scalar,
    pub txy: Scalar,
    pub tyx: Scalar,
    pub tyy: Scalar,
    pub tzz: Scalar,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        txx: 1.0,
        txy: 0.0,
        tyx: 0.0,
        tyy: 1.0,
        tzz: 1.0,
    };

    /// Apply this transform to a point in the plane.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.txy.mul_add(p.y, self.txx.mul_add(p.x, self.tx)),
            self.tyy.mul_add(p.y, self.tyx.mul_add(p.x, self.ty)),
        )
    }

    /// Compose: `self` applied first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            txx: next.txx.mul_add(self.txx, next.txy * self.tyx),
            txy: next.txx.mul_add(self.txy, next.txy * self.tyy),
            tyx: next.tyx.mul_add(self.txx, next.tyy * self.tyx),
            tyy: next.tyx.mul_add(self.txy, next.tyy * self.tyy),
            tx: next.txy.mul_add(self.ty, next.txx.mul_add(self.tx, next.tx)),
            ty: next.tyy.mul_add(self.ty, next.tyx.mul_add(self.tx, next.ty)),
            tzz: next.tzz * self.tzz,
        }
    }

    /// Determinant of the in-plane 2x2 part.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> Scalar {
        self.txx.mul_add(self.tyy, -(self.txy * self.tyx))
    }

    /// Whether this transform reverses the winding of a face outline seen
    /// from the side its normal points to. A Z mirror flips the normal, so
    /// it cancels an in-plane reflection.
    #[inline]
    #[must_use]
    pub fn reverses_winding(&self) -> bool {
        self.determinant() * self.tzz < 0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex(" #00FF7f "), Some(Rgb::new(0, 255, 127)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("ff8000"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
    }

    #[test]
    fn rgb_hex_output() {
        assert_eq!(Rgb::new(1, 171, 255).to_hex(), "#01abff");
    }

    #[test]
    fn transform_apply() {
        let t = Transform {
            tx: 10.0,
            ty: 20.0,
            txx: 2.0,
            tyy: 3.0,
            ..Transform::IDENTITY
        };
        let p = t.apply(Point::new(1.0, 1.0));
        assert!((p.x - 12.0).abs() < EPSILON);
        assert!((p.y - 23.0).abs() < EPSILON);
    }

    #[test]
    fn then_applies_left_first() {
        let scale = Transform {
            txx: 2.0,
            tyy: 2.0,
            ..Transform::IDENTITY
        };
        let shift = Transform {
            tx: 5.0,
            ty: 7.0,
            ..Transform::IDENTITY
        };
        let p = scale.then(&shift).apply(Point::new(1.0, 1.0));
        assert!((p.x - 7.0).abs() < EPSILON);
        assert!((p.y - 9.0).abs() < EPSILON);

        let q = shift.then(&scale).apply(Point::new(1.0, 1.0));
        assert!((q.x - 12.0).abs() < EPSILON);
        assert!((q.y - 16.0).abs() < EPSILON);
    }

    #[test]
    fn then_multiplies_z() {
        let flip = Transform {
            tzz: -1.0,
            ..Transform::IDENTITY
        };
        assert_eq!(flip.then(&flip).tzz, 1.0);
    }

    #[test]
    fn z_mirror_cancels_planar_reflection() {
        let flip_y = Transform {
            tyy: -1.0,
            ..Transform::IDENTITY
        };
        let mirror = Transform {
            tzz: -1.0,
            ..Transform::IDENTITY
        };
        assert!(flip_y.reverses_winding());
        assert!(mirror.reverses_winding());
        assert!(!flip_y.then(&mirror).reverses_winding());
        assert!(!Transform::IDENTITY.reverses_winding());
    }
}
