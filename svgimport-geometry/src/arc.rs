//! Circular arcs in the drawing plane, sampled into polylines.

use std::f64::consts::TAU;

use crate::types::{Point, Scalar, Vec2, NEAR_ZERO};

/// Segments used for a full turn; partial arcs get a proportional share.
pub const SEGMENTS_PER_TURN: usize = 24;

/// A circular arc: `center + radius * (cos a * x_axis + sin a * y_axis)`
/// for `a` from `start_angle` to `end_angle` (radians).
///
/// `y_axis` is `x_axis` rotated a quarter turn about the normal, so a
/// negative `normal_z` runs the arc clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub center: Point,
    pub x_axis: Vec2,
    pub normal_z: Scalar,
    pub radius: Scalar,
    pub start_angle: Scalar,
    pub end_angle: Scalar,
}

impl ArcSpec {
    /// The unit quarter arc at the origin, from `(1, 0)` to `(0, 1)`.
    #[must_use]
    pub const fn quarter_unit() -> Self {
        Self {
            center: Point::ZERO,
            x_axis: Vec2::new(1.0, 0.0),
            normal_z: 1.0,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
        }
    }

    /// Number of segments this arc is sampled with.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "value is a small non-negative count"
    )]
    #[must_use]
    pub fn segments(&self) -> usize {
        let sweep = (self.end_angle - self.start_angle).abs();
        let n = (sweep / TAU * SEGMENTS_PER_TURN as Scalar).ceil();
        if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
    }
}

/// Sample an arc. Returns an empty list for a zero radius or a zero-length
/// axis.
#[expect(clippy::cast_precision_loss, reason = "segment counts are small")]
#[must_use]
pub fn arc_points(spec: &ArcSpec) -> Vec<Point> {
    let len = spec.x_axis.hypot();
    if spec.radius.abs() < NEAR_ZERO || len < NEAR_ZERO {
        return Vec::new();
    }
    let x = spec.x_axis / len;
    let sign = if spec.normal_z < 0.0 { -1.0 } else { 1.0 };
    let y = Vec2::new(-x.y, x.x) * sign;
    let n = spec.segments();
    let sweep = spec.end_angle - spec.start_angle;
    (0..=n)
        .map(|i| {
            let a = (i as Scalar / n as Scalar).mul_add(sweep, spec.start_angle);
            let (sin, cos) = a.sin_cos();
            spec.center + (x * cos + y * sin) * spec.radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    #[test]
    fn quarter_arc_endpoints() {
        let pts = arc_points(&ArcSpec::quarter_unit());
        assert_eq!(pts.len(), 7);
        assert!((pts[0] - Point::new(1.0, 0.0)).hypot() < EPSILON);
        assert!((pts[6] - Point::new(0.0, 1.0)).hypot() < EPSILON);
        for p in &pts {
            assert!((p.to_vec2().hypot() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn clockwise_normal() {
        let spec = ArcSpec {
            normal_z: -1.0,
            ..ArcSpec::quarter_unit()
        };
        let pts = arc_points(&spec);
        assert!((pts[6] - Point::new(0.0, -1.0)).hypot() < EPSILON);
    }

    #[test]
    fn full_turn_segments() {
        let spec = ArcSpec {
            end_angle: TAU,
            ..ArcSpec::quarter_unit()
        };
        assert_eq!(spec.segments(), SEGMENTS_PER_TURN);
    }

    #[test]
    fn tiny_sweep_has_one_segment() {
        let spec = ArcSpec {
            end_angle: 0.001,
            ..ArcSpec::quarter_unit()
        };
        assert_eq!(spec.segments(), 1);
        assert_eq!(arc_points(&spec).len(), 2);
    }

    #[test]
    fn zero_radius_is_empty() {
        let spec = ArcSpec {
            radius: 0.0,
            ..ArcSpec::quarter_unit()
        };
        assert!(arc_points(&spec).is_empty());
    }
}
