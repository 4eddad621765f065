//! Bezier curves of arbitrary degree.
//!
//! A curve is described by its [`ControlPolygon`]; `n + 1` control points
//! give a curve of degree `n`. Evaluation uses the Bernstein form with a
//! running binomial coefficient and a Horner-style accumulation, so no
//! intermediate polygons are allocated.

use crate::error::GeometryError;
use crate::types::{Point, Scalar};

/// Segments used when a path `C` command is flattened.
pub const PATH_SEGMENTS: usize = 16;

/// Segments used by the interactive curve tool.
pub const CURVE_TOOL_SEGMENTS: usize = 20;

/// Lowest degree the curve tool accepts.
pub const MIN_DEGREE: usize = 1;

/// Highest degree the curve tool accepts.
pub const MAX_DEGREE: usize = 20;

/// The ordered control points of a Bezier curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPolygon(Vec<Point>);

impl ControlPolygon {
    /// Wrap control points. At least two are required.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::DegenerateControlPolygon(points.len()));
        }
        Ok(Self(points))
    }

    /// Degree of the curve (number of control points minus one).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.0.len() - 1
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> Point {
        self.0[0]
    }

    #[must_use]
    pub fn last(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    /// Evaluate the point at parameter `t` in [0, 1].
    ///
    /// `B(t) = sum C(n, i) (1 - t)^(n - i) t^i P_i`, accumulated as
    /// `((P0 s + C1 t P1) s + C2 t^2 P2) s ... + t^n Pn` with `s = 1 - t`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "degrees are tiny compared to f64 mantissa"
    )]
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let pts = &self.0;
        let degree = self.degree();
        let s = 1.0 - t;
        let mut power = 1.0;
        let mut binomial = 1.0;
        let mut x = pts[0].x * s;
        let mut y = pts[0].y * s;
        for (i, p) in pts.iter().enumerate().take(degree).skip(1) {
            power *= t;
            binomial = binomial * (degree - i + 1) as Scalar / i as Scalar;
            let weight = power * binomial;
            x = weight.mul_add(p.x, x) * s;
            y = weight.mul_add(p.y, y) * s;
        }
        let tail = power * t;
        Point::new(
            tail.mul_add(pts[degree].x, x),
            tail.mul_add(pts[degree].y, y),
        )
    }

    /// Sample `segments + 1` points at `t = i / segments`.
    ///
    /// The first and last samples are exactly the end control points.
    #[expect(
        clippy::cast_precision_loss,
        reason = "segment counts are small"
    )]
    pub fn sample(&self, segments: usize) -> Result<Vec<Point>, GeometryError> {
        if segments == 0 {
            return Err(GeometryError::NoSegments);
        }
        let n = segments as Scalar;
        let mut out = Vec::with_capacity(segments + 1);
        out.push(self.first());
        for i in 1..segments {
            out.push(self.eval(i as Scalar / n));
        }
        out.push(self.last());
        Ok(out)
    }
}

/// Clamp a requested curve-tool degree into `MIN_DEGREE..=MAX_DEGREE`.
///
/// Returns the clamped degree and whether clamping happened.
#[must_use]
pub fn clamp_degree(requested: usize) -> (usize, bool) {
    let clamped = requested.clamp(MIN_DEGREE, MAX_DEGREE);
    (clamped, clamped != requested)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn square_cubic() -> ControlPolygon {
        ControlPolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_single_point() {
        assert_eq!(
            ControlPolygon::new(vec![Point::ZERO]),
            Err(GeometryError::DegenerateControlPolygon(1))
        );
        assert_eq!(
            ControlPolygon::new(vec![]),
            Err(GeometryError::DegenerateControlPolygon(0))
        );
    }

    #[test]
    fn test_linear_is_lerp() {
        let line = ControlPolygon::new(vec![Point::new(0.0, 0.0), Point::new(4.0, 2.0)]).unwrap();
        assert_eq!(line.degree(), 1);
        let p = line.eval(0.25);
        assert!((p.x - 1.0).abs() < EPSILON);
        assert!((p.y - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_cubic_midpoint() {
        // B(0.5) = (P0 + 3 P1 + 3 P2 + P3) / 8
        let p = square_cubic().eval(0.5);
        assert!((p.x - 5.0).abs() < EPSILON);
        assert!((p.y - 7.5).abs() < EPSILON);
    }

    #[test]
    fn test_sample_count_and_endpoints() {
        let pts = square_cubic().sample(PATH_SEGMENTS).unwrap();
        assert_eq!(pts.len(), 17);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[16], Point::new(10.0, 0.0));
        let mid = pts[8];
        assert!((mid.x - 5.0).abs() < EPSILON);
        assert!((mid.y - 7.5).abs() < EPSILON);
    }

    #[test]
    fn test_sample_zero_segments() {
        assert_eq!(square_cubic().sample(0), Err(GeometryError::NoSegments));
    }

    #[test]
    fn test_high_degree_stays_in_hull() {
        let pts: Vec<Point> = (0..=MAX_DEGREE)
            .map(|i| Point::new(i as f64, if i % 2 == 0 { 0.0 } else { 1.0 }))
            .collect();
        let curve = ControlPolygon::new(pts).unwrap();
        assert_eq!(curve.degree(), 20);
        for p in curve.sample(CURVE_TOOL_SEGMENTS).unwrap() {
            assert!(p.x >= -EPSILON && p.x <= 20.0 + EPSILON);
            assert!(p.y >= -EPSILON && p.y <= 1.0 + EPSILON);
        }
        // symmetric zigzag: the middle sits at x = 10, y = 0.5
        let mid = curve.eval(0.5);
        assert!((mid.x - 10.0).abs() < 1e-9);
        assert!((mid.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_degree() {
        assert_eq!(clamp_degree(0), (1, true));
        assert_eq!(clamp_degree(3), (3, false));
        assert_eq!(clamp_degree(25), (20, true));
    }
}
