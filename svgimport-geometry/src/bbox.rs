//! Axis-aligned bounding boxes.

use crate::types::{Point, Scalar, Transform};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty (inverted) bounding box.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Bounds of a set of points.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bb = Self::EMPTY;
        for p in points {
            bb.include_point(*p);
        }
        bb
    }

    /// Check if this bounding box is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// The four corners, counter-clockwise from the minimum corner.
    #[must_use]
    pub const fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Expand to include a point.
    pub const fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another bounding box.
    pub fn union(&mut self, other: &Self) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// Bounds of this box after an affine transform (its transformed
    /// corners). An empty box stays empty.
    #[must_use]
    pub fn transformed(&self, t: &Transform) -> Self {
        if !self.is_valid() {
            return Self::EMPTY;
        }
        let corners = self.corners().map(|c| t.apply(c));
        Self::from_points(&corners)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::transform::{from_svg_matrix, translation};

    #[test]
    fn test_empty() {
        let bb = BoundingBox::EMPTY;
        assert!(!bb.is_valid());
        assert_eq!(bb.width(), 0.0);
        assert_eq!(bb.height(), 0.0);
        assert!(!bb.transformed(&translation(1.0, 1.0)).is_valid());
    }

    #[test]
    fn test_from_points() {
        let pts = [Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)];
        let bb = BoundingBox::from_points(&pts);
        assert_eq!(bb.min_x, -2.0);
        assert_eq!(bb.max_x, 4.0);
        assert_eq!(bb.min_y, -1.0);
        assert_eq!(bb.max_y, 5.0);
        assert_eq!(bb.width(), 6.0);
    }

    #[test]
    fn test_union_ignores_empty() {
        let mut bb = BoundingBox::from_points(&[Point::ZERO, Point::new(1.0, 1.0)]);
        bb.union(&BoundingBox::EMPTY);
        assert_eq!(bb.max_x, 1.0);
        bb.union(&BoundingBox::from_points(&[Point::new(3.0, -1.0)]));
        assert_eq!(bb.max_x, 3.0);
        assert_eq!(bb.min_y, -1.0);
    }

    #[test]
    fn test_transformed_rotation() {
        // 90 degree rotation: (x, y) -> (-y, x)
        let rot = from_svg_matrix([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
        let bb = BoundingBox::from_points(&[Point::ZERO, Point::new(2.0, 1.0)]);
        let r = bb.transformed(&rot);
        assert!((r.min_x + 1.0).abs() < 1e-12);
        assert!(r.max_x.abs() < 1e-12);
        assert!(r.min_y.abs() < 1e-12);
        assert!((r.max_y - 2.0).abs() < 1e-12);
    }
}
