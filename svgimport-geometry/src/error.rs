use thiserror::Error;

/// Errors returned by geometry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A Bezier control polygon needs at least two points (degree 1).
    #[error("control polygon needs at least 2 points, got {0}")]
    DegenerateControlPolygon(usize),

    /// A curve of a fixed degree was given the wrong number of points.
    #[error("degree {degree} curve needs {} control points, got {found}", .degree + 1)]
    ControlPointCount { degree: usize, found: usize },

    /// A curve was sampled with zero segments.
    #[error("a curve must be sampled with at least one segment")]
    NoSegments,
}
