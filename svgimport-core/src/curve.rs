//! Free-standing Bezier curves of any degree from 1 to 20.

use svgimport_geometry::GeometryError;
use svgimport_geometry::bezier::{CURVE_TOOL_SEGMENTS, ControlPolygon, clamp_degree};
use svgimport_geometry::scene::EntityId;
use svgimport_geometry::types::Point;

use crate::error::Diagnostics;
use crate::host::Host;

/// Creates Bezier curves of a fixed degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveTool {
    degree: usize,
    segments: usize,
}

impl CurveTool {
    /// A tool for curves of `degree`, clamped to the supported range.
    pub fn new(degree: usize, diag: &mut Diagnostics) -> Self {
        let (clamped, changed) = clamp_degree(degree);
        if changed {
            diag.warn(format!("curve degree {degree} out of range, using {clamped}"));
        }
        Self {
            degree: clamped,
            segments: CURVE_TOOL_SEGMENTS,
        }
    }

    #[must_use]
    pub const fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Sample the curve, add it to `group` with its control points attached,
    /// and close a face if the curve completes a loop.
    pub fn create_curve<H: Host + ?Sized>(
        &self,
        host: &mut H,
        group: EntityId,
        points: Vec<Point>,
    ) -> Result<Option<EntityId>, GeometryError> {
        if points.len() != self.degree + 1 {
            return Err(GeometryError::ControlPointCount {
                degree: self.degree,
                found: points.len(),
            });
        }
        let polygon = ControlPolygon::new(points)?;
        let samples = polygon.sample(self.segments)?;
        let Some(curve) = host.add_curve(group, samples) else {
            return Ok(None);
        };
        host.attach_control_polygon(curve, &polygon);
        host.find_faces(curve);
        Ok(Some(curve))
    }
}

/// Draw a Bezier curve whose degree is given by its number of control
/// points.
pub fn draw_bezier<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    points: Vec<Point>,
    diag: &mut Diagnostics,
) -> Result<Option<EntityId>, GeometryError> {
    let degree = points.len().saturating_sub(1);
    CurveTool::new(degree, diag).create_curve(host, group, points)
}
