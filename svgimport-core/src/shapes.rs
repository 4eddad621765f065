//! Basic shapes: rectangles (optionally rounded), lines, polylines,
//! polygons, and image placement.

use std::path::Path;

use svgimport_geometry::arc::ArcSpec;
use svgimport_geometry::scene::EntityId;
use svgimport_geometry::transform::{scaling, translation};
use svgimport_geometry::types::{Point, Scalar, Transform};

use crate::error::Diagnostics;
use crate::host::Host;
use crate::scanner::numbers;

// ---------------------------------------------------------------------------
// Rectangles
// ---------------------------------------------------------------------------

/// A `rect` element's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSpec {
    pub x: Scalar,
    pub y: Scalar,
    pub width: Scalar,
    pub height: Scalar,
    pub rx: Scalar,
    pub ry: Scalar,
}

impl RectSpec {
    /// Corner radii after filling in a missing one from the other.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn radii(&self) -> (Scalar, Scalar) {
        let (mut rx, mut ry) = (self.rx, self.ry);
        if ry != 0.0 && rx == 0.0 {
            rx = ry;
        }
        if rx != 0.0 && ry == 0.0 {
            ry = rx;
        }
        (rx, ry)
    }
}

/// Mirror by `(sx, sy)` then move to `(tx, ty)`.
fn corner(sx: Scalar, sy: Scalar, tx: Scalar, ty: Scalar) -> Transform {
    scaling(sx, sy).then(&translation(tx, ty))
}

/// Build the contour of a rectangle into `group` and close a face over it.
///
/// Rounded corners come from one quarter arc, scaled to `(rx, ry)` and
/// shifted so its ends sit at `(0, -ry)` and `(-rx, 0)`. Each corner is a
/// mirrored copy of it merged into `group`; the last corner uses the
/// scratch arc itself. The contour runs top, top-right, right,
/// bottom-right, bottom, bottom-left, left, top-left.
///
/// Returns the edge face finding was seeded from.
#[allow(clippy::float_cmp)]
pub fn synthesize_rect<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    rect: &RectSpec,
) -> Option<EntityId> {
    let RectSpec {
        x,
        y,
        width: w,
        height: h,
        ..
    } = *rect;
    let (rx, ry) = rect.radii();

    let scratch = (rx != 0.0).then(|| {
        let arc_group = host.add_group(group);
        host.add_arc(arc_group, &ArcSpec::quarter_unit());
        host.apply_transform(arc_group, &corner(rx, ry, -rx, -ry));
        arc_group
    });

    let mut last = None;
    let mut edge = |host: &mut H, a: Point, b: Point| {
        let e = host.add_line(group, a, b);
        if e.is_some() {
            last = e;
        }
        e
    };
    let merge_copy = |host: &mut H, t: Transform| {
        if let Some(arc) = scratch.and_then(|s| host.copy(s)) {
            host.apply_transform(arc, &t);
            host.explode(arc);
        }
    };

    edge(host, Point::new(x + rx, y), Point::new(x + w - rx, y));
    merge_copy(host, corner(1.0, -1.0, x + w, y));
    edge(host, Point::new(x + w, y + ry), Point::new(x + w, y + h - ry));
    merge_copy(host, corner(1.0, 1.0, x + w, y + h));
    edge(host, Point::new(x + w - rx, y + h), Point::new(x + rx, y + h));
    merge_copy(host, corner(-1.0, 1.0, x, y + h));
    let left = edge(host, Point::new(x, y + h - ry), Point::new(x, y + ry));
    if let Some(arc) = scratch {
        host.apply_transform(arc, &corner(-1.0, -1.0, x, y));
        host.explode(arc);
    }

    let seed = left.or(last)?;
    host.find_faces(seed);
    Some(seed)
}

// ---------------------------------------------------------------------------
// Lines and polylines
// ---------------------------------------------------------------------------

/// Pair up a `points` attribute. An odd trailing coordinate is dropped.
pub fn parse_points(value: &str, diag: &mut Diagnostics) -> Vec<Point> {
    let n = numbers(value);
    if n.len() % 2 != 0 {
        diag.warn(format!("odd coordinate count in points \"{value}\""));
    }
    n.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}

/// Connect consecutive points. A closed polyline returns to the first
/// point and closes a face.
pub fn draw_polyline<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    points: &[Point],
    closed: bool,
) -> Option<EntityId> {
    let mut last = None;
    for pair in points.windows(2) {
        if let Some(e) = host.add_line(group, pair[0], pair[1]) {
            last = Some(e);
        }
    }
    if closed && points.len() > 2 {
        if let Some(e) = host.add_line(group, points[points.len() - 1], points[0]) {
            last = Some(e);
        }
        if let Some(e) = last {
            host.find_faces(e);
        }
    }
    last
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Create an image occupying `(x, y)..(x + width, y + height)` in the
/// document's y-down coordinates.
pub fn place_image<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    path: &Path,
    x: Scalar,
    y: Scalar,
    width: Scalar,
    height: Scalar,
) -> EntityId {
    let image = host.add_image(group, path, Point::ZERO, width, height);
    host.apply_transform(image, &corner(1.0, -1.0, x, y + height));
    image
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
