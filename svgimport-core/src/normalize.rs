//! Final placement of an imported drawing.
//!
//! Source documents measure in user units at 90 per inch with Y growing
//! downward. The imported root group is scaled to inches, flipped to Y-up,
//! mirrored in Z, and shifted so the drawing's bottom-left corner (least x,
//! greatest y in source units) sits at the origin.

use svgimport_geometry::bbox::BoundingBox;
use svgimport_geometry::scene::EntityId;
use svgimport_geometry::transform::normalization;
use svgimport_geometry::types::{Scalar, Transform};

use crate::host::Host;

/// Source user units per output unit.
pub const SOURCE_UNITS_PER_INCH: Scalar = 90.0;

/// The placement transform for a drawing with bounds `bb`. An empty drawing
/// is only scaled and flipped.
#[must_use]
pub fn normalization_transform(bb: &BoundingBox, scale: Scalar) -> Transform {
    let s = scale / SOURCE_UNITS_PER_INCH;
    if bb.is_valid() {
        normalization(s, bb.min_x, bb.max_y)
    } else {
        normalization(s, 0.0, 0.0)
    }
}

/// Apply the placement transform to `root` and return it.
pub fn normalize<H: Host + ?Sized>(host: &mut H, root: EntityId, scale: Scalar) -> Transform {
    let t = normalization_transform(&host.bounds(root), scale);
    host.apply_transform(root, &t);
    t
}
