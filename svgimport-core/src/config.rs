//! Options threaded through an import pass.

use std::path::PathBuf;

use svgimport_geometry::types::Scalar;

/// Settings for one import. Read-only for the duration of the pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOptions {
    /// Record info-level diagnostics as well as warnings.
    pub debug: bool,
    /// Multiplier on top of the fixed unit conversion (`None` means 1).
    pub scale: Option<Scalar>,
    /// Paint the back side of faces as well as the front.
    pub back_material: bool,
    /// Directory relative image references resolve against.
    pub base_dir: Option<PathBuf>,
}

impl ImportOptions {
    /// The effective document scale multiplier.
    #[must_use]
    pub fn scale_factor(&self) -> Scalar {
        self.scale.unwrap_or(1.0)
    }
}
