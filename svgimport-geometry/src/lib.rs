//! Planar geometry for the SVG importer: transforms, Bezier sampling,
//! bounding boxes, arcs, and the in-memory [`scene::Scene`] host.

pub mod types;

pub mod arc;
pub mod bbox;
pub mod bezier;
pub mod error;
pub mod faces;
pub mod scene;
pub mod transform;

pub use error::GeometryError;
