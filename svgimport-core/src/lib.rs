//! Streaming SVG import: reads a document element by element and rebuilds
//! it as grouped edges, curves, and faces through a [`Host`].

pub mod config;
pub mod cursor;
pub mod curve;
pub mod error;
pub mod host;
pub mod importer;
pub mod normalize;
pub mod path;
pub mod scanner;
pub mod shapes;
pub mod style;
pub mod tag;
pub mod transform;

pub use config::ImportOptions;
pub use error::{Diagnostic, ErrorKind, ImportError, Severity};
pub use host::Host;
pub use importer::{ImportReport, import_file, import_str};
