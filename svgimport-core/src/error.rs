//! Error and diagnostic types for an import pass.
//!
//! Only structural failures are errors; everything the importer can step
//! over (unknown elements, bad tokens, unsupported transforms) becomes a
//! [`Diagnostic`] and the pass continues.

use std::fmt;
use std::io;

use svgimport_geometry::GeometryError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Trace of the walk (element begin/end, skipped known elements).
    Info,
    /// Something in the input was ignored.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("Info"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

/// A recoverable condition met during an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Collects diagnostics for one pass and mirrors them to `tracing`.
///
/// Info entries are kept only when `verbose` is set; warnings always are.
#[derive(Debug, Default)]
pub struct Diagnostics {
    verbose: bool,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self {
            verbose,
            entries: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{message}");
        if self.verbose {
            self.entries.push(Diagnostic {
                severity: Severity::Info,
                message,
            });
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of warnings recorded so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

/// Why an import pass was aborted.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XML reader rejected the document, or an end tag did not match.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The document ended inside an open element.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// An internal invariant was violated (e.g. a path command fired
    /// without its full parameter count).
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// The single error surfaced by a failed import pass.
#[derive(Debug, Error)]
#[error("error while reading \"{input}\": {kind}")]
pub struct ImportError {
    /// File name or other identifier of the source document.
    pub input: String,
    #[source]
    pub kind: ErrorKind,
}

impl ImportError {
    #[must_use]
    pub fn new(input: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_needs_verbose() {
        let mut quiet = Diagnostics::new(false);
        quiet.info("begin of group");
        quiet.warn("unknown element <foo>");
        assert_eq!(quiet.entries().len(), 1);
        assert_eq!(quiet.warning_count(), 1);

        let mut verbose = Diagnostics::new(true);
        verbose.info("begin of group");
        verbose.warn("unknown element <foo>");
        assert_eq!(verbose.entries().len(), 2);
        assert_eq!(verbose.entries()[0].severity, Severity::Info);
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Warning,
            message: "unknown transform \"rotate(45)\"".into(),
        };
        assert_eq!(d.to_string(), "Warning: unknown transform \"rotate(45)\"");
    }

    #[test]
    fn import_error_names_input() {
        let err = ImportError::new("drawing.svg", ErrorKind::UnexpectedEof("g".into()));
        assert_eq!(
            err.to_string(),
            "error while reading \"drawing.svg\": unexpected end of document inside <g>"
        );
    }

    #[test]
    fn geometry_error_converts() {
        let kind: ErrorKind = GeometryError::NoSegments.into();
        assert!(matches!(kind, ErrorKind::Geometry(GeometryError::NoSegments)));
    }
}
