//! The import pass: walks the element stream and drives a [`Host`].
//!
//! Every element becomes a group under the group of its parent element.
//! Containers recurse; drawable elements build their geometry and have
//! their subtree skipped. Everything the document draws lands in one root
//! group named `SVG`, which is finally normalized to inches, Y-up.
//!
//! The whole pass is one host operation: committed on success, aborted on
//! any fatal error so a failed import leaves nothing behind.

use std::fs;
use std::path::{Path, PathBuf};

use svgimport_geometry::scene::EntityId;
use svgimport_geometry::types::{Point, Scalar, Transform};

use crate::config::ImportOptions;
use crate::cursor::{Cursor, Element, Pull};
use crate::error::{Diagnostic, Diagnostics, ErrorKind, ImportError};
use crate::host::Host;
use crate::normalize::normalize;
use crate::path::interpret_path;
use crate::scanner::leading_number;
use crate::shapes::{RectSpec, draw_polyline, parse_points, place_image, synthesize_rect};
use crate::style::apply_style;
use crate::tag::TagKind;
use crate::transform::resolve_transform;

/// Name of the host operation wrapping an import.
pub const OPERATION_NAME: &str = "Import SVG File";

/// Name of the group holding everything an import creates.
pub const ROOT_GROUP_NAME: &str = "SVG";

/// What a successful import produced.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// The `SVG` group.
    pub root: EntityId,
    /// The placement transform applied to `root`.
    pub normalization: Transform,
    /// Warnings, plus info messages in debug mode.
    pub diagnostics: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Import an SVG document held in memory. `input` names it in errors.
///
/// # Errors
///
/// Returns an error if the document is not well-formed or ends early. The
/// host operation is aborted in that case.
pub fn import_str<H: Host + ?Sized>(
    host: &mut H,
    content: &str,
    input: &str,
    options: &ImportOptions,
) -> Result<ImportReport, ImportError> {
    tracing::debug!(input, "importing");
    host.start_operation(OPERATION_NAME);
    let mut diag = Diagnostics::new(options.debug);
    match run(host, content, options, &mut diag) {
        Ok((root, normalization)) => {
            host.commit_operation();
            Ok(ImportReport {
                root,
                normalization,
                diagnostics: diag.into_entries(),
            })
        }
        Err(kind) => {
            tracing::error!(input, error = %kind, "import aborted");
            host.abort_operation();
            Err(ImportError::new(input, kind))
        }
    }
}

/// Read and import an SVG file. Relative image references resolve against
/// the file's directory unless `options.base_dir` says otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to import.
pub fn import_file<H: Host + ?Sized>(
    host: &mut H,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportReport, ImportError> {
    let input = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| ImportError::new(input.clone(), e.into()))?;
    let mut options = options.clone();
    if options.base_dir.is_none() {
        options.base_dir = path.parent().map(Path::to_path_buf);
    }
    import_str(host, &content, &input, &options)
}

fn run<H: Host + ?Sized>(
    host: &mut H,
    content: &str,
    options: &ImportOptions,
    diag: &mut Diagnostics,
) -> Result<(EntityId, Transform), ErrorKind> {
    let cursor = Cursor::new(content)?;
    let parent = host.active_group();
    let root = host.add_group(parent);
    host.set_name(root, ROOT_GROUP_NAME);

    let mut importer = Importer {
        host: &mut *host,
        cursor,
        options,
        diag,
    };
    importer.document(root)?;

    let t = normalize(host, root, options.scale_factor());
    Ok((root, t))
}

// ---------------------------------------------------------------------------
// Element dispatch
// ---------------------------------------------------------------------------

struct Importer<'a, 'c, H: Host + ?Sized> {
    host: &'a mut H,
    cursor: Cursor<'c>,
    options: &'a ImportOptions,
    diag: &'a mut Diagnostics,
}

impl<H: Host + ?Sized> Importer<'_, '_, H> {
    /// Top level: only `svg` elements are walked, straight into `root`.
    fn document(&mut self, root: EntityId) -> Result<(), ErrorKind> {
        loop {
            match self.cursor.next_tag()? {
                Pull::Start(e) if e.kind == TagKind::Svg => {
                    self.diag.info("begin of svg");
                    self.children(root)?;
                    self.diag.info("end of svg");
                }
                Pull::Start(e) => {
                    self.diag.info(format!("skipping top-level <{}>", e.name));
                    self.cursor.skip_element()?;
                }
                Pull::End => {}
                Pull::Eof => return Ok(()),
            }
        }
    }

    /// Dispatch every child of the element just started, up to its end.
    fn children(&mut self, group: EntityId) -> Result<(), ErrorKind> {
        loop {
            match self.cursor.next_tag()? {
                Pull::Start(e) => self.element(group, &e)?,
                Pull::End | Pull::Eof => return Ok(()),
            }
        }
    }

    fn element(&mut self, parent: EntityId, e: &Element) -> Result<(), ErrorKind> {
        if e.kind.is_container() {
            let group = self.host.add_group(parent);
            self.diag.info(format!("begin of {}", e.name));
            self.children(group)?;
            self.diag.info(format!("end of {}", e.name));
            self.finish(group, e);
            return Ok(());
        }
        if e.kind.is_drawable() {
            self.drawable(parent, e)?;
        } else if e.kind == TagKind::Ignored {
            self.diag.info(format!("skipping {}", e.name));
        } else {
            self.diag.warn(format!("unsupported element <{}> skipped", e.name));
        }
        self.cursor.skip_element()
    }

    /// Build the geometry of one leaf element in a fresh group under `parent`.
    fn drawable(&mut self, parent: EntityId, e: &Element) -> Result<(), ErrorKind> {
        match e.kind {
            TagKind::Path => {
                let group = self.host.add_group(parent);
                if let Some(d) = e.attr("d") {
                    interpret_path(self.host, group, d, self.diag)?;
                } else {
                    self.diag.warn("path without d attribute");
                }
                self.finish(group, e);
            }
            TagKind::Rect => {
                let group = self.host.add_group(parent);
                if let Some(rect) = self.rect(e) {
                    synthesize_rect(self.host, group, &rect);
                }
                self.finish(group, e);
            }
            TagKind::Line => {
                let group = self.host.add_group(parent);
                let coord = |name| e.attr(name).and_then(leading_number).unwrap_or(0.0);
                let a = Point::new(coord("x1"), coord("y1"));
                let b = Point::new(coord("x2"), coord("y2"));
                if self.host.add_line(group, a, b).is_none() {
                    self.diag.warn("zero-length line");
                }
                self.finish(group, e);
            }
            TagKind::Polyline | TagKind::Polygon => {
                let group = self.host.add_group(parent);
                if let Some(value) = e.attr("points") {
                    let points = parse_points(value, self.diag);
                    draw_polyline(self.host, group, &points, e.kind == TagKind::Polygon);
                } else {
                    self.diag.warn(format!("{} without points attribute", e.name));
                }
                self.finish(group, e);
            }
            TagKind::Image => {
                let group = self.host.add_group(parent);
                self.image(group, e);
                self.transform(group, e);
                if self.host.entity_count(group) == 1 {
                    self.host.explode(group);
                }
            }
            TagKind::Svg
            | TagKind::Group
            | TagKind::Anchor
            | TagKind::Ignored
            | TagKind::Unknown => {}
        }
        Ok(())
    }

    /// Name, style and transform a finished group.
    fn finish(&mut self, group: EntityId, e: &Element) {
        if let Some(name) = e.display_name() {
            self.host.set_name(group, name);
        }
        if let Some(style) = e.attr("style") {
            apply_style(self.host, group, style, self.options.back_material, self.diag);
        }
        self.transform(group, e);
    }

    fn transform(&mut self, group: EntityId, e: &Element) {
        if let Some(value) = e.attr("transform") {
            if let Some(t) = resolve_transform(value, self.diag) {
                self.host.apply_transform(group, &t);
            }
        }
    }

    fn number(&mut self, e: &Element, name: &str) -> Option<Scalar> {
        let value = e.attr(name)?;
        let n = leading_number(value);
        if n.is_none() {
            self.diag
                .warn(format!("{}: {name}=\"{value}\" is not a number", e.name));
        }
        n
    }

    fn required(&mut self, e: &Element, name: &str) -> Option<Scalar> {
        let n = self.number(e, name);
        if n.is_none() {
            self.diag.warn(format!("{} without usable {name}", e.name));
        }
        n
    }

    /// `x`, `y`, `width` and `height` are all required.
    fn rect(&mut self, e: &Element) -> Option<RectSpec> {
        let x = self.required(e, "x");
        let y = self.required(e, "y");
        let width = self.required(e, "width");
        let height = self.required(e, "height");
        let rx = self.number(e, "rx").unwrap_or(0.0);
        let ry = self.number(e, "ry").unwrap_or(0.0);
        Some(RectSpec {
            x: x?,
            y: y?,
            width: width?,
            height: height?,
            rx,
            ry,
        })
    }

    fn image(&mut self, group: EntityId, e: &Element) {
        let reference = e
            .attr("sodipodi:absref")
            .or_else(|| e.attr("xlink:href"))
            .or_else(|| e.attr("href"));
        let Some(reference) = reference else {
            self.diag.warn("image without a file reference");
            return;
        };
        let path = match resolve_image_path(reference, self.options.base_dir.as_deref()) {
            Ok(path) => path,
            Err(message) => {
                self.diag.warn(message);
                return;
            }
        };
        let x = self.number(e, "x");
        let y = self.number(e, "y");
        let width = self.number(e, "width");
        let height = self.number(e, "height");
        let (Some(x), Some(y), Some(width), Some(height)) = (x, y, width, height) else {
            self.diag
                .warn(format!("image {} without position or size", path.display()));
            return;
        };
        place_image(self.host, group, &path, x, y, width, height);
    }
}

/// Turn an image reference into a file path.
fn resolve_image_path(reference: &str, base_dir: Option<&Path>) -> Result<PathBuf, String> {
    if reference.starts_with("data:") {
        return Err("embedded image data is not supported".to_owned());
    }
    let file = reference.strip_prefix("file://").unwrap_or(reference);
    let path = PathBuf::from(file);
    Ok(match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_paths() {
        let base = Path::new("/drawings");
        assert_eq!(
            resolve_image_path("file:///tmp/a.png", Some(base)),
            Ok(PathBuf::from("/tmp/a.png"))
        );
        assert_eq!(
            resolve_image_path("img/b.png", Some(base)),
            Ok(PathBuf::from("/drawings/img/b.png"))
        );
        assert_eq!(resolve_image_path("b.png", None), Ok(PathBuf::from("b.png")));
        assert!(resolve_image_path("data:image/png;base64,AAAA", Some(base)).is_err());
    }
}
