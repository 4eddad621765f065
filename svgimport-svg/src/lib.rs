//! SVG preview of an imported [`Scene`].
//!
//! The scene is Y-up; SVG is Y-down. Every coordinate is baked into world
//! space, scaled to output units and Y-negated at render time, so the
//! document needs no global transform. Scene groups become nested `<g>`
//! elements carrying the group name.
//!
//! Faces are filled with the material of the side facing the viewer, or
//! the other side's when that one is unpainted. Edges and curves are
//! stroked hairlines; images are referenced by path.

use svg::Document;
use svg::node::element::{Group, Image, Path as SvgPath};

use svgimport_geometry::bbox::BoundingBox;
use svgimport_geometry::scene::{Entity, EntityId, Scene};
use svgimport_geometry::transform::{scaling, translation};
use svgimport_geometry::types::{Point, Rgb, Scalar, Transform};

/// Fill for faces without a material.
const DEFAULT_FACE_COLOR: Rgb = Rgb::new(0xd3, 0xd3, 0xd3);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Scene`] to an SVG [`Document`].
#[must_use]
pub fn render(scene: &Scene) -> Document {
    render_with_options(scene, &RenderOptions::default())
}

/// Render a [`Scene`] to an SVG string.
#[must_use]
pub fn render_to_string(scene: &Scene) -> String {
    render(scene).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output units per scene unit. Default: 72 (scene inches to points).
    pub scale: Scalar,
    /// Extra margin around the bounding box, in output units. Default: 1.0.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 3.
    pub precision: usize,
    /// Stroke width for edges and curves, in output units. Default: 0.5.
    pub stroke_width: Scalar,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 72.0,
            margin: 1.0,
            precision: 3,
            stroke_width: 0.5,
        }
    }
}

/// Render a [`Scene`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(scene: &Scene, opts: &RenderOptions) -> Document {
    let output = scaling(opts.scale, -opts.scale);
    let bb = scene.bounds(scene.root()).transformed(&output);
    let content = Renderer { scene, opts, output }.group(scene.root());
    build_document(&bb, opts, content)
}

// ---------------------------------------------------------------------------
// Scene walk
// ---------------------------------------------------------------------------

struct Renderer<'a> {
    scene: &'a Scene,
    opts: &'a RenderOptions,
    /// World to output coordinates.
    output: Transform,
}

impl Renderer<'_> {
    fn group(&self, id: EntityId) -> Group {
        let mut group = Group::new();
        if let Some(name) = self.scene.name(id).filter(|n| !n.is_empty()) {
            group = group.set("data-name", name);
        }
        // children of a group live in the group's own coordinates
        let to_output = self.scene.world_transform(id).then(&self.output);
        for &child in self.scene.children(id) {
            group = match self.scene.get(child) {
                Some(Entity::Group { .. }) => group.add(self.group(child)),
                Some(Entity::Edge { start, end }) => {
                    group.add(self.stroke(&[*start, *end], &to_output))
                }
                Some(Entity::Curve { points, .. }) => group.add(self.stroke(points, &to_output)),
                Some(Entity::Face {
                    outline,
                    normal_z,
                    material,
                    back_material,
                }) => {
                    // seen from +z after every ancestor's mirroring
                    let color = face_color(normal_z * to_output.tzz, *material, *back_material);
                    group.add(self.face(outline, color, &to_output))
                }
                Some(Entity::Image {
                    path,
                    width,
                    height,
                    transform,
                }) => {
                    let t = image_transform(*height, transform, &to_output);
                    group.add(
                        Image::new()
                            .set("href", path.display().to_string())
                            .set("width", fmt_scalar(*width, self.opts.precision))
                            .set("height", fmt_scalar(*height, self.opts.precision))
                            .set("preserveAspectRatio", "none")
                            .set("transform", matrix_to_svg(&t, self.opts.precision)),
                    )
                }
                None => group,
            };
        }
        group
    }

    fn stroke(&self, points: &[Point], t: &Transform) -> SvgPath {
        SvgPath::new()
            .set("d", points_to_d(points, t, false, self.opts.precision))
            .set("fill", "none")
            .set("stroke", "black")
            .set(
                "stroke-width",
                fmt_scalar(self.opts.stroke_width, self.opts.precision),
            )
            .set("stroke-linecap", "round")
    }

    fn face(&self, outline: &[Point], color: Option<Rgb>, t: &Transform) -> SvgPath {
        let color = color.unwrap_or(DEFAULT_FACE_COLOR);
        SvgPath::new()
            .set("d", points_to_d(outline, t, true, self.opts.precision))
            .set("fill", color.to_hex())
            .set("stroke", "none")
    }
}

/// Material of the side facing +z (`facing` is the world normal's z sign),
/// else the other side's.
fn face_color(facing: Scalar, front: Option<Rgb>, back: Option<Rgb>) -> Option<Rgb> {
    if facing > 0.0 { front.or(back) } else { back.or(front) }
}

/// Map from the SVG image box (rows growing downward) to output space.
///
/// An image's own coordinates put row 0 at the bottom of its extent, so
/// the box is flipped within its height first.
fn image_transform(height: Scalar, placement: &Transform, to_output: &Transform) -> Transform {
    scaling(1.0, -1.0)
        .then(&translation(0.0, height))
        .then(placement)
        .then(to_output)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Build a `d` string through `points` mapped by `t`.
fn points_to_d(points: &[Point], t: &Transform, closed: bool, precision: usize) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let q = t.apply(*p);
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&fmt_scalar(q.x, precision));
        d.push(' ');
        d.push_str(&fmt_scalar(q.y, precision));
    }
    if closed && !points.is_empty() {
        d.push('Z');
    }
    d
}

fn matrix_to_svg(t: &Transform, precision: usize) -> String {
    let m = [t.txx, t.tyx, t.txy, t.tyy, t.tx, t.ty]
        .map(|v| fmt_scalar(v, precision))
        .join(" ");
    format!("matrix({m})")
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    // avoid "-0"
    if s == "-0" { "0".to_owned() } else { s }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// `bb` is already in output coordinates.
fn build_document(bb: &BoundingBox, opts: &RenderOptions, content: Group) -> Document {
    let m = opts.margin;
    let (vb_x, vb_y, vb_w, vb_h) = if bb.is_valid() {
        (
            bb.min_x - m,
            bb.min_y - m,
            2.0f64.mul_add(m, bb.width()),
            2.0f64.mul_add(m, bb.height()),
        )
    } else {
        (0.0, 0.0, 100.0, 100.0)
    };

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, opts.precision),
                fmt_scalar(vb_y, opts.precision),
                fmt_scalar(vb_w, opts.precision),
                fmt_scalar(vb_h, opts.precision),
            ),
        )
        .set("width", format!("{}pt", fmt_scalar(vb_w, opts.precision)))
        .set("height", format!("{}pt", fmt_scalar(vb_h, opts.precision)))
        .add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
