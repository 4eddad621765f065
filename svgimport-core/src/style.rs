//! The `style` attribute. Only `fill` is honoured.

use svgimport_geometry::scene::EntityId;
use svgimport_geometry::types::Rgb;

use crate::error::Diagnostics;
use crate::host::Host;

/// A parsed `fill` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    None,
    Color(Rgb),
}

/// Find the `fill` declaration in a style string. Returns `None` when there
/// is no usable one; a malformed colour is reported.
pub fn parse_fill(style: &str, diag: &mut Diagnostics) -> Option<Fill> {
    let mut fill = None;
    for entry in style.split(';') {
        let Some((property, value)) = entry.split_once(':') else {
            continue;
        };
        if property.trim() != "fill" {
            continue;
        }
        let value = value.trim();
        fill = if value == "none" {
            Some(Fill::None)
        } else if let Some(rgb) = Rgb::from_hex(value) {
            Some(Fill::Color(rgb))
        } else {
            diag.warn(format!("unsupported fill colour \"{value}\""));
            None
        };
    }
    fill
}

/// Paint the faces directly inside `group` with the style's fill colour.
pub fn apply_style<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    style: &str,
    back_material: bool,
    diag: &mut Diagnostics,
) {
    if let Some(Fill::Color(color)) = parse_fill(style, diag) {
        for face in host.faces(group) {
            host.set_fill_color(face, color, back_material);
        }
    }
}
