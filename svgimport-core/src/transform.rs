//! Resolve `transform` attribute strings.
//!
//! Three functions are recognised by prefix: `matrix(a b c d e f)`,
//! `translate(tx [ty])`, and `scale(sx [sy])`. Arguments may be separated
//! by commas, whitespace, or both. Only the first function of a list is
//! used. Anything else (`rotate`, `skewX`, malformed arguments) resolves
//! to `None` with a warning, and callers leave the element untransformed.

use svgimport_geometry::transform::{from_svg_matrix, scaling, translation};
use svgimport_geometry::types::Transform;

use crate::error::Diagnostics;
use crate::scanner::numbers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Matrix,
    Translate,
    Scale,
}

const FUNCTIONS: &[(&str, Function)] = &[
    ("matrix", Function::Matrix),
    ("translate", Function::Translate),
    ("scale", Function::Scale),
];

/// Parse a transform attribute value.
pub fn resolve_transform(value: &str, diag: &mut Diagnostics) -> Option<Transform> {
    let text = value.trim();
    let Some((function, rest)) = FUNCTIONS.iter().find_map(|&(name, f)| {
        let rest = text.strip_prefix(name)?.trim_start().strip_prefix('(')?;
        Some((f, rest))
    }) else {
        diag.warn(format!("unknown transform \"{text}\""));
        return None;
    };
    let Some((args, tail)) = rest.split_once(')') else {
        diag.warn(format!("unterminated transform \"{text}\""));
        return None;
    };

    let n = numbers(args);
    let t = match (function, n.as_slice()) {
        (Function::Matrix, &[a, b, c, d, e, f]) => from_svg_matrix([a, b, c, d, e, f]),
        (Function::Translate, &[tx]) => translation(tx, 0.0),
        (Function::Translate, &[tx, ty]) => translation(tx, ty),
        (Function::Scale, &[s]) => scaling(s, s),
        (Function::Scale, &[sx, sy]) => scaling(sx, sy),
        _ => {
            diag.warn(format!("wrong number of arguments in transform \"{text}\""));
            return None;
        }
    };
    let tail = tail.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    if !tail.is_empty() {
        diag.warn(format!("only the first transform is applied, ignoring \"{tail}\""));
    }
    Some(t)
}
