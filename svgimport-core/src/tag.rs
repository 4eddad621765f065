//! Element-name to tag-kind mapping.

/// What the importer does with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    // -- containers --
    Svg,
    Group,
    Anchor,

    // -- drawables --
    Path,
    Rect,
    Line,
    Polygon,
    Polyline,
    Image,

    /// A known element with nothing to import; its subtree is skipped.
    Ignored,
    /// An element the importer has never heard of; skipped with a warning.
    Unknown,
}

impl TagKind {
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Svg | Self::Group | Self::Anchor)
    }

    #[must_use]
    pub const fn is_drawable(self) -> bool {
        matches!(
            self,
            Self::Path | Self::Rect | Self::Line | Self::Polygon | Self::Polyline | Self::Image
        )
    }
}

/// Elements with their own handling.
const HANDLED: &[(&str, TagKind)] = &[
    ("svg", TagKind::Svg),
    ("g", TagKind::Group),
    ("a", TagKind::Anchor),
    ("path", TagKind::Path),
    ("rect", TagKind::Rect),
    ("line", TagKind::Line),
    ("polygon", TagKind::Polygon),
    ("polyline", TagKind::Polyline),
    ("image", TagKind::Image),
];

/// Elements the importer knows about but does not convert.
const IGNORED: &[&str] = &[
    "defs",
    "metadata",
    "title",
    "desc",
    "style",
    "script",
    "use",
    "text",
    "textPath",
    "tspan",
    "tref",
    "flowRoot",
    "flowRegion",
    "flowRegionExclude",
    "flowDiv",
    "flowPara",
    "flowSpan",
    "flowLine",
    "linearGradient",
    "radialGradient",
    "stop",
    "filter",
    "feBlend",
    "feComposite",
    "feDiffuseLighting",
    "feDistantLight",
    "feGaussianBlur",
    "feSpecularLighting",
    "clipPath",
    "marker",
    "animate",
    "circle",
    "font",
    "inkscape_path_effect",
];

/// Namespace prefixes whose elements are editor or licence metadata.
const IGNORED_PREFIXES: &[&str] = &["sodipodi:", "inkscape:", "rdf:", "cc:", "dc:"];

/// Map an element name to its kind. Never fails; unrecognised names map
/// to [`TagKind::Unknown`].
#[must_use]
pub fn tag_kind(name: &str) -> TagKind {
    if let Some(&(_, kind)) = HANDLED.iter().find(|(n, _)| *n == name) {
        return kind;
    }
    if IGNORED.contains(&name) || IGNORED_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return TagKind::Ignored;
    }
    TagKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handled_names() {
        assert_eq!(tag_kind("svg"), TagKind::Svg);
        assert_eq!(tag_kind("g"), TagKind::Group);
        assert_eq!(tag_kind("a"), TagKind::Anchor);
        assert_eq!(tag_kind("rect"), TagKind::Rect);
        assert_eq!(tag_kind("polyline"), TagKind::Polyline);
    }

    #[test]
    fn ignored_names() {
        assert_eq!(tag_kind("defs"), TagKind::Ignored);
        assert_eq!(tag_kind("flowRoot"), TagKind::Ignored);
        assert_eq!(tag_kind("sodipodi:namedview"), TagKind::Ignored);
        assert_eq!(tag_kind("rdf:RDF"), TagKind::Ignored);
        assert_eq!(tag_kind("cc:Work"), TagKind::Ignored);
        assert_eq!(tag_kind("dc:title"), TagKind::Ignored);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(tag_kind("blink"), TagKind::Unknown);
        assert_eq!(tag_kind("G"), TagKind::Unknown);
        assert_eq!(tag_kind(""), TagKind::Unknown);
    }

    #[test]
    fn classification() {
        assert!(TagKind::Anchor.is_container());
        assert!(!TagKind::Path.is_container());
        assert!(TagKind::Image.is_drawable());
        assert!(!TagKind::Ignored.is_drawable());
    }
}
