//! Forward-only element cursor over an XML document.
//!
//! Wraps the `svg` crate's pull parser and keeps a stack of open element
//! names so that mismatched end tags and truncated documents surface as
//! errors. Self-closing elements produce a start followed by an end, the
//! same as an explicit start/end pair. Text, comments, and declarations
//! are never seen by callers.

use svg::node::element::tag::Type;
use svg::parser::{Event, Parser};

use crate::error::ErrorKind;
use crate::tag::{TagKind, tag_kind};

/// Attribute map of an element.
pub type Attributes = std::collections::HashMap<String, svg::node::Value>;

/// A started element.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub kind: TagKind,
    pub attributes: Attributes,
}

impl Element {
    /// Value of an attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| &**v)
    }

    /// Name for the group built from this element: `id`, or for containers
    /// `inkscape:label` in preference to `id`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        if self.kind.is_container() {
            if let Some(label) = self.attr("inkscape:label") {
                return Some(label);
            }
        }
        self.attr("id")
    }
}

/// What the next pull produced.
#[derive(Debug)]
pub enum Pull {
    Start(Element),
    /// The innermost open element closed.
    End,
    /// The document ended with no element open.
    Eof,
}

pub struct Cursor<'a> {
    parser: Parser<'a>,
    open: Vec<String>,
    pending_end: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(content: &'a str) -> Result<Self, ErrorKind> {
        Ok(Self {
            parser: svg::read(content)?,
            open: Vec::new(),
            pending_end: false,
        })
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Pull the next element start or end.
    pub fn next_tag(&mut self) -> Result<Pull, ErrorKind> {
        if self.pending_end {
            self.pending_end = false;
            self.open.pop();
            return Ok(Pull::End);
        }
        loop {
            let Some(event) = self.parser.next() else {
                return match self.open.last() {
                    Some(name) => Err(ErrorKind::UnexpectedEof(name.clone())),
                    None => Ok(Pull::Eof),
                };
            };
            match event {
                Event::Error(e) => return Err(ErrorKind::Malformed(e.to_string())),
                Event::Tag(name, Type::Start, attributes) => {
                    self.open.push(name.to_owned());
                    return Ok(Pull::Start(Self::element(name, attributes)));
                }
                Event::Tag(name, Type::Empty, attributes) => {
                    self.open.push(name.to_owned());
                    self.pending_end = true;
                    return Ok(Pull::Start(Self::element(name, attributes)));
                }
                Event::Tag(name, Type::End, _) => {
                    return match self.open.pop() {
                        Some(open) if open == name => Ok(Pull::End),
                        Some(open) => Err(ErrorKind::Malformed(format!(
                            "expected </{open}>, found </{name}>"
                        ))),
                        None => Err(ErrorKind::Malformed(format!("unexpected </{name}>"))),
                    };
                }
                _ => {}
            }
        }
    }

    /// Consume the rest of the element just started, descendants included.
    pub fn skip_element(&mut self) -> Result<(), ErrorKind> {
        let depth = self.depth();
        loop {
            match self.next_tag()? {
                Pull::End if self.depth() < depth => return Ok(()),
                Pull::Eof => return Ok(()),
                Pull::Start(_) | Pull::End => {}
            }
        }
    }

    fn element(name: &str, attributes: Attributes) -> Element {
        Element {
            name: name.to_owned(),
            kind: tag_kind(name),
            attributes,
        }
    }
}
