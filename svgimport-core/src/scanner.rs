//! Tokenizer for path data and other number lists.
//!
//! Path data is a run of single-letter commands and numbers where
//! separators are optional: `"M1.0 2.0L3.1.4"` scans exactly like
//! `"M 1.0,2.0 L 3.1,0.4"`. A number is
//!
//! ```text
//! [+-]? ( ( digits? '.' digits | digits '.' ) exponent?
//!       | digits exponent
//!       | digits )
//! exponent = [eE] [+-]? digits
//! ```
//!
//! tried in that order at each position, so `3.1.4` is `3.1` then `.4`,
//! and `1.5e` is `1.5` followed by the letter `e`.
//!
//! Whitespace and commas separate tokens. Any other character that starts
//! neither a number nor a letter is reported as [`PathToken::Junk`].

use svgimport_geometry::types::Scalar;

/// One token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathToken<'a> {
    Number(Scalar),
    Letter(char),
    /// Characters that are neither separators, numbers, nor letters.
    Junk(&'a str),
}

// ---------------------------------------------------------------------------
// Number matching
// ---------------------------------------------------------------------------

const fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | b',')
}

/// End of the run of ASCII digits starting at `i`.
fn digits_end(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// End of an exponent starting at `i`, if there is a complete one.
fn exponent_end(b: &[u8], i: usize) -> Option<usize> {
    if i >= b.len() || !matches!(b[i], b'e' | b'E') {
        return None;
    }
    let mut j = i + 1;
    if j < b.len() && matches!(b[j], b'+' | b'-') {
        j += 1;
    }
    let end = digits_end(b, j);
    (end > j).then_some(end)
}

/// End of the number starting at `i`, if one starts there.
fn number_end(b: &[u8], i: usize) -> Option<usize> {
    let mut j = i;
    if j < b.len() && matches!(b[j], b'+' | b'-') {
        j += 1;
    }
    let int_end = digits_end(b, j);
    let has_int = int_end > j;
    let has_dot = int_end < b.len() && b[int_end] == b'.';

    if has_dot {
        let frac_end = digits_end(b, int_end + 1);
        if frac_end > int_end + 1 {
            return Some(exponent_end(b, frac_end).unwrap_or(frac_end));
        }
        if has_int {
            let after_dot = int_end + 1;
            return Some(exponent_end(b, after_dot).unwrap_or(after_dot));
        }
    }
    if has_int {
        return Some(exponent_end(b, int_end).unwrap_or(int_end));
    }
    None
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Iterator over the tokens of a path-data string.
#[derive(Debug, Clone)]
pub struct PathScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> PathScanner<'a> {
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte length of the character at the current position.
    fn char_len(&self) -> usize {
        self.src[self.pos..].chars().next().map_or(1, char::len_utf8)
    }
}

impl<'a> Iterator for PathScanner<'a> {
    type Item = PathToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let b = self.src.as_bytes();
        while self.pos < b.len() && is_separator(b[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= b.len() {
            return None;
        }

        let start = self.pos;
        if let Some(end) = number_end(b, start) {
            self.pos = end;
            return Some(match self.src[start..end].parse::<Scalar>() {
                Ok(v) => PathToken::Number(v),
                Err(_) => PathToken::Junk(&self.src[start..end]),
            });
        }
        if b[start].is_ascii_alphabetic() {
            self.pos += 1;
            return Some(PathToken::Letter(char::from(b[start])));
        }

        // junk runs up to the next separator or token start
        self.pos += self.char_len();
        while self.pos < b.len()
            && !is_separator(b[self.pos])
            && !b[self.pos].is_ascii_alphabetic()
            && number_end(b, self.pos).is_none()
        {
            self.pos += self.char_len();
        }
        Some(PathToken::Junk(&self.src[start..self.pos]))
    }
}

/// Every number in `s`, in order; letters and junk are ignored.
#[must_use]
pub fn numbers(s: &str) -> Vec<Scalar> {
    PathScanner::new(s)
        .filter_map(|t| match t {
            PathToken::Number(v) if v.is_finite() => Some(v),
            _ => None,
        })
        .collect()
}

/// The number at the start of `s` (after leading whitespace), ignoring any
/// trailing unit text: `"12.5px"` gives `12.5`.
#[must_use]
pub fn leading_number(s: &str) -> Option<Scalar> {
    let s = s.trim_start();
    let end = number_end(s.as_bytes(), 0)?;
    s[..end].parse().ok().filter(|v: &Scalar| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
