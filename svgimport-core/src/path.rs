//! Path-data interpreter.
//!
//! Commands `M`, `L`, `C`, and `Z` (either case) produce geometry. The
//! other path commands (`H V S Q T A`) are accepted and their parameters
//! consumed without effect. Any other letter is reported and leaves the
//! active command unchanged.
//!
//! Numbers accumulate until the active command has its full parameter
//! count, then the command fires. After a move, further coordinate pairs
//! are implicit line-tos.

use svgimport_geometry::bezier::{ControlPolygon, PATH_SEGMENTS};
use svgimport_geometry::scene::EntityId;
use svgimport_geometry::types::{Point, Scalar};

use crate::error::{Diagnostics, ErrorKind};
use crate::host::Host;
use crate::scanner::{PathScanner, PathToken};

/// Every command letter of the path language.
const COMMAND_LETTERS: &str = "MZLCHVSQTA";

/// Interpreter state for one path element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathState {
    /// Last resolved coordinate.
    pub current: Option<Point>,
    /// Origin of the current subpath.
    pub start: Option<Point>,
    /// Parameters gathered for the active command.
    pub params: Vec<Scalar>,
    pub command: Option<char>,
    /// Most recent edge or curve, the seed for face finding on close.
    pub last_edge: Option<EntityId>,
}

impl PathState {
    /// Resolve a coordinate pair, relative to the current point when asked
    /// and one exists.
    fn resolve(&self, x: Scalar, y: Scalar, relative: bool) -> Point {
        match self.current {
            Some(c) if relative => Point::new(x + c.x, y + c.y),
            _ => Point::new(x, y),
        }
    }

    /// Take exactly `N` pending parameters.
    fn take<const N: usize>(&mut self) -> Result<[Scalar; N], ErrorKind> {
        let params: [Scalar; N] = self.params.as_slice().try_into().map_err(|_| {
            ErrorKind::Internal(format!(
                "path command fired with {} parameters, needs {N}",
                self.params.len()
            ))
        })?;
        self.params.clear();
        Ok(params)
    }
}

/// Drives a [`PathState`] over the tokens of one `d` attribute.
pub struct PathInterpreter<'a, H: Host + ?Sized> {
    host: &'a mut H,
    group: EntityId,
    diag: &'a mut Diagnostics,
    state: PathState,
}

impl<'a, H: Host + ?Sized> PathInterpreter<'a, H> {
    pub fn new(host: &'a mut H, group: EntityId, diag: &'a mut Diagnostics) -> Self {
        Self {
            host,
            group,
            diag,
            state: PathState::default(),
        }
    }

    /// Interpret a whole `d` string and return the final state.
    pub fn run(mut self, data: &str) -> Result<PathState, ErrorKind> {
        for token in PathScanner::new(data) {
            match token {
                PathToken::Letter(c) => self.command(c),
                PathToken::Number(v) if !v.is_finite() => {
                    self.diag.warn("number out of range in path data");
                }
                PathToken::Number(v) => self.number(v)?,
                PathToken::Junk(s) => self.diag.warn(format!("malformed path token \"{s}\"")),
            }
        }
        Ok(self.state)
    }

    fn command(&mut self, c: char) {
        if !COMMAND_LETTERS.contains(c.to_ascii_uppercase()) {
            self.diag.warn(format!("malformed path command '{c}'"));
            return;
        }
        if !self.state.params.is_empty() {
            self.diag.warn(format!(
                "dropping {} dangling parameters before '{c}'",
                self.state.params.len()
            ));
            self.state.params.clear();
        }
        self.state.command = Some(c);
        match c {
            'Z' | 'z' => self.close(),
            'M' | 'm' | 'L' | 'l' | 'C' | 'c' => {}
            _ => self.diag.warn(format!("unsupported path command '{c}'")),
        }
    }

    fn number(&mut self, v: Scalar) -> Result<(), ErrorKind> {
        self.state.params.push(v);
        let n = self.state.params.len();
        match self.state.command {
            Some(c @ ('M' | 'm')) if n == 2 => self.move_to(c == 'm'),
            Some(c @ ('L' | 'l')) if n == 2 => self.line_to(c == 'l'),
            Some(c @ ('C' | 'c')) if n == 6 => self.cubic_to(c == 'c'),
            Some('M' | 'm' | 'L' | 'l' | 'C' | 'c') => Ok(()),
            Some(_) => {
                self.state.params.clear();
                Ok(())
            }
            None => {
                self.diag.warn(format!("number {v} before any path command"));
                self.state.params.clear();
                Ok(())
            }
        }
    }

    fn move_to(&mut self, relative: bool) -> Result<(), ErrorKind> {
        let [x, y] = self.state.take()?;
        let p = self.state.resolve(x, y, relative);
        self.state.current = Some(p);
        self.state.start = Some(p);
        self.state.command = Some(if relative { 'l' } else { 'L' });
        Ok(())
    }

    fn line_to(&mut self, relative: bool) -> Result<(), ErrorKind> {
        let [x, y] = self.state.take()?;
        let p1 = self.state.resolve(x, y, relative);
        match self.state.current {
            Some(p0) => {
                if let Some(edge) = self.host.add_line(self.group, p0, p1) {
                    self.state.last_edge = Some(edge);
                }
            }
            None => self.diag.warn("line-to without a current point"),
        }
        self.state.current = Some(p1);
        Ok(())
    }

    fn cubic_to(&mut self, relative: bool) -> Result<(), ErrorKind> {
        let [x1, y1, x2, y2, x3, y3] = self.state.take()?;
        let p1 = self.state.resolve(x1, y1, relative);
        let p2 = self.state.resolve(x2, y2, relative);
        let p3 = self.state.resolve(x3, y3, relative);
        match self.state.current {
            Some(p0) => {
                let polygon = ControlPolygon::new(vec![p0, p1, p2, p3])?;
                let points = polygon.sample(PATH_SEGMENTS)?;
                if let Some(curve) = self.host.add_curve(self.group, points) {
                    self.host.attach_control_polygon(curve, &polygon);
                    self.state.last_edge = Some(curve);
                }
            }
            None => self.diag.warn("curve-to without a current point"),
        }
        self.state.current = Some(p3);
        Ok(())
    }

    fn close(&mut self) {
        if let (Some(p0), Some(ps)) = (self.state.current, self.state.start) {
            self.host.add_line(self.group, p0, ps);
        }
        if let Some(edge) = self.state.last_edge.take() {
            self.host.find_faces(edge);
        }
        self.state.current = self.state.start;
    }
}

/// Interpret `data` into `group`.
pub fn interpret_path<H: Host + ?Sized>(
    host: &mut H,
    group: EntityId,
    data: &str,
    diag: &mut Diagnostics,
) -> Result<PathState, ErrorKind> {
    PathInterpreter::new(host, group, diag).run(data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
