//! Closed-loop search over a set of planar segments.
//!
//! Segment endpoints are welded on a fixed grid so that an arc ending a
//! hair away from the next line still joins it. Welded vertices are
//! interned into a dense index, and the smallest loop through a seed
//! segment is found breadth-first.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{Point, Scalar, NEAR_ZERO};

/// Grid spacing used to weld segment endpoints.
pub const WELD_TOLERANCE: Scalar = 1e-6;

type VertexKey = (i64, i64);

#[expect(
    clippy::cast_possible_truncation,
    reason = "coordinates far beyond i64 range are not meaningful drawings"
)]
fn weld_key(p: Point) -> VertexKey {
    (
        (p.x / WELD_TOLERANCE).round() as i64,
        (p.y / WELD_TOLERANCE).round() as i64,
    )
}

/// Undirected graph of welded segments.
#[derive(Debug, Default)]
struct SegmentGraph {
    ids: HashMap<VertexKey, usize>,
    points: Vec<Point>,
    adjacency: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>,
}

impl SegmentGraph {
    fn vertex(&mut self, p: Point) -> usize {
        let key = weld_key(p);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.points.len();
        self.ids.insert(key, id);
        self.points.push(p);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add a segment; degenerate and duplicate segments are dropped.
    fn add(&mut self, a: Point, b: Point) {
        let u = self.vertex(a);
        let v = self.vertex(b);
        if u == v || !self.edges.insert((u.min(v), u.max(v))) {
            return;
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
    }

    fn lookup(&self, p: Point) -> Option<usize> {
        self.ids.get(&weld_key(p)).copied()
    }

    /// Shortest path from `from` to `to` that does not use the direct edge
    /// between them.
    fn path_avoiding_edge(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut prev = vec![usize::MAX; self.points.len()];
        let mut queue = VecDeque::from([from]);
        prev[from] = from;
        while let Some(u) = queue.pop_front() {
            if u == to {
                let mut path = vec![to];
                let mut cur = to;
                while cur != from {
                    cur = prev[cur];
                    path.push(cur);
                }
                path.reverse();
                return Some(path);
            }
            for &w in &self.adjacency[u] {
                let direct = (u == from && w == to) || (u == to && w == from);
                if direct || prev[w] != usize::MAX {
                    continue;
                }
                prev[w] = u;
                queue.push_back(w);
            }
        }
        None
    }
}

/// Find the smallest closed loop that contains the `seed` segment.
///
/// Returns the loop's vertices in order, starting at the seed's first
/// endpoint, or `None` when the seed is not on any loop of at least three
/// vertices enclosing a non-zero area.
#[must_use]
pub fn shortest_loop(segments: &[(Point, Point)], seed: (Point, Point)) -> Option<Vec<Point>> {
    let mut graph = SegmentGraph::default();
    for &(a, b) in segments {
        graph.add(a, b);
    }
    graph.add(seed.0, seed.1);
    let u = graph.lookup(seed.0)?;
    let v = graph.lookup(seed.1)?;
    if u == v {
        return None;
    }
    // u -> v via the seed, then v back to u the short way round
    let back = graph.path_avoiding_edge(v, u)?;
    let mut outline = vec![graph.points[u]];
    outline.extend(back[..back.len() - 1].iter().map(|&i| graph.points[i]));
    if outline.len() < 3 || signed_area(&outline).abs() < NEAR_ZERO {
        return None;
    }
    Some(outline)
}

/// Signed area of a closed polygon (positive when counter-clockwise).
#[must_use]
pub fn signed_area(outline: &[Point]) -> Scalar {
    let n = outline.len();
    if n < 3 {
        return 0.0;
    }
    let twice: Scalar = (0..n)
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            a.x.mul_add(b.y, -(b.x * a.y))
        })
        .sum();
    twice * 0.5
}

/// Whether two outlines visit the same welded vertices, ignoring start
/// point and direction.
#[must_use]
pub fn same_loop(a: &[Point], b: &[Point]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut ka: Vec<VertexKey> = a.iter().map(|&p| weld_key(p)).collect();
    let mut kb: Vec<VertexKey> = b.iter().map(|&p| weld_key(p)).collect();
    ka.sort_unstable();
    kb.sort_unstable();
    ka == kb
}
