//! An in-memory geometry host.
//!
//! A [`Scene`] is an arena of entities addressed by [`EntityId`]. Groups
//! own an ordered child list and carry a transform from their own
//! coordinates into their parent's; every other entity stores its geometry
//! directly in the coordinates of the group that holds it.
//!
//! Operations bracket a batch of edits: [`Scene::start_operation`] takes a
//! checkpoint, [`Scene::abort_operation`] rolls back to it.

use std::path::PathBuf;

use crate::arc::{ArcSpec, arc_points};
use crate::bbox::BoundingBox;
use crate::bezier::ControlPolygon;
use crate::faces::{same_loop, shortest_loop, signed_area};
use crate::transform::{Transformable, translation};
use crate::types::{NEAR_ZERO, Point, Rgb, Scalar, Transform};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Handle to an entity in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a sampled curve was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Bezier,
    Arc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Group {
        name: String,
        transform: Transform,
        children: Vec<EntityId>,
    },
    Edge {
        start: Point,
        end: Point,
    },
    /// A chain of edges through `points`.
    Curve {
        kind: CurveKind,
        points: Vec<Point>,
        control_polygon: Option<ControlPolygon>,
    },
    /// A planar face. The outline winds counter-clockwise when viewed from
    /// the side `normal_z` points to.
    Face {
        outline: Vec<Point>,
        normal_z: Scalar,
        material: Option<Rgb>,
        back_material: Option<Rgb>,
    },
    /// A raster image spanning `(0, 0)..(width, height)` in its own
    /// coordinates.
    Image {
        path: PathBuf,
        width: Scalar,
        height: Scalar,
        transform: Transform,
    },
}

impl Entity {
    /// Apply `t` to this entity in its parent's coordinates.
    fn transform_in_place(&mut self, t: &Transform) {
        match self {
            Self::Group { transform, .. } | Self::Image { transform, .. } => {
                *transform = transform.then(t);
            }
            Self::Edge { start, end } => {
                *start = start.transformed(t);
                *end = end.transformed(t);
            }
            Self::Curve {
                points,
                control_polygon,
                ..
            } => {
                *points = points.transformed(t);
                if let Some(cp) = control_polygon {
                    // a transformed polygon keeps its point count
                    if let Ok(moved) = ControlPolygon::new(cp.points().to_vec().transformed(t)) {
                        *cp = moved;
                    }
                }
            }
            Self::Face {
                outline, normal_z, ..
            } => {
                *outline = outline.transformed(t);
                if t.reverses_winding() {
                    outline.reverse();
                }
                if t.tzz < 0.0 {
                    *normal_z = -*normal_z;
                }
            }
        }
    }
}

/// Live entity counts reachable from the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub groups: usize,
    pub edges: usize,
    pub curves: usize,
    pub faces: usize,
    pub images: usize,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<EntityId>,
    entity: Entity,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    root: EntityId,
    checkpoint: Option<(String, Vec<Option<Node>>)>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only the root group.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            entity: Entity::Group {
                name: "Model".into(),
                transform: Transform::IDENTITY,
                children: Vec::new(),
            },
        };
        Self {
            nodes: vec![Some(root)],
            root: EntityId(0),
            checkpoint: None,
        }
    }

    #[must_use]
    pub const fn root(&self) -> EntityId {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.node(id).map(|n| &n.entity)
    }

    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a group (empty for anything else).
    #[must_use]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        match self.get(id) {
            Some(Entity::Group { children, .. }) => children.as_slice(),
            _ => &[],
        }
    }

    #[must_use]
    pub fn name(&self, id: EntityId) -> Option<&str> {
        match self.get(id) {
            Some(Entity::Group { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Number of direct children of a group.
    #[must_use]
    pub fn entity_count(&self, group: EntityId) -> usize {
        self.children(group).len()
    }

    fn node(&self, id: EntityId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: EntityId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.node_mut(id).map(|n| &mut n.entity)
    }

    fn is_group(&self, id: EntityId) -> bool {
        matches!(self.get(id), Some(Entity::Group { .. }))
    }

    fn alloc(&mut self, parent: EntityId, entity: Entity) -> EntityId {
        let id = EntityId(self.nodes.len());
        self.nodes.push(Some(Node {
            parent: Some(parent),
            entity,
        }));
        id
    }

    fn attach(&mut self, parent: EntityId, child: EntityId) {
        if let Some(Entity::Group { children, .. }) = self.entity_mut(parent) {
            children.push(child);
        }
    }

    /// Insert a new entity at the end of `group`. Anything other than a
    /// live group as the container falls back to the root.
    fn insert(&mut self, group: EntityId, entity: Entity) -> EntityId {
        let parent = if self.is_group(group) { group } else { self.root };
        let id = self.alloc(parent, entity);
        self.attach(parent, id);
        id
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    pub fn add_group(&mut self, parent: EntityId) -> EntityId {
        self.insert(
            parent,
            Entity::Group {
                name: String::new(),
                transform: Transform::IDENTITY,
                children: Vec::new(),
            },
        )
    }

    /// Add a straight edge. Zero-length edges are not created.
    pub fn add_edge(&mut self, group: EntityId, start: Point, end: Point) -> Option<EntityId> {
        if (end - start).hypot() < NEAR_ZERO {
            return None;
        }
        Some(self.insert(group, Entity::Edge { start, end }))
    }

    /// Add a curve through sampled points. Needs at least two points.
    pub fn add_curve(&mut self, group: EntityId, points: Vec<Point>) -> Option<EntityId> {
        self.add_sampled(group, CurveKind::Bezier, points)
    }

    /// Add a sampled circular arc.
    pub fn add_arc(&mut self, group: EntityId, spec: &ArcSpec) -> Option<EntityId> {
        self.add_sampled(group, CurveKind::Arc, arc_points(spec))
    }

    fn add_sampled(
        &mut self,
        group: EntityId,
        kind: CurveKind,
        points: Vec<Point>,
    ) -> Option<EntityId> {
        if points.len() < 2 {
            return None;
        }
        Some(self.insert(
            group,
            Entity::Curve {
                kind,
                points,
                control_polygon: None,
            },
        ))
    }

    /// Attach Bezier control points to a curve. Returns `false` if `curve`
    /// is not a curve.
    pub fn set_control_polygon(&mut self, curve: EntityId, polygon: &ControlPolygon) -> bool {
        match self.entity_mut(curve) {
            Some(Entity::Curve {
                kind,
                control_polygon,
                ..
            }) => {
                *kind = CurveKind::Bezier;
                *control_polygon = Some(polygon.clone());
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn control_polygon(&self, curve: EntityId) -> Option<&ControlPolygon> {
        match self.get(curve) {
            Some(Entity::Curve {
                control_polygon, ..
            }) => control_polygon.as_ref(),
            _ => None,
        }
    }

    /// Add an image whose lower-left corner sits at `origin`.
    pub fn add_image(
        &mut self,
        group: EntityId,
        path: PathBuf,
        origin: Point,
        width: Scalar,
        height: Scalar,
    ) -> EntityId {
        self.insert(
            group,
            Entity::Image {
                path,
                width,
                height,
                transform: translation(origin.x, origin.y),
            },
        )
    }

    pub fn set_name(&mut self, id: EntityId, new_name: &str) {
        if let Some(Entity::Group { name, .. }) = self.entity_mut(id) {
            new_name.clone_into(name);
        }
    }

    // -----------------------------------------------------------------------
    // Faces
    // -----------------------------------------------------------------------

    /// Close a face over the smallest loop through `edge` within its group.
    ///
    /// Returns the number of faces created (0 or 1).
    pub fn find_faces(&mut self, edge: EntityId) -> usize {
        let seed = match self.get(edge) {
            Some(Entity::Edge { start, end }) => (*start, *end),
            Some(Entity::Curve { points, .. }) if points.len() >= 2 => (points[0], points[1]),
            _ => return 0,
        };
        let Some(group) = self.parent(edge) else {
            return 0;
        };

        let mut segments = Vec::new();
        for &child in self.children(group) {
            match self.get(child) {
                Some(Entity::Edge { start, end }) => segments.push((*start, *end)),
                Some(Entity::Curve { points, .. }) => {
                    segments.extend(points.windows(2).map(|w| (w[0], w[1])));
                }
                _ => {}
            }
        }
        let Some(mut outline) = shortest_loop(&segments, seed) else {
            return 0;
        };

        let duplicate = self.faces(group).into_iter().any(|f| match self.get(f) {
            Some(Entity::Face { outline: other, .. }) => same_loop(other, &outline),
            _ => false,
        });
        if duplicate {
            return 0;
        }
        if signed_area(&outline) < 0.0 {
            outline.reverse();
        }
        self.insert(
            group,
            Entity::Face {
                outline,
                normal_z: 1.0,
                material: None,
                back_material: None,
            },
        );
        1
    }

    /// Faces directly inside `group`.
    #[must_use]
    pub fn faces(&self, group: EntityId) -> Vec<EntityId> {
        self.children(group)
            .iter()
            .copied()
            .filter(|&c| matches!(self.get(c), Some(Entity::Face { .. })))
            .collect()
    }

    /// Paint a face; `back` also paints its reverse side.
    pub fn set_face_material(&mut self, face: EntityId, color: Rgb, back: bool) {
        if let Some(Entity::Face {
            material,
            back_material,
            ..
        }) = self.entity_mut(face)
        {
            *material = Some(color);
            if back {
                *back_material = Some(color);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Apply `t` after whatever placement the entity already has.
    pub fn transform_entity(&mut self, id: EntityId, t: &Transform) {
        if let Some(entity) = self.entity_mut(id) {
            entity.transform_in_place(t);
        }
    }

    /// Deep-copy an entity into the same parent. The root cannot be copied.
    pub fn copy(&mut self, id: EntityId) -> Option<EntityId> {
        let parent = self.parent(id)?;
        let new = self.clone_subtree(id, parent)?;
        self.attach(parent, new);
        Some(new)
    }

    fn clone_subtree(&mut self, id: EntityId, parent: EntityId) -> Option<EntityId> {
        let mut entity = self.get(id)?.clone();
        let children = match &mut entity {
            Entity::Group { children, .. } => std::mem::take(children),
            _ => Vec::new(),
        };
        let new = self.alloc(parent, entity);
        for child in children {
            if let Some(c) = self.clone_subtree(child, new) {
                self.attach(new, c);
            }
        }
        Some(new)
    }

    /// Dissolve a group into its parent: its transform is baked into each
    /// child and the children take the group's place in the parent's list.
    ///
    /// Returns the moved children. The root and non-groups are left alone.
    pub fn explode(&mut self, group: EntityId) -> Vec<EntityId> {
        let Some(parent) = self.parent(group) else {
            return Vec::new();
        };
        let (transform, children) = match self.get(group) {
            Some(Entity::Group {
                transform,
                children,
                ..
            }) => (*transform, children.clone()),
            _ => return Vec::new(),
        };
        for &child in &children {
            if let Some(node) = self.node_mut(child) {
                node.entity.transform_in_place(&transform);
                node.parent = Some(parent);
            }
        }
        if let Some(Entity::Group {
            children: siblings, ..
        }) = self.entity_mut(parent)
        {
            if let Some(pos) = siblings.iter().position(|&c| c == group) {
                siblings.splice(pos..=pos, children.iter().copied());
            }
        }
        self.nodes[group.0] = None;
        children
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Bounds of an entity in its parent's coordinates.
    #[must_use]
    pub fn bounds(&self, id: EntityId) -> BoundingBox {
        match self.get(id) {
            None => BoundingBox::EMPTY,
            Some(Entity::Group {
                transform,
                children,
                ..
            }) => {
                let mut bb = BoundingBox::EMPTY;
                for &c in children {
                    bb.union(&self.bounds(c));
                }
                bb.transformed(transform)
            }
            Some(Entity::Edge { start, end }) => BoundingBox::from_points([start, end]),
            Some(Entity::Curve { points, .. }) => BoundingBox::from_points(points),
            Some(Entity::Face { outline, .. }) => BoundingBox::from_points(outline),
            Some(Entity::Image {
                width,
                height,
                transform,
                ..
            }) => BoundingBox::from_points(&[Point::ZERO, Point::new(*width, *height)])
                .transformed(transform),
        }
    }

    /// Transform from the coordinates an entity's geometry is stored in to
    /// the root's parent space (the root's own transform included).
    ///
    /// For a group this is the space its children live in.
    #[must_use]
    pub fn world_transform(&self, id: EntityId) -> Transform {
        let mut t = Transform::IDENTITY;
        let mut cur = match self.get(id) {
            Some(Entity::Group { .. }) => Some(id),
            _ => self.parent(id),
        };
        while let Some(g) = cur {
            if let Some(Entity::Group { transform, .. }) = self.get(g) {
                t = t.then(transform);
            }
            cur = self.parent(g);
        }
        t
    }

    /// Entity counts reachable from the root (the root itself excluded).
    #[must_use]
    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats::default();
        let mut stack: Vec<EntityId> = self.children(self.root).to_vec();
        while let Some(id) = stack.pop() {
            match self.get(id) {
                Some(Entity::Group { children, .. }) => {
                    stats.groups += 1;
                    stack.extend_from_slice(children);
                }
                Some(Entity::Edge { .. }) => stats.edges += 1,
                Some(Entity::Curve { .. }) => stats.curves += 1,
                Some(Entity::Face { .. }) => stats.faces += 1,
                Some(Entity::Image { .. }) => stats.images += 1,
                None => {}
            }
        }
        stats
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Begin an undoable batch. A nested start keeps the outer checkpoint.
    pub fn start_operation(&mut self, name: &str) {
        if self.checkpoint.is_none() {
            self.checkpoint = Some((name.to_owned(), self.nodes.clone()));
        }
    }

    pub fn commit_operation(&mut self) {
        self.checkpoint = None;
    }

    /// Roll back every edit since `start_operation`.
    pub fn abort_operation(&mut self) {
        if let Some((_, nodes)) = self.checkpoint.take() {
            self.nodes = nodes;
        }
    }

    /// Name of the operation in progress.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.checkpoint.as_ref().map(|(name, _)| name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
