//! The geometry host the importer builds into.
//!
//! The importer never owns geometry; it issues creation and editing calls
//! against a [`Host`]. [`Scene`] is the in-memory implementation; an
//! embedding modelling application would provide its own.

use std::path::Path;

use svgimport_geometry::arc::ArcSpec;
use svgimport_geometry::bbox::BoundingBox;
use svgimport_geometry::bezier::ControlPolygon;
use svgimport_geometry::scene::{EntityId, Scene};
use svgimport_geometry::types::{Point, Rgb, Scalar, Transform};

/// Scene-graph operations the importer needs.
pub trait Host {
    /// The group new top-level content goes into.
    fn active_group(&self) -> EntityId;

    fn add_group(&mut self, parent: EntityId) -> EntityId;

    /// Add a straight edge; `None` when the edge would have zero length.
    fn add_line(&mut self, group: EntityId, start: Point, end: Point) -> Option<EntityId>;

    /// Add a connected chain of edges through `points`.
    fn add_curve(&mut self, group: EntityId, points: Vec<Point>) -> Option<EntityId>;

    /// Record the Bezier control points a curve was sampled from.
    fn attach_control_polygon(&mut self, curve: EntityId, polygon: &ControlPolygon);

    fn add_arc(&mut self, group: EntityId, spec: &ArcSpec) -> Option<EntityId>;

    /// Create faces bounded by loops through `edge`. Returns how many.
    fn find_faces(&mut self, edge: EntityId) -> usize;

    fn set_name(&mut self, entity: EntityId, name: &str);

    /// Faces directly inside `group`.
    fn faces(&self, group: EntityId) -> Vec<EntityId>;

    fn set_fill_color(&mut self, face: EntityId, color: Rgb, back: bool);

    fn add_image(
        &mut self,
        group: EntityId,
        path: &Path,
        origin: Point,
        width: Scalar,
        height: Scalar,
    ) -> EntityId;

    /// Apply `t` after the entity's current placement.
    fn apply_transform(&mut self, entity: EntityId, t: &Transform);

    fn copy(&mut self, entity: EntityId) -> Option<EntityId>;

    /// Merge a group's contents into its parent and remove the group.
    fn explode(&mut self, group: EntityId);

    fn entity_count(&self, group: EntityId) -> usize;

    /// Bounds of an entity in its parent's coordinates.
    fn bounds(&self, entity: EntityId) -> BoundingBox;

    fn start_operation(&mut self, name: &str);
    fn commit_operation(&mut self);
    fn abort_operation(&mut self);
}

impl Host for Scene {
    fn active_group(&self) -> EntityId {
        self.root()
    }

    fn add_group(&mut self, parent: EntityId) -> EntityId {
        Self::add_group(self, parent)
    }

    fn add_line(&mut self, group: EntityId, start: Point, end: Point) -> Option<EntityId> {
        self.add_edge(group, start, end)
    }

    fn add_curve(&mut self, group: EntityId, points: Vec<Point>) -> Option<EntityId> {
        Self::add_curve(self, group, points)
    }

    fn attach_control_polygon(&mut self, curve: EntityId, polygon: &ControlPolygon) {
        self.set_control_polygon(curve, polygon);
    }

    fn add_arc(&mut self, group: EntityId, spec: &ArcSpec) -> Option<EntityId> {
        Self::add_arc(self, group, spec)
    }

    fn find_faces(&mut self, edge: EntityId) -> usize {
        Self::find_faces(self, edge)
    }

    fn set_name(&mut self, entity: EntityId, name: &str) {
        Self::set_name(self, entity, name);
    }

    fn faces(&self, group: EntityId) -> Vec<EntityId> {
        Self::faces(self, group)
    }

    fn set_fill_color(&mut self, face: EntityId, color: Rgb, back: bool) {
        self.set_face_material(face, color, back);
    }

    fn add_image(
        &mut self,
        group: EntityId,
        path: &Path,
        origin: Point,
        width: Scalar,
        height: Scalar,
    ) -> EntityId {
        Self::add_image(self, group, path.to_path_buf(), origin, width, height)
    }

    fn apply_transform(&mut self, entity: EntityId, t: &Transform) {
        self.transform_entity(entity, t);
    }

    fn copy(&mut self, entity: EntityId) -> Option<EntityId> {
        Self::copy(self, entity)
    }

    fn explode(&mut self, group: EntityId) {
        Self::explode(self, group);
    }

    fn entity_count(&self, group: EntityId) -> usize {
        Self::entity_count(self, group)
    }

    fn bounds(&self, entity: EntityId) -> BoundingBox {
        Self::bounds(self, entity)
    }

    fn start_operation(&mut self, name: &str) {
        Self::start_operation(self, name);
    }

    fn commit_operation(&mut self) {
        Self::commit_operation(self);
    }

    fn abort_operation(&mut self) {
        Self::abort_operation(self);
    }
}
