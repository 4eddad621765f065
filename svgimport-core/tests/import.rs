use std::path::{Path, PathBuf};

use svgimport_core::host::Host;
use svgimport_core::{ErrorKind, ImportOptions, ImportReport, Severity, import_str};
use svgimport_geometry::arc::ArcSpec;
use svgimport_geometry::bbox::BoundingBox;
use svgimport_geometry::bezier::ControlPolygon;
use svgimport_geometry::scene::{Entity, EntityId, Scene, SceneStats};
use svgimport_geometry::types::{EPSILON, Point, Rgb, Scalar, Transform};

fn import(svg: &str) -> (Scene, ImportReport) {
    import_with(svg, &ImportOptions::default())
}

fn import_with(svg: &str, options: &ImportOptions) -> (Scene, ImportReport) {
    let mut scene = Scene::new();
    let report = import_str(&mut scene, svg, "test.svg", options).expect("import succeeds");
    (scene, report)
}

fn warnings(report: &ImportReport) -> usize {
    report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count()
}

fn assert_close(a: Scalar, b: Scalar) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

// ---------------------------------------------------------------------------
// Host wrapper that records face-finding seeds
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingHost {
    scene: Scene,
    seeds: Vec<EntityId>,
}

impl Host for RecordingHost {
    fn active_group(&self) -> EntityId {
        self.scene.root()
    }
    fn add_group(&mut self, parent: EntityId) -> EntityId {
        self.scene.add_group(parent)
    }
    fn add_line(&mut self, group: EntityId, start: Point, end: Point) -> Option<EntityId> {
        self.scene.add_edge(group, start, end)
    }
    fn add_curve(&mut self, group: EntityId, points: Vec<Point>) -> Option<EntityId> {
        self.scene.add_curve(group, points)
    }
    fn attach_control_polygon(&mut self, curve: EntityId, polygon: &ControlPolygon) {
        self.scene.set_control_polygon(curve, polygon);
    }
    fn add_arc(&mut self, group: EntityId, spec: &ArcSpec) -> Option<EntityId> {
        self.scene.add_arc(group, spec)
    }
    fn find_faces(&mut self, edge: EntityId) -> usize {
        self.seeds.push(edge);
        self.scene.find_faces(edge)
    }
    fn set_name(&mut self, entity: EntityId, name: &str) {
        self.scene.set_name(entity, name);
    }
    fn faces(&self, group: EntityId) -> Vec<EntityId> {
        self.scene.faces(group)
    }
    fn set_fill_color(&mut self, face: EntityId, color: Rgb, back: bool) {
        self.scene.set_face_material(face, color, back);
    }
    fn add_image(
        &mut self,
        group: EntityId,
        path: &Path,
        origin: Point,
        width: Scalar,
        height: Scalar,
    ) -> EntityId {
        self.scene
            .add_image(group, path.to_path_buf(), origin, width, height)
    }
    fn apply_transform(&mut self, entity: EntityId, t: &Transform) {
        self.scene.transform_entity(entity, t);
    }
    fn copy(&mut self, entity: EntityId) -> Option<EntityId> {
        self.scene.copy(entity)
    }
    fn explode(&mut self, group: EntityId) {
        self.scene.explode(group);
    }
    fn entity_count(&self, group: EntityId) -> usize {
        self.scene.entity_count(group)
    }
    fn bounds(&self, entity: EntityId) -> BoundingBox {
        self.scene.bounds(entity)
    }
    fn start_operation(&mut self, name: &str) {
        self.scene.start_operation(name);
    }
    fn commit_operation(&mut self) {
        self.scene.commit_operation();
    }
    fn abort_operation(&mut self) {
        self.scene.abort_operation();
    }
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn root_group_is_named_svg() {
    let (scene, report) = import(r#"<svg><path d="M0,0 L10,0"/></svg>"#);
    assert_eq!(scene.name(report.root), Some("SVG"));
    assert_eq!(scene.parent(report.root), Some(scene.root()));
    assert_eq!(scene.operation(), None);
}

#[test]
fn unknown_subtree_is_skipped() {
    let svg = r#"<svg>
        <foo><path d="M0,0 L10,0"/></foo>
        <path id="tri" d="M0,0 L10,0 L10,10 Z"/>
    </svg>"#;
    let (scene, report) = import(svg);
    assert_eq!(
        scene.stats(),
        SceneStats {
            groups: 2,
            edges: 3,
            curves: 0,
            faces: 1,
            images: 0,
        }
    );
    assert_eq!(warnings(&report), 1);
    let path_group = scene.children(report.root)[0];
    assert_eq!(scene.name(path_group), Some("tri"));
}

#[test]
fn ignored_elements_are_silent() {
    let svg = r#"<svg>
        <defs><linearGradient id="g"/></defs>
        <sodipodi:namedview id="base"/>
        <metadata><rdf:RDF/></metadata>
        <path d="M0,0 L10,0"/>
    </svg>"#;
    let (scene, report) = import(svg);
    assert_eq!(warnings(&report), 0);
    assert_eq!(scene.entity_count(report.root), 1);
}

#[test]
fn groups_take_labels_and_ids() {
    let svg = r#"<svg>
        <g id="layer1" inkscape:label="Layer 1">
            <path id="p1" d="M0,0 L10,0"/>
            <a id="link"><path d="M0,0 L0,10"/></a>
        </g>
    </svg>"#;
    let (scene, report) = import(svg);
    let layer = scene.children(report.root)[0];
    assert_eq!(scene.name(layer), Some("Layer 1"));
    let kids = scene.children(layer);
    assert_eq!(kids.len(), 2);
    assert_eq!(scene.name(kids[0]), Some("p1"));
    assert_eq!(scene.name(kids[1]), Some("link"));
}

#[test]
fn debug_mode_keeps_info_messages() {
    let svg = r#"<svg><g><path d="M0,0 L10,0"/></g></svg>"#;
    let (_, quiet) = import(svg);
    assert!(quiet.diagnostics.is_empty());

    let options = ImportOptions {
        debug: true,
        ..ImportOptions::default()
    };
    let (_, verbose) = import_with(svg, &options);
    assert!(
        verbose
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Info)
    );
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn separators_do_not_matter() {
    let forms = ["M1,2L30,4L5,60z", "M 1 2 L 30 4 L 5 60 Z", "M1 2,L30,4 L 5,60Z"];
    let mut results = Vec::new();
    for d in forms {
        let (scene, report) = import(&format!(r#"<svg><path d="{d}"/></svg>"#));
        results.push((scene.stats(), scene.bounds(report.root)));
    }
    for r in &results[1..] {
        assert_eq!(r.0, results[0].0);
        assert_close(r.1.min_x, results[0].1.min_x);
        assert_close(r.1.max_y, results[0].1.max_y);
    }
    assert_eq!(results[0].0.faces, 1);
}

#[test]
fn close_seeds_face_finding_once() {
    let mut host = RecordingHost::default();
    let report = import_str(
        &mut host,
        r#"<svg><path d="M 0,0 L 10,0 Z"/></svg>"#,
        "close.svg",
        &ImportOptions::default(),
    )
    .expect("import succeeds");
    // seeded on the L segment, not on the closing line
    let group = host.scene.children(report.root)[0];
    let drawn = host.scene.children(group);
    assert_eq!(host.seeds, vec![drawn[0]]);
    // two edges back and forth enclose nothing
    assert_eq!(host.scene.stats().edges, 2);
    assert_eq!(host.scene.stats().faces, 0);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn cubic_segments_keep_control_points() {
    let (scene, report) = import(r#"<svg><path d="M0,0 C0,10 10,10 10,0"/></svg>"#);
    let group = scene.children(report.root)[0];
    let curve = scene.children(group)[0];
    let polygon = scene.control_polygon(curve).expect("control polygon");
    assert_eq!(polygon.degree(), 3);
    match scene.get(curve) {
        Some(Entity::Curve { points, .. }) => assert_eq!(points.len(), 17),
        other => panic!("expected curve, got {other:?}"),
    }
}

#[test]
fn unsupported_path_commands_warn() {
    let (scene, report) = import(r#"<svg><path d="M0,0 H10 V10 L0,10"/></svg>"#);
    assert_eq!(warnings(&report), 2);
    assert_eq!(scene.stats().edges, 1);
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[test]
fn degenerate_rect_builds_nothing() {
    let (scene, report) = import(r#"<svg><rect x="0" y="0" width="0" height="0"/></svg>"#);
    let stats = scene.stats();
    assert_eq!(stats.edges, 0);
    assert_eq!(stats.faces, 0);
    assert_eq!(warnings(&report), 0);
}

#[test]
fn rect_needs_all_placement_attributes() {
    let (scene, report) = import(r#"<svg><rect x="0" y="0" height="5"/></svg>"#);
    assert_eq!(scene.stats().edges, 0);
    assert_eq!(warnings(&report), 1);
}

#[test]
fn rect_radius_falls_back_to_ry() {
    let (scene, _) = import(r#"<svg><rect x="0" y="0" width="20" height="10" ry="2"/></svg>"#);
    let stats = scene.stats();
    assert_eq!(stats.edges, 4);
    assert_eq!(stats.curves, 4);
    assert_eq!(stats.faces, 1);
    // the scratch arc group is merged away
    assert_eq!(stats.groups, 2);
}

#[test]
fn polygon_and_polyline() {
    let svg = r#"<svg>
        <polygon points="0,0 10,0 10,10"/>
        <polyline points="0,0 10,0 10,10"/>
        <line x1="0" y1="0" x2="5" y2="5"/>
    </svg>"#;
    let (scene, _) = import(svg);
    let stats = scene.stats();
    assert_eq!(stats.edges, 3 + 2 + 1);
    assert_eq!(stats.faces, 1);
}

// ---------------------------------------------------------------------------
// Style and transforms
// ---------------------------------------------------------------------------

#[test]
fn fill_colour_paints_faces() {
    let svg = r#"<svg><path style="fill:#ff0000;stroke:none" d="M0,0 L10,0 L10,10 Z"/></svg>"#;
    for back in [false, true] {
        let options = ImportOptions {
            back_material: back,
            ..ImportOptions::default()
        };
        let (scene, report) = import_with(svg, &options);
        let group = scene.children(report.root)[0];
        let faces = scene.faces(group);
        assert_eq!(faces.len(), 1);
        match scene.get(faces[0]) {
            Some(Entity::Face {
                material,
                back_material,
                ..
            }) => {
                let red = Some(Rgb::new(255, 0, 0));
                assert_eq!(*material, red);
                assert_eq!(*back_material, if back { red } else { None });
            }
            other => panic!("expected face, got {other:?}"),
        }
    }
}

#[test]
fn only_first_transform_function_applies() {
    let svg = r#"<svg><g transform="translate(10,0) scale(2)"><path d="M0,0 L1,0"/></g></svg>"#;
    let (scene, report) = import(svg);
    let g = scene.children(report.root)[0];
    let bb = scene.bounds(g);
    assert_close(bb.min_x, 10.0);
    assert_close(bb.max_x, 11.0);
    assert_eq!(warnings(&report), 1);
}

#[test]
fn matrix_transform_on_path() {
    let svg = r#"<svg><path transform="matrix(2,0,0,2,5,5)" d="M0,0 L1,1"/></svg>"#;
    let (scene, report) = import(svg);
    let g = scene.children(report.root)[0];
    let bb = scene.bounds(g);
    assert_close(bb.min_x, 5.0);
    assert_close(bb.max_x, 7.0);
    assert_close(bb.max_y, 7.0);
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[test]
fn lone_image_replaces_its_group() {
    let svg = r#"<svg><image xlink:href="pic.png" x="0" y="0" width="10" height="5"/></svg>"#;
    let options = ImportOptions {
        base_dir: Some(PathBuf::from("/drawings")),
        ..ImportOptions::default()
    };
    let (scene, report) = import_with(svg, &options);
    let kids = scene.children(report.root);
    assert_eq!(kids.len(), 1);
    match scene.get(kids[0]) {
        Some(Entity::Image { path, .. }) => {
            assert_eq!(path, &PathBuf::from("/drawings/pic.png"));
        }
        other => panic!("expected image, got {other:?}"),
    }
    assert_eq!(scene.stats().images, 1);
}

#[test]
fn embedded_image_data_warns() {
    let svg = r#"<svg><image xlink:href="data:image/png;base64,AAAA" x="0" y="0" width="1" height="1"/></svg>"#;
    let (scene, report) = import(svg);
    assert_eq!(scene.stats().images, 0);
    assert_eq!(warnings(&report), 1);
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn drawing_is_placed_in_inches() {
    let svg = r#"<svg><path d="M 0,0 L 90,0 L 90,45 Z"/></svg>"#;
    let (scene, report) = import(svg);
    let bb = scene.bounds(report.root);
    assert!(bb.min_x.abs() < EPSILON);
    assert!(bb.min_y.abs() < EPSILON);
    assert!((bb.max_x - 1.0).abs() < EPSILON);
    assert!((bb.max_y - 0.5).abs() < EPSILON);
    assert!((report.normalization.tzz + 1.0).abs() < EPSILON);

    let options = ImportOptions {
        scale: Some(2.0),
        ..ImportOptions::default()
    };
    let (scene, report) = import_with(svg, &options);
    assert!((scene.bounds(report.root).max_x - 2.0).abs() < EPSILON);
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

#[test]
fn truncated_document_leaves_nothing() {
    let mut scene = Scene::new();
    let err = import_str(
        &mut scene,
        r#"<svg><g><path d="M0,0 L10,0 L10,10 Z"/>"#,
        "broken.svg",
        &ImportOptions::default(),
    )
    .expect_err("truncated input fails");
    assert!(matches!(err.kind, ErrorKind::UnexpectedEof(_)), "{err:?}");
    assert!(err.to_string().contains("broken.svg"));
    assert_eq!(scene.stats(), SceneStats::default());
    assert_eq!(scene.operation(), None);
}

#[test]
fn mismatched_end_tag_is_fatal() {
    let mut scene = Scene::new();
    let err = import_str(
        &mut scene,
        r#"<svg><g><path d="M0,0 L10,0"/></svg>"#,
        "bad.svg",
        &ImportOptions::default(),
    )
    .expect_err("mismatched tags fail");
    assert!(matches!(err.kind, ErrorKind::Malformed(_)), "{err:?}");
    assert_eq!(scene.stats(), SceneStats::default());
}

#[test]
fn missing_file_is_an_io_error() {
    let mut scene = Scene::new();
    let err = svgimport_core::import_file(
        &mut scene,
        Path::new("/nonexistent/drawing.svg"),
        &ImportOptions::default(),
    )
    .expect_err("missing file fails");
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
