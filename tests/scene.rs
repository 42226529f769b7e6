#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use campus_geo::math::polygon_2d::point_in_ring;
use campus_geo::math::Point2;
use campus_geo::model::{EdgeEnd, EdgeKind, Graph, PolygonSet, TextAlignment};
use campus_geo::operations::{DraftKind, ReferenceSet, RingDraft};
use campus_geo::{EngineConfig, PolygonView, Scene};

fn init_tracing() {
    // Override with RUST_LOG (e.g. RUST_LOG=campus_geo=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn pt(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn draw(scene: &mut Scene, kind: DraftKind, corners: &[Point2]) -> usize {
    let mut draft = RingDraft::new(kind);
    for p in corners {
        let cursor = scene.draft_cursor(&draft, *p, false);
        assert!(scene.draft_click(&mut draft, &cursor).unwrap().is_none());
    }
    let first = corners[0];
    let cursor = scene.draft_cursor(&draft, pt(first.x + 1.0, first.y + 1.0), false);
    scene.draft_click(&mut draft, &cursor).unwrap().unwrap()
}

fn campus() -> Scene {
    let config = EngineConfig::default().with_canvas_size(1200.0, 800.0).unwrap();
    let mut scene = Scene::new(config);
    draw(
        &mut scene,
        DraftKind::Pavement,
        &[pt(-200.0, -200.0), pt(600.0, -200.0), pt(600.0, 600.0), pt(-200.0, 600.0)],
    );
    draw(
        &mut scene,
        DraftKind::Building,
        &[pt(0.0, 0.0), pt(120.0, 0.0), pt(120.0, 80.0), pt(0.0, 80.0)],
    );
    draw(
        &mut scene,
        DraftKind::Building,
        &[pt(300.0, 0.0), pt(380.0, 0.0), pt(380.0, 60.0), pt(340.0, 100.0), pt(300.0, 60.0)],
    );
    scene.set_viewpoint(pt(200.0, 300.0));
    scene
}

#[test]
fn editing_session_renders_consistent_views() {
    init_tracing();
    let mut scene = campus();
    assert_eq!(scene.polygons.len(), 3);

    scene.polygons.set_height(1, 60.0).unwrap();
    scene
        .polygons
        .set_colors(1, "#336699", Some("#6699cc".to_owned()))
        .unwrap();
    let entry = scene.polygons.add_entry(1).unwrap();
    scene.polygons.set_entry_position(1, entry, 0.6).unwrap();
    assert!(scene.polygons.toggle_description(1).unwrap());

    let views = scene.render_polygons();
    assert_eq!(views.len(), 3);
    assert!(matches!(views[0], PolygonView::Pavement { index: 0, .. }));

    for view in &views {
        let PolygonView::Building(building) = view else {
            continue;
        };
        let prism = building.prism.as_ref().unwrap();
        assert_eq!(prism.roof.len(), prism.footprint.len());
        assert!(!prism.silhouette.is_empty());
        for pair in prism.faces.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
        }
    }

    let PolygonView::Building(first) = views.iter().find(|v| v.index() == 1).unwrap() else {
        panic!("polygon 1 is a building");
    };
    assert_eq!(first.entries.len(), 1);
    let marker = first.entries[0].1;
    let footprint = scene.polygons.get(1).unwrap().ring.points().to_vec();
    assert!(!point_in_ring(&(marker.position + marker.direction() * 2.0), &footprint));
    let label = first.description.as_ref().unwrap();
    assert_eq!(label.alignment, TextAlignment::Center);
}

#[test]
fn viewpoint_changes_paint_order_and_pick() {
    init_tracing();
    let mut scene = campus();
    let order = |s: &Scene| -> Vec<usize> { s.render_polygons().iter().map(PolygonView::index).collect() };

    scene.set_viewpoint(pt(-100.0, 40.0));
    assert_eq!(order(&scene), vec![0, 2, 1]);
    scene.set_viewpoint(pt(500.0, 40.0));
    assert_eq!(order(&scene), vec![0, 1, 2]);

    assert_eq!(scene.pick(&pt(60.0, 40.0)), Some(1));
    assert_eq!(scene.pick(&pt(340.0, 90.0)), Some(2));
    assert_eq!(scene.pick(&pt(200.0, 200.0)), Some(0));
    assert_eq!(scene.pick(&pt(900.0, 900.0)), None);
}

#[test]
fn graph_edits_and_overlay() {
    init_tracing();
    let mut scene = campus();
    let a = scene
        .graph
        .add_edge(EdgeEnd::New(pt(200.0, 150.0)), EdgeEnd::New(pt(200.0, 400.0)), EdgeKind::Road { width: 10.0 })
        .unwrap();
    let hub = scene.graph.edge(a).unwrap().from;
    scene
        .graph
        .add_edge(EdgeEnd::Existing(hub), EdgeEnd::New(pt(450.0, 150.0)), EdgeKind::Road { width: 16.0 })
        .unwrap();
    let fence = scene
        .graph
        .add_edge(EdgeEnd::New(pt(150.0, 300.0)), EdgeEnd::New(pt(260.0, 300.0)), EdgeKind::Fence)
        .unwrap();
    scene
        .graph
        .add_edge(EdgeEnd::New(pt(180.0, 250.0)), EdgeEnd::New(pt(240.0, 350.0)), EdgeKind::Pathwalk)
        .unwrap();

    let overlay = scene.graph_overlay();
    assert_eq!(overlay.barriers.len(), 1);
    assert_eq!(overlay.barriers[0].fence, fence);
    assert_eq!(overlay.barriers[0].other, a);
    assert_relative_eq!(overlay.barriers[0].point.x, 200.0, epsilon = 1e-9);
    assert_eq!(overlay.gates.len(), 1);
    assert_eq!(overlay.joints.len(), 1);
    assert_relative_eq!(overlay.joints[0].radius, 8.0);
    assert_eq!(overlay.paint_order.last(), Some(&fence));

    // Snapping the hub onto a building corner column.
    let snapped = scene.drag_node(hub, pt(121.5, 150.0), true).unwrap();
    assert_eq!(snapped.point, pt(120.0, 150.0));

    let (_, pruned) = scene.graph.remove_edge(fence).unwrap();
    assert_eq!(pruned.len(), 2);
    scene.graph.validate().unwrap();
    assert!(scene.graph_overlay().barriers.is_empty());
}

#[test]
fn snapping_reference_sets() {
    init_tracing();
    let mut scene = campus();
    let spur = scene
        .graph
        .add_edge(EdgeEnd::New(pt(250.0, 250.0)), EdgeEnd::New(pt(900.0, 900.0)), EdgeKind::Pathwalk)
        .unwrap();
    let node = scene.graph.edge(spur).unwrap().from;

    let footprint = scene.snap(pt(251.0, 79.0), true, ReferenceSet::Footprint { in_progress: &[] });
    assert_eq!(footprint.point, pt(251.0, 80.0));

    let graph = scene.snap(pt(251.0, 79.0), true, ReferenceSet::Graph);
    assert_eq!(graph.point, pt(250.0, 79.0));

    let itself = scene.snap(pt(251.0, 251.0), true, ReferenceSet::DragNode(node));
    assert_eq!(itself.point, pt(251.0, 251.0));
}

#[test]
fn model_survives_json() {
    init_tracing();
    let mut scene = campus();
    scene.polygons.add_entry(1).unwrap();
    scene
        .graph
        .add_edge(EdgeEnd::New(pt(0.0, 0.0)), EdgeEnd::New(pt(10.0, 0.0)), EdgeKind::Pathwalk)
        .unwrap();

    let polygons: PolygonSet =
        serde_json::from_str(&serde_json::to_string(&scene.polygons).unwrap()).unwrap();
    assert_eq!(polygons, scene.polygons);

    let graph: Graph = serde_json::from_str(&serde_json::to_string(&scene.graph).unwrap()).unwrap();
    graph.validate().unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node_count(), 2);

    let broken = r#"[{"ring": [[0.0, 0.0], [1.0, 1.0]], "kind": {"type": "pavement"}}]"#;
    assert!(serde_json::from_str::<PolygonSet>(broken).is_err());
}
