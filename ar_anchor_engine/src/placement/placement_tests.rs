/// Tests for PlacementEngine
///
/// Transform computation against anchor geometry and floor reference,
/// composite placement, idempotent child attachment.

use super::*;
use crate::assets::AssetLibrary;
use crate::config::EngineConfig;
use crate::scene::Aabb;
use crate::tracking::AnchorId;
use glam::{Mat4, Quat};

// ============================================================================
// Helper Functions
// ============================================================================

fn anchor_at(position: Vec3, center: Vec3, extent: Vec3) -> Anchor {
    Anchor::new(AnchorId::new(), Some("4"), Mat4::from_translation(position))
        .with_geometry(center, extent)
}

fn library() -> AssetLibrary {
    AssetLibrary::new()
        .with_model(ModelAsset::new("City", Aabb::from_size(Vec3::new(10.0, 2.0, 10.0))))
        .with_model(ModelAsset::new("Car", Aabb::from_size(Vec3::ONE)))
        .with_model(ModelAsset::new("Bee", Aabb::from_size(Vec3::ONE)).with_clip("fly"))
}

fn city_rule() -> PlacementRule {
    PlacementRule::any("City").with_child(ChildSpec::new("Car", Vec3::new(-150.0, 0.0, 0.0), 0.2))
}

fn setup() -> (SceneGraph, AnimationCoordinator) {
    (SceneGraph::new(), AnimationCoordinator::new(&EngineConfig::default()))
}

// ============================================================================
// Tests: Position computation
// ============================================================================

#[test]
fn test_floating_object_snaps_to_floor() {
    // Bottom at 1.2 (center 1.7, extent 1.0), floor at 0.0, model height 2.0
    let anchor = anchor_at(Vec3::ZERO, Vec3::new(0.0, 1.7, 0.0), Vec3::ONE);
    assert!((anchor.bottom_world_y() - 1.2).abs() < 1e-5);

    let position = compute_placement_position(&anchor, 2.0, Some(0.0));
    assert!((position.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_without_floor_hangs_below_object_bottom() {
    let anchor = anchor_at(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::new(0.4, 0.4, 0.4));
    // bottom = 1.0 - 0.2 = 0.8, minus half height 1.0
    let position = compute_placement_position(&anchor, 2.0, None);
    assert!((position.y - (-0.2)).abs() < 1e-5);
}

#[test]
fn test_object_below_floor_is_not_snapped() {
    let anchor = anchor_at(Vec3::new(0.0, -0.5, 0.0), Vec3::ZERO, Vec3::ZERO);
    let position = compute_placement_position(&anchor, 2.0, Some(0.0));
    assert!((position.y - (-1.5)).abs() < 1e-5);
}

#[test]
fn test_object_resting_on_floor_is_not_snapped() {
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    let position = compute_placement_position(&anchor, 2.0, Some(0.0));
    assert!((position.y - (-1.0)).abs() < 1e-5);
}

#[test]
fn test_xz_follow_world_center() {
    let anchor = anchor_at(Vec3::new(2.0, 0.0, -3.0), Vec3::new(0.5, 0.0, 0.25), Vec3::ZERO);
    let position = compute_placement_position(&anchor, 1.0, None);
    assert!((position.x - 2.5).abs() < 1e-5);
    assert!((position.z - (-2.75)).abs() < 1e-5);
}

#[test]
fn test_bottom_uses_anchor_rotation() {
    // Anchor rotated upside down: local -Y points to world +Y
    let transform = Mat4::from_rotation_translation(
        Quat::from_rotation_x(std::f32::consts::PI),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let anchor = Anchor::new(AnchorId::new(), Some("4"), transform)
        .with_geometry(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
    assert!((anchor.bottom_world_y() - 2.0).abs() < 1e-5);
}

// ============================================================================
// Tests: Placement into the graph
// ============================================================================

#[test]
fn test_place_attaches_root_and_children() {
    let (mut graph, mut anim) = setup();
    let anchor = anchor_at(Vec3::new(1.0, 0.0, 2.0), Vec3::ZERO, Vec3::ZERO);

    let outcome = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &FloorReference::new())
        .unwrap();

    let PlacementOutcome::Placed(root) = outcome else {
        panic!("expected a new placement");
    };
    assert_eq!(graph.find("City"), Some(root));

    let city = graph.node(root).unwrap();
    assert_eq!(city.transform.rotation, Quat::IDENTITY);
    assert!((city.transform.position - Vec3::new(1.0, -1.0, 2.0)).length() < 1e-5);

    let car = graph.node(graph.find("Car").unwrap()).unwrap();
    assert_eq!(car.parent(), Some(root));
    assert_eq!(car.transform.position, Vec3::new(-150.0, 0.0, 0.0));
    assert_eq!(car.transform.scale, Vec3::splat(0.2));
}

#[test]
fn test_place_ignores_anchor_rotation() {
    let (mut graph, mut anim) = setup();
    let transform = Mat4::from_rotation_translation(Quat::from_rotation_z(0.3), Vec3::ZERO);
    let anchor = Anchor::new(AnchorId::new(), Some("4"), transform);

    let root = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &FloorReference::new())
        .unwrap()
        .key();
    assert_eq!(graph.node(root).unwrap().transform.rotation, Quat::IDENTITY);
}

#[test]
fn test_place_starts_entrance() {
    let (mut graph, mut anim) = setup();
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);

    let root = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &FloorReference::new())
        .unwrap()
        .key();

    assert!(anim.is_entering(root));
    assert_eq!(graph.node(root).unwrap().opacity, 0.0);
    assert_eq!(graph.node(root).unwrap().transform.scale, Vec3::ZERO);
}

#[test]
fn test_place_uses_floor_reference() {
    let (mut graph, mut anim) = setup();
    let anchor = anchor_at(Vec3::ZERO, Vec3::new(0.0, 1.7, 0.0), Vec3::ONE);
    let mut floor = FloorReference::new();
    floor.observe_height(0.0);

    let root = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &floor)
        .unwrap()
        .key();
    assert!((graph.node(root).unwrap().transform.position.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_place_missing_root_asset_leaves_graph_untouched() {
    let (mut graph, mut anim) = setup();
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    let rule = PlacementRule::any("Castle");

    let result = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &rule, &FloorReference::new());
    assert_eq!(result, Err(Error::AssetNotFound("Castle".to_string())));
    assert!(graph.is_empty());
}

#[test]
fn test_place_missing_child_asset_leaves_graph_untouched() {
    let (mut graph, mut anim) = setup();
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    let rule = city_rule().with_child(ChildSpec::new("Plane", Vec3::ZERO, 1.0));

    let result = PlacementEngine::new()
        .place(&mut graph, &mut anim, &library(), &anchor, &rule, &FloorReference::new());
    assert_eq!(result, Err(Error::AssetNotFound("Plane".to_string())));
    assert!(graph.is_empty());
}

#[test]
fn test_place_same_rule_twice_is_skipped() {
    let (mut graph, mut anim) = setup();
    let engine = PlacementEngine::new();
    let first = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    let second = anchor_at(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO);

    let placed = engine
        .place(&mut graph, &mut anim, &library(), &first, &city_rule(), &FloorReference::new())
        .unwrap();
    let again = engine
        .place(&mut graph, &mut anim, &library(), &second, &city_rule(), &FloorReference::new())
        .unwrap();

    assert_eq!(again, PlacementOutcome::AlreadyPlaced(placed.key()));
    assert_eq!(graph.nodes_where(|n| n.name() == "City").len(), 1);
}

// ============================================================================
// Tests: Child attachment
// ============================================================================

#[test]
fn test_attach_child_is_idempotent() {
    let (mut graph, mut anim) = setup();
    let engine = PlacementEngine::new();
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    engine
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &FloorReference::new())
        .unwrap();

    let spec = ChildSpec::new("Bee", Vec3::new(-150.0, 30.0, 0.0), 0.2).autoplay();
    let first = engine.attach_child(&mut graph, &mut anim, &library(), "City", &spec).unwrap();
    let second = engine.attach_child(&mut graph, &mut anim, &library(), "City", &spec).unwrap();

    assert_eq!(first, second);
    assert_eq!(graph.nodes_where(|n| n.name() == "Bee").len(), 1);
    assert_eq!(anim.playing_clips(first).unwrap(), &["fly".to_string()]);
}

#[test]
fn test_attach_child_without_parent_fails() {
    let (mut graph, mut anim) = setup();
    let spec = ChildSpec::new("Bee", Vec3::ZERO, 0.2);

    let result = PlacementEngine::new().attach_child(&mut graph, &mut anim, &library(), "City", &spec);
    assert_eq!(result, Err(Error::NodeNotFound("City".to_string())));
    assert!(graph.is_empty());
}

#[test]
fn test_attach_child_missing_asset() {
    let (mut graph, mut anim) = setup();
    let engine = PlacementEngine::new();
    let anchor = anchor_at(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    engine
        .place(&mut graph, &mut anim, &library(), &anchor, &city_rule(), &FloorReference::new())
        .unwrap();

    let spec = ChildSpec::new("Dragon", Vec3::ZERO, 1.0);
    let result = engine.attach_child(&mut graph, &mut anim, &library(), "City", &spec);
    assert_eq!(result, Err(Error::AssetNotFound("Dragon".to_string())));
}
