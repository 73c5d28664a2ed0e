/// Tests for LightingController
///
/// Rig installation, toggling, and the one-rig-at-a-time invariant.

use super::*;
use crate::scene::{Aabb, LightKind, NodeKind};

// ============================================================================
// Helper Functions
// ============================================================================

fn light_nodes(graph: &SceneGraph) -> Vec<(String, Light)> {
    graph
        .nodes_where(SceneNode::is_light)
        .into_iter()
        .filter_map(|key| graph.node(key))
        .filter_map(|node| match node.kind {
            NodeKind::Light(light) => Some((node.name().to_string(), light)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Tests: LightingState
// ============================================================================

#[test]
fn test_default_state_is_day() {
    assert_eq!(LightingState::default(), LightingState::Day);
}

#[test]
fn test_opposite() {
    assert_eq!(LightingState::Day.opposite(), LightingState::Night);
    assert_eq!(LightingState::Night.opposite(), LightingState::Day);
}

// ============================================================================
// Tests: Install
// ============================================================================

#[test]
fn test_install_day_rig() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();

    let keys = controller.install(&mut graph, LightingState::Day);
    assert_eq!(keys.len(), 2);

    let lights = light_nodes(&graph);
    assert_eq!(lights.len(), 2);
    assert_eq!(lights[0].0, "DayDirectionalLight");
    assert_eq!(lights[0].1.kind, LightKind::Directional);
    assert_eq!(lights[0].1.intensity, 1000.0);
    assert_eq!(lights[1].0, "DayAmbientLight");
    assert_eq!(lights[1].1.kind, LightKind::Ambient);
}

#[test]
fn test_night_rig_is_dimmer_and_tinted() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    controller.install(&mut graph, LightingState::Night);

    let lights = light_nodes(&graph);
    let presets = controller.presets();
    assert!(lights[0].1.intensity < presets.day_directional.intensity);
    assert!(lights[1].1.intensity < presets.day_ambient.intensity);
    assert!(lights[0].1.color.z > lights[0].1.color.x);
}

// ============================================================================
// Tests: Toggle
// ============================================================================

#[test]
fn test_toggle_swaps_rig() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    let mut state = LightingState::Day;
    controller.install(&mut graph, state);

    let next = controller.toggle(&mut graph, &mut state);
    assert_eq!(next, LightingState::Night);
    assert_eq!(state, LightingState::Night);

    let names: Vec<String> = light_nodes(&graph).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["NightDirectionalLight", "NightAmbientLight"]);
}

#[test]
fn test_three_toggles_from_day_end_in_night() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    let mut state = LightingState::Day;
    controller.install(&mut graph, state);

    assert_eq!(controller.toggle(&mut graph, &mut state), LightingState::Night);
    assert_eq!(controller.toggle(&mut graph, &mut state), LightingState::Day);
    assert_eq!(controller.toggle(&mut graph, &mut state), LightingState::Night);
    assert_eq!(light_nodes(&graph).len(), 2);
}

#[test]
fn test_toggle_without_lights_still_attaches() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    let mut state = LightingState::Day;

    controller.toggle(&mut graph, &mut state);
    assert_eq!(state, LightingState::Night);
    assert_eq!(light_nodes(&graph).len(), 2);
}

#[test]
fn test_toggle_removes_stray_lights_too() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    let mut state = LightingState::Day;
    controller.install(&mut graph, state);
    controller.install(&mut graph, LightingState::Night);
    assert_eq!(light_nodes(&graph).len(), 4);

    controller.toggle(&mut graph, &mut state);
    assert_eq!(light_nodes(&graph).len(), 2);
}

#[test]
fn test_toggle_leaves_content_alone() {
    let controller = LightingController::default();
    let mut graph = SceneGraph::new();
    let mut state = LightingState::Day;
    controller.install(&mut graph, state);
    graph.attach_to_root(SceneNode::model("City", "City", Aabb::default())).unwrap();

    controller.toggle(&mut graph, &mut state);
    assert!(graph.find("City").is_some());
}
