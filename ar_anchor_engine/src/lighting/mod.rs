/// LightingController - day/night rig swap.
///
/// Exactly one rig (a directional light plus an ambient fill) is attached
/// under the scene root once the scene is set up. Toggling removes every light
/// node present, whatever rig it belongs to, then attaches the opposite rig.

use crate::config::{LightPreset, LightingPresets};
use crate::scene::{Light, NodeKey, SceneGraph, SceneNode, Transform};
use glam::{Quat, Vec3};

const SOURCE: &str = "anchor3d::Lighting";

/// Which light rig is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightingState {
    #[default]
    Day,
    Night,
}

impl LightingState {
    pub fn opposite(self) -> Self {
        match self {
            LightingState::Day => LightingState::Night,
            LightingState::Night => LightingState::Day,
        }
    }

    /// Prefix of the node names of this state's rig
    pub fn label(self) -> &'static str {
        match self {
            LightingState::Day => "Day",
            LightingState::Night => "Night",
        }
    }
}

/// Attaches and swaps light rigs
#[derive(Debug, Clone)]
pub struct LightingController {
    presets: LightingPresets,
}

impl LightingController {
    pub fn new(presets: LightingPresets) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &LightingPresets {
        &self.presets
    }

    /// Attach the rig of `state` under the scene root.
    ///
    /// Returns the keys of the directional and ambient nodes.
    pub fn install(&self, graph: &mut SceneGraph, state: LightingState) -> Vec<NodeKey> {
        let (directional, ambient) = match state {
            LightingState::Day => (self.presets.day_directional, self.presets.day_ambient),
            LightingState::Night => (self.presets.night_directional, self.presets.night_ambient),
        };

        let nodes = [
            SceneNode::light(
                format!("{}DirectionalLight", state.label()),
                to_light(directional, Light::directional),
            )
            // Sun angled down towards the content
            .with_transform(Transform {
                rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4),
                ..Transform::from_position(Vec3::new(0.0, 10.0, 0.0))
            }),
            SceneNode::light(
                format!("{}AmbientLight", state.label()),
                to_light(ambient, Light::ambient),
            ),
        ];

        // The root key of a live graph is never stale
        nodes
            .into_iter()
            .filter_map(|node| graph.attach_to_root(node).ok())
            .collect()
    }

    /// Remove every light node from the graph. Returns how many were removed.
    pub fn remove_all(&self, graph: &mut SceneGraph) -> usize {
        graph
            .nodes_where(SceneNode::is_light)
            .into_iter()
            .map(|key| graph.detach(key).unwrap_or(0))
            .sum()
    }

    /// Swap to the opposite rig and flip `state`. Never fails, even with no
    /// lights attached.
    pub fn toggle(&self, graph: &mut SceneGraph, state: &mut LightingState) -> LightingState {
        let removed = self.remove_all(graph);
        let next = state.opposite();
        self.install(graph, next);
        *state = next;

        crate::engine_info!(SOURCE, "Lighting switched to {:?} ({} light nodes replaced)", next, removed);
        next
    }
}

impl Default for LightingController {
    fn default() -> Self {
        Self::new(LightingPresets::default())
    }
}

fn to_light(preset: LightPreset, make: fn(Vec3, f32) -> Light) -> Light {
    make(preset.color, preset.intensity)
}

#[cfg(test)]
#[path = "lighting_tests.rs"]
mod tests;
