//! Gesture module
//!
//! Touch gestures applied to named nodes:
//! - pinch: multiplies the node's scale, clamped per component
//! - stepped translation: moves the node by a fixed offset per step along one
//!   axis, remembering where it started

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::config::{Axis, EngineConfig};
use crate::engine_bail;
use crate::error::{Error, Result};
use crate::scene::SceneGraph;

const SOURCE: &str = "anchor3d::Gesture";

/// Accumulated pinch factor since the last application.
///
/// The factor resets to 1.0 each time it is consumed, so successive
/// applications compound onto the node's scale instead of overwriting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    scale: f32,
}

impl PinchGesture {
    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    /// Gesture carrying a single delta factor
    pub fn with_delta(delta: f32) -> Self {
        let mut gesture = Self::new();
        gesture.accumulate(delta);
        gesture
    }

    /// Fold a recognizer delta into the pending factor.
    ///
    /// Non-finite or non-positive deltas are ignored.
    pub fn accumulate(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.scale *= delta;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Return the pending factor and reset it to 1.0
    pub fn take(&mut self) -> f32 {
        std::mem::replace(&mut self.scale, 1.0)
    }
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of a stepped translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    fn delta(self) -> i32 {
        match self {
            StepDirection::Up => 1,
            StepDirection::Down => -1,
        }
    }
}

/// Per-node memory of stepped translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformStepState {
    /// Node position when the first step was requested
    pub initial_position: Vec3,
    /// Net steps taken; unbounded in both directions
    pub step_count: i32,
}

impl TransformStepState {
    pub fn new(initial_position: Vec3) -> Self {
        Self { initial_position, step_count: 0 }
    }
}

/// Step states keyed by node name
pub type StepStates = FxHashMap<String, TransformStepState>;

/// Applies pinch and stepped translation to named nodes
#[derive(Debug, Clone)]
pub struct GestureTransformController {
    scale_min: f32,
    scale_max: f32,
    step_offset: f32,
    step_axis: Axis,
}

impl GestureTransformController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            scale_min: config.scale_min,
            scale_max: config.scale_max,
            step_offset: config.step_offset,
            step_axis: config.step_axis,
        }
    }

    /// Clamp every component of `scale` into the configured range
    pub fn clamp_scale(&self, scale: Vec3) -> Vec3 {
        scale.clamp(Vec3::splat(self.scale_min), Vec3::splat(self.scale_max))
    }

    /// Multiply the scale of `name` by the pending pinch factor, then clamp.
    ///
    /// The gesture is consumed (reset to 1.0) only when the node exists.
    pub fn apply_pinch(
        &self,
        graph: &mut SceneGraph,
        name: &str,
        gesture: &mut PinchGesture,
    ) -> Result<Vec3> {
        let Some(node) = graph.find(name).and_then(|key| graph.node_mut(key)) else {
            engine_bail!(SOURCE, Error::NodeNotFound(name.to_string()));
        };

        let scale = self.clamp_scale(node.transform.scale * gesture.take());
        node.transform.scale = scale;
        Ok(scale)
    }

    /// Move `name` one step in `direction` along the step axis.
    ///
    /// The first request for a name captures the node's current position;
    /// every later request positions the node relative to that capture.
    /// Returns the new parent-relative position.
    pub fn stepped_translate(
        &self,
        graph: &mut SceneGraph,
        steps: &mut StepStates,
        name: &str,
        direction: StepDirection,
    ) -> Result<Vec3> {
        let Some(node) = graph.find(name).and_then(|key| graph.node_mut(key)) else {
            engine_bail!(SOURCE, Error::NodeNotFound(name.to_string()));
        };

        let current = node.transform.position;
        let state = steps
            .entry(name.to_string())
            .or_insert_with(|| TransformStepState::new(current));
        state.step_count = state.step_count.saturating_add(direction.delta());

        let target = self.step_axis.component(state.initial_position)
            + state.step_count as f32 * self.step_offset;
        let position = self.step_axis.with_component(current, target);
        node.transform.position = position;

        crate::engine_debug!(SOURCE, "'{}' stepped {:?} to step {} ({:?} = {:.2})",
            name, direction, state.step_count, self.step_axis, target);
        Ok(position)
    }
}

impl Default for GestureTransformController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
