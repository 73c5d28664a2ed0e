//! Session state
//!
//! Everything one AR session remembers besides the scene graph itself. The
//! engine owns exactly one value and clears it in place on restart.

use crate::gesture::{StepStates, TransformStepState};
use crate::lighting::LightingState;
use crate::tracking::{AnchorDeduplicationTracker, FloorReference};

/// Per-session aggregate: anchor gate, floor, step memory, lighting
#[derive(Debug, Default)]
pub struct SessionState {
    gate: AnchorDeduplicationTracker,
    floor: FloorReference,
    steps: StepStates,
    lighting: LightingState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor identities and names already processed
    pub fn gate(&self) -> &AnchorDeduplicationTracker {
        &self.gate
    }

    pub fn floor(&self) -> &FloorReference {
        &self.floor
    }

    pub fn floor_mut(&mut self) -> &mut FloorReference {
        &mut self.floor
    }

    pub fn step_states(&self) -> &StepStates {
        &self.steps
    }

    pub fn step_states_mut(&mut self) -> &mut StepStates {
        &mut self.steps
    }

    pub fn step_state(&self, name: &str) -> Option<&TransformStepState> {
        self.steps.get(name)
    }

    pub fn lighting(&self) -> LightingState {
        self.lighting
    }

    pub(crate) fn lighting_mut(&mut self) -> &mut LightingState {
        &mut self.lighting
    }

    /// Reset every part of the session. Lighting goes back to Day.
    pub fn clear(&mut self) {
        self.gate.clear();
        self.floor.clear();
        self.steps.clear();
        self.lighting = LightingState::Day;
    }

    /// Whether nothing has been recorded since the last clear
    pub fn is_pristine(&self) -> bool {
        self.gate.is_empty() && self.floor.height().is_none() && self.steps.is_empty()
    }
}
