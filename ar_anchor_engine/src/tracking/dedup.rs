/// AnchorDeduplicationTracker - gate in front of placement.
///
/// Each physical object is rendered once per session. Two sets are kept:
/// anchor identities already seen, and reference-object names already
/// rendered. The identity gate runs first and records the identity before the
/// name is even looked at, so an anchor rejected by the name gate (or lacking
/// a name) is still consumed and can never render later.
///
/// Check and insert happen under one lock: concurrent deliveries of the same
/// anchor cannot both pass.

use std::sync::{Mutex, PoisonError};
use rustc_hash::FxHashSet;
use super::anchor::AnchorId;

/// Outcome of consulting the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// First sighting of both identity and name: place content
    Accepted,
    /// Identity already processed this session
    DuplicateAnchor,
    /// New identity, but its reference name was already rendered
    DuplicateName,
    /// New identity without a reference name
    MissingReferenceName,
}

impl GateDecision {
    pub fn is_accepted(self) -> bool {
        self == GateDecision::Accepted
    }
}

#[derive(Debug, Default)]
struct GateState {
    anchors: FxHashSet<AnchorId>,
    names: FxHashSet<String>,
}

/// Session-scoped anchor/name gate
#[derive(Debug, Default)]
pub struct AnchorDeduplicationTracker {
    state: Mutex<GateState>,
}

impl AnchorDeduplicationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult the gate and record what it saw, atomically
    pub fn check(&self, id: AnchorId, reference_name: Option<&str>) -> GateDecision {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if !state.anchors.insert(id) {
            return GateDecision::DuplicateAnchor;
        }

        let Some(name) = reference_name else {
            return GateDecision::MissingReferenceName;
        };

        if !state.names.insert(name.to_string()) {
            return GateDecision::DuplicateName;
        }

        GateDecision::Accepted
    }

    /// `check` reduced to "should content be created for this anchor"
    pub fn should_process(&self, id: AnchorId, reference_name: Option<&str>) -> bool {
        self.check(id, reference_name).is_accepted()
    }

    pub fn has_processed_anchor(&self, id: AnchorId) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).anchors.contains(&id)
    }

    pub fn has_processed_name(&self, name: &str) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).names.contains(name)
    }

    pub fn processed_anchor_count(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).anchors.len()
    }

    pub fn processed_name_count(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).names.len()
    }

    /// Whether both sets are empty
    pub fn is_empty(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.anchors.is_empty() && state.names.is_empty()
    }

    /// Forget every identity and name (session restart)
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.anchors.clear();
        state.names.clear();
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
