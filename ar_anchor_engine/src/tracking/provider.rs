/// Tracking collaborator interface.
///
/// The engine never estimates poses or matches objects itself. It configures
/// the collaborator through `TrackingProvider::run` and receives its output as
/// `TrackingEvent`s.

use std::sync::{Arc, Mutex, PoisonError};
use bitflags::bitflags;
use crate::error::{Error, Result};

bitflags! {
    /// Options applied when (re)starting the tracking session
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RunOptions: u32 {
        /// Discard the current world origin and pose history
        const RESET_TRACKING          = 1 << 0;
        /// Drop every anchor the previous run produced
        const REMOVE_EXISTING_ANCHORS = 1 << 1;
    }
}

bitflags! {
    /// Plane orientations the collaborator should report
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneDetection: u32 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL   = 1 << 1;
    }
}

/// Configuration handed to the tracking collaborator on every run
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingConfig {
    /// Catalog group holding the pre-scanned reference objects
    pub reference_group: String,
    /// Plane orientations to detect
    pub plane_detection: PlaneDetection,
}

/// Why tracking is degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedReason {
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
    Relocalizing,
}

/// Per-frame tracking quality reported by the collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingQuality {
    NotAvailable,
    Limited(LimitedReason),
    Normal,
}

impl TrackingQuality {
    pub fn is_normal(self) -> bool {
        self == TrackingQuality::Normal
    }
}

/// The external tracking collaborator
pub trait TrackingProvider {
    /// Start (or restart) tracking with the given configuration.
    ///
    /// Returns immediately; the reset completes asynchronously on the
    /// collaborator's side and events from the old run may still arrive.
    fn run(&mut self, config: &TrackingConfig, options: RunOptions) -> Result<()>;
}

/// One recorded `run` request
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRun {
    pub config: TrackingConfig,
    pub options: RunOptions,
}

/// Tracking provider that only records run requests.
///
/// Clones share the same record, so a handle kept outside the engine can
/// inspect what the engine asked for. Useful headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracker {
    runs: Arc<Mutex<Vec<TrackingRun>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// All run requests received so far, oldest first
    pub fn runs(&self) -> Vec<TrackingRun> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Make subsequent runs fail with this message (None restores success)
    pub fn set_failure(&self, failure: Option<&str>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = failure.map(str::to_string);
    }
}

impl TrackingProvider for RecordingTracker {
    fn run(&mut self, config: &TrackingConfig, options: RunOptions) -> Result<()> {
        if let Some(msg) = self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(Error::TrackingFailed(msg));
        }
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TrackingRun { config: config.clone(), options });
        Ok(())
    }
}
