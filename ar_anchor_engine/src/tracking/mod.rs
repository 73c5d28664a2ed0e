//! Tracking module
//!
//! Everything that crosses the boundary with the external tracking
//! collaborator: anchors, tracking events and their delivery channel, the run
//! configuration, plus the per-session gates fed by those events.

mod anchor;
mod provider;
mod events;
mod dedup;
mod floor;

pub use anchor::{Anchor, AnchorId};
pub use provider::{
    TrackingProvider, TrackingConfig, TrackingQuality, LimitedReason,
    RunOptions, PlaneDetection, RecordingTracker, TrackingRun,
};
pub use events::{TrackingEvent, TrackingEventSender, TrackingEventReceiver, event_channel};
pub use dedup::{AnchorDeduplicationTracker, GateDecision};
pub use floor::FloorReference;
