/// Anchor3D Engine - owner-thread facade over one AR session.
///
/// The engine owns the scene graph and the session state. Every mutation
/// happens through `&mut Engine` on the thread that owns it; the tracking
/// collaborator hands its events over through the `TrackingEventSender`
/// returned by `event_sender()`, and the owner applies them in delivery order
/// with `process_events()`.
///
/// Logging is process-global: the active `Logger` lives in a static shared by
/// every engine instance and by the `engine_*!` macros.

use std::sync::{OnceLock, RwLock};
use glam::{Mat4, Vec3};
use crate::animation::AnimationCoordinator;
use crate::assets::AssetProvider;
use crate::config::EngineConfig;
use crate::engine_err;
use crate::error::{Error, Result};
use crate::gesture::{GestureTransformController, PinchGesture, StepDirection};
use crate::lighting::{LightingController, LightingState};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::placement::{PlacementEngine, PlacementOutcome};
use crate::scene::{NodeKey, SceneGraph, SceneNode};
use crate::session::SessionState;
use crate::tracking::{
    event_channel, Anchor, GateDecision, RunOptions, TrackingEvent, TrackingEventReceiver,
    TrackingEventSender, TrackingProvider, TrackingQuality,
};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

const SOURCE: &str = "anchor3d::Engine";

/// Status text shown while no content has been placed yet
pub const LOADING_STATUS: &str = "Loading...";

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Scene placement and state engine for one AR session
pub struct Engine {
    config: EngineConfig,
    graph: SceneGraph,
    session: SessionState,
    placement: PlacementEngine,
    lighting: LightingController,
    gestures: GestureTransformController,
    animation: AnimationCoordinator,
    tracker: Box<dyn TrackingProvider>,
    assets: Box<dyn AssetProvider>,
    events_tx: TrackingEventSender,
    events_rx: TrackingEventReceiver,
    tracking_quality: TrackingQuality,
    status_message: String,
}

impl Engine {
    /// Set up the scene and start tracking.
    ///
    /// Installs the Day rig and runs the tracker with a fresh session
    /// (`RESET_TRACKING | REMOVE_EXISTING_ANCHORS`). Fails only when the
    /// tracker refuses the run.
    pub fn new<T, A>(config: EngineConfig, tracker: T, assets: A) -> Result<Self>
    where
        T: TrackingProvider + 'static,
        A: AssetProvider + 'static,
    {
        let (events_tx, events_rx) = event_channel();
        let mut engine = Self {
            graph: SceneGraph::new(),
            session: SessionState::new(),
            placement: PlacementEngine::new(),
            lighting: LightingController::new(config.lighting),
            gestures: GestureTransformController::new(&config),
            animation: AnimationCoordinator::new(&config),
            tracker: Box::new(tracker),
            assets: Box::new(assets),
            events_tx,
            events_rx,
            tracking_quality: TrackingQuality::NotAvailable,
            status_message: LOADING_STATUS.to_string(),
            config,
        };

        engine.lighting.install(&mut engine.graph, LightingState::Day);
        if let Err(error) = engine.run_tracking() {
            crate::engine_error!(SOURCE, "Tracking could not start: {}", error);
            return Err(error);
        }

        crate::engine_info!(SOURCE, "Engine started (reference group '{}')", engine.config.reference_group);
        Ok(engine)
    }

    fn run_tracking(&mut self) -> Result<()> {
        let options = RunOptions::RESET_TRACKING | RunOptions::REMOVE_EXISTING_ANCHORS;
        self.tracker.run(&self.config.tracking_config(), options)
    }

    // ===== TRACKING EVENTS =====

    /// Handle for the tracking collaborator's delivery thread
    pub fn event_sender(&self) -> TrackingEventSender {
        self.events_tx.clone()
    }

    /// Apply every queued tracking event in delivery order.
    ///
    /// Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let events = self.events_rx.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Apply one tracking event on the owner thread
    pub fn handle_event(&mut self, event: TrackingEvent) {
        match event {
            TrackingEvent::AnchorsAdded(anchors) => {
                self.on_anchors_added(&anchors);
            }
            TrackingEvent::FrameUpdate(quality) => self.on_frame_update(quality),
            TrackingEvent::PlaneAdded(transform) => self.on_plane_added(transform),
        }
    }

    /// Gate, resolve and place content for newly recognized anchors.
    ///
    /// Returns the keys of the roots placed by this batch.
    pub fn on_anchors_added(&mut self, anchors: &[Anchor]) -> Vec<NodeKey> {
        let mut placed = Vec::new();

        for anchor in anchors {
            if let Some(name) = anchor.reference_name.as_deref() {
                if !self.config.allows_reference(name) {
                    crate::engine_debug!(SOURCE, "Reference '{}' is filtered out, ignoring anchor {}",
                        name, anchor.id);
                    continue;
                }
            }

            match self.session.gate().check(anchor.id, anchor.reference_name.as_deref()) {
                GateDecision::Accepted => {}
                GateDecision::DuplicateAnchor => {
                    crate::engine_debug!(SOURCE, "Anchor {} already processed", anchor.id);
                    continue;
                }
                GateDecision::DuplicateName => {
                    crate::engine_debug!(SOURCE, "Reference '{}' already rendered, ignoring anchor {}",
                        anchor.reference_name.as_deref().unwrap_or_default(), anchor.id);
                    continue;
                }
                GateDecision::MissingReferenceName => {
                    engine_err!(SOURCE, Error::MissingReferenceName(anchor.id));
                    continue;
                }
            }

            // Accepted implies a name
            let Some(name) = anchor.reference_name.as_deref() else {
                continue;
            };

            let position = anchor.position();
            self.status_message = format!(
                "object: {}, x: {:.2}, y: {:.2}, z: {:.2}",
                name, position.x, position.y, position.z
            );

            let Some(rule) = self.config.rule_for(name) else {
                crate::engine_debug!(SOURCE, "No placement rule for reference '{}'", name);
                continue;
            };

            match self.placement.place(
                &mut self.graph,
                &mut self.animation,
                self.assets.as_ref(),
                anchor,
                rule,
                self.session.floor(),
            ) {
                Ok(PlacementOutcome::Placed(key)) => placed.push(key),
                Ok(PlacementOutcome::AlreadyPlaced(_)) => {}
                // Already logged where it failed; the anchor stays consumed
                Err(_) => {}
            }
        }

        placed
    }

    /// Record the latest tracking quality, logging transitions only
    pub fn on_frame_update(&mut self, quality: TrackingQuality) {
        if quality == self.tracking_quality {
            return;
        }
        match quality {
            TrackingQuality::Normal => {
                crate::engine_info!(SOURCE, "Tracking quality: {:?}", quality);
            }
            _ => {
                crate::engine_warn!(SOURCE, "Tracking quality: {:?}", quality);
            }
        }
        self.tracking_quality = quality;
    }

    /// Lower the floor reference when a plane below it is detected
    pub fn on_plane_added(&mut self, plane_transform: Mat4) {
        if self.session.floor_mut().observe_plane(&plane_transform) {
            crate::engine_debug!(SOURCE, "Floor reference lowered to {:.3}", plane_transform.w_axis.y);
        }
    }

    // ===== UI OPERATIONS =====

    /// Tear down the scene and start a fresh tracking session.
    ///
    /// Every node under the root is detached, the session state and pending
    /// animations are cleared, the tracker is re-run and the Day rig is
    /// re-installed. Returns false when the tracker refused the run; the scene
    /// is reset either way.
    pub fn restart(&mut self) -> bool {
        let removed = self.graph.clear();
        self.session.clear();
        self.animation.clear();
        self.tracking_quality = TrackingQuality::NotAvailable;

        let tracking = self.run_tracking().map_err(|e| engine_err!(SOURCE, e));
        self.lighting.install(&mut self.graph, LightingState::Day);
        self.status_message = LOADING_STATUS.to_string();

        crate::engine_info!(SOURCE, "Session restarted ({} nodes removed)", removed);
        tracking.is_ok()
    }

    /// Attach the configured auxiliary model under its parent.
    ///
    /// Idempotent; returns None (after logging) when the parent is not placed
    /// yet or the asset is missing.
    pub fn add_auxiliary_model(&mut self) -> Option<NodeKey> {
        self.placement
            .attach_child(
                &mut self.graph,
                &mut self.animation,
                self.assets.as_ref(),
                &self.config.auxiliary_parent,
                &self.config.auxiliary,
            )
            .ok()
    }

    /// Remove the first content node named `name` and its subtree
    pub fn delete_model(&mut self, name: &str) -> bool {
        let Some(key) = self.content_node(name) else {
            return false;
        };
        match self.graph.detach(key) {
            Ok(removed) => {
                crate::engine_info!(SOURCE, "Deleted '{}' ({} nodes)", name, removed);
                true
            }
            Err(_) => false,
        }
    }

    /// Swap day/night lighting and return the new state
    pub fn toggle_lighting(&mut self) -> LightingState {
        self.lighting.toggle(&mut self.graph, self.session.lighting_mut())
    }

    /// Multiply the scale of `name` by `delta`, clamped. Returns the new scale.
    ///
    /// A running entrance on the node is completed first so the tween does
    /// not overwrite the gesture.
    pub fn pinch_scale(&mut self, name: &str, delta: f32) -> Option<Vec3> {
        let key = self.content_node(name)?;
        self.animation.finish_entrance(&mut self.graph, key);
        self.gestures
            .apply_pinch(&mut self.graph, name, &mut PinchGesture::with_delta(delta))
            .ok()
    }

    /// Move `name` one step up or down. Returns its new local position.
    pub fn stepped_translate(&mut self, name: &str, direction: StepDirection) -> Option<Vec3> {
        self.content_node(name)?;
        self.gestures
            .stepped_translate(&mut self.graph, self.session.step_states_mut(), name, direction)
            .ok()
    }

    /// Start (or restart) the looping animation of `name`.
    ///
    /// The loop stops by itself after the configured delay unless triggered
    /// again first. Returns false when no such node exists.
    pub fn toggle_animation(&mut self, name: &str) -> bool {
        let Some(key) = self.content_node(name) else {
            return false;
        };
        let stop_at = self.animation.trigger_loop(key);
        crate::engine_info!(SOURCE, "Animation on '{}' running until t={:.2}", name, stop_at);
        true
    }

    /// First node named `name` that UI operations may touch.
    ///
    /// The scene root and the light rig belong to the engine; naming them is
    /// logged and treated like a lookup miss.
    fn content_node(&self, name: &str) -> Option<NodeKey> {
        let key = self.graph.find(name).filter(|&key| {
            key != self.graph.root() && !self.graph.node(key).is_some_and(SceneNode::is_light)
        });
        if key.is_none() {
            engine_err!(SOURCE, Error::NodeNotFound(name.to_string()));
        }
        key
    }

    /// Advance animations by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.animation.update(&mut self.graph, dt);
    }

    // ===== ACCESSORS =====

    pub fn scene(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn animation(&self) -> &AnimationCoordinator {
        &self.animation
    }

    pub fn lighting_state(&self) -> LightingState {
        self.session.lighting()
    }

    pub fn tracking_quality(&self) -> TrackingQuality {
        self.tracking_quality
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== LOGGER API =====

    /// Set a custom logger
    ///
    /// Replaces the current logger for every engine in the process.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ar_anchor_engine::anchor3d::Engine;
    /// use ar_anchor_engine::anchor3d::log::{Logger, LogEntry};
    ///
    /// struct OverlayLogger;
    /// impl Logger for OverlayLogger {
    ///     fn log(&self, _entry: &LogEntry) {
    ///         // Push to the debug overlay...
    ///     }
    /// }
    ///
    /// Engine::set_logger(OverlayLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::new(severity, source, message));
        }
    }

    /// Internal logging method (for detailed logs with file:line)
    ///
    /// Used by engine_error! macro.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::new(severity, source, message).with_location(file, line));
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
