/// Tracking events and the channel that carries them to the owner thread.
///
/// The collaborator delivers on its own thread. Scene state may only be
/// touched on the owner thread, so the delivery side only enqueues and the
/// owner drains with `Engine::process_events`. Order is preserved.

use glam::Mat4;
use super::anchor::Anchor;
use super::provider::TrackingQuality;

/// Event emitted by the tracking collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// New anchors were recognized
    AnchorsAdded(Vec<Anchor>),
    /// Per-frame quality report
    FrameUpdate(TrackingQuality),
    /// A new plane was detected; the transform places it in the world
    PlaneAdded(Mat4),
}

/// Delivery-thread end of the event channel
#[derive(Debug, Clone)]
pub struct TrackingEventSender {
    tx: flume::Sender<TrackingEvent>,
}

impl TrackingEventSender {
    /// Enqueue an event. Returns false once the engine side is gone.
    pub fn send(&self, event: TrackingEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn anchors_added(&self, anchors: Vec<Anchor>) -> bool {
        self.send(TrackingEvent::AnchorsAdded(anchors))
    }

    pub fn frame_update(&self, quality: TrackingQuality) -> bool {
        self.send(TrackingEvent::FrameUpdate(quality))
    }

    pub fn plane_added(&self, plane_transform: Mat4) -> bool {
        self.send(TrackingEvent::PlaneAdded(plane_transform))
    }
}

/// Owner-thread end of the event channel
#[derive(Debug)]
pub struct TrackingEventReceiver {
    rx: flume::Receiver<TrackingEvent>,
}

impl TrackingEventReceiver {
    /// Take the events queued when called, in delivery order, without blocking.
    ///
    /// Events sent while draining wait for the next call.
    pub fn drain(&self) -> Vec<TrackingEvent> {
        let queued = self.rx.len();
        self.rx.try_iter().take(queued).collect()
    }

    /// Number of events waiting
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Create a connected sender/receiver pair (unbounded)
pub fn event_channel() -> (TrackingEventSender, TrackingEventReceiver) {
    let (tx, rx) = flume::unbounded();
    (TrackingEventSender { tx }, TrackingEventReceiver { rx })
}
