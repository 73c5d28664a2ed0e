/// AnimationCoordinator - time-driven effects on placed content.
///
/// Three kinds of effects are advanced by `update(dt)` on the owner thread:
/// - entrance tweens: scale and opacity 0 -> 1 on freshly placed roots
/// - triggered loops: perpetual spin about Y with a deferred auto-stop
/// - clip playback: every baked clip of a model looping forever
///
/// Effects are keyed by node. A node that has been detached simply drops its
/// effects on the next update, which is how restart cancels pending stops.

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use crate::config::EngineConfig;
use crate::scene::{NodeKey, SceneGraph};

const SOURCE: &str = "anchor3d::Animation";

#[derive(Debug, Clone, Copy)]
struct EntranceTween {
    started_at: f64,
}

#[derive(Debug, Clone, Copy)]
struct LoopState {
    /// Clock time at which the loop stops by itself
    stop_at: f64,
}

#[derive(Debug, Clone)]
struct ClipPlayback {
    clips: Vec<String>,
    started_at: f64,
}

/// Drives entrance tweens, looping triggers and clip playback
#[derive(Debug)]
pub struct AnimationCoordinator {
    /// Seconds since the coordinator was created
    clock: f64,
    entrance_duration: f32,
    auto_stop_delay: f32,
    angular_speed: f32,
    clip_transition: f32,
    entrances: FxHashMap<NodeKey, EntranceTween>,
    loops: FxHashMap<NodeKey, LoopState>,
    clips: FxHashMap<NodeKey, ClipPlayback>,
}

impl AnimationCoordinator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            clock: 0.0,
            entrance_duration: config.entrance_duration,
            auto_stop_delay: config.auto_stop_delay,
            angular_speed: config.loop_angular_speed,
            clip_transition: config.clip_transition,
            entrances: FxHashMap::default(),
            loops: FxHashMap::default(),
            clips: FxHashMap::default(),
        }
    }

    /// Current animation clock, in seconds
    pub fn now(&self) -> f64 {
        self.clock
    }

    // ===== ENTRANCE =====

    /// Start the scale/opacity entrance of a node (both begin at zero)
    pub fn begin_entrance(&mut self, graph: &mut SceneGraph, key: NodeKey) {
        let Some(node) = graph.node_mut(key) else {
            return;
        };
        node.transform.scale = Vec3::ZERO;
        node.opacity = 0.0;
        self.entrances.insert(key, EntranceTween { started_at: self.clock });
    }

    /// Jump a running entrance to its end state. No-op without one.
    pub fn finish_entrance(&mut self, graph: &mut SceneGraph, key: NodeKey) {
        if self.entrances.remove(&key).is_some() {
            if let Some(node) = graph.node_mut(key) {
                node.transform.scale = Vec3::ONE;
                node.opacity = 1.0;
            }
        }
    }

    pub fn is_entering(&self, key: NodeKey) -> bool {
        self.entrances.contains_key(&key)
    }

    fn entrance_progress(&self, tween: &EntranceTween) -> f32 {
        if self.entrance_duration <= 0.0 {
            return 1.0;
        }
        let elapsed = (self.clock - tween.started_at) as f32;
        (elapsed / self.entrance_duration).clamp(0.0, 1.0)
    }

    // ===== TRIGGERED LOOPS =====

    /// Start (or restart) the looping spin of a node.
    ///
    /// Re-triggering before the deadline replaces the pending stop; loops
    /// never stack. Returns the clock time of the scheduled stop.
    pub fn trigger_loop(&mut self, key: NodeKey) -> f64 {
        let stop_at = self.clock + f64::from(self.auto_stop_delay);
        if self.loops.insert(key, LoopState { stop_at }).is_some() {
            crate::engine_debug!(SOURCE, "Loop re-triggered, stop rescheduled to t={:.2}", stop_at);
        }
        stop_at
    }

    /// Stop a loop immediately. Returns false when none was running.
    pub fn stop_loop(&mut self, key: NodeKey) -> bool {
        self.loops.remove(&key).is_some()
    }

    pub fn is_looping(&self, key: NodeKey) -> bool {
        self.loops.contains_key(&key)
    }

    /// Clock time at which the loop of `key` stops, if one is running
    pub fn stop_deadline(&self, key: NodeKey) -> Option<f64> {
        self.loops.get(&key).map(|l| l.stop_at)
    }

    pub fn active_loop_count(&self) -> usize {
        self.loops.len()
    }

    // ===== CLIP PLAYBACK =====

    /// Loop every given clip on a node forever. Empty clip lists are ignored.
    pub fn play_clips(&mut self, key: NodeKey, clips: &[String]) -> bool {
        if clips.is_empty() {
            return false;
        }
        self.clips.insert(key, ClipPlayback { clips: clips.to_vec(), started_at: self.clock });
        true
    }

    pub fn playing_clips(&self, key: NodeKey) -> Option<&[String]> {
        self.clips.get(&key).map(|p| p.clips.as_slice())
    }

    /// Blend weight of a node's clips: ramps 0 -> 1 over the transition time
    pub fn clip_weight(&self, key: NodeKey) -> Option<f32> {
        let playback = self.clips.get(&key)?;
        if self.clip_transition <= 0.0 {
            return Some(1.0);
        }
        let elapsed = (self.clock - playback.started_at) as f32;
        Some((elapsed / self.clip_transition).clamp(0.0, 1.0))
    }

    // ===== FRAME UPDATE =====

    /// Advance the clock by `dt` seconds and apply every effect
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        let frame_start = self.clock;
        self.clock += f64::from(dt.max(0.0));

        // Entrances
        let mut finished = Vec::new();
        for (&key, tween) in &self.entrances {
            let progress = self.entrance_progress(tween);
            match graph.node_mut(key) {
                Some(node) => {
                    node.transform.scale = Vec3::splat(progress);
                    node.opacity = progress;
                    if progress >= 1.0 {
                        finished.push(key);
                    }
                }
                None => finished.push(key),
            }
        }
        for key in finished {
            self.entrances.remove(&key);
        }

        // Loops: spin only up to the deadline, then stop
        let mut stopped = Vec::new();
        for (&key, state) in &self.loops {
            let Some(node) = graph.node_mut(key) else {
                stopped.push(key);
                continue;
            };
            let active_until = self.clock.min(state.stop_at);
            let spin = ((active_until - frame_start).max(0.0) as f32) * self.angular_speed;
            node.transform.rotation = (Quat::from_rotation_y(spin) * node.transform.rotation).normalize();
            if self.clock >= state.stop_at {
                crate::engine_debug!(SOURCE, "Auto-stop fired for '{}'", node.name());
                stopped.push(key);
            }
        }
        for key in stopped {
            self.loops.remove(&key);
        }

        self.clips.retain(|&key, _| graph.contains(key));

        crate::engine_trace!(SOURCE, "Advanced clock to t={:.3}", self.clock);
    }

    /// Drop every effect (session restart). The clock keeps running.
    pub fn clear(&mut self) {
        self.entrances.clear();
        self.loops.clear();
        self.clips.clear();
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
