//! Engine configuration
//!
//! Plain data with defaults matching the reference deployment: a city model
//! placed on the recognized object, a car inside it, a bee as the optional
//! auxiliary model, 15-unit vertical steps and a 9-second animation auto-stop.

use glam::Vec3;
use crate::tracking::{PlaneDetection, TrackingConfig};

/// World axis used by stepped translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// `v` with its component along this axis replaced
    pub fn with_component(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }
}

/// A model attached under a placed root (or under another named node)
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSpec {
    /// Asset to load; also used as the node name
    pub model: String,
    /// Parent-relative position
    pub offset: Vec3,
    /// Uniform parent-relative scale
    pub scale: f32,
    /// Loop every animation clip the asset carries
    pub autoplay: bool,
}

impl ChildSpec {
    pub fn new(model: &str, offset: Vec3, scale: f32) -> Self {
        Self { model: model.to_string(), offset, scale, autoplay: false }
    }

    pub fn autoplay(mut self) -> Self {
        self.autoplay = true;
        self
    }
}

/// What to place when a reference object is recognized
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRule {
    /// Reference-object name this rule applies to; None matches any name
    pub reference_name: Option<String>,
    /// Root model placed at the anchor; also the root node's name
    pub root_model: String,
    /// Content attached under the root
    pub children: Vec<ChildSpec>,
}

impl PlacementRule {
    pub fn any(root_model: &str) -> Self {
        Self { reference_name: None, root_model: root_model.to_string(), children: Vec::new() }
    }

    pub fn for_reference(reference_name: &str, root_model: &str) -> Self {
        Self {
            reference_name: Some(reference_name.to_string()),
            ..Self::any(root_model)
        }
    }

    pub fn with_child(mut self, child: ChildSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn matches(&self, reference_name: &str) -> bool {
        self.reference_name.as_deref().map_or(true, |n| n == reference_name)
    }
}

/// One light of a rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPreset {
    pub color: Vec3,
    pub intensity: f32,
}

/// Day and night light rigs (directional + ambient each)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPresets {
    pub day_directional: LightPreset,
    pub day_ambient: LightPreset,
    pub night_directional: LightPreset,
    pub night_ambient: LightPreset,
}

impl Default for LightingPresets {
    fn default() -> Self {
        Self {
            day_directional: LightPreset { color: Vec3::ONE, intensity: 1000.0 },
            day_ambient: LightPreset { color: Vec3::ONE, intensity: 0.6 },
            night_directional: LightPreset { color: Vec3::new(0.45, 0.55, 1.0), intensity: 150.0 },
            night_ambient: LightPreset { color: Vec3::new(0.3, 0.35, 0.6), intensity: 0.1 },
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Reference-object catalog handed to the tracker
    pub reference_group: String,
    pub plane_detection: PlaneDetection,
    /// Names accepted before the gate; empty accepts every name
    pub allowed_reference_names: Vec<String>,
    /// First matching rule wins
    pub placement_rules: Vec<PlacementRule>,
    /// Auxiliary model added on request, and the node it goes under
    pub auxiliary_parent: String,
    pub auxiliary: ChildSpec,
    /// Distance moved per translation step
    pub step_offset: f32,
    pub step_axis: Axis,
    /// Pinch scale clamp, per component
    pub scale_min: f32,
    pub scale_max: f32,
    /// Seconds before a triggered loop stops by itself
    pub auto_stop_delay: f32,
    /// Seconds of the scale/opacity entrance of placed roots
    pub entrance_duration: f32,
    /// Loop rotation speed about Y, radians per second
    pub loop_angular_speed: f32,
    /// Blend-in seconds for autoplayed clips
    pub clip_transition: f32,
    pub lighting: LightingPresets,
}

impl EngineConfig {
    /// Tracking configuration derived from this engine configuration
    pub fn tracking_config(&self) -> TrackingConfig {
        TrackingConfig {
            reference_group: self.reference_group.clone(),
            plane_detection: self.plane_detection,
        }
    }

    /// First placement rule matching a reference name
    pub fn rule_for(&self, reference_name: &str) -> Option<&PlacementRule> {
        self.placement_rules.iter().find(|r| r.matches(reference_name))
    }

    /// Whether a reference name passes the pre-gate filter
    pub fn allows_reference(&self, reference_name: &str) -> bool {
        self.allowed_reference_names.is_empty()
            || self.allowed_reference_names.iter().any(|n| n == reference_name)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_group: "AR Resources".to_string(),
            plane_detection: PlaneDetection::HORIZONTAL,
            allowed_reference_names: Vec::new(),
            placement_rules: vec![
                PlacementRule::any("City")
                    .with_child(ChildSpec::new("Car", Vec3::new(-150.0, 0.0, 0.0), 0.2)),
            ],
            auxiliary_parent: "City".to_string(),
            auxiliary: ChildSpec::new("Bee", Vec3::new(-150.0, 30.0, 0.0), 0.2).autoplay(),
            step_offset: 15.0,
            step_axis: Axis::Y,
            scale_min: 0.5,
            scale_max: 2.0,
            auto_stop_delay: 9.0,
            entrance_duration: 1.0,
            loop_angular_speed: std::f32::consts::PI,
            clip_transition: 0.3,
            lighting: LightingPresets::default(),
        }
    }
}
