use glam::Vec3;

/// Kind of light a node carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel rays along the node's -Z axis
    Directional,
    /// Uniform fill with no direction
    Ambient,
}

/// Light component attached to a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Linear RGB tint
    pub color: Vec3,
    /// Intensity in lux for directional lights, unitless scale for ambient
    pub intensity: f32,
}

impl Light {
    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self { kind: LightKind::Directional, color, intensity }
    }

    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self { kind: LightKind::Ambient, color, intensity }
    }
}
