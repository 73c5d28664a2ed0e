/// Anchors emitted by the tracking collaborator.
///
/// Anchors are read-only to the engine. The geometry (`center`, `extent`)
/// describes the recognized reference object's bounding box in the anchor's
/// local frame; `transform` places that frame in the world.

use std::fmt;
use glam::{Mat4, Vec3};
use uuid::Uuid;

/// Opaque, session-unique anchor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(Uuid);

impl AnchorId {
    /// Fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnchorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked pose tied to a recognized reference object
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    /// Name of the reference object template, when the catalog provides one
    pub reference_name: Option<String>,
    /// Anchor frame -> world
    pub transform: Mat4,
    /// Bounding-box offset in the anchor frame
    pub center: Vec3,
    /// Bounding-box size in the anchor frame
    pub extent: Vec3,
}

impl Anchor {
    pub fn new(id: AnchorId, reference_name: Option<&str>, transform: Mat4) -> Self {
        Self {
            id,
            reference_name: reference_name.map(str::to_string),
            transform,
            center: Vec3::ZERO,
            extent: Vec3::ZERO,
        }
    }

    pub fn with_geometry(mut self, center: Vec3, extent: Vec3) -> Self {
        self.center = center;
        self.extent = extent;
        self
    }

    /// World position of the anchor frame origin (column 3 of the transform)
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// World position of the bounding-box center
    pub fn world_center(&self) -> Vec3 {
        self.transform.transform_point3(self.center)
    }

    /// World Y of the recognized object's bottom face
    pub fn bottom_world_y(&self) -> f32 {
        let bottom = Vec3::new(self.center.x, self.center.y - self.extent.y / 2.0, self.center.z);
        self.transform.transform_point3(bottom).y
    }
}
