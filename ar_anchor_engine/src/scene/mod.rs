//! Scene module
//!
//! Hierarchical scene graph of placed content, lights and decorations,
//! with a name index for the lookups every interactive operation starts with.

mod transform;
mod light;
mod node;
mod scene_graph;

pub use transform::{Transform, Aabb};
pub use light::{Light, LightKind};
pub use node::{SceneNode, NodeKey, NodeKind};
pub use scene_graph::{SceneGraph, ROOT_NODE_NAME};
