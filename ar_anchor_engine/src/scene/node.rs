/// Scene node types.
///
/// Nodes are owned by a SceneGraph slot map and reference each other by
/// NodeKey. The parent owns its children: detaching a node drops its subtree.

use slotmap::new_key_type;
use super::light::Light;
use super::transform::{Aabb, Transform};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneNode within a SceneGraph.
    ///
    /// Keys remain valid even after other nodes are removed.
    /// A key becomes invalid only when its own node is detached.
    pub struct NodeKey;
}

/// What a node carries besides its transform
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure grouping node (the scene root, anchors)
    Group,
    /// Loaded model with its local-space bounds
    Model {
        asset: String,
        bounds: Aabb,
    },
    /// Light belonging to the active lighting rig
    Light(Light),
}

/// A named, positioned, scaled entity in the scene tree
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    /// Parent-relative transform
    pub transform: Transform,
    /// 0.0 = invisible, 1.0 = opaque
    pub opacity: f32,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl SceneNode {
    /// Create an unlinked node. Linking happens in `SceneGraph::attach`.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            opacity: 1.0,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn model(name: impl Into<String>, asset: impl Into<String>, bounds: Aabb) -> Self {
        Self::new(name, NodeKind::Model { asset: asset.into(), bounds })
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, NodeKind::Light(_))
    }

    /// Local-space bounds for model nodes
    pub fn bounds(&self) -> Option<&Aabb> {
        match &self.kind {
            NodeKind::Model { bounds, .. } => Some(bounds),
            _ => None,
        }
    }
}
