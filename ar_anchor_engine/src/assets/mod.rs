//! Asset module
//!
//! Loadable 3D models as seen by the engine: a name, local bounds used for
//! floor seating, and the animation clips the model carries. Mesh data and
//! rendering stay with the asset collaborator.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::scene::{Aabb, SceneNode};

/// A loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub name: String,
    /// Local-space bounds at unit scale
    pub bounds: Aabb,
    /// Names of the animation clips baked into the model
    pub clips: Vec<String>,
}

impl ModelAsset {
    pub fn new(name: &str, bounds: Aabb) -> Self {
        Self { name: name.to_string(), bounds, clips: Vec::new() }
    }

    pub fn with_clip(mut self, clip: &str) -> Self {
        self.clips.push(clip.to_string());
        self
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    /// Unlinked scene node for this model, named after it
    pub fn instantiate(&self) -> SceneNode {
        SceneNode::model(self.name.clone(), self.name.clone(), self.bounds)
    }
}

/// The external asset collaborator
pub trait AssetProvider {
    /// Load a model by name, or fail with `Error::AssetNotFound`
    fn load_model(&self, name: &str) -> Result<ModelAsset>;
}

/// In-memory asset provider keyed by model name
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    models: FxHashMap<String, ModelAsset>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, replacing any model with the same name
    pub fn register(&mut self, model: ModelAsset) -> &mut Self {
        self.models.insert(model.name.clone(), model);
        self
    }

    /// Builder form of `register`
    pub fn with_model(mut self, model: ModelAsset) -> Self {
        self.register(model);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl AssetProvider for AssetLibrary {
    fn load_model(&self, name: &str) -> Result<ModelAsset> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound(name.to_string()))
    }
}
