/// PlacementEngine - turns an accepted anchor into placed content.
///
/// The placed root sits at the anchor's X/Z with an upright (identity)
/// orientation. Its height depends on the floor reference:
/// - object floating above the known floor: the model is seated on the floor
/// - otherwise: the model hangs from the object's bottom face
///
/// All assets of a rule are loaded before anything is attached, so a missing
/// asset leaves the graph untouched.

use glam::Vec3;
use crate::animation::AnimationCoordinator;
use crate::assets::{AssetProvider, ModelAsset};
use crate::config::{ChildSpec, PlacementRule};
use crate::error::{Error, Result};
use crate::scene::{NodeKey, SceneGraph, Transform};
use crate::tracking::{Anchor, FloorReference};
use crate::{engine_bail, engine_err};

const SOURCE: &str = "anchor3d::Placement";

/// Compute the world position of a model placed for `anchor`.
///
/// `model_height` is the full height of the model's bounds; `floor_y` the
/// current floor reference, if any.
pub fn compute_placement_position(anchor: &Anchor, model_height: f32, floor_y: Option<f32>) -> Vec3 {
    let bottom_y = anchor.bottom_world_y();
    let center = anchor.world_center();

    let y = match floor_y {
        Some(floor) if bottom_y > floor => floor + model_height / 2.0,
        _ => bottom_y - model_height / 2.0,
    };

    Vec3::new(center.x, y, center.z)
}

/// Result of a placement request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A new root was attached
    Placed(NodeKey),
    /// The rule's root already exists; nothing was attached
    AlreadyPlaced(NodeKey),
}

impl PlacementOutcome {
    pub fn key(self) -> NodeKey {
        match self {
            PlacementOutcome::Placed(key) | PlacementOutcome::AlreadyPlaced(key) => key,
        }
    }
}

/// Stateless placement operations over a scene graph
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine;

impl PlacementEngine {
    pub fn new() -> Self {
        Self
    }

    /// Place the content of `rule` for `anchor`.
    ///
    /// The root is attached under the scene root, its children under it, and
    /// the root starts its entrance animation.
    pub fn place(
        &self,
        graph: &mut SceneGraph,
        animation: &mut AnimationCoordinator,
        assets: &dyn AssetProvider,
        anchor: &Anchor,
        rule: &PlacementRule,
        floor: &FloorReference,
    ) -> Result<PlacementOutcome> {
        if let Some(existing) = graph.find(&rule.root_model) {
            crate::engine_debug!(SOURCE, "'{}' is already placed, skipping anchor {}",
                rule.root_model, anchor.id);
            return Ok(PlacementOutcome::AlreadyPlaced(existing));
        }

        let root_asset = load(assets, &rule.root_model)?;
        let child_assets = rule.children
            .iter()
            .map(|spec| load(assets, &spec.model).map(|asset| (spec, asset)))
            .collect::<Result<Vec<_>>>()?;

        let position = compute_placement_position(anchor, root_asset.height(), floor.height());
        let root = graph.attach_to_root(
            root_asset.instantiate().with_transform(Transform::from_position(position)),
        )?;

        for (spec, asset) in &child_assets {
            attach_model(graph, animation, root, spec, asset)?;
        }

        animation.begin_entrance(graph, root);

        crate::engine_info!(SOURCE, "Placed '{}' for anchor {} at ({:.2}, {:.2}, {:.2})",
            rule.root_model, anchor.id, position.x, position.y, position.z);

        Ok(PlacementOutcome::Placed(root))
    }

    /// Attach a model under the node named `parent_name`.
    ///
    /// Idempotent: if the parent already has a child with the model's name,
    /// that child is returned and nothing is loaded.
    pub fn attach_child(
        &self,
        graph: &mut SceneGraph,
        animation: &mut AnimationCoordinator,
        assets: &dyn AssetProvider,
        parent_name: &str,
        spec: &ChildSpec,
    ) -> Result<NodeKey> {
        let Some(parent) = graph.find(parent_name) else {
            engine_bail!(SOURCE, Error::NodeNotFound(parent_name.to_string()));
        };

        if let Some(existing) = graph.find_child(parent, &spec.model) {
            crate::engine_debug!(SOURCE, "'{}' already attached under '{}'", spec.model, parent_name);
            return Ok(existing);
        }

        let asset = load(assets, &spec.model)?;
        let key = attach_model(graph, animation, parent, spec, &asset)?;

        crate::engine_info!(SOURCE, "Attached '{}' under '{}'", spec.model, parent_name);
        Ok(key)
    }
}

fn load(assets: &dyn AssetProvider, name: &str) -> Result<ModelAsset> {
    assets.load_model(name).map_err(|e| engine_err!(SOURCE, e))
}

fn attach_model(
    graph: &mut SceneGraph,
    animation: &mut AnimationCoordinator,
    parent: NodeKey,
    spec: &ChildSpec,
    asset: &ModelAsset,
) -> Result<NodeKey> {
    let local = Transform::from_position(spec.offset).with_uniform_scale(spec.scale);
    let key = graph.attach(parent, asset.instantiate().with_transform(local))?;
    if spec.autoplay && !animation.play_clips(key, &asset.clips) {
        crate::engine_debug!(SOURCE, "'{}' has no animation clips to play", asset.name);
    }
    Ok(key)
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod tests;
