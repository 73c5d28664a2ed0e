/// SceneGraph - the live node tree of the AR scene.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys, plus a side index
/// from node name to keys so name lookups do not walk the tree. The tree walk
/// is still the reference semantics: when several nodes share a name, the
/// first one in depth-first pre-order under the searched root wins.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use crate::engine_bail;
use crate::error::{Error, Result};
use super::node::{NodeKey, SceneNode};

/// Name of the implicit root every scene graph starts with
pub const ROOT_NODE_NAME: &str = "SceneRoot";

const SOURCE: &str = "anchor3d::SceneGraph";

/// Name-indexed scene tree.
///
/// The root node is created with the graph and can never be detached.
pub struct SceneGraph {
    /// All live nodes, root included
    nodes: SlotMap<NodeKey, SceneNode>,
    /// Root of the tree
    root: NodeKey,
    /// Node name -> keys carrying that name (usually exactly one)
    names: FxHashMap<String, SmallVec<[NodeKey; 1]>>,
}

impl SceneGraph {
    /// Create a graph holding only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::group(ROOT_NODE_NAME));
        let mut names: FxHashMap<String, SmallVec<[NodeKey; 1]>> = FxHashMap::default();
        names.entry(ROOT_NODE_NAME.to_string()).or_default().push(root);
        Self { nodes, root, names }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Iterate over all nodes (key, node), in storage order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    // ===== LOOKUP =====

    /// Find a node by exact name anywhere in the graph
    pub fn find(&self, name: &str) -> Option<NodeKey> {
        self.find_by_name(self.root, name)
    }

    /// Find a node by exact name in the subtree rooted at `root` (root included).
    ///
    /// Returns the first match in depth-first pre-order, or None.
    pub fn find_by_name(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        let candidates = self.names.get(name)?;
        let mut in_subtree = candidates
            .iter()
            .copied()
            .filter(|&key| self.is_in_subtree(key, root));

        let first = in_subtree.next()?;
        if in_subtree.next().is_none() {
            return Some(first);
        }

        // Several nodes share the name: tree order decides
        self.depth_first(root)
            .into_iter()
            .find(|&key| self.nodes.get(key).is_some_and(|n| n.name() == name))
    }

    /// Find a direct child of `parent` by name
    pub fn find_child(&self, parent: NodeKey, name: &str) -> Option<NodeKey> {
        self.nodes.get(parent)?
            .children()
            .iter()
            .copied()
            .find(|&key| self.nodes.get(key).is_some_and(|n| n.name() == name))
    }

    /// Keys of the subtree rooted at `root`, depth-first pre-order
    pub fn depth_first(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        if !self.nodes.contains_key(root) {
            return order;
        }

        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            order.push(key);
            if let Some(node) = self.nodes.get(key) {
                // Reverse push keeps children in declaration order
                stack.extend(node.children().iter().rev().copied());
            }
        }
        order
    }

    /// Keys of every node matching `predicate`, depth-first from the root
    pub fn nodes_where<F>(&self, predicate: F) -> Vec<NodeKey>
    where
        F: Fn(&SceneNode) -> bool,
    {
        self.depth_first(self.root)
            .into_iter()
            .filter(|&key| self.nodes.get(key).is_some_and(&predicate))
            .collect()
    }

    /// Whether `key` is `root` or one of its descendants
    fn is_in_subtree(&self, key: NodeKey, root: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == root {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent());
        }
        false
    }

    // ===== MUTATION =====

    /// Link a new node under `parent` and return its key.
    ///
    /// The node's transform is taken as-is, relative to `parent`.
    pub fn attach(&mut self, parent: NodeKey, mut node: SceneNode) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(SOURCE, Error::InvalidNode(
                format!("cannot attach '{}': parent key is stale", node.name())));
        }

        node.parent = Some(parent);
        node.children.clear();
        let name = node.name().to_string();

        let key = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        self.names.entry(name).or_default().push(key);
        Ok(key)
    }

    /// Attach directly under the root
    pub fn attach_to_root(&mut self, node: SceneNode) -> Result<NodeKey> {
        self.attach(self.root, node)
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns the number of nodes removed.
    pub fn detach(&mut self, key: NodeKey) -> Result<usize> {
        if key == self.root {
            engine_bail!(SOURCE, Error::InvalidNode("the scene root cannot be detached".to_string()));
        }
        if !self.nodes.contains_key(key) {
            engine_bail!(SOURCE, Error::InvalidNode("cannot detach: key is stale".to_string()));
        }

        // Unlink from the parent first
        let parent = self.nodes.get(key).and_then(|n| n.parent());
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.retain(|&c| c != key);
        }

        let subtree = self.depth_first(key);
        for &k in &subtree {
            if let Some(node) = self.nodes.remove(k) {
                self.unindex(node.name(), k);
            }
        }
        Ok(subtree.len())
    }

    /// Remove the first node named `name` and its subtree
    pub fn detach_by_name(&mut self, name: &str) -> Result<usize> {
        match self.find(name) {
            Some(key) => self.detach(key),
            None => engine_bail!(SOURCE, Error::NodeNotFound(name.to_string())),
        }
    }

    /// Remove every node under the root, leaving only the root itself.
    ///
    /// Returns the number of nodes removed.
    pub fn clear(&mut self) -> usize {
        let children: Vec<NodeKey> = self.nodes
            .get(self.root)
            .map(|n| n.children().to_vec())
            .unwrap_or_default();

        children
            .into_iter()
            .map(|child| self.detach(child).unwrap_or(0))
            .sum()
    }

    fn unindex(&mut self, name: &str, key: NodeKey) {
        if let Some(keys) = self.names.get_mut(name) {
            keys.retain(|k| *k != key);
            if keys.is_empty() {
                self.names.remove(name);
            }
        }
    }

    // ===== WORLD SPACE =====

    /// Compose the world matrix of a node from its ancestors' local transforms
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut node = self.nodes.get(key)?;
        let mut matrix = node.transform.to_matrix();
        while let Some(parent) = node.parent() {
            node = self.nodes.get(parent)?;
            matrix = node.transform.to_matrix() * matrix;
        }
        Some(matrix)
    }

    /// World-space origin of a node
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| m.w_axis.truncate())
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
