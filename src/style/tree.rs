//! Style tree: insert, remove, reparent, set and unset explicit values.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{CacheKey, StyleNode, StyleNodeId};
use crate::property::PropertyId;
use crate::value::Value;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[StyleNodeId] = &[];

/// Errors from structural tree edits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StyleTreeError {
    #[error("style node does not exist")]
    UnknownNode,
    #[error("reparenting would make a node its own ancestor")]
    WouldCycle,
}

/// The arena of style nodes, mirroring a widget tree.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps; a parent link is a plain id and never keeps a node alive.
///
/// Every mutation bumps [`StyleTree::generation`]. Resolved values cached on
/// nodes are tagged with the generation they were computed in, so a mutation
/// anywhere invalidates every cache without walking the tree.
pub struct StyleTree {
    nodes: SlotMap<StyleNodeId, StyleNode>,
    children: SecondaryMap<StyleNodeId, Vec<StyleNodeId>>,
    parent: SecondaryMap<StyleNodeId, StyleNodeId>,
    generation: u64,
}

impl StyleTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            generation: 0,
        }
    }

    /// Insert a root-level node (no parent).
    pub fn insert(&mut self, node: StyleNode) -> StyleNodeId {
        self.generation += 1;
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a node as a child of `parent`.
    ///
    /// Fails without inserting anything if `parent` does not exist.
    pub fn insert_child(
        &mut self,
        parent: StyleNodeId,
        node: StyleNode,
    ) -> Result<StyleNodeId, StyleTreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(StyleTreeError::UnknownNode);
        }
        let id = self.insert(node);
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        Ok(id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: StyleNodeId) -> Option<StyleNode> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.generation += 1;

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        let mut removed = None;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(current) {
                stack.extend(kids);
            }
            self.parent.remove(current);
            let node = self.nodes.remove(current);
            if current == id {
                removed = node;
            }
        }
        removed
    }

    /// Move `node` (with its subtree) under `new_parent`.
    pub fn reparent(
        &mut self,
        node: StyleNodeId,
        new_parent: StyleNodeId,
    ) -> Result<(), StyleTreeError> {
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(new_parent) {
            return Err(StyleTreeError::UnknownNode);
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return Err(StyleTreeError::WouldCycle);
        }
        self.generation += 1;

        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }

        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
        Ok(())
    }

    /// Set an explicit value on a node, returning the value it replaces.
    ///
    /// The previous `Value` is not modified; it is handed back to the caller.
    pub fn set(
        &mut self,
        id: StyleNodeId,
        property: PropertyId,
        value: Value,
    ) -> Result<Option<Value>, StyleTreeError> {
        let node = self.nodes.get_mut(id).ok_or(StyleTreeError::UnknownNode)?;
        let previous = node.set(property, value);
        self.generation += 1;
        Ok(previous)
    }

    /// Remove the explicit value for `property`, so it cascades again.
    pub fn unset(
        &mut self,
        id: StyleNodeId,
        property: PropertyId,
    ) -> Result<Option<Value>, StyleTreeError> {
        let node = self.nodes.get_mut(id).ok_or(StyleTreeError::UnknownNode)?;
        let previous = node.remove(property);
        if previous.is_some() {
            self.generation += 1;
        }
        Ok(previous)
    }

    /// The explicit value set on `id` for `property`.
    pub fn explicit(&self, id: StyleNodeId, property: PropertyId) -> Option<&Value> {
        self.nodes.get(id)?.get(property)
    }

    /// The live parent of a node, if it has one.
    pub fn parent(&self, id: StyleNodeId) -> Option<StyleNodeId> {
        self.parent
            .get(id)
            .copied()
            .filter(|p| self.nodes.contains_key(*p))
    }

    /// Children of a node. Empty if it has none or does not exist.
    pub fn children(&self, id: StyleNodeId) -> &[StyleNodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: StyleNodeId) -> Vec<StyleNodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: StyleNodeId) -> Vec<StyleNodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Immutable access to a node.
    pub fn get(&self, id: StyleNodeId) -> Option<&StyleNode> {
        self.nodes.get(id)
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: StyleNodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mutation counter. Cached resolutions from older generations are ignored.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cached(&self, id: StyleNodeId, key: CacheKey, property: PropertyId) -> Option<Value> {
        self.nodes.get(id)?.cached(self.generation, key, property)
    }

    pub(crate) fn store(&self, id: StyleNodeId, key: CacheKey, property: PropertyId, value: Value) {
        if let Some(node) = self.nodes.get(id) {
            node.store(self.generation, key, property, value);
        }
    }

    pub(crate) fn is_complete(&self, id: StyleNodeId, key: CacheKey) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.is_complete(self.generation, key))
    }

    pub(crate) fn mark_complete(&self, id: StyleNodeId, key: CacheKey) {
        if let Some(node) = self.nodes.get(id) {
            node.mark_complete(self.generation, key);
        }
    }
}

impl Default for StyleTree {
    fn default() -> Self {
        Self::new()
    }
}
