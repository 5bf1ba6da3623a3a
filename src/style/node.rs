//! Style node types: StyleNodeId, StyleNode.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use slotmap::new_key_type;

use crate::property::PropertyId;
use crate::value::Value;

new_key_type! {
    /// Identifier of a style node. Carries a generation, so an id kept past
    /// its node's removal is recognised as stale instead of aliasing a new node.
    pub struct StyleNodeId;
}

/// The resolver configuration a resolved value belongs to: the registry
/// that defined the property and the reference depth bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub(crate) registry: u64,
    pub(crate) max_reference_depth: usize,
}

/// Resolved values of one node under one [`CacheKey`].
#[derive(Debug, Default)]
pub(crate) struct ResolvedValues {
    values: HashMap<PropertyId, Value>,
    /// Every registered property is present.
    complete: bool,
}

impl ResolvedValues {
    pub(crate) fn get(&self, property: PropertyId) -> Option<Value> {
        self.values.get(&property).cloned()
    }

    pub(crate) fn insert(&mut self, property: PropertyId, value: Value) {
        self.values.insert(property, value);
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }
}

/// Resolved values of one node, valid for a single tree generation.
#[derive(Debug, Default)]
struct ResolvedCache {
    generation: u64,
    entries: HashMap<CacheKey, ResolvedValues>,
}

impl ResolvedCache {
    /// The entry for `key`, after dropping everything from older generations.
    fn entry(&mut self, generation: u64, key: CacheKey) -> &mut ResolvedValues {
        if self.generation != generation {
            self.entries.clear();
            self.generation = generation;
        }
        self.entries.entry(key).or_default()
    }

    fn current(&self, generation: u64, key: CacheKey) -> Option<&ResolvedValues> {
        if self.generation != generation {
            return None;
        }
        self.entries.get(&key)
    }
}

/// Explicit property values of one widget, plus its resolved-value cache.
#[derive(Debug, Default)]
pub struct StyleNode {
    explicit: BTreeMap<PropertyId, Value>,
    cache: RefCell<ResolvedCache>,
}

impl StyleNode {
    /// Create a node with no explicit values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit value (builder).
    pub fn with(mut self, property: PropertyId, value: Value) -> Self {
        self.explicit.insert(property, value);
        self
    }

    /// The explicit value for `property`, if any.
    pub fn get(&self, property: PropertyId) -> Option<&Value> {
        self.explicit.get(&property)
    }

    /// Explicit values in property-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &Value)> {
        self.explicit.iter().map(|(id, v)| (*id, v))
    }

    /// Number of explicit values.
    pub fn len(&self) -> usize {
        self.explicit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }

    pub(crate) fn set(&mut self, property: PropertyId, value: Value) -> Option<Value> {
        self.explicit.insert(property, value)
    }

    pub(crate) fn remove(&mut self, property: PropertyId) -> Option<Value> {
        self.explicit.remove(&property)
    }

    /// A cached resolved value, if it was stored during `generation` under `key`.
    pub(crate) fn cached(&self, generation: u64, key: CacheKey, property: PropertyId) -> Option<Value> {
        self.cache.borrow().current(generation, key)?.get(property)
    }

    /// Store a resolved value for `generation`, dropping entries from older ones.
    pub(crate) fn store(&self, generation: u64, key: CacheKey, property: PropertyId, value: Value) {
        self.cache.borrow_mut().entry(generation, key).insert(property, value);
    }

    /// Whether every property was stored during `generation` under `key`.
    pub(crate) fn is_complete(&self, generation: u64, key: CacheKey) -> bool {
        self.cache
            .borrow()
            .current(generation, key)
            .is_some_and(ResolvedValues::is_complete)
    }

    pub(crate) fn mark_complete(&self, generation: u64, key: CacheKey) {
        self.cache.borrow_mut().entry(generation, key).mark_complete();
    }
}

impl Clone for StyleNode {
    /// Clones the explicit values; the clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self {
            explicit: self.explicit.clone(),
            cache: RefCell::default(),
        }
    }
}
