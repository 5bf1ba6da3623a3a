//! Cascade resolution: explicit value or `unset`, then compute.
//!
//! For one property on one node:
//!
//! 1. Take the node's explicit value, or the shared `unset` marker.
//! 2. `unset` becomes `inherit` for inheritable properties, `initial` otherwise.
//! 3. `inherit` takes the parent's resolved value (the initial value at a root),
//!    `initial` takes the registry's initial value.
//! 4. The result is computed again until a concrete literal remains:
//!    references resolve another property on the same node, `em` lengths
//!    become pixels against the font size.
//!
//! Resolution is total. The only failure is an unregistered property id,
//! which panics in [`Registry::lookup`].

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::computed::ComputedStyle;
use crate::property::standard::DEFAULT_FONT_SIZE_PX;
use crate::property::{PropertyId, Registry};
use crate::style::node::{CacheKey, ResolvedValues};
use crate::style::{StyleNodeId, StyleTree};
use crate::value::{Literal, Number, Unit, Value, ValueKind};

/// Resolver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOptions {
    /// Keep resolved values on nodes until the tree is next mutated.
    pub cache: bool,
    /// Longest chain of same-node references (`currentColor` and friends)
    /// followed before giving up and using the initial value.
    pub max_reference_depth: usize,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            cache: true,
            max_reference_depth: 8,
        }
    }
}

impl CascadeOptions {
    /// Disable the resolved-value cache (builder).
    pub fn without_cache(mut self) -> Self {
        self.cache = false;
        self
    }

    /// Set the reference depth bound (builder).
    pub fn with_max_reference_depth(mut self, depth: usize) -> Self {
        self.max_reference_depth = depth;
        self
    }
}

/// Where resolved values live during one public call: on the nodes when the
/// cache is on, in a map that dies with the call otherwise.
struct Pass<'t> {
    tree: &'t StyleTree,
    key: CacheKey,
    shared: bool,
    local: HashMap<StyleNodeId, ResolvedValues>,
}

impl Pass<'_> {
    fn get(&self, node: StyleNodeId, property: PropertyId) -> Option<Value> {
        if self.shared {
            self.tree.cached(node, self.key, property)
        } else {
            self.local.get(&node)?.get(property)
        }
    }

    fn put(&mut self, node: StyleNodeId, property: PropertyId, value: Value) {
        if self.shared {
            self.tree.store(node, self.key, property, value);
        } else {
            self.local.entry(node).or_default().insert(property, value);
        }
    }

    fn is_complete(&self, node: StyleNodeId) -> bool {
        if self.shared {
            self.tree.is_complete(node, self.key)
        } else {
            self.local.get(&node).is_some_and(ResolvedValues::is_complete)
        }
    }

    fn mark_complete(&mut self, node: StyleNodeId) {
        if self.shared {
            self.tree.mark_complete(node, self.key);
        } else {
            self.local.entry(node).or_default().mark_complete();
        }
    }
}

/// Node context for one computation.
struct Context<'a, 't> {
    pass: &'a mut Pass<'t>,
    node: StyleNodeId,
    parent: Option<StyleNodeId>,
    /// Properties being computed on `node`, outermost first.
    visiting: Vec<PropertyId>,
}

/// Resolves property values over a [`StyleTree`] using one [`Registry`].
///
/// Cached values are keyed by registry and reference depth bound, so
/// resolvers with different tables or options can share a tree.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    options: CascadeOptions,
    font_size: Option<PropertyId>,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, CascadeOptions::default())
    }

    pub fn with_options(registry: &'r Registry, options: CascadeOptions) -> Self {
        Self {
            registry,
            options,
            font_size: registry.by_name("font-size").ok(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> CascadeOptions {
        self.options
    }

    /// The effective value of `property` on `node`. Never returns a
    /// cascade keyword or reference.
    ///
    /// A stale `node` id resolves like a detached node with nothing set.
    pub fn resolve(&self, tree: &StyleTree, node: StyleNodeId, property: PropertyId) -> Value {
        self.registry.lookup(property);
        let mut pass = self.pass(tree);
        if let Some(hit) = pass.get(node, property) {
            trace!(property = self.registry.name(property), "cache hit");
            return hit;
        }
        self.warm_ancestors(&mut pass, tree.parent(node));
        self.resolve_in(&mut pass, node, property)
    }

    /// Compute `value` as the value of `property` on `node`, whose parent is
    /// `parent`.
    ///
    /// `parent` is taken as given rather than looked up, so a caller may
    /// compute against a different parent style. A stale parent id is
    /// treated as no parent.
    pub fn compute(
        &self,
        value: &Value,
        property: PropertyId,
        tree: &StyleTree,
        node: StyleNodeId,
        parent: Option<StyleNodeId>,
    ) -> Value {
        self.registry.lookup(property);
        let parent = parent.filter(|&p| {
            let live = tree.contains(p);
            if !live {
                debug!(property = self.registry.name(property), "stale parent; resolving as root");
            }
            live
        });
        let mut pass = self.pass(tree);
        self.warm_ancestors(&mut pass, parent);
        let mut cx = Context {
            pass: &mut pass,
            node,
            parent,
            visiting: vec![property],
        };
        self.compute_value(value, property, &mut cx)
    }

    /// Resolve every registered property on `node`.
    pub fn compute_style(&self, tree: &StyleTree, node: StyleNodeId) -> ComputedStyle<'r> {
        let mut pass = self.pass(tree);
        self.warm_ancestors(&mut pass, tree.parent(node));
        self.style_in(&mut pass, node)
    }

    /// Resolve every node under `root` (inclusive), parents before children.
    pub fn compute_subtree(
        &self,
        tree: &StyleTree,
        root: StyleNodeId,
    ) -> Vec<(StyleNodeId, ComputedStyle<'r>)> {
        let mut pass = self.pass(tree);
        self.warm_ancestors(&mut pass, tree.parent(root));
        tree.walk_depth_first(root)
            .into_iter()
            .map(|id| (id, self.style_in(&mut pass, id)))
            .collect()
    }

    fn pass<'t>(&self, tree: &'t StyleTree) -> Pass<'t> {
        Pass {
            tree,
            key: CacheKey {
                registry: self.registry.serial(),
                max_reference_depth: self.options.max_reference_depth,
            },
            shared: self.options.cache,
            local: HashMap::new(),
        }
    }

    /// Fully resolve `from` and its ancestors, farthest first, stopping at
    /// the first one already complete. Afterwards inheriting from `from`
    /// never climbs more than one level, whatever the tree depth.
    fn warm_ancestors(&self, pass: &mut Pass<'_>, from: Option<StyleNodeId>) {
        let mut pending = Vec::new();
        let mut current = from;
        while let Some(id) = current {
            if pass.is_complete(id) {
                break;
            }
            pending.push(id);
            current = pass.tree.parent(id);
        }
        for &id in pending.iter().rev() {
            self.style_in(pass, id);
        }
    }

    /// Resolve every property of `node`; its parent must already be complete
    /// for the recursion to stay shallow.
    fn style_in(&self, pass: &mut Pass<'_>, node: StyleNodeId) -> ComputedStyle<'r> {
        let values = self
            .registry
            .iter()
            .map(|descriptor| self.resolve_in(pass, node, descriptor.id()))
            .collect();
        pass.mark_complete(node);
        ComputedStyle::new(self.registry, values)
    }

    fn resolve_in(&self, pass: &mut Pass<'_>, node: StyleNodeId, property: PropertyId) -> Value {
        if let Some(hit) = pass.get(node, property) {
            trace!(property = self.registry.name(property), "cache hit");
            return hit;
        }

        let specified = pass
            .tree
            .explicit(node, property)
            .cloned()
            .unwrap_or_else(Value::unset);
        let mut cx = Context {
            node,
            parent: pass.tree.parent(node),
            pass,
            visiting: vec![property],
        };
        let value = self.compute_value(&specified, property, &mut cx);
        debug_assert!(value.is_concrete(), "cascade produced {value}");

        trace!(property = self.registry.name(property), %value, "cache store");
        cx.pass.put(node, property, value.clone());
        value
    }

    fn compute_value(&self, value: &Value, property: PropertyId, cx: &mut Context<'_, '_>) -> Value {
        match value.kind() {
            ValueKind::Unset => {
                let delegate = if self.registry.is_inheritable(property) {
                    Value::inherit()
                } else {
                    Value::initial()
                };
                self.compute_value(&delegate, property, cx)
            }
            ValueKind::Inherit => match cx.parent {
                Some(parent) => self.resolve_in(cx.pass, parent, property),
                None => self.compute_value(&Value::initial(), property, cx),
            },
            ValueKind::Initial => {
                let initial = self.registry.initial_value(property).clone();
                self.compute_value(&initial, property, cx)
            }
            ValueKind::Computed(target) if *target == property => {
                // `color: currentColor` means the inherited colour.
                self.compute_value(&Value::inherit(), property, cx)
            }
            ValueKind::Computed(target) => self.resolve_on_node(*target, cx),
            ValueKind::Literal(literal) => self.compute_literal(value, literal, property, cx),
        }
    }

    /// Resolve `target` on the node being computed, guarding against
    /// reference cycles among explicit values and over-long chains.
    fn resolve_on_node(&self, target: PropertyId, cx: &mut Context<'_, '_>) -> Value {
        self.registry.lookup(target);

        if cx.visiting.contains(&target) || cx.visiting.len() > self.options.max_reference_depth {
            let outer = cx.visiting[0];
            warn!(
                property = self.registry.name(outer),
                via = self.registry.name(target),
                "reference cycle or chain too deep; using initial value"
            );
            return self.initial_without_references(outer);
        }

        // No cache lookup here: a cached entry may itself be a cycle fallback
        // computed from a different outer property.
        let specified = cx
            .pass
            .tree
            .explicit(cx.node, target)
            .cloned()
            .unwrap_or_else(Value::unset);
        cx.visiting.push(target);
        let value = self.compute_value(&specified, target, cx);
        cx.visiting.pop();
        value
    }

    fn compute_literal(
        &self,
        value: &Value,
        literal: &Literal,
        property: PropertyId,
        cx: &mut Context<'_, '_>,
    ) -> Value {
        let is_font_size = Some(property) == self.font_size;
        let font_percent = is_font_size
            && matches!(literal, Literal::Number(n) if n.unit == Unit::Percent);
        if !literal.is_relative() && !font_percent {
            return value.clone();
        }

        // `em` on font-size itself refers to the parent's font size.
        let base = if is_font_size {
            self.parent_font_size(cx)
        } else {
            match self.font_size {
                Some(font_size) => px_or_default(&self.resolve_on_node(font_size, cx)),
                None => DEFAULT_FONT_SIZE_PX,
            }
        };

        let absolute = literal.map_numbers(&|n| match n.unit {
            Unit::Em => Number::px(n.value * base),
            Unit::Percent if is_font_size => Number::px(n.value * base / 100.0),
            _ => n,
        });
        Value::literal(absolute)
    }

    fn parent_font_size(&self, cx: &mut Context<'_, '_>) -> f64 {
        let Some(font_size) = self.font_size else {
            return DEFAULT_FONT_SIZE_PX;
        };
        match cx.parent {
            Some(parent) => px_or_default(&self.resolve_in(cx.pass, parent, font_size)),
            None => px_or_default(self.registry.initial_value(font_size)),
        }
    }

    /// The initial value of `property`, computed without consulting any node.
    /// Registry validation guarantees initial-value reference chains end.
    fn initial_without_references(&self, property: PropertyId) -> Value {
        let mut current = property;
        loop {
            let initial = self.registry.initial_value(current);
            match initial.kind() {
                ValueKind::Computed(next) => current = *next,
                ValueKind::Literal(literal) if literal.is_relative() => {
                    return Value::literal(literal.map_numbers(&|n| match n.unit {
                        Unit::Em => Number::px(n.value * DEFAULT_FONT_SIZE_PX),
                        _ => n,
                    }));
                }
                _ => return initial.clone(),
            }
        }
    }
}

fn px_or_default(value: &Value) -> f64 {
    match value.as_number() {
        Some(n) if n.unit == Unit::Px => n.value,
        _ => DEFAULT_FONT_SIZE_PX,
    }
}
