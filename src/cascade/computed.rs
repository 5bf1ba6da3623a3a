//! ComputedStyle: every property of one node, resolved.

use std::fmt;

use crate::property::{PropertyId, Registry};
use crate::value::Value;

/// The resolved values of all registered properties for one node, indexed
/// by property id.
#[derive(Debug, Clone)]
pub struct ComputedStyle<'r> {
    registry: &'r Registry,
    values: Vec<Value>,
}

impl<'r> ComputedStyle<'r> {
    pub(crate) fn new(registry: &'r Registry, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), registry.len());
        Self { registry, values }
    }

    /// The resolved value of `property`.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered.
    pub fn get(&self, property: PropertyId) -> &Value {
        self.registry.lookup(property);
        &self.values[property.index() as usize]
    }

    /// All values in property-id order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// `(id, value)` pairs in property-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &Value)> + '_ {
        self.registry.iter().map(|d| d.id()).zip(self.values.iter())
    }

    /// Properties whose value differs between `self` and `other`.
    ///
    /// Both styles must come from the same registry.
    pub fn changed(&self, other: &ComputedStyle<'_>) -> Vec<PropertyId> {
        debug_assert!(
            std::ptr::eq(self.registry, other.registry),
            "comparing computed styles from different registries"
        );
        self.iter()
            .zip(other.values.iter())
            .filter(|((_, before), after)| before != after)
            .map(|((id, _), _)| id)
            .collect()
    }
}

impl PartialEq for ComputedStyle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl fmt::Display for ComputedStyle<'_> {
    /// One `name: value;` line per property.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, value) in self.iter() {
            writeln!(f, "{}: {};", self.registry.name(id), value)?;
        }
        Ok(())
    }
}
