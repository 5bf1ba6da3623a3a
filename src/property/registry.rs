//! Property registry: id -> metadata (name, inheritance, animation, initial value).
//!
//! A [`Registry`] is built once through [`RegistryBuilder`] and is read-only
//! afterwards. Ids are dense indices assigned in registration order, so a
//! lookup is a bounds-checked slice index.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::{Value, ValueKind};

/// Identifier of a registered style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(u32);

impl PropertyId {
    /// Build an id from a raw registry index.
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The raw registry index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Registration flags for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyFlags {
    /// Unset values copy the parent's resolved value.
    pub inherit: bool,
    /// Changes may be animated by transitions.
    pub animated: bool,
}

impl PropertyFlags {
    pub const NONE: Self = Self {
        inherit: false,
        animated: false,
    };
    pub const INHERIT: Self = Self {
        inherit: true,
        animated: false,
    };
    pub const ANIMATED: Self = Self {
        inherit: false,
        animated: true,
    };
    pub const INHERIT_ANIMATED: Self = Self {
        inherit: true,
        animated: true,
    };
}

/// Metadata for one registered property.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    id: PropertyId,
    name: String,
    flags: PropertyFlags,
    initial: Value,
}

impl PropertyDescriptor {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inheritable(&self) -> bool {
        self.flags.inherit
    }

    pub fn is_animated(&self) -> bool {
        self.flags.animated
    }

    pub fn initial_value(&self) -> &Value {
        &self.initial
    }
}

/// Errors from registry construction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown property id: {0}")]
    UnknownProperty(u32),
    #[error("unknown property: {0}")]
    UnknownPropertyName(String),
    #[error("property registered twice: {0}")]
    DuplicateName(String),
    #[error("invalid initial value for {name}: {reason}")]
    InvalidInitialValue { name: String, reason: &'static str },
}

/// The immutable property table.
#[derive(Debug, Clone)]
pub struct Registry {
    properties: Vec<PropertyDescriptor>,
    by_name: HashMap<String, PropertyId>,
    serial: u64,
}

/// Source of registry serial numbers.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in property table, see [`crate::property::standard`].
    pub fn standard() -> Self {
        super::standard::registry()
    }

    /// Look up a property descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry. Property ids are
    /// static; an unknown one is a programming error.
    pub fn lookup(&self, id: PropertyId) -> &PropertyDescriptor {
        match self.try_lookup(id) {
            Ok(descriptor) => descriptor,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`Registry::lookup`].
    pub fn try_lookup(&self, id: PropertyId) -> Result<&PropertyDescriptor, RegistryError> {
        self.properties
            .get(id.0 as usize)
            .ok_or(RegistryError::UnknownProperty(id.0))
    }

    /// Find a property id by its name.
    pub fn by_name(&self, name: &str) -> Result<PropertyId, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownPropertyName(name.to_owned()))
    }

    pub fn is_inheritable(&self, id: PropertyId) -> bool {
        self.lookup(id).is_inheritable()
    }

    pub fn is_animated(&self, id: PropertyId) -> bool {
        self.lookup(id).is_animated()
    }

    pub fn initial_value(&self, id: PropertyId) -> &Value {
        self.lookup(id).initial_value()
    }

    pub fn name(&self, id: PropertyId) -> &str {
        self.lookup(id).name()
    }

    /// Iterate descriptors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Process-unique number assigned at build time. Clones share it, as
    /// they hold the same table.
    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    properties: Vec<PropertyDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property and return the id it will have in the built registry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        flags: PropertyFlags,
        initial: Value,
    ) -> PropertyId {
        let id = PropertyId(self.properties.len() as u32);
        self.properties.push(PropertyDescriptor {
            id,
            name: name.into(),
            flags,
            initial,
        });
        id
    }

    /// Register a property (builder).
    pub fn with(mut self, name: impl Into<String>, flags: PropertyFlags, initial: Value) -> Self {
        self.register(name, flags, initial);
        self
    }

    /// Validate and freeze the table.
    ///
    /// Rejects duplicate names and initial values that cannot be computed
    /// without a cascade: the `unset`/`inherit`/`initial` keywords,
    /// references to unregistered properties, and reference cycles among
    /// initial values.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut by_name = HashMap::with_capacity(self.properties.len());
        for descriptor in &self.properties {
            if by_name.insert(descriptor.name.clone(), descriptor.id).is_some() {
                return Err(RegistryError::DuplicateName(descriptor.name.clone()));
            }
        }

        for descriptor in &self.properties {
            let invalid = |reason| RegistryError::InvalidInitialValue {
                name: descriptor.name.clone(),
                reason,
            };
            match descriptor.initial.kind() {
                ValueKind::Unset | ValueKind::Inherit | ValueKind::Initial => {
                    return Err(invalid("cascade keywords cannot be initial values"));
                }
                ValueKind::Computed(target) if target.0 as usize >= self.properties.len() => {
                    return Err(invalid("references an unregistered property"));
                }
                ValueKind::Computed(_) => {
                    if self.initial_reference_cycles(descriptor.id) {
                        return Err(invalid("initial values reference each other in a cycle"));
                    }
                }
                ValueKind::Literal(_) => {}
            }
        }

        Ok(Registry {
            properties: self.properties,
            by_name,
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Follow the chain of initial-value references starting at `start`.
    fn initial_reference_cycles(&self, start: PropertyId) -> bool {
        let mut current = start;
        for _ in 0..=self.properties.len() {
            match self.properties[current.0 as usize].initial.kind() {
                ValueKind::Computed(next) if *next == start => return true,
                ValueKind::Computed(next) if (next.0 as usize) < self.properties.len() => {
                    current = *next;
                }
                _ => return false,
            }
        }
        true
    }
}
