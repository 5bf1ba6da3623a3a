//! Property registry: metadata for every style property.

pub mod registry;
pub mod standard;

pub use registry::{PropertyDescriptor, PropertyFlags, PropertyId, Registry, RegistryBuilder, RegistryError};
