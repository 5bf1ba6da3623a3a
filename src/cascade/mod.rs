//! Cascade resolution: unset -> inherit | initial -> computed value.

pub mod computed;
pub mod resolver;

pub use computed::ComputedStyle;
pub use resolver::{CascadeOptions, Resolver};
