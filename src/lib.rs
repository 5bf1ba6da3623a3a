//! # stylecascade
//!
//! A CSS-like style value cascade resolver.
//!
//! Given a table of properties (inheritable or not, with an initial value) and
//! a tree of style nodes holding explicit values, stylecascade computes the
//! effective value of any property on any node, applying `unset`, `inherit`,
//! `initial` and `currentColor`-style references, and interpolates between
//! resolved values for transitions.
//!
//! ## Core Systems
//!
//! - **[`value`]** — Immutable shared values: numbers, colours, keywords, cascade markers
//! - **[`property`]** — Property registry built once and read afterwards
//! - **[`style`]** — Slotmap-backed arena of style nodes mirroring a widget tree
//! - **[`cascade`]** — Resolver: unset -> inherit | initial -> computed value
//! - **[`transition`]** — Interpolation with discrete fallback, easing, timed transitions
//!
//! ## Example
//!
//! ```
//! use stylecascade::property::standard;
//! use stylecascade::{Registry, Resolver, Rgba, StyleNode, StyleTree, Value};
//!
//! let registry = Registry::standard();
//! let mut tree = StyleTree::new();
//! let root = tree.insert(StyleNode::new().with(standard::COLOR, Value::color(Rgba::RED)));
//! let child = tree.insert_child(root, StyleNode::new()).unwrap();
//!
//! let resolver = Resolver::new(&registry);
//! assert_eq!(resolver.resolve(&tree, child, standard::COLOR), Value::color(Rgba::RED));
//! assert_eq!(resolver.resolve(&tree, child, standard::MARGIN_TOP), Value::px(0.0));
//! ```

// Foundation
pub mod property;
pub mod value;

// Style tree and cascade
pub mod cascade;
pub mod style;

// Animation
pub mod transition;

pub use cascade::{CascadeOptions, ComputedStyle, Resolver};
pub use property::{PropertyDescriptor, PropertyFlags, PropertyId, Registry, RegistryBuilder, RegistryError};
pub use style::{StyleNode, StyleNodeId, StyleTree, StyleTreeError};
pub use transition::{TimingFunction, Transition, TransitionEngine, TransitionTiming};
pub use value::{Literal, Number, Rgba, Unit, Value, ValueKind};
