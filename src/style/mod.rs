//! Style nodes: slotmap-backed arena mirroring the widget tree.

pub mod node;
pub mod tree;

pub use node::{StyleNode, StyleNodeId};
pub use tree::{StyleTree, StyleTreeError};
