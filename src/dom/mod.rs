//! DOM module - arena-based element tree
//!
//! Implements the builder's document representation using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element/attribute names
//! - Deferred attachment: nodes created by navigation stay unattached
//!   until an invocation commits them (and their ancestor chain)

pub mod cursor;
pub mod node;
pub mod strings;
pub mod tree;

pub use cursor::Element;
pub use node::{Attribute, ElementNode, NodeId, NodeState};
pub use strings::StringPool;
pub use tree::{ChildIter, ElementTree};
