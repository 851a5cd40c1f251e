//! XML element node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

use std::collections::HashMap;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Attachment state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Created by named-child access, not yet in any parent's child list
    Unattached,
    /// Present in its parent's child list and name index
    Materialized,
}

/// An element node in the arena
///
/// Child order is kept with sibling links; `child_index` maps a name to the
/// most recently materialized child with that name, which is what named
/// navigation resolves to.
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Index into string pool for the tag name
    pub name_id: u32,
    /// Parent node (None only for the root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Whether this node has been committed into the tree
    pub state: NodeState,
    /// Depth in the tree (root = 0)
    pub depth: u16,
    /// Start of attributes in the attribute arena
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u16,
    /// Text content, set once at commit
    pub text: Option<String>,
    /// Name id -> most recently materialized child with that name
    pub child_index: HashMap<u32, NodeId>,
}

impl ElementNode {
    /// Create the root node, attached by definition
    pub fn root(name_id: u32) -> Self {
        ElementNode {
            name_id,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            state: NodeState::Materialized,
            depth: 0,
            attr_start: 0,
            attr_count: 0,
            text: None,
            child_index: HashMap::new(),
        }
    }

    /// Create an unattached placeholder under a parent
    pub fn placeholder(name_id: u32, parent: NodeId, depth: u16) -> Self {
        ElementNode {
            name_id,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            state: NodeState::Unattached,
            depth,
            attr_start: 0,
            attr_count: 0,
            text: None,
            child_index: HashMap::new(),
        }
    }

    /// Check if this node has been committed into the tree
    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.state == NodeState::Materialized
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.attr_count > 0
    }
}

/// Stored attribute with its value already canonically stringified
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Index into string pool for the attribute name
    pub name_id: u32,
    /// Value, converted to its string form at commit time
    pub value: String,
}
