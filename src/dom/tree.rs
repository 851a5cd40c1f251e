//! Element tree with deferred attachment
//!
//! Nodes live in an arena and start out unattached; committing a handle
//! inserts the committed element and walks upward, materializing any chain
//! of unattached ancestors in one pass. Unattached placeholders stay in the
//! arena but are unreachable from the root and never rendered.

use std::collections::BTreeMap;

use tracing::trace;

use super::cursor::Element;
use super::node::{Attribute, ElementNode, NodeId, NodeState};
use super::strings::StringPool;
use crate::error::Error;
use crate::value::AttrValue;

/// An XML element tree stored in arena format
pub struct ElementTree {
    /// Arena of nodes (index 0 is the root)
    nodes: Vec<ElementNode>,
    /// Arena of attributes; each node owns a contiguous range
    attributes: Vec<Attribute>,
    /// Interned element and attribute names
    strings: StringPool,
}

impl ElementTree {
    /// Create a tree whose root element has the given name
    ///
    /// The root is the only node created directly; all other elements are
    /// reached through [`Element::child`] and inserted by
    /// [`Element::commit`].
    pub fn new(name: &str) -> Self {
        let mut strings = StringPool::new();
        let name_id = strings.intern(name);
        let mut nodes = Vec::with_capacity(16);
        nodes.push(ElementNode::root(name_id));
        ElementTree {
            nodes,
            attributes: Vec::with_capacity(16),
            strings,
        }
    }

    /// Id of the root node
    pub fn root_id(&self) -> NodeId {
        0
    }

    /// Fluent handle positioned at the root
    pub fn root(&mut self) -> Element<'_> {
        Element::new(self, 0)
    }

    /// Fluent handle positioned at an existing node
    ///
    /// Used to fan several children out from one committed element; the id
    /// comes from [`Element::id`].
    pub fn at(&mut self, id: NodeId) -> Element<'_> {
        Element::new(self, id)
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node's tag name
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id)?;
        self.strings.get(node.name_id)
    }

    /// Text content of a node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.text.as_deref()
    }

    /// Attributes of a node, in sorted name order
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        if let Some(node) = self.node(id) {
            let start = node.attr_start as usize;
            let end = start + node.attr_count as usize;
            if end <= self.attributes.len() {
                &self.attributes[start..end]
            } else {
                &[]
            }
        } else {
            &[]
        }
    }

    /// Attribute value by name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        for attr in self.attributes(id) {
            if self.strings.get(attr.name_id) == Some(name) {
                return Some(&attr.value);
            }
        }
        None
    }

    /// All attribute names and values of a node
    pub fn attribute_values(&self, id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(id)
            .iter()
            .filter_map(|attr| {
                let name = self.strings.get(attr.name_id)?;
                Some((name, attr.value.as_str()))
            })
            .collect()
    }

    /// Most recently materialized child with the given name, if any
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let name_id = self.strings.lookup(name)?;
        self.lookup_child(parent, name_id)
    }

    /// Iterate over the materialized children of a node, in insertion order
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.node(id).and_then(|n| n.first_child);
        ChildIter { tree: self, next: first }
    }

    /// Total number of nodes in the arena, including unattached placeholders
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolve an interned name
    pub(crate) fn name(&self, name_id: u32) -> &str {
        self.strings.get(name_id).unwrap_or_default()
    }

    /// Intern a name for use as an element or attribute name
    pub(crate) fn intern(&mut self, name: &str) -> u32 {
        self.strings.intern(name)
    }

    /// Look up a materialized child by interned name
    pub(crate) fn lookup_child(&self, parent: NodeId, name_id: u32) -> Option<NodeId> {
        self.node(parent)?.child_index.get(&name_id).copied()
    }

    /// Push a fresh unattached placeholder under a parent
    pub(crate) fn new_placeholder(&mut self, parent: NodeId, name_id: u32) -> NodeId {
        let depth = self.nodes[parent as usize].depth.saturating_add(1);
        let id = self.nodes.len() as NodeId;
        self.nodes
            .push(ElementNode::placeholder(name_id, parent, depth));
        trace!(id, parent, name = self.name(name_id), "created placeholder");
        id
    }

    /// Commit a handle's node: create a fresh element with the same name
    /// under the same parent, carrying the supplied attributes and text,
    /// then attach it along with any unattached ancestors
    ///
    /// A repeated attribute name keeps the last value; attributes are
    /// stored sorted by name so rendering is stable.
    pub(crate) fn commit_node(
        &mut self,
        target: NodeId,
        attrs: Vec<(String, AttrValue)>,
        text: Option<String>,
    ) -> Result<NodeId, Error> {
        let (name_id, parent, depth) = {
            let node = &self.nodes[target as usize];
            (node.name_id, node.parent, node.depth)
        };
        let parent = parent.ok_or(Error::RootCommit)?;

        let mut canonical: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in attrs {
            canonical.insert(name, value.to_string());
        }

        let attr_start = self.attributes.len() as u32;
        let attr_count = canonical.len().min(u16::MAX as usize) as u16;
        for (name, value) in canonical {
            let name_id = self.strings.intern(&name);
            self.attributes.push(Attribute { name_id, value });
        }

        let mut node = ElementNode::placeholder(name_id, parent, depth);
        node.attr_start = attr_start;
        node.attr_count = attr_count;
        node.text = text;

        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        trace!(id, name = self.name(name_id), "committing element");
        self.attach(id);
        Ok(id)
    }

    /// Attach a node and any chain of unattached ancestors
    ///
    /// Walks upward from `start`, linking each unattached node into its
    /// parent's child list and name index, and stops at the first ancestor
    /// that is already part of the tree. The name index is overwritten on
    /// each attach so navigation resolves to the newest sibling.
    fn attach(&mut self, start: NodeId) {
        let mut id = start;
        loop {
            let (parent, state, name_id) = {
                let node = &self.nodes[id as usize];
                (node.parent, node.state, node.name_id)
            };
            let Some(parent) = parent else { break };
            if state == NodeState::Materialized {
                break;
            }

            self.link_child(parent, id);
            self.nodes[id as usize].state = NodeState::Materialized;
            self.nodes[parent as usize].child_index.insert(name_id, id);
            trace!(id, parent, name = self.name(name_id), "attached element");

            id = parent;
        }
    }

    /// Link a child node at the end of its parent's child list
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            // First child
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }
}

/// Iterator over child nodes
pub struct ChildIter<'t> {
    tree: &'t ElementTree,
    next: Option<NodeId>,
}

impl<'t> Iterator for ChildIter<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_names(tree: &ElementTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .filter_map(|c| tree.node_name(c).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = ElementTree::new("books");
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node_name(tree.root_id()), Some("books"));
        assert!(tree.node(tree.root_id()).unwrap().parent.is_none());
    }

    #[test]
    fn test_navigation_has_no_side_effect() {
        let mut tree = ElementTree::new("books");
        let _ = tree.root().child("book");
        // A placeholder was created but nothing was attached
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.children(0).count(), 0);
    }

    #[test]
    fn test_fresh_placeholder_per_access() {
        let mut tree = ElementTree::new("books");
        let first = tree.root().child("book").id();
        let second = tree.root().child("book").id();
        // Unmaterialized nodes are not cached
        assert_ne!(first, second);
    }

    #[test]
    fn test_commit_attaches_single_child() {
        let mut tree = ElementTree::new("books");
        let book = tree
            .root()
            .child("book")
            .attr("title", "Example A")
            .commit()
            .unwrap()
            .id();
        assert_eq!(child_names(&tree, 0), vec!["book"]);
        assert_eq!(tree.get_attribute(book, "title"), Some("Example A"));
        assert!(tree.node(book).unwrap().is_materialized());
    }

    #[test]
    fn test_accessor_returns_materialized_child() {
        let mut tree = ElementTree::new("books");
        let book = tree.root().child("book").commit().unwrap().id();
        assert_eq!(tree.root().child("book").id(), book);
    }

    #[test]
    fn test_implicit_ancestor_materialization() {
        let mut tree = ElementTree::new("root");
        tree.root()
            .child("a")
            .child("b")
            .child("c")
            .commit()
            .unwrap();
        let a = tree.find_child(0, "a").unwrap();
        let b = tree.find_child(a, "b").unwrap();
        assert_eq!(child_names(&tree, 0), vec!["a"]);
        assert_eq!(child_names(&tree, a), vec!["b"]);
        assert_eq!(child_names(&tree, b), vec!["c"]);
    }

    #[test]
    fn test_shared_ancestors_not_duplicated() {
        let mut tree = ElementTree::new("root");
        tree.root().child("a").child("b").child("c").commit().unwrap();
        tree.root().child("a").child("b").child("c").commit().unwrap();
        let a = tree.find_child(0, "a").unwrap();
        let b = tree.find_child(a, "b").unwrap();
        // One a, one b, two c siblings
        assert_eq!(child_names(&tree, 0), vec!["a"]);
        assert_eq!(child_names(&tree, a), vec!["b"]);
        assert_eq!(child_names(&tree, b), vec!["c", "c"]);
    }

    #[test]
    fn test_commit_of_existing_name_adds_sibling() {
        let mut tree = ElementTree::new("root");
        tree.root().child("a").child("b").child("c").commit().unwrap();
        tree.root().child("a").child("b").child("c").commit().unwrap();
        tree.root().child("a").commit().unwrap();
        tree.root().child("a").child("b").child("c").commit().unwrap();
        tree.root().child("a").child("b").child("c").commit().unwrap();

        // The a() call created a second sibling a; later commits landed
        // under it because the name index tracks the newest sibling.
        let a_ids: Vec<NodeId> = tree.children(0).collect();
        assert_eq!(child_names(&tree, 0), vec!["a", "a"]);

        let first_b = tree.find_child(a_ids[0], "b").unwrap();
        assert_eq!(child_names(&tree, first_b), vec!["c", "c"]);

        let second_b = tree.find_child(a_ids[1], "b").unwrap();
        assert_eq!(child_names(&tree, second_b), vec!["c", "c"]);
    }

    #[test]
    fn test_sibling_accumulation_with_attributes() {
        let mut tree = ElementTree::new("books");
        tree.root()
            .child("book")
            .attr("title", "Example A")
            .commit()
            .unwrap();
        tree.root()
            .child("book")
            .attr("title", "Example B")
            .commit()
            .unwrap();

        let books: Vec<NodeId> = tree.children(0).collect();
        assert_eq!(books.len(), 2);
        assert_eq!(tree.get_attribute(books[0], "title"), Some("Example A"));
        assert_eq!(tree.get_attribute(books[1], "title"), Some("Example B"));
    }

    #[test]
    fn test_name_index_tracks_newest_sibling() {
        let mut tree = ElementTree::new("books");
        tree.root().child("book").attr("title", "A").commit().unwrap();
        let second = tree
            .root()
            .child("book")
            .attr("title", "B")
            .commit()
            .unwrap()
            .id();
        assert_eq!(tree.find_child(0, "book"), Some(second));
        // Children committed afterwards land under the newest book
        tree.root()
            .child("book")
            .child("author")
            .attr("name", "Jane Doe")
            .commit()
            .unwrap();
        assert_eq!(tree.children(second).count(), 1);
    }

    #[test]
    fn test_attributes_sorted_and_last_duplicate_wins() {
        let mut tree = ElementTree::new("root");
        let id = tree
            .root()
            .child("e")
            .attr("z", 1)
            .attr("a", 2)
            .attr("z", 3)
            .commit()
            .unwrap()
            .id();
        let attrs = tree.attribute_values(id);
        assert_eq!(attrs, vec![("a", "2"), ("z", "3")]);
    }

    #[test]
    fn test_root_commit_fails() {
        let mut tree = ElementTree::new("root");
        let err = tree.root().commit().err();
        assert_eq!(err, Some(Error::RootCommit));
    }

    #[test]
    fn test_text_set_at_commit() {
        let mut tree = ElementTree::new("root");
        let id = tree
            .root()
            .child("note")
            .text("remember")
            .commit()
            .unwrap()
            .id();
        assert_eq!(tree.text(id), Some("remember"));
    }

    #[test]
    fn test_depth_tracking() {
        let mut tree = ElementTree::new("root");
        let c = tree
            .root()
            .child("a")
            .child("b")
            .child("c")
            .commit()
            .unwrap()
            .id();
        assert_eq!(tree.node(c).unwrap().depth, 3);
    }
}
