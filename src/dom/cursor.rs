//! Fluent element handle
//!
//! [`Element`] is the navigation and staging surface of the builder:
//! `child` walks to an existing materialized child or a fresh unattached
//! placeholder, `attr`/`text` stage content, and `commit` performs the
//! invocation that inserts the element (and any unattached ancestors) into
//! the tree.
//!
//! Rust has no arbitrary-property syntax, so child names are passed to an
//! explicit `child(name)` call; everything else follows the original fluent
//! shape.

use super::node::NodeId;
use super::tree::ElementTree;
use crate::error::Error;
use crate::value::AttrValue;

/// A fluent handle positioned at one node of an [`ElementTree`]
///
/// Handles are consumed by navigation and commit. Dropping a handle without
/// committing discards its staged attributes and text; any placeholder it
/// pointed at stays unattached and is never rendered.
pub struct Element<'t> {
    tree: &'t mut ElementTree,
    id: NodeId,
    pending_attrs: Vec<(String, AttrValue)>,
    pending_text: Option<String>,
}

impl<'t> Element<'t> {
    pub(crate) fn new(tree: &'t mut ElementTree, id: NodeId) -> Self {
        Element {
            tree,
            id,
            pending_attrs: Vec::new(),
            pending_text: None,
        }
    }

    /// Id of the node this handle points at
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name of the node this handle points at
    pub fn name(&self) -> &str {
        self.tree.node_name(self.id).unwrap_or_default()
    }

    /// Navigate to the named child
    ///
    /// Returns a handle to the most recently materialized child with this
    /// name when one exists, otherwise to a fresh unattached placeholder.
    /// Nothing is inserted into the tree until [`commit`](Self::commit);
    /// attributes and text staged on the current handle are discarded by
    /// navigation.
    pub fn child(self, name: &str) -> Element<'t> {
        let name_id = self.tree.intern(name);
        let id = match self.tree.lookup_child(self.id, name_id) {
            Some(existing) => existing,
            None => self.tree.new_placeholder(self.id, name_id),
        };
        Element::new(self.tree, id)
    }

    /// Stage an attribute for the next commit
    ///
    /// The value is stringified canonically at commit time; a repeated name
    /// keeps the last value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.pending_attrs.push((name.into(), value.into()));
        self
    }

    /// Stage text content for the next commit
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.pending_text = Some(text.into());
        self
    }

    /// Commit this element into the tree
    ///
    /// Creates a new element with this handle's name under this handle's
    /// parent, carrying the staged attributes and text, then attaches it
    /// together with any chain of unattached ancestors. Returns a handle to
    /// the newly materialized element for further chaining.
    ///
    /// Committing the root handle fails fast with [`Error::RootCommit`].
    pub fn commit(self) -> Result<Element<'t>, Error> {
        let id = self
            .tree
            .commit_node(self.id, self.pending_attrs, self.pending_text)?;
        Ok(Element::new(self.tree, id))
    }
}
