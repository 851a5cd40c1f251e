//! easyxml - fluent in-memory XML tree builder
//!
//! Elements are navigated by name, staged with attributes and text, and
//! inserted only when committed. Committing a deep path materializes any
//! missing ancestors implicitly, so intermediate elements never need to be
//! created by hand:
//!
//! ```
//! use easyxml::ElementTree;
//!
//! # fn main() -> Result<(), easyxml::Error> {
//! let mut books = ElementTree::new("books");
//! books.root().child("book").attr("title", "Example A").commit()?;
//! books.root().child("book").child("author")
//!     .attr("name", "John Smith")
//!     .attr("age", 57)
//!     .commit()?;
//! books.root().child("book").child("publisher")
//!     .attr("name", "Publisher A")
//!     .commit()?;
//!
//! assert_eq!(
//!     books.to_xml(),
//!     "<books><book title=\"Example A\">\
//!      <author age=\"57\" name=\"John Smith\"/>\
//!      <publisher name=\"Publisher A\"/>\
//!      </book></books>"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Committing the same name twice under one parent accumulates siblings;
//! plain navigation without a commit never inserts anything. Rendering is
//! available compact ([`ElementTree::to_xml`]), pretty-printed
//! ([`ElementTree::to_xml_pretty`]), or as a full document with an XML
//! declaration ([`ElementTree::to_document`]).

mod dom;
mod error;
mod escape;
mod render;
mod value;

pub use dom::{Attribute, ChildIter, Element, ElementNode, ElementTree, NodeId, NodeState, StringPool};
pub use error::Error;
pub use escape::{escape_attr, escape_text};
pub use render::RenderOptions;
pub use value::AttrValue;
