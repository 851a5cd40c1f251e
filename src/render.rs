//! XML serialization
//!
//! Renders a tree compactly or pretty-printed, in one synchronous pass.
//! Only materialized nodes are reachable from the root, so unattached
//! placeholders never appear in the output. Rendering a well-formed tree
//! never fails.

use std::fmt;

use tracing::trace;

use crate::dom::{ElementTree, NodeId};
use crate::escape::{escape_attr, escape_text};

/// Rendering configuration
///
/// The defaults are the internal ones: compact output, tab indent, `"\n"`
/// newline, no encoding declaration. [`ElementTree::to_xml_pretty`] uses
/// the two-space stringified form instead.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indented multi-line output instead of compact
    pub pretty: bool,
    /// Literal string prefixed once per nesting level in pretty mode
    pub indent: String,
    /// Line terminator in pretty mode
    pub newline: String,
    /// Declared document encoding, emitted in the XML declaration by
    /// [`ElementTree::to_document`]; content is not re-encoded
    pub encoding: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            pretty: false,
            indent: "\t".to_string(),
            newline: "\n".to_string(),
            encoding: None,
        }
    }
}

impl ElementTree {
    /// Render compactly, without an XML declaration
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_element(self.root_id(), &RenderOptions::default(), 0, &mut out);
        out
    }

    /// Render pretty-printed with two-space indent, without an XML
    /// declaration
    pub fn to_xml_pretty(&self) -> String {
        let options = RenderOptions {
            pretty: true,
            indent: "  ".to_string(),
            ..RenderOptions::default()
        };
        let mut out = String::with_capacity(256);
        self.write_element(self.root_id(), &options, 0, &mut out);
        out
    }

    /// Render as a full document with an XML declaration
    ///
    /// The declaration carries the configured encoding when one is set.
    pub fn to_document(&self, options: &RenderOptions) -> String {
        trace!(nodes = self.node_count(), pretty = options.pretty, "rendering document");
        let mut out = String::with_capacity(256);
        match &options.encoding {
            Some(encoding) => {
                out.push_str("<?xml version=\"1.0\" encoding=\"");
                out.push_str(encoding);
                out.push_str("\"?>");
            }
            None => out.push_str("<?xml version=\"1.0\"?>"),
        }
        if options.pretty {
            out.push_str(&options.newline);
        }
        self.write_element(self.root_id(), options, 0, &mut out);
        out
    }

    fn write_element(&self, id: NodeId, options: &RenderOptions, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        let name = self.name(node.name_id);

        if options.pretty {
            for _ in 0..depth {
                out.push_str(&options.indent);
            }
        }
        out.push('<');
        out.push_str(name);
        for attr in self.attributes(id) {
            out.push(' ');
            out.push_str(self.name(attr.name_id));
            out.push_str("=\"");
            out.push_str(&escape_attr(&attr.value));
            out.push('"');
        }

        let text = node.text.as_deref();
        let has_children = node.has_children();

        // Self-closing form when there is nothing inside
        if text.is_none() && !has_children {
            out.push_str("/>");
            if options.pretty {
                out.push_str(&options.newline);
            }
            return;
        }

        out.push('>');
        if options.pretty && has_children {
            out.push_str(&options.newline);
            if let Some(text) = text {
                for _ in 0..depth + 1 {
                    out.push_str(&options.indent);
                }
                out.push_str(&escape_text(text));
                out.push_str(&options.newline);
            }
            for child in self.children(id) {
                self.write_element(child, options, depth + 1, out);
            }
            for _ in 0..depth {
                out.push_str(&options.indent);
            }
        } else {
            // Compact mode, or a text-only element kept on one line
            if let Some(text) = text {
                out.push_str(&escape_text(text));
            }
            for child in self.children(id) {
                self.write_element(child, options, depth + 1, out);
            }
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        if options.pretty {
            out.push_str(&options.newline);
        }
    }
}

impl fmt::Display for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}
