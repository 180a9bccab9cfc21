//! Markup writing of labeled trees.

use crate::model::{MarkupData, NodeIndex, Tree};
use crate::writer::escape::{escape_attribute, escape_text};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Default name of the attribute holding the label.
pub const DEFAULT_LABEL_ATTRIBUTE: &str = "label";

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT: usize = 2;

/// Markup declaration written first when enabled.
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

// =#========================================================================#=
// MARKUP CONTENT (trait)
// =#========================================================================T=
/// Node metadata that can be written back as markup.
///
/// Implemented for [MarkupData] and for `()` (structure only).
pub trait MarkupContent {
    /// Attributes in original order.
    fn attributes(&self) -> &[(String, String)];

    /// Text content, if any.
    fn text(&self) -> Option<&str>;
}

impl MarkupContent for MarkupData {
    fn attributes(&self) -> &[(String, String)] {
        MarkupData::attributes(self)
    }

    fn text(&self) -> Option<&str> {
        MarkupData::text(self)
    }
}

impl MarkupContent for () {
    fn attributes(&self) -> &[(String, String)] {
        &[]
    }

    fn text(&self) -> Option<&str> {
        None
    }
}

// =#========================================================================#=
// MARKUP WRITER
// =#========================================================================$=
/// Serializes a (labeled) [Tree] back to markup.
///
/// Each node becomes an element with the node's label as first attribute,
/// followed by its original attributes, its text and its child elements in
/// order. Unlabeled nodes get no label attribute. An original attribute
/// with the same name as the label attribute is replaced by the label.
///
/// # Example
/// ```
/// use relab::label::{Labeler, RegionLabeler};
/// use relab::model::{Element, Tree};
/// use relab::writer::MarkupWriter;
///
/// let mut tree = Tree::from_source(
///     Element::new("times")
///         .with_child(Element::new("start").with_text("14:00"))
///         .with_child(Element::new("end").with_text("15:30")),
/// );
/// RegionLabeler::new().label_tree(&mut tree).unwrap();
///
/// let markup = MarkupWriter::new().with_indent(0).to_markup(&tree);
/// assert_eq!(
///     markup,
///     r#"<times label="0,1,3"><start label="1,2,2">14:00</start><end label="1,3,3">15:30</end></times>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MarkupWriter {
    label_attribute: String,
    document_element: Option<String>,
    indent: usize,
    declaration: bool,
}

impl Default for MarkupWriter {
    fn default() -> Self {
        MarkupWriter::new()
    }
}

impl MarkupWriter {
    /// Creates a writer with label attribute `label`, two-space indentation,
    /// no document element and no declaration.
    pub fn new() -> Self {
        MarkupWriter {
            label_attribute: DEFAULT_LABEL_ATTRIBUTE.to_string(),
            document_element: None,
            indent: DEFAULT_INDENT,
            declaration: false,
        }
    }

    /// Sets the name of the attribute holding the label.
    pub fn with_label_attribute(mut self, name: impl Into<String>) -> Self {
        self.label_attribute = name.into();
        self
    }

    /// Wraps all top-level roots into one enclosing element with the given name,
    /// e.g. when the roots were the children of a document element.
    pub fn with_document_element(mut self, name: impl Into<String>) -> Self {
        self.document_element = Some(name.into());
        self
    }

    /// Sets the number of spaces per nesting level; 0 writes everything on one line.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Writes the `<?xml ...?>` declaration before the content.
    pub fn with_declaration(mut self) -> Self {
        self.declaration = true;
        self
    }

    /// Returns the markup of the whole forest.
    pub fn to_markup<M: MarkupContent>(&self, tree: &Tree<M>) -> String {
        let mut out = String::with_capacity(estimate_markup_len(tree));

        if self.declaration {
            out.push_str(XML_DECLARATION);
            self.newline(&mut out);
        }

        let depth = match &self.document_element {
            Some(name) => {
                out.push('<');
                out.push_str(name);
                if tree.num_roots() == 0 {
                    out.push_str("/>");
                    self.newline(&mut out);
                    return out;
                }
                out.push('>');
                self.newline(&mut out);
                1
            }
            None => 0,
        };

        for &root in tree.roots() {
            self.write_node(&mut out, tree, root, depth);
        }

        if let Some(name) = &self.document_element {
            let _ = write!(out, "</{name}>");
            self.newline(&mut out);
        }

        out
    }

    /// Writes the markup of the whole forest to `writer`.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails.
    pub fn write<M: MarkupContent, W: Write>(&self, tree: &Tree<M>, writer: W) -> io::Result<()> {
        let mut writer = io::BufWriter::new(writer);
        writer.write_all(self.to_markup(tree).as_bytes())?;
        writer.flush()
    }

    /// Writes one element and its subtree, using an explicit stack instead of
    /// recursion so arbitrarily deep trees do not exhaust the call stack.
    fn write_node<M: MarkupContent>(&self, out: &mut String, tree: &Tree<M>, index: NodeIndex, depth: usize) {
        let mut stack = vec![Visit::Open(index, depth)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Open(index, depth) => {
                    if self.open_element(out, tree, index, depth) {
                        stack.push(Visit::Close(index, depth));
                        stack.extend(tree.children(index).iter().rev().map(|&c| Visit::Open(c, depth + 1)));
                    }
                }
                Visit::Close(index, depth) => {
                    self.pad(out, depth);
                    let _ = write!(out, "</{}>", tree.node(index).name());
                    self.newline(out);
                }
            }
        }
    }

    /// Writes the start tag, attributes and text of one element.
    ///
    /// A leaf is closed right away. Returns `true` if the element still
    /// needs its children and closing tag.
    fn open_element<M: MarkupContent>(&self, out: &mut String, tree: &Tree<M>, index: NodeIndex, depth: usize) -> bool {
        let node = tree.node(index);
        let content = node.meta();

        self.pad(out, depth);
        out.push('<');
        out.push_str(node.name());

        if let Some(label) = node.label() {
            let _ = write!(
                out,
                " {}=\"{}\"",
                self.label_attribute,
                escape_attribute(&label.to_string())
            );
        }
        for (name, value) in content.attributes() {
            if node.is_labeled() && *name == self.label_attribute {
                continue;
            }
            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
        }

        let text = content.text();
        if node.is_leaf() {
            match text {
                Some(text) => {
                    let _ = write!(out, ">{}</{}>", escape_text(text), node.name());
                }
                None => out.push_str("/>"),
            }
            self.newline(out);
            return false;
        }

        out.push('>');
        self.newline(out);
        if let Some(text) = text {
            self.pad(out, depth + 1);
            out.push_str(&escape_text(text));
            self.newline(out);
        }
        true
    }

    fn pad(&self, out: &mut String, depth: usize) {
        if self.indent > 0 {
            out.extend(std::iter::repeat_n(' ', depth * self.indent));
        }
    }

    fn newline(&self, out: &mut String) {
        if self.indent > 0 {
            out.push('\n');
        }
    }
}

/// Pending step of the element writer: element index and its depth.
enum Visit {
    Open(NodeIndex, usize),
    Close(NodeIndex, usize),
}

/// Estimates the length of the markup of a tree, to pre-allocate the output.
///
/// Per node: opening and closing tag, a label attribute of typical size,
/// original attributes and text.
pub(crate) fn estimate_markup_len<M: MarkupContent>(tree: &Tree<M>) -> usize {
    // `<` `>` `</` `>` plus indentation and newline
    const TAG_CHARS: usize = 12;
    // ` label="2,001001001,3"`
    const LABEL_CHARS: usize = 24;

    tree.pre_order_iter()
        .map(|node| {
            let meta = node.meta();
            let attributes: usize = meta
                .attributes()
                .iter()
                .map(|(n, v)| n.len() + v.len() + 4)
                .sum();
            2 * node.name().len() + TAG_CHARS + LABEL_CHARS + attributes + meta.text().map_or(0, str::len)
        })
        .sum()
}
