//! Trait for materializing document trees from a hierarchical source.
//!
//! The [`TreeSource`] trait decouples the tree model from wherever the
//! hierarchy comes from (a markup parser, a generator, hand-written
//! fixtures). A source yields, for each node, its name, its opaque metadata
//! and its ordered children; [`Tree::from_source`] assembles the arena.
//!
//! # Built-in implementation
//! * [`Element`] - In-memory markup element with attributes, text and
//!   child elements; materializes into a [MarkupTree] whose nodes carry
//!   [`MarkupData`] for write-back.
//!
//! ```
//! use relab::model::{Element, Tree};
//!
//! let times = Element::new("times")
//!     .with_child(Element::new("start").with_text("14:00"))
//!     .with_child(Element::new("end").with_text("15:30"));
//! let tree = Tree::from_source(times);
//!
//! assert_eq!(tree.num_nodes(), 3);
//! assert_eq!(tree.node(1).meta().text(), Some("14:00"));
//! ```

// Imports for doc links
#[allow(unused_imports)]
use crate::model::tree::MarkupTree;

use crate::model::tree::{NodeIndex, Tree};

// =#========================================================================#=
// TREE SOURCE (trait)
// =#========================================================================T=
/// Abstraction for anything that can be materialized into a [Tree].
///
/// Implementors hand over ownership of their name, metadata and children;
/// children are materialized in the order returned.
pub trait TreeSource: Sized {
    /// The opaque per-node metadata carried into the tree.
    type Meta;

    /// Decomposes this source node into name, metadata and ordered children.
    fn into_parts(self) -> (String, Self::Meta, Vec<Self>);
}

impl<M> Tree<M> {
    /// Materializes a single-root tree from `source`.
    pub fn from_source<S: TreeSource<Meta = M>>(source: S) -> Self {
        Self::from_sources([source])
    }

    /// Materializes a forest, one top-level root per source, in order.
    pub fn from_sources<S, I>(sources: I) -> Self
    where
        S: TreeSource<Meta = M>,
        I: IntoIterator<Item = S>,
    {
        let mut tree = Tree::new();
        for source in sources {
            tree.append_source(None, source);
        }
        tree
    }

    /// Materializes `source` below `parent` (or as a new root) without recursion.
    fn append_source<S: TreeSource<Meta = M>>(&mut self, parent: Option<NodeIndex>, source: S) {
        let mut stack = vec![(parent, source)];

        // Children pushed reversed, so they are popped in document order
        while let Some((parent, source)) = stack.pop() {
            let (name, meta, children) = source.into_parts();
            let index = match parent {
                Some(p) => self.attach_new(p, name, meta),
                None => self.add_root(name, meta),
            };
            stack.extend(children.into_iter().rev().map(|c| (Some(index), c)));
        }
    }
}

// =#========================================================================#=
// MARKUP ELEMENT
// =#========================================================================$=
/// Metadata of a markup node: attributes in original order and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupData {
    attributes: Vec<(String, String)>,
    text: Option<String>,
}

impl MarkupData {
    /// Returns the attributes as `(name, value)` pairs in original order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// In-memory markup element used as [TreeSource].
///
/// Built with chained `with_*` calls, mirroring how a document is written:
/// ```
/// use relab::model::Element;
///
/// let entry = Element::new("Entry")
///     .with_attribute("id", "200K_HUMAN")
///     .with_child(Element::new("AC").with_text("P99999"));
/// assert_eq!(entry.children().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    data: MarkupData,
    children: Vec<Element>,
}

impl Element {
    /// Creates a new element without attributes, text and children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            data: MarkupData::default(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute after all existing ones.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.data.text = Some(text.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child elements in order.
    pub fn with_children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns attributes and text of this element.
    pub fn data(&self) -> &MarkupData {
        &self.data
    }

    /// Returns the child elements.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Consumes this element and returns its child elements,
    /// e.g. to label the children of a document element as a forest.
    pub fn into_children(self) -> Vec<Element> {
        self.children
    }
}

impl TreeSource for Element {
    type Meta = MarkupData;

    fn into_parts(self) -> (String, MarkupData, Vec<Element>) {
        (self.name, self.data, self.children)
    }
}
