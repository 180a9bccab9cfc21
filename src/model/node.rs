//! Node module for the document tree representation.

use crate::label::{Label, PathLabel, RegionLabel};
use crate::model::tree::NodeIndex;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node (element) of a document tree.
///
/// Nodes live in the arena of a [Tree](crate::model::Tree) and refer to
/// each other only via [NodeIndex].
///
/// # Invariants
/// - `index` is the position of this node in the arena
/// - `parent` is `None` for top-level roots and for detached nodes that
///   have not been attached yet; a node is attached at most once
/// - `children` is ordered (document order) and each child has this node
///   as its `parent`
/// - `label` is only written by a labeler
/// - `meta` is opaque to the tree and labelers, e.g. markup attributes and text
#[derive(Debug, Clone, PartialEq)]
pub struct Node<M> {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Element name
    name: String,
    /// Index of the parent node, if attached
    parent: Option<NodeIndex>,
    /// Whether this node is a top-level root of its tree
    root: bool,
    /// Indices of the child nodes in document order
    children: Vec<NodeIndex>,
    /// Structural label, absent until labeled
    label: Option<Label>,
    /// Per-node metadata carried through for write-back
    meta: M,
}

impl<M> Node<M> {
    /// Creates a new unlabeled node without parent and children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the tree (arena)
    /// * `name` - Element name
    /// * `meta` - Opaque metadata of this node
    pub(crate) fn new(index: NodeIndex, name: String, meta: M) -> Self {
        Node {
            index,
            name,
            parent: None,
            root: false,
            children: Vec::new(),
            label: None,
            meta,
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the element name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames this node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the index of the parent, or `None` if this is a root or detached.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns `true` if this node is a top-level root.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Returns `true` if this node is neither a root nor attached to a parent.
    pub fn is_detached(&self) -> bool {
        !self.root && self.parent.is_none()
    }

    /// Returns `true` if this node has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the children of this node in document order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of children of this node.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the last child, if any.
    pub fn last_child(&self) -> Option<NodeIndex> {
        self.children.last().copied()
    }

    /// Returns the label of this node, or `None` if not labeled yet.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Returns the region label if this node carries one.
    pub fn region_label(&self) -> Option<&RegionLabel> {
        self.label.as_ref().and_then(Label::as_region)
    }

    /// Returns the path label if this node carries one.
    pub fn path_label(&self) -> Option<&PathLabel> {
        self.label.as_ref().and_then(Label::as_path)
    }

    /// Returns `true` if this node has been labeled.
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// Returns the metadata of this node.
    pub fn meta(&self) -> &M {
        &self.meta
    }

    /// Returns the metadata of this node mutably.
    pub fn meta_mut(&mut self) -> &mut M {
        &mut self.meta
    }

    // --- crate-private mutation, only used by tree and labelers ---

    pub(crate) fn set_parent(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn mark_root(&mut self) {
        self.root = true;
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = Some(label);
    }

    pub(crate) fn clear_label(&mut self) {
        self.label = None;
    }

    /// Decomposes this node into its parts for moving it into another arena.
    pub(crate) fn into_parts(self) -> (String, M, Vec<NodeIndex>) {
        (self.name, self.meta, self.children)
    }
}
