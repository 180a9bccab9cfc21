//! Provides the arena-based document tree.
//!
//! Provides core data structures for representing labeled document trees:
//! * [`Tree<M>`] - Forest of [Node]s using the arena pattern, generic over
//!   the opaque per-node metadata `M`
//! * [MarkupTree] as realization with [MarkupData]
//! * [NodeIndex] as type used to index nodes in tree

use crate::error::LabelingError;
use crate::label::Label;
use crate::model::node::Node;
use crate::model::source::MarkupData;
use std::collections::VecDeque;
use std::fmt::Write;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A document tree (or forest) represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// Aim is to avoid ownership cycles between parents and children while
/// keeping traversals cache friendly.
///
/// Generic over `M`, the opaque metadata each node carries for write-back
/// (e.g. markup attributes and text), which labelers never look at.
///
/// # Structure
/// - All nodes are stored in the arena; a node's index never changes.
/// - Top-level roots are kept in document order. A single document has one
///   root; a forest (e.g. the children of a document element) has several.
/// - Each node has at most one parent and is attached at most once.
///   There is no removal or reparenting: the tree is append-and-label only.
/// - Nodes created with [`Tree::new_node`] are detached until attached via
///   [`Tree::add_child`]. Detached nodes are ignored by traversals.
///
/// # Construction
/// Either materialize a [TreeSource](crate::model::TreeSource) with
/// [`Tree::from_source`], or add roots and children one by one:
/// ```
/// use relab::model::Tree;
///
/// let mut tree: Tree<()> = Tree::new();
/// let root = tree.add_root("root", ());
/// let a = tree.add_new_child(root, "a", ()).unwrap();
/// tree.add_new_child(a, "c", ()).unwrap();
/// tree.add_new_child(root, "b", ()).unwrap();
///
/// assert_eq!(tree.num_nodes(), 4);
/// assert!(tree.is_ancestor_of(root, a));
/// ```
#[derive(Debug, Clone)]
pub struct Tree<M> {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node<M>>,

    /// Indices of the top-level roots in document order
    roots: Vec<NodeIndex>,
}

/// Tree carrying markup attributes and text per node.
pub type MarkupTree = Tree<MarkupData>;

impl<M> Default for Tree<M> {
    fn default() -> Self {
        Tree::new()
    }
}

// ============================================================================
// New, Structure changes (pub)
// ============================================================================
impl<M> Tree<M> {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Creates a new empty tree with capacity for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(num_nodes),
            roots: Vec::new(),
        }
    }

    /// Adds a new top-level root after all existing roots.
    ///
    /// # Arguments
    /// * `name` - Element name of the root
    /// * `meta` - Metadata of the root
    ///
    /// # Returns
    /// The index of the newly created root.
    pub fn add_root(&mut self, name: impl Into<String>, meta: M) -> NodeIndex {
        let index = self.push_node(name.into(), meta);
        self.nodes[index].mark_root();
        self.roots.push(index);
        index
    }

    /// Creates a new detached node, which can be attached once via [`Tree::add_child`].
    ///
    /// # Returns
    /// The index of the newly created node.
    pub fn new_node(&mut self, name: impl Into<String>, meta: M) -> NodeIndex {
        self.push_node(name.into(), meta)
    }

    /// Appends `child` as last child of `parent`.
    ///
    /// Only freshly created (detached) nodes can be attached. Never relabels.
    ///
    /// # Errors
    /// * [LabelingError::UnknownNode] if either index is not in this tree
    /// * [LabelingError::InvalidOperation] if `child` is `parent` itself,
    ///   already has a parent, is a top-level root, or is an ancestor of
    ///   `parent` (which would create a cycle)
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<(), LabelingError> {
        self.check_index(parent)?;
        self.check_index(child)?;

        if parent == child {
            return Err(LabelingError::invalid_operation(format!(
                "cannot attach node {child} to itself"
            )));
        }
        let child_node = &self.nodes[child];
        if let Some(current) = child_node.parent() {
            return Err(LabelingError::invalid_operation(format!(
                "node {child} is already attached to node {current}"
            )));
        }
        if child_node.is_root() {
            return Err(LabelingError::invalid_operation(format!(
                "node {child} is a top-level root"
            )));
        }
        if self.is_ancestor_of(child, parent) {
            return Err(LabelingError::invalid_operation(format!(
                "attaching node {child} below its descendant {parent} would create a cycle"
            )));
        }

        self.nodes[parent].push_child(child);
        self.nodes[child].set_parent(parent);
        Ok(())
    }

    /// Creates a new node and appends it as last child of `parent`.
    ///
    /// # Returns
    /// The index of the new child.
    ///
    /// # Errors
    /// [LabelingError::UnknownNode] if `parent` is not in this tree.
    pub fn add_new_child(
        &mut self,
        parent: NodeIndex,
        name: impl Into<String>,
        meta: M,
    ) -> Result<NodeIndex, LabelingError> {
        self.check_index(parent)?;
        Ok(self.attach_new(parent, name.into(), meta))
    }

    /// Moves a freshly built single-root `subtree` into this tree.
    ///
    /// The subtree's nodes get new indices in this arena, keeping their
    /// order, names and metadata; any labels they carried are dropped.
    /// Detached nodes of `subtree` are not moved.
    ///
    /// # Arguments
    /// * `parent` - Node to append the subtree root to, or `None` to append
    ///   it as a new top-level root
    /// * `subtree` - Tree with exactly one root
    ///
    /// # Returns
    /// The new index of the subtree root.
    ///
    /// # Errors
    /// * [LabelingError::UnknownNode] if `parent` is not in this tree
    /// * [LabelingError::InvalidOperation] if `subtree` does not have exactly one root
    pub fn graft(&mut self, parent: Option<NodeIndex>, subtree: Tree<M>) -> Result<NodeIndex, LabelingError> {
        if let Some(parent) = parent {
            self.check_index(parent)?;
        }
        if subtree.roots.len() != 1 {
            return Err(LabelingError::invalid_operation(format!(
                "grafted subtree must have exactly one root, found {}",
                subtree.roots.len()
            )));
        }

        let old_root = subtree.roots[0];
        let mut old_nodes: Vec<Option<Node<M>>> = subtree.nodes.into_iter().map(Some).collect();
        self.nodes.reserve(old_nodes.len());

        // (old index, new parent); children pushed reversed to keep order
        let mut stack = vec![(old_root, parent)];
        let mut new_root = None;
        while let Some((old_index, new_parent)) = stack.pop() {
            let Some(node) = old_nodes[old_index].take() else {
                continue;
            };
            let (name, meta, children) = node.into_parts();
            let new_index = self.push_node(name, meta);

            match new_parent {
                Some(p) => {
                    self.nodes[p].push_child(new_index);
                    self.nodes[new_index].set_parent(p);
                }
                None => {
                    self.nodes[new_index].mark_root();
                    self.roots.push(new_index);
                }
            }
            if new_root.is_none() {
                new_root = Some(new_index);
            }

            for &child in children.iter().rev() {
                stack.push((child, Some(new_index)));
            }
        }

        new_root.ok_or(LabelingError::UnknownNode(old_root))
    }

    /// Removes all labels of this tree.
    pub fn clear_labels(&mut self) {
        for node in &mut self.nodes {
            node.clear_label();
        }
    }

    /// Creates a node below an existing `parent`, which cannot violate attachment rules.
    pub(crate) fn attach_new(&mut self, parent: NodeIndex, name: String, meta: M) -> NodeIndex {
        let child = self.push_node(name, meta);
        self.nodes[parent].push_child(child);
        self.nodes[child].set_parent(parent);
        child
    }

    fn push_node(&mut self, name: String, meta: M) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, name, meta));
        index
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl<M> Tree<M> {
    /// Returns the top-level roots in document order.
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Returns the first top-level root, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeIndex> {
        self.roots.first().copied()
    }

    /// Returns the number of top-level roots.
    pub fn num_roots(&self) -> usize {
        self.roots.len()
    }

    /// Returns the number of nodes in the arena, including detached ones.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if this tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `index` refers to a node of this tree.
    pub fn contains(&self, index: NodeIndex) -> bool {
        index < self.nodes.len()
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node<M> {
        &self.nodes[index]
    }

    /// Returns a mutable reference to the node at the given index.
    ///
    /// Only name and metadata can be changed through it; structure and
    /// labels are maintained by the tree and the labelers.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node<M> {
        &mut self.nodes[index]
    }

    /// Returns a reference to the node at the given index, or `None` if out of bounds.
    pub fn get(&self, index: NodeIndex) -> Option<&Node<M>> {
        self.nodes.get(index)
    }

    /// Returns the children of the given node in document order.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.nodes[index].children()
    }

    /// Returns the parent of the given node.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index].parent()
    }

    /// Returns the label of the given node.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: NodeIndex) -> Option<&Label> {
        self.nodes[index].label()
    }

    /// Returns the 1-based position of a node among its siblings
    /// (among the roots for a top-level node), or `None` if detached.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn sibling_position(&self, index: NodeIndex) -> Option<usize> {
        let siblings = match self.nodes[index].parent() {
            Some(parent) => self.nodes[parent].children(),
            None if self.nodes[index].is_root() => &self.roots,
            None => return None,
        };
        siblings.iter().position(|&s| s == index).map(|p| p + 1)
    }

    /// Returns the depth of a node, i.e. the number of its ancestors.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).count()
    }

    /// Returns an iterator over the ancestors of a node, parent first.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.nodes[index].parent(), |&i| self.nodes[i].parent())
    }

    /// Returns `true` if `ancestor` is a proper ancestor of `node`,
    /// determined by walking the tree (labels are not consulted).
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn is_ancestor_of(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Returns the largest number of siblings sharing one parent,
    /// counting the top-level roots as siblings too.
    pub fn max_fanout(&self) -> usize {
        self.nodes
            .iter()
            .map(Node::num_children)
            .chain(std::iter::once(self.roots.len()))
            .max()
            .unwrap_or(0)
    }

    /// Returns the approximate number of bytes held by all labels of the tree
    /// (see [Label::memory_size]).
    pub fn label_memory(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(Node::label)
            .map(Label::memory_size)
            .sum()
    }

    /// Returns the number of nodes in the subtree rooted at `index`, including itself.
    pub fn subtree_size(&self, index: NodeIndex) -> usize {
        self.pre_order_from(index).count()
    }

    pub(crate) fn check_index(&self, index: NodeIndex) -> Result<(), LabelingError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(LabelingError::UnknownNode(index))
        }
    }

    pub(crate) fn set_label(&mut self, index: NodeIndex, label: Label) {
        self.nodes[index].set_label(label);
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl<M> Tree<M> {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - All node indices match their position in the arena
    /// - Roots are flagged as roots and have no parent, and vice versa
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this node as a child
    /// - Every node reachable from the roots is reached exactly once
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        for &root in &self.roots {
            if root >= self.nodes.len() || !self.nodes[root].is_root() {
                return false;
            }
        }

        let mut num_flagged_roots = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            // Check node index matches its arena position
            if node.index() != index {
                return false;
            }

            if node.is_root() {
                num_flagged_roots += 1;
                if node.has_parent() {
                    return false;
                }
            }

            // Check children point back to this node as parent
            for &child in node.children() {
                if child >= self.nodes.len() || self.nodes[child].parent() != Some(index) {
                    return false;
                }
            }

            // Check parent includes this node in its children
            if let Some(parent) = node.parent() {
                if parent >= self.nodes.len() || !self.nodes[parent].children().contains(&index) {
                    return false;
                }
            }
        }
        if num_flagged_roots != self.roots.len() {
            return false;
        }

        // Check that no node is reachable twice
        let mut seen = vec![false; self.nodes.len()];
        for node in self.pre_order_iter() {
            if std::mem::replace(&mut seen[node.index()], true) {
                return false;
            }
        }

        true
    }
}

impl<M> std::ops::Index<NodeIndex> for Tree<M> {
    type Output = Node<M>;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<M> std::ops::IndexMut<NodeIndex> for Tree<M> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl<M> Tree<M> {
    /// Returns a visual outline of the forest with node names and labels.
    ///
    /// # Example Output
    /// ```text
    /// [0] root (0,1,4)
    ///   ├─ [1] a (1,2,3)
    ///   │   └─ [2] c (2,3,3)
    ///   └─ [3] b (1,4,4)
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.outline_node(&mut out, root);
        }
        out
    }

    /// Helper function to print a node and its subtree, depth-first with an
    /// explicit stack of `(node, prefix, is_last)`.
    fn outline_node(&self, out: &mut String, index: NodeIndex) {
        let mut stack = vec![(index, String::new(), true)];
        while let Some((index, prefix, is_last)) = stack.pop() {
            let node = &self.nodes[index];

            let connector = if prefix.is_empty() {
                ""
            } else if is_last {
                "└─ "
            } else {
                "├─ "
            };
            let _ = write!(out, "{prefix}{connector}[{index}] {}", node.name());
            if let Some(label) = node.label() {
                let _ = write!(out, " ({label})");
            }
            out.push('\n');

            let child_prefix = if prefix.is_empty() {
                "  ".to_string()
            } else {
                format!("{}{}   ", prefix, if is_last { " " } else { "│" })
            };
            let num_children = node.num_children();
            for (i, &child) in node.children().iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), i + 1 == num_children));
            }
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl<M> Tree<M> {
    /// Returns an iterator over all roots' subtrees in pre-order (document order).
    ///
    /// # Example
    /// ```
    /// use relab::model::Tree;
    ///
    /// let mut tree: Tree<()> = Tree::new();
    /// let root = tree.add_root("root", ());
    /// let a = tree.add_new_child(root, "a", ()).unwrap();
    /// tree.add_new_child(a, "c", ()).unwrap();
    /// tree.add_new_child(root, "b", ()).unwrap();
    ///
    /// let names: Vec<_> = tree.pre_order_iter().map(|n| n.name()).collect();
    /// assert_eq!(names, ["root", "a", "c", "b"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, M> {
        PreOrderIter::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Returns an iterator over the subtree rooted at `index` in pre-order.
    pub fn pre_order_from(&self, index: NodeIndex) -> PreOrderIter<'_, M> {
        let stack = if self.contains(index) { vec![index] } else { Vec::new() };
        PreOrderIter::new(self, stack)
    }

    /// Returns an iterator over all roots' subtrees in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_, M> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over all roots' subtrees in breadth-first order,
    /// yielding each node together with its depth (roots at depth 0).
    pub fn breadth_first_iter(&self) -> BreadthFirstIter<'_, M> {
        BreadthFirstIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a, M> {
    tree: &'a Tree<M>,
    stack: Vec<NodeIndex>,
}

impl<'a, M> PreOrderIter<'a, M> {
    fn new(tree: &'a Tree<M>, stack: Vec<NodeIndex>) -> Self {
        PreOrderIter { tree, stack }
    }
}

impl<'a, M> Iterator for PreOrderIter<'a, M> {
    type Item = &'a Node<M>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children onto stack (last first, so first is processed first)
        self.stack.extend(node.children().iter().rev());

        Some(node)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Each node is visited after all its descendants have been visited.
pub struct PostOrderIter<'a, M> {
    tree: &'a Tree<M>,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a, M> PostOrderIter<'a, M> {
    fn new(tree: &'a Tree<M>) -> Self {
        let stack = tree.roots.iter().rev().map(|&r| (r, false)).collect();
        PostOrderIter { tree, stack }
    }
}

impl<'a, M> Iterator for PostOrderIter<'a, M> {
    type Item = &'a Node<M>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                return Some(node);
            }

            self.stack.push((index, true));
            self.stack
                .extend(node.children().iter().rev().map(|&c| (c, false)));
        }
        None
    }
}

/// Iterator for breadth-first traversal, level by level.
pub struct BreadthFirstIter<'a, M> {
    tree: &'a Tree<M>,
    queue: VecDeque<(NodeIndex, usize)>,
}

impl<'a, M> BreadthFirstIter<'a, M> {
    fn new(tree: &'a Tree<M>) -> Self {
        let queue = tree.roots.iter().map(|&r| (r, 0)).collect();
        BreadthFirstIter { tree, queue }
    }
}

impl<'a, M> Iterator for BreadthFirstIter<'a, M> {
    type Item = (&'a Node<M>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.queue.pop_front()?;
        let node = &self.tree[index];
        self.queue
            .extend(node.children().iter().map(|&c| (c, depth + 1)));
        Some((node, depth))
    }
}
