//! Insertion protocol: appending nodes and restoring valid labels.
//!
//! Appending is a pure structure change ([insert]); it never relabels.
//! Which labels have to be recomputed afterwards depends on the strategy:
//! * static region labels: the whole tree, since ordinals are one global
//!   preorder sequence and every ancestor's right bound grows
//! * dynamic path labels: only the appended subtree
//!
//! [insert_and_relabel] combines both steps for a freshly built subtree.
//!
//! ```
//! use relab::insertion::{insert_and_relabel, RelabelScope};
//! use relab::label::{Labeler, PathLabeler};
//! use relab::model::{Element, Tree};
//!
//! let mut tree = Tree::from_source(Element::new("root").with_child(Element::new("a")));
//! let mut labeler = PathLabeler::new();
//! labeler.label_tree(&mut tree).unwrap();
//!
//! let new_course = Tree::from_source(Element::new("course").with_child(Element::new("sln")));
//! let root = tree.root();
//! let outcome = insert_and_relabel(&mut tree, &mut labeler, root, new_course).unwrap();
//!
//! assert_eq!(outcome.scope, RelabelScope::Subtree);
//! assert_eq!(outcome.relabeled, 2);
//! assert_eq!(tree.label(outcome.node).unwrap().to_string(), "2,001010,1");
//! ```

use crate::error::LabelingError;
use crate::label::Labeler;
use crate::model::{NodeIndex, Tree};
use tracing::debug;

/// Part of a tree that had to be labeled after an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelabelScope {
    /// Every node of the tree was relabeled
    WholeTree,
    /// Only the inserted subtree was labeled; all other labels are untouched
    Subtree,
}

/// Result of an insertion followed by relabeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Index of the inserted (subtree root) node
    pub node: NodeIndex,
    /// Scope that was labeled
    pub scope: RelabelScope,
    /// Number of nodes whose labels were (re)computed
    pub relabeled: usize,
}

/// Appends the detached node `new_node` as last child of `parent`.
///
/// Does not relabel: afterwards call
/// [`Labeler::relabel_after_insert`] of the strategy in use.
///
/// # Errors
/// See [`Tree::add_child`].
pub fn insert<M>(tree: &mut Tree<M>, parent: NodeIndex, new_node: NodeIndex) -> Result<(), LabelingError> {
    tree.add_child(parent, new_node)
}

/// Grafts a freshly built `subtree` below `parent` (or as new top-level root
/// for `None`) and restores valid labels with `labeler`.
///
/// # Returns
/// The [InsertOutcome] with the new index of the subtree root.
///
/// # Errors
/// See [`Tree::graft`] and the labeler's
/// [`relabel_after_insert`](Labeler::relabel_after_insert).
pub fn insert_and_relabel<M, L: Labeler>(
    tree: &mut Tree<M>,
    labeler: &mut L,
    parent: Option<NodeIndex>,
    subtree: Tree<M>,
) -> Result<InsertOutcome, LabelingError> {
    let node = tree.graft(parent, subtree)?;
    let outcome = labeler.relabel_after_insert(tree, node)?;
    debug!(
        strategy = %labeler.strategy(),
        node,
        relabeled = outcome.relabeled,
        "inserted subtree"
    );
    Ok(outcome)
}
