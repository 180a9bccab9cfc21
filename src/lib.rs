//! Relab is a library to label the nodes of document trees so that
//! structural relationships can be decided from labels alone.
//!
//! A label encodes a node's place in its tree. Comparing two labels answers
//! whether one node is an ancestor of the other and which comes first in
//! document order, without walking the tree.
//! Core functionality provided:
//! - Tree model: arena-based ordered forest [Tree] with opaque per-node
//!   metadata, materialized from any [TreeSource] (e.g. the in-memory
//!   markup [Element]). See [crate::model] for more details.
//! - Two labeling strategies behind the common [Labeler] trait:
//!   - [RegionLabeler] (static): `(level, ordinal, right_bound)` intervals,
//!     compact, but every insertion relabels the whole tree.
//!   - [PathLabeler] (dynamic): `(level, path, region_id)` Dewey-style
//!     sibling paths, appended nodes are labeled without touching any
//!     existing label.
//! - Insertion protocol: append a subtree and restore valid labels with the
//!   scope the strategy requires. See [crate::insertion].
//! - Name-path queries like `root/course/title`. See [crate::query].
//! - Write-back: serialize labeled trees as markup with the label as an
//!   attribute. See [crate::writer].
//! - Sample documents: generated course catalogs ([crate::catalog]) and
//!   fixed records to insert into them ([crate::samples]).
//!
//! Limitations:
//! - Append-only: no node removal or reparenting
//! - No markup parser; trees are built from [TreeSource] implementations
//!
//! # Usage patterns
//! 1. Quick functions [label_static] and [label_dynamic] label a tree with
//!    default settings.
//! 2. Configure a labeler yourself (e.g.
//!    [PathLabeler::with_segment_width]) and drive it through the
//!    [Labeler] trait and [insert_and_relabel](insertion::insert_and_relabel).
//!
//! ## Example
//! ```
//! use relab::catalog::{course_catalog, new_course};
//! use relab::insertion::{insert_and_relabel, RelabelScope};
//! use relab::label::{Labeler, PathLabeler};
//! use relab::model::Tree;
//!
//! let mut tree = Tree::from_source(course_catalog(3));
//! let mut labeler = PathLabeler::new().with_segment_width(4)?;
//! labeler.label_tree(&mut tree)?;
//!
//! let root = tree.root();
//! let outcome = insert_and_relabel(&mut tree, &mut labeler, root, Tree::from_source(new_course()))?;
//! assert_eq!(outcome.scope, RelabelScope::Subtree);
//! assert_eq!(tree.label(outcome.node).unwrap().to_string(), "2,00010100,2");
//! # Ok::<(), relab::LabelingError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod insertion;
pub mod label;
pub mod model;
pub mod query;
pub mod samples;
pub mod writer;

pub use crate::error::LabelingError;
pub use crate::label::{Label, Labeler, PathLabeler, RegionLabeler, Strategy};
pub use crate::model::{Element, MarkupTree, NodeIndex, Tree, TreeSource};

// ============================================================================
// Quick labeling API
// ============================================================================
/// Labels every node of `tree` with static region labels.
///
/// See [RegionLabeler] for the label semantics.
///
/// # Returns
/// The number of labeled nodes.
pub fn label_static<M>(tree: &mut Tree<M>) -> Result<usize, LabelingError> {
    RegionLabeler::new().label_tree(tree)
}

/// Labels every node of `tree` with dynamic path labels of the default
/// segment width.
///
/// See [PathLabeler] for the label semantics and use it directly to keep
/// labeling appended nodes.
///
/// # Returns
/// The number of labeled nodes.
pub fn label_dynamic<M>(tree: &mut Tree<M>) -> Result<usize, LabelingError> {
    PathLabeler::new().label_tree(tree)
}
