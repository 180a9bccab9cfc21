//! Structural labels and the two labeling strategies.
//!
//! A label encodes a node's position in its tree so that order and
//! containment between two nodes can be decided from their labels alone.
//!
//! | Strategy | Labeler | Label | After an insertion |
//! |----------|---------|-------|--------------------|
//! | [Strategy::Static] | [RegionLabeler] | [RegionLabel] `(level, ordinal, right_bound)` | whole tree relabeled |
//! | [Strategy::Dynamic] | [PathLabeler] | [PathLabel] `(level, path, region_id)` | only the new subtree labeled |
//!
//! Both labelers implement [Labeler] and work on the same
//! [Tree](crate::model::Tree), so callers can pick one at runtime.
//!
//! # Example
//! ```
//! use relab::label::{Labeler, PathLabeler, RegionLabeler};
//! use relab::model::Tree;
//!
//! let mut tree: Tree<()> = Tree::new();
//! let root = tree.add_root("root", ());
//! let a = tree.add_new_child(root, "a", ()).unwrap();
//! let c = tree.add_new_child(a, "c", ()).unwrap();
//! let b = tree.add_new_child(root, "b", ()).unwrap();
//!
//! RegionLabeler::new().label_tree(&mut tree).unwrap();
//! assert_eq!(tree.label(a).unwrap().to_string(), "1,2,3");
//! assert_eq!(tree.label(b).unwrap().to_string(), "1,4,4");
//!
//! PathLabeler::new().label_tree(&mut tree).unwrap();
//! assert_eq!(tree.label(c).unwrap().to_string(), "3,001001001,3");
//! assert_eq!(tree.label(b).unwrap().to_string(), "2,001010,1");
//! ```

pub mod path;
pub mod region;

pub use path::{PathLabel, PathLabeler, SiblingPath};
pub use region::{RegionLabel, RegionLabeler};

use crate::error::LabelingError;
use crate::insertion::{InsertOutcome, RelabelScope};
use crate::model::{NodeIndex, Tree};
use std::fmt;

// =#========================================================================#=
// LABEL
// =#========================================================================$=
/// Label of a node, as computed by one of the two strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Static strategy: interval covering the node's subtree
    Region(RegionLabel),
    /// Dynamic strategy: Dewey-style sibling path
    Path(PathLabel),
}

impl Label {
    /// Returns the region label, or `None` for a path label.
    pub fn as_region(&self) -> Option<&RegionLabel> {
        match self {
            Label::Region(label) => Some(label),
            Label::Path(_) => None,
        }
    }

    /// Returns the path label, or `None` for a region label.
    pub fn as_path(&self) -> Option<&PathLabel> {
        match self {
            Label::Path(label) => Some(label),
            Label::Region(_) => None,
        }
    }

    /// Returns the level of the labeled node
    /// (root at 0 for region labels, at 1 for path labels).
    pub fn level(&self) -> usize {
        match self {
            Label::Region(label) => label.level(),
            Label::Path(label) => label.level(),
        }
    }

    /// Returns the strategy that produced this label.
    pub fn strategy(&self) -> Strategy {
        match self {
            Label::Region(_) => Strategy::Static,
            Label::Path(_) => Strategy::Dynamic,
        }
    }

    /// Returns the approximate number of bytes held by this label:
    /// its inline size plus the bit string of a path label.
    pub fn memory_size(&self) -> usize {
        let heap = match self {
            Label::Region(_) => 0,
            Label::Path(label) => label.path().as_str().len(),
        };
        std::mem::size_of::<Label>() + heap
    }
}

impl From<RegionLabel> for Label {
    fn from(label: RegionLabel) -> Self {
        Label::Region(label)
    }
}

impl From<PathLabel> for Label {
    fn from(label: PathLabel) -> Self {
        Label::Path(label)
    }
}

/// Textual form used as attribute value on write-back:
/// `level,ordinal,right_bound` or `level,path,region_id`.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Region(label) => fmt::Display::fmt(label, f),
            Label::Path(label) => fmt::Display::fmt(label, f),
        }
    }
}

// =#========================================================================#=
// STRATEGY
// =#========================================================================$=
/// The two labeling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Region labels, recomputed for the entire tree after any change
    Static,
    /// Path labels, existing labels stay valid when nodes are appended
    Dynamic,
}

impl Strategy {
    /// Returns which part of the tree must be labeled after an insertion.
    pub fn relabel_scope(self) -> RelabelScope {
        match self {
            Strategy::Static => RelabelScope::WholeTree,
            Strategy::Dynamic => RelabelScope::Subtree,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Static => write!(f, "static"),
            Strategy::Dynamic => write!(f, "dynamic"),
        }
    }
}

// =#========================================================================#=
// LABELER (trait)
// =#========================================================================T=
/// Capability of assigning structural labels to the nodes of a [Tree].
///
/// Implemented by [RegionLabeler] and [PathLabeler]. Labelers only touch
/// labels, never structure or metadata.
pub trait Labeler {
    /// The strategy this labeler implements.
    fn strategy(&self) -> Strategy;

    /// Labels every node reachable from the roots of `tree`.
    ///
    /// Labeling the same tree shape twice yields identical labels.
    ///
    /// # Returns
    /// The number of labeled nodes.
    fn label_tree<M>(&mut self, tree: &mut Tree<M>) -> Result<usize, LabelingError>;

    /// Restores valid labels after `inserted` was appended to `tree`,
    /// over the scope this strategy requires.
    fn relabel_after_insert<M>(
        &mut self,
        tree: &mut Tree<M>,
        inserted: NodeIndex,
    ) -> Result<InsertOutcome, LabelingError>;
}
