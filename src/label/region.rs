//! Static region labeling.
//!
//! Every node gets `(level, ordinal, right_bound)`: its depth (root at 0),
//! its position in document order (1-based) and the ordinal of the last node
//! of its subtree. Node `B` is a descendant of `A` iff
//! `A.ordinal < B.ordinal <= A.right_bound`.
//!
//! Since ordinals form one global sequence, any insertion shifts the ordinals
//! of all following nodes, so the whole tree is relabeled.

use crate::error::LabelingError;
use crate::insertion::{InsertOutcome, RelabelScope};
use crate::label::{Label, Labeler, Strategy};
use crate::model::{NodeIndex, Tree};
use std::fmt;
use tracing::debug;

// =#========================================================================#=
// REGION LABEL
// =#========================================================================$=
/// Region label of the static strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionLabel {
    level: usize,
    ordinal: usize,
    right_bound: usize,
}

impl RegionLabel {
    /// Creates a new region label.
    pub fn new(level: usize, ordinal: usize, right_bound: usize) -> Self {
        RegionLabel {
            level,
            ordinal,
            right_bound,
        }
    }

    /// Depth of the node, root at level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Position in document order, starting at 1.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Ordinal of the last node (in document order) of this node's subtree.
    pub fn right_bound(&self) -> usize {
        self.right_bound
    }

    /// Returns `true` if `other` labels a proper descendant of this node.
    pub fn contains(&self, other: &RegionLabel) -> bool {
        self.ordinal < other.ordinal && other.ordinal <= self.right_bound
    }

    /// Returns `true` if this node is an ancestor of `other` or the same node.
    pub fn is_ancestor_or_self_of(&self, other: &RegionLabel) -> bool {
        self.ordinal == other.ordinal || self.contains(other)
    }

    /// Returns `true` if `other` labels a child of this node.
    pub fn is_parent_of(&self, other: &RegionLabel) -> bool {
        self.contains(other) && other.level == self.level + 1
    }

    /// Returns `true` if this node comes before `other` in document order.
    pub fn precedes(&self, other: &RegionLabel) -> bool {
        self.ordinal < other.ordinal
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.level, self.ordinal, self.right_bound)
    }
}

// =#========================================================================#=
// REGION LABELER
// =#========================================================================$=
/// Labeler of the static strategy.
///
/// Stateless between invocations: the ordinal counter lives only for the
/// duration of one [`label_tree`](Labeler::label_tree) call, so the labeler
/// can be reused and shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionLabeler;

impl RegionLabeler {
    /// Creates a new region labeler.
    pub fn new() -> Self {
        RegionLabeler
    }
}

impl Labeler for RegionLabeler {
    fn strategy(&self) -> Strategy {
        Strategy::Static
    }

    /// Labels the whole forest in two passes.
    ///
    /// 1. Pre-order (document order across all roots): assign ordinals
    ///    `1..=N` and levels.
    /// 2. Post-order over the arena: the right bound of a node is the right
    ///    bound of its last child, or its own ordinal for a leaf.
    fn label_tree<M>(&mut self, tree: &mut Tree<M>) -> Result<usize, LabelingError> {
        // Pass 1: pre-order with explicit stack of (index, level)
        let mut visited: Vec<(NodeIndex, usize)> = Vec::with_capacity(tree.num_nodes());
        let mut stack: Vec<(NodeIndex, usize)> =
            tree.roots().iter().rev().map(|&r| (r, 0)).collect();
        while let Some((index, level)) = stack.pop() {
            visited.push((index, level));
            stack.extend(tree.children(index).iter().rev().map(|&c| (c, level + 1)));
        }

        let mut ordinals = vec![0; tree.num_nodes()];
        for (position, &(index, _)) in visited.iter().enumerate() {
            ordinals[index] = position + 1;
        }

        // Pass 2: reverse pre-order reaches every child before its parent
        let mut right_bounds = vec![0; tree.num_nodes()];
        for &(index, _) in visited.iter().rev() {
            right_bounds[index] = match tree.node(index).last_child() {
                Some(last) => right_bounds[last],
                None => ordinals[index],
            };
        }

        for &(index, level) in &visited {
            let label = RegionLabel::new(level, ordinals[index], right_bounds[index]);
            tree.set_label(index, Label::Region(label));
        }

        debug!(nodes = visited.len(), "region labeling finished");
        Ok(visited.len())
    }

    fn relabel_after_insert<M>(
        &mut self,
        tree: &mut Tree<M>,
        inserted: NodeIndex,
    ) -> Result<InsertOutcome, LabelingError> {
        tree.check_index(inserted)?;
        let relabeled = self.label_tree(tree)?;
        Ok(InsertOutcome {
            node: inserted,
            scope: RelabelScope::WholeTree,
            relabeled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_is_strict() {
        let parent = RegionLabel::new(0, 1, 4);
        let child = RegionLabel::new(1, 2, 3);
        let grandchild = RegionLabel::new(2, 3, 3);

        assert!(parent.contains(&child));
        assert!(parent.contains(&grandchild));
        assert!(!parent.contains(&parent));
        assert!(parent.is_ancestor_or_self_of(&parent));
        assert!(!child.contains(&parent));
    }

    #[test]
    fn test_parent_requires_adjacent_level() {
        let parent = RegionLabel::new(0, 1, 4);
        let child = RegionLabel::new(1, 2, 3);
        let grandchild = RegionLabel::new(2, 3, 3);

        assert!(parent.is_parent_of(&child));
        assert!(!parent.is_parent_of(&grandchild));
    }

    #[test]
    fn test_display_orders_level_ordinal_bound() {
        assert_eq!(RegionLabel::new(1, 2, 3).to_string(), "1,2,3");
    }
}
