//! Dynamic path labeling.
//!
//! Every node gets `(level, path, region_id)`, assigned breadth-first:
//! * `level` - BFS depth, roots at level 1
//! * `path` - concatenated fixed-width binary sibling positions from the
//!   top-level root down to the node, e.g. `001 010` for the second child of
//!   the first root. Ancestry is a prefix test and lexicographic order is
//!   document order.
//! * `region_id` - coarse grouping counter, seeded per root (see
//!   [SHARED_REGION_CHILD] for how it propagates)
//!
//! Appending a node at the end of a sibling list changes no existing sibling
//! position, so existing labels stay valid and only the new subtree needs
//! labels ([`PathLabeler::label_appended`]).

use crate::error::LabelingError;
use crate::insertion::{InsertOutcome, RelabelScope};
use crate::label::{Label, Labeler, Strategy};
use crate::model::{NodeIndex, Tree};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace};

/// Default number of bits per sibling position.
pub const DEFAULT_SEGMENT_WIDTH: u8 = 3;

/// Largest supported number of bits per sibling position.
pub const MAX_SEGMENT_WIDTH: u8 = 16;

/// 1-based position of the one child that keeps its parent's region id.
///
/// All other children (first, third, ...) get the parent's id plus one.
/// Region ids group nodes; they do not bound containment.
pub const SHARED_REGION_CHILD: usize = 2;

// =#========================================================================#=
// SIBLING PATH
// =#========================================================================$=
/// Dewey-style path of fixed-width binary sibling positions.
///
/// Ordered lexicographically, which equals document order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiblingPath {
    bits: String,
    width: u8,
}

impl SiblingPath {
    /// Creates the path of a top-level root at 1-based `position`.
    ///
    /// # Errors
    /// * [LabelingError::InvalidSegmentWidth] unless `1 <= width <= 16`
    /// * [LabelingError::EncodingOverflow] if `position` does not fit into `width` bits
    pub fn root(position: usize, width: u8) -> Result<Self, LabelingError> {
        Ok(SiblingPath {
            bits: encode_segment(position, width)?,
            width,
        })
    }

    /// Returns the path of this node's child at 1-based `position`.
    ///
    /// # Errors
    /// [LabelingError::EncodingOverflow] if `position` does not fit into the segment width.
    pub fn child(&self, position: usize) -> Result<Self, LabelingError> {
        let segment = encode_segment(position, self.width)?;
        let mut bits = String::with_capacity(self.bits.len() + segment.len());
        bits.push_str(&self.bits);
        bits.push_str(&segment);
        Ok(SiblingPath {
            bits,
            width: self.width,
        })
    }

    /// Returns the path of the parent, or `None` for a top-level root.
    pub fn parent(&self) -> Option<Self> {
        if self.depth() <= 1 {
            return None;
        }
        let end = self.bits.len() - usize::from(self.width);
        Some(SiblingPath {
            bits: self.bits[..end].to_string(),
            width: self.width,
        })
    }

    /// Returns the bit string.
    pub fn as_str(&self) -> &str {
        &self.bits
    }

    /// Returns the number of bits per segment.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of segments, i.e. the level of the node.
    pub fn depth(&self) -> usize {
        self.bits.len() / usize::from(self.width)
    }

    /// Returns the decoded 1-based sibling positions, root first.
    ///
    /// ```
    /// use relab::label::SiblingPath;
    ///
    /// let path = SiblingPath::root(1, 3).unwrap().child(2).unwrap().child(7).unwrap();
    /// assert_eq!(path.as_str(), "001010111");
    /// assert_eq!(path.segments().collect::<Vec<_>>(), vec![1, 2, 7]);
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .as_bytes()
            .chunks(usize::from(self.width))
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0, |acc, &bit| acc * 2 + usize::from(bit == b'1'))
            })
    }

    /// Returns `true` if this path is a prefix of `other`,
    /// i.e. this node is an ancestor of `other` or the same node.
    pub fn is_prefix_of(&self, other: &SiblingPath) -> bool {
        self.width == other.width && other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for SiblingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

/// Encodes a 1-based sibling position as binary, left-padded with `0` to `width` digits.
///
/// # Errors
/// * [LabelingError::InvalidSegmentWidth] unless `1 <= width <= 16`
/// * [LabelingError::EncodingOverflow] if `position` is 0 or needs more than `width` bits
pub fn encode_segment(position: usize, width: u8) -> Result<String, LabelingError> {
    if position == 0 || position > segment_capacity(width)? {
        return Err(LabelingError::EncodingOverflow {
            index: position,
            width,
        });
    }
    Ok(format!("{:0w$b}", position, w = usize::from(width)))
}

/// Returns the largest sibling position representable in `width` bits.
///
/// # Errors
/// [LabelingError::InvalidSegmentWidth] unless `1 <= width <= 16`.
///
/// ```
/// use relab::label::path::segment_capacity;
///
/// assert_eq!(segment_capacity(3), Ok(7));
/// assert!(segment_capacity(0).is_err());
/// ```
pub fn segment_capacity(width: u8) -> Result<usize, LabelingError> {
    check_segment_width(width)?;
    Ok(capacity_of(width))
}

/// Returns the smallest segment width that can encode positions up to `max_position`.
///
/// `None` if even [MAX_SEGMENT_WIDTH] bits are not enough.
///
/// ```
/// use relab::label::path::required_segment_width;
///
/// assert_eq!(required_segment_width(7), Some(3));
/// assert_eq!(required_segment_width(8), Some(4));
/// assert_eq!(required_segment_width(0), Some(1));
/// ```
pub fn required_segment_width(max_position: usize) -> Option<u8> {
    (1..=MAX_SEGMENT_WIDTH).find(|&w| capacity_of(w) >= max_position)
}

fn check_segment_width(width: u8) -> Result<(), LabelingError> {
    if width == 0 || width > MAX_SEGMENT_WIDTH {
        return Err(LabelingError::InvalidSegmentWidth(width));
    }
    Ok(())
}

// Only for widths that passed `check_segment_width`
fn capacity_of(width: u8) -> usize {
    (1usize << width) - 1
}

// =#========================================================================#=
// PATH LABEL
// =#========================================================================$=
/// Path label of the dynamic strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathLabel {
    level: usize,
    path: SiblingPath,
    region_id: usize,
}

impl PathLabel {
    /// Creates a new path label.
    pub fn new(level: usize, path: SiblingPath, region_id: usize) -> Self {
        PathLabel {
            level,
            path,
            region_id,
        }
    }

    /// BFS depth of the node, roots at level 1.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Sibling path from the top-level root to the node.
    pub fn path(&self) -> &SiblingPath {
        &self.path
    }

    /// Region id of the node.
    pub fn region_id(&self) -> usize {
        self.region_id
    }

    /// Returns `true` if this node is an ancestor of `other` or the same node.
    pub fn is_ancestor_or_self_of(&self, other: &PathLabel) -> bool {
        self.path.is_prefix_of(&other.path)
    }

    /// Returns `true` if this node is a proper ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &PathLabel) -> bool {
        self.path.depth() < other.path.depth() && self.is_ancestor_or_self_of(other)
    }

    /// Returns `true` if this node comes before `other` in document order.
    pub fn precedes(&self, other: &PathLabel) -> bool {
        self.path < other.path
    }
}

impl fmt::Display for PathLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.level, self.path, self.region_id)
    }
}

// =#========================================================================#=
// PATH LABELER
// =#========================================================================$=
/// Labeler of the dynamic strategy.
///
/// Keeps the next unused region seed between calls, so nodes appended as new
/// top-level roots continue the seed sequence of the last full labeling.
///
/// # Configuration
/// ```
/// use relab::label::PathLabeler;
///
/// let labeler = PathLabeler::new().with_segment_width(4).unwrap();
/// assert_eq!(labeler.capacity(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct PathLabeler {
    segment_width: u8,
    next_region_seed: usize,
}

impl Default for PathLabeler {
    fn default() -> Self {
        PathLabeler::new()
    }
}

impl PathLabeler {
    /// Creates a new path labeler with 3-bit segments.
    pub fn new() -> Self {
        PathLabeler {
            segment_width: DEFAULT_SEGMENT_WIDTH,
            next_region_seed: 1,
        }
    }

    /// Sets the number of bits per sibling position.
    ///
    /// # Errors
    /// [LabelingError::InvalidSegmentWidth] unless `1 <= width <= 16`.
    pub fn with_segment_width(mut self, width: u8) -> Result<Self, LabelingError> {
        check_segment_width(width)?;
        self.segment_width = width;
        Ok(self)
    }

    /// Returns the number of bits per sibling position.
    pub fn segment_width(&self) -> u8 {
        self.segment_width
    }

    /// Returns the maximal number of siblings (and roots) that can be labeled.
    pub fn capacity(&self) -> usize {
        capacity_of(self.segment_width)
    }

    /// Returns the region id the next appended top-level root will get.
    pub fn next_region_seed(&self) -> usize {
        self.next_region_seed
    }

    /// Labels `node` and its subtree after it was appended to an already
    /// labeled tree, without touching any other label.
    ///
    /// * A top-level root gets the path of its position among the roots,
    ///   level 1 and the next unused region seed.
    /// * Any other node extends its parent's label.
    ///
    /// On error no label is written and the region seed is not advanced.
    ///
    /// # Returns
    /// The number of labeled nodes.
    ///
    /// # Errors
    /// * [LabelingError::UnknownNode] if `node` is not in the tree
    /// * [LabelingError::InvalidOperation] if `node` is detached
    /// * [LabelingError::MissingLabel] if the parent has no path label
    /// * [LabelingError::EncodingOverflow] if a position exceeds the segment width
    pub fn label_appended<M>(&mut self, tree: &mut Tree<M>, node: NodeIndex) -> Result<usize, LabelingError> {
        tree.check_index(node)?;
        let position = tree.sibling_position(node).ok_or_else(|| {
            LabelingError::invalid_operation(format!("node {node} is detached and cannot be labeled"))
        })?;

        let (label, is_root) = match tree.parent(node) {
            Some(parent) => {
                let parent_label = tree
                    .node(parent)
                    .path_label()
                    .ok_or(LabelingError::MissingLabel(parent))?;
                (child_label(parent_label, position)?, false)
            }
            None => {
                let path = SiblingPath::root(position, self.segment_width)?;
                (PathLabel::new(1, path, self.next_region_seed), true)
            }
        };

        trace!(node, %label, "labeling appended subtree");
        let labels = compute_breadth_first(tree, VecDeque::from([(node, label)]))?;
        if is_root {
            self.next_region_seed += 1;
        }
        let labeled = stamp(tree, labels);
        debug!(node, nodes = labeled, "appended subtree labeled");
        Ok(labeled)
    }
}

impl Labeler for PathLabeler {
    fn strategy(&self) -> Strategy {
        Strategy::Dynamic
    }

    /// Labels the whole forest breadth-first, seeding one queue entry per root.
    ///
    /// On error the tree keeps its previous labels and the region seed is unchanged.
    fn label_tree<M>(&mut self, tree: &mut Tree<M>) -> Result<usize, LabelingError> {
        let mut seed = 1;
        let mut queue = VecDeque::with_capacity(tree.num_roots());
        for (i, &root) in tree.roots().iter().enumerate() {
            let path = SiblingPath::root(i + 1, self.segment_width)?;
            queue.push_back((root, PathLabel::new(1, path, seed)));
            seed += 1;
        }

        let labels = compute_breadth_first(tree, queue)?;
        self.next_region_seed = seed;
        let labeled = stamp(tree, labels);
        debug!(nodes = labeled, width = self.segment_width, "path labeling finished");
        Ok(labeled)
    }

    fn relabel_after_insert<M>(
        &mut self,
        tree: &mut Tree<M>,
        inserted: NodeIndex,
    ) -> Result<InsertOutcome, LabelingError> {
        let relabeled = self.label_appended(tree, inserted)?;
        Ok(InsertOutcome {
            node: inserted,
            scope: RelabelScope::Subtree,
            relabeled,
        })
    }
}

/// Computes the label of the child at 1-based `position` below `parent`.
fn child_label(parent: &PathLabel, position: usize) -> Result<PathLabel, LabelingError> {
    let region_id = if position == SHARED_REGION_CHILD {
        parent.region_id
    } else {
        parent.region_id + 1
    };
    Ok(PathLabel::new(parent.level + 1, parent.path.child(position)?, region_id))
}

/// Drains `queue`, computing the label of each node and enqueueing its children.
///
/// Nothing is written to the tree, so an overflow leaves it as it was.
fn compute_breadth_first<M>(
    tree: &Tree<M>,
    mut queue: VecDeque<(NodeIndex, PathLabel)>,
) -> Result<Vec<(NodeIndex, PathLabel)>, LabelingError> {
    let mut labels = Vec::new();
    while let Some((index, label)) = queue.pop_front() {
        for (i, &child) in tree.children(index).iter().enumerate() {
            queue.push_back((child, child_label(&label, i + 1)?));
        }
        labels.push((index, label));
    }
    Ok(labels)
}

/// Writes computed labels into the tree and returns how many were written.
fn stamp<M>(tree: &mut Tree<M>, labels: Vec<(NodeIndex, PathLabel)>) -> usize {
    let labeled = labels.len();
    for (index, label) in labels {
        tree.set_label(index, Label::Path(label));
    }
    labeled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment_pads_to_width() {
        assert_eq!(encode_segment(1, 3).unwrap(), "001");
        assert_eq!(encode_segment(2, 3).unwrap(), "010");
        assert_eq!(encode_segment(7, 3).unwrap(), "111");
        assert_eq!(encode_segment(8, 4).unwrap(), "1000");
    }

    #[test]
    fn test_encode_segment_rejects_overflow() {
        assert_eq!(
            encode_segment(8, 3),
            Err(LabelingError::EncodingOverflow { index: 8, width: 3 })
        );
        assert_eq!(
            encode_segment(0, 3),
            Err(LabelingError::EncodingOverflow { index: 0, width: 3 })
        );
    }

    #[test]
    fn test_out_of_range_width_is_rejected() {
        assert_eq!(segment_capacity(0), Err(LabelingError::InvalidSegmentWidth(0)));
        assert_eq!(segment_capacity(64), Err(LabelingError::InvalidSegmentWidth(64)));
        assert_eq!(segment_capacity(MAX_SEGMENT_WIDTH), Ok(65535));
        assert_eq!(encode_segment(1, 0), Err(LabelingError::InvalidSegmentWidth(0)));
        assert_eq!(encode_segment(1, 64), Err(LabelingError::InvalidSegmentWidth(64)));
        assert_eq!(SiblingPath::root(1, 0), Err(LabelingError::InvalidSegmentWidth(0)));
        assert_eq!(SiblingPath::root(1, 200), Err(LabelingError::InvalidSegmentWidth(200)));
    }

    #[test]
    fn test_parent_path_drops_last_segment() {
        let path = SiblingPath::root(1, 3).unwrap().child(2).unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.as_str(), "001");
        assert!(parent.parent().is_none());
    }

    #[test]
    fn test_child_label_region_quirk() {
        let parent = PathLabel::new(1, SiblingPath::root(1, 3).unwrap(), 5);
        let ids: Vec<_> = (1..=4)
            .map(|p| child_label(&parent, p).unwrap().region_id())
            .collect();
        assert_eq!(ids, vec![6, 5, 6, 6]);
    }
}
