//! Error type for tree construction and labeling.
//!
//! This module provides [LabelingError], returned by every fallible
//! operation of the tree model, the labelers and the insertion protocol.

use crate::model::NodeIndex;

// =#========================================================================#=
// LABELING ERROR
// =#========================================================================$=
/// Errors that can occur while building or labeling a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelingError {
    /// A structural change was rejected, e.g. attaching a node that already
    /// has a parent, which could create a cycle or a shared node.
    #[error("Invalid operation - {reason}")]
    InvalidOperation {
        /// What was attempted and why it was rejected
        reason: String,
    },

    /// A node index does not refer to a node of the tree.
    #[error("Unknown node index {0}")]
    UnknownNode(NodeIndex),

    /// A sibling position cannot be represented in the fixed-width path segment.
    #[error("Sibling position {index} does not fit into a {width}-bit path segment")]
    EncodingOverflow {
        /// The 1-based sibling position that was to be encoded
        index: usize,
        /// Segment width in bits
        width: u8,
    },

    /// Incremental labeling below a node that carries no path label.
    #[error("Node {0} has no path label to extend")]
    MissingLabel(NodeIndex),

    /// Path segment width outside the supported range.
    #[error("Invalid path segment width {0} - must be between 1 and 16")]
    InvalidSegmentWidth(u8),
}

impl LabelingError {
    /// Convenience constructor for [LabelingError::InvalidOperation].
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        LabelingError::InvalidOperation {
            reason: reason.into(),
        }
    }
}
