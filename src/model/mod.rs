//! Data model for labeled document trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. A tree may hold several top-level
//! roots (a forest); each node owns its ordered children exclusively.
//!
//! | Type | Metadata | Use case |
//! |------|----------|----------|
//! | [MarkupTree] | [MarkupData] (attributes, text) | Documents written back as markup |
//! | `Tree<()>` | none | Pure structure, e.g. tests and benchmarks |
//!
//! # Building trees
//! Trees are typically materialized from a [TreeSource], which decouples
//! the model from where the hierarchy comes from. [Element] is the
//! built-in in-memory markup source.
//!
//! # Labels
//! Each node carries an optional [Label](crate::label::Label), written only
//! by the labelers in [crate::label].

pub mod node;
pub mod source;
pub mod tree;

pub use node::Node;
pub use source::{Element, MarkupData, TreeSource};
pub use tree::{MarkupTree, NodeIndex, Tree};
