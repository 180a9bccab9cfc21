//! Name-path queries over a tree.
//!
//! A pattern such as `catalog/course/title` is split on `/` and matched
//! level by level against node names, starting at the queried node; `*`
//! matches any name. Matching walks the tree and does not consult labels.
//!
//! ```
//! use relab::model::{Element, Tree};
//! use relab::query::query_nodes;
//!
//! let catalog = Element::new("root")
//!     .with_child(Element::new("course").with_child(Element::new("title")))
//!     .with_child(Element::new("course").with_child(Element::new("credit")));
//! let tree = Tree::from_source(catalog);
//! let root = tree.root().unwrap();
//!
//! assert_eq!(query_nodes(&tree, root, "root/course").len(), 2);
//! assert_eq!(query_nodes(&tree, root, "root/*/title").len(), 1);
//! ```

use crate::model::{NodeIndex, Tree};

/// Segment matching any node name.
pub const WILDCARD: &str = "*";

/// Returns all nodes whose name path from `start` matches `pattern`, in document order.
///
/// The first segment is matched against `start` itself; a match has depth
/// (relative to `start`) equal to the number of segments minus one.
/// One leading `/` is ignored. An empty pattern or an unknown `start`
/// matches nothing.
pub fn query_nodes<M>(tree: &Tree<M>, start: NodeIndex, pattern: &str) -> Vec<NodeIndex> {
    let segments = split_pattern(pattern);
    let mut result = Vec::new();
    if segments.is_empty() || !tree.contains(start) {
        return result;
    }

    // (node, index of segment to match); children pushed reversed for document order
    let mut stack = vec![(start, 0)];
    while let Some((index, level)) = stack.pop() {
        let node = tree.node(index);
        if !matches_segment(segments[level], node.name()) {
            continue;
        }
        if level + 1 == segments.len() {
            result.push(index);
        } else {
            stack.extend(node.children().iter().rev().map(|&c| (c, level + 1)));
        }
    }

    result
}

/// Applies [query_nodes] to every top-level root in order.
pub fn query_forest<M>(tree: &Tree<M>, pattern: &str) -> Vec<NodeIndex> {
    tree.roots()
        .iter()
        .flat_map(|&root| query_nodes(tree, root, pattern))
        .collect()
}

fn split_pattern(pattern: &str) -> Vec<&str> {
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    if pattern.is_empty() {
        return Vec::new();
    }
    pattern.split('/').collect()
}

fn matches_segment(segment: &str, name: &str) -> bool {
    segment == WILDCARD || segment == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pattern_ignores_one_leading_slash() {
        assert_eq!(split_pattern("/a/b"), vec!["a", "b"]);
        assert_eq!(split_pattern("a/b"), vec!["a", "b"]);
        assert!(split_pattern("").is_empty());
        assert!(split_pattern("/").is_empty());
    }
}
