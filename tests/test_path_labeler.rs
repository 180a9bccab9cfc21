use relab::LabelingError;
use relab::catalog::course_catalog;
use relab::label::path::{DEFAULT_SEGMENT_WIDTH, required_segment_width};
use relab::label::{Label, Labeler, PathLabeler, RegionLabeler, Strategy};
use relab::model::{Element, Tree};

fn sample() -> Tree<()> {
    // root(a(c), b)
    let mut tree = Tree::new();
    let root = tree.add_root("root", ());
    let a = tree.add_new_child(root, "a", ()).unwrap();
    tree.add_new_child(a, "c", ()).unwrap();
    tree.add_new_child(root, "b", ()).unwrap();
    tree
}

fn label_strings<M>(tree: &Tree<M>) -> Vec<String> {
    tree.pre_order_iter()
        .map(|n| n.label().unwrap().to_string())
        .collect()
}

fn snapshot<M>(tree: &Tree<M>) -> Vec<Option<Label>> {
    tree.pre_order_iter().map(|n| n.label().cloned()).collect()
}

/// root -> a -> 8 children: the grandchildren overflow 3-bit segments.
fn wide_grandchildren() -> Tree<()> {
    let mut tree = Tree::new();
    let root = tree.add_root("root", ());
    let a = tree.add_new_child(root, "a", ()).unwrap();
    for i in 0..8 {
        tree.add_new_child(a, format!("c{i}"), ()).unwrap();
    }
    tree
}

#[test]
fn test_labels_of_small_tree() {
    let mut tree = sample();
    let labeled = PathLabeler::new().label_tree(&mut tree).unwrap();

    assert_eq!(labeled, 4);
    // pre-order: root, a, c, b
    assert_eq!(
        label_strings(&tree),
        ["1,001,1", "2,001001,2", "3,001001001,3", "2,001010,1"]
    );
}

#[test]
fn test_forest_roots_get_positions_and_seeds() {
    let mut tree = Tree::from_sources([
        Element::new("first").with_child(Element::new("x")),
        Element::new("second").with_child(Element::new("y")),
    ]);
    let mut labeler = PathLabeler::new();
    labeler.label_tree(&mut tree).unwrap();

    assert_eq!(label_strings(&tree), ["1,001,1", "2,001001,2", "1,010,2", "2,010001,3"]);
    assert_eq!(labeler.next_region_seed(), 3);
}

#[test]
fn test_second_child_shares_region_id() {
    let mut tree: Tree<()> = Tree::new();
    let root = tree.add_root("root", ());
    let children: Vec<_> = (0..4)
        .map(|i| tree.add_new_child(root, format!("c{i}"), ()).unwrap())
        .collect();
    PathLabeler::new().label_tree(&mut tree).unwrap();

    let ids: Vec<_> = children
        .iter()
        .map(|&c| tree[c].path_label().unwrap().region_id())
        .collect();
    assert_eq!(ids, [2, 1, 2, 2]);
}

#[test]
fn test_overflow_is_reported() {
    let mut tree: Tree<()> = Tree::new();
    let root = tree.add_root("root", ());
    for i in 0..8 {
        tree.add_new_child(root, format!("c{i}"), ()).unwrap();
    }

    let result = PathLabeler::new().label_tree(&mut tree);
    assert_eq!(
        result,
        Err(LabelingError::EncodingOverflow {
            index: 8,
            width: DEFAULT_SEGMENT_WIDTH
        })
    );

    let labeled = PathLabeler::new()
        .with_segment_width(4)
        .unwrap()
        .label_tree(&mut tree)
        .unwrap();
    assert_eq!(labeled, 9);
    assert_eq!(tree.label(tree.children(root)[7]).unwrap().to_string(), "2,00011000,2");
}

#[test]
fn test_segment_width_bounds() {
    assert_eq!(
        PathLabeler::new().with_segment_width(0).unwrap_err(),
        LabelingError::InvalidSegmentWidth(0)
    );
    assert_eq!(
        PathLabeler::new().with_segment_width(17).unwrap_err(),
        LabelingError::InvalidSegmentWidth(17)
    );
    let labeler = PathLabeler::new().with_segment_width(16).unwrap();
    assert_eq!(labeler.capacity(), 65535);
    assert_eq!(required_segment_width(65536), None);
}

#[test]
fn test_label_appended_child_leaves_others_untouched() {
    let mut tree = sample();
    let mut labeler = PathLabeler::new();
    labeler.label_tree(&mut tree).unwrap();
    let before = label_strings(&tree);

    let d = tree.add_new_child(0, "d", ()).unwrap();
    let e = tree.add_new_child(d, "e", ()).unwrap();
    assert_eq!(labeler.label_appended(&mut tree, d).unwrap(), 2);

    assert_eq!(tree.label(d).unwrap().to_string(), "2,001011,2");
    assert_eq!(tree.label(e).unwrap().to_string(), "3,001011001,3");
    let after = label_strings(&tree);
    assert_eq!(after[..before.len()], before[..]);
}

#[test]
fn test_label_appended_root_uses_next_seed() {
    let mut tree = sample();
    let mut labeler = PathLabeler::new();
    labeler.label_tree(&mut tree).unwrap();
    assert_eq!(labeler.next_region_seed(), 2);
    let before = snapshot(&tree);

    let z = tree.graft(None, Tree::from_source(Element::new("z"))).unwrap();
    labeler.label_appended(&mut tree, z).unwrap();

    assert_eq!(tree.label(z).unwrap().to_string(), "1,010,2");
    assert_eq!(labeler.next_region_seed(), 3);
    // the new root comes last in document order, everything before it is untouched
    let after = snapshot(&tree);
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[..before.len()], before[..]);
}

#[test]
fn test_failed_labeling_keeps_previous_labels() {
    let mut tree = wide_grandchildren();
    RegionLabeler::new().label_tree(&mut tree).unwrap();
    let before = snapshot(&tree);

    let mut labeler = PathLabeler::new();
    let result = labeler.label_tree(&mut tree);
    assert_eq!(
        result,
        Err(LabelingError::EncodingOverflow {
            index: 8,
            width: DEFAULT_SEGMENT_WIDTH
        })
    );

    // no mix of region and path labels
    assert_eq!(snapshot(&tree), before);
    assert!(tree.pre_order_iter().all(|n| n.region_label().is_some()));
    assert_eq!(labeler.next_region_seed(), 1);
}

#[test]
fn test_failed_labeling_keeps_region_seed() {
    let mut tree = Tree::from_sources([Element::new("first"), Element::new("second")]);
    let mut labeler = PathLabeler::new();
    labeler.label_tree(&mut tree).unwrap();
    assert_eq!(labeler.next_region_seed(), 3);

    // a single-root tree whose labeling overflows must not touch the seed
    let mut wide = wide_grandchildren();
    assert!(labeler.label_tree(&mut wide).is_err());
    assert!(wide.pre_order_iter().all(|n| n.label().is_none()));
    assert_eq!(labeler.next_region_seed(), 3);
}

#[test]
fn test_failed_append_keeps_labels_and_seed() {
    let mut tree: Tree<()> = Tree::new();
    tree.add_root("root", ());
    let mut labeler = PathLabeler::new();
    labeler.label_tree(&mut tree).unwrap();
    let before = snapshot(&tree);

    // new root with 8 children: its own path fits, its children do not
    let wide = Element::new("wide").with_children((0..8).map(|i| Element::new(format!("c{i}"))));
    let z = tree.graft(None, Tree::from_source(wide)).unwrap();
    assert_eq!(
        labeler.label_appended(&mut tree, z),
        Err(LabelingError::EncodingOverflow { index: 8, width: 3 })
    );

    assert_eq!(labeler.next_region_seed(), 2);
    assert!(tree.label(z).is_none());
    assert!(tree.children(z).iter().all(|&c| tree.label(c).is_none()));
    assert_eq!(snapshot(&tree)[..before.len()], before[..]);
}

#[test]
fn test_label_appended_errors() {
    let mut tree = sample();
    let mut labeler = PathLabeler::new();

    // parent not labeled yet
    let d = tree.add_new_child(0, "d", ()).unwrap();
    assert_eq!(labeler.label_appended(&mut tree, d), Err(LabelingError::MissingLabel(0)));

    let detached = tree.new_node("detached", ());
    assert!(matches!(
        labeler.label_appended(&mut tree, detached),
        Err(LabelingError::InvalidOperation { .. })
    ));
    assert_eq!(labeler.label_appended(&mut tree, 99), Err(LabelingError::UnknownNode(99)));
}

#[test]
fn test_labels_decide_structure_and_order() {
    let mut tree = Tree::from_source(course_catalog(3));
    PathLabeler::new()
        .with_segment_width(4)
        .unwrap()
        .label_tree(&mut tree)
        .unwrap();

    let nodes: Vec<_> = tree.pre_order_iter().map(|n| n.index()).collect();
    for (i, &x) in nodes.iter().enumerate() {
        for (j, &y) in nodes.iter().enumerate() {
            let lx = tree[x].path_label().unwrap();
            let ly = tree[y].path_label().unwrap();
            assert_eq!(lx.is_ancestor_of(ly), tree.is_ancestor_of(x, y), "ancestor {x} {y}");
            assert_eq!(lx.precedes(ly), i < j, "order {x} {y}");
        }
    }
}

#[test]
fn test_levels_follow_depth() {
    let mut tree = sample();
    PathLabeler::new().label_tree(&mut tree).unwrap();
    for (node, depth) in tree.breadth_first_iter() {
        let label = node.path_label().unwrap();
        assert_eq!(label.level(), depth + 1);
        assert_eq!(label.path().depth(), label.level());
    }
}

#[test]
fn test_labeler_reports_strategy() {
    assert_eq!(PathLabeler::new().strategy(), Strategy::Dynamic);
}

#[test]
fn test_quick_api_labels_dynamically() {
    let mut tree = sample();
    assert_eq!(relab::label_dynamic(&mut tree).unwrap(), 4);
    assert_eq!(tree.label(3).unwrap().to_string(), "2,001010,1");
}

#[test]
fn test_label_memory_counts_path_bits() {
    let mut tree = sample();
    assert_eq!(tree.label_memory(), 0);

    RegionLabeler::new().label_tree(&mut tree).unwrap();
    let region = tree.label_memory();
    PathLabeler::new().label_tree(&mut tree).unwrap();
    let path = tree.label_memory();

    // paths 001, 001001, 001001001, 001010
    assert_eq!(path - region, 3 + 6 + 9 + 6);
    assert_eq!(region, 4 * std::mem::size_of::<Label>());
}
