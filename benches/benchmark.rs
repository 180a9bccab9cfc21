use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use relab::catalog::{course_catalog, new_course};
use relab::insertion::insert_and_relabel;
use relab::label::{Labeler, PathLabeler, RegionLabeler};
use relab::model::{MarkupTree, Tree};

const CATALOG_SIZES: &[(&str, usize)] = &[("100", 100), ("1k", 1_000), ("10k", 10_000)];

/// Segment width fitting the widest catalog plus one inserted course.
const SEGMENT_WIDTH: u8 = 14;

fn catalog(num_courses: usize) -> MarkupTree {
    Tree::from_source(course_catalog(num_courses))
}

fn path_labeler() -> PathLabeler {
    PathLabeler::new().with_segment_width(SEGMENT_WIDTH).unwrap()
}

fn labeling(c: &mut Criterion) {
    for (name, size) in CATALOG_SIZES {
        let mut tree = catalog(*size);
        c.bench_function(&format!("static/label/{name}"), |b| {
            b.iter(|| RegionLabeler::new().label_tree(&mut tree).unwrap());
        });
        c.bench_function(&format!("dynamic/label/{name}"), |b| {
            b.iter(|| path_labeler().label_tree(&mut tree).unwrap());
        });
    }
}

fn insert_new_course<L: Labeler>(mut tree: MarkupTree, mut labeler: L) {
    let root = tree.root();
    insert_and_relabel(&mut tree, &mut labeler, root, Tree::from_source(new_course())).unwrap();
}

fn insertion(c: &mut Criterion) {
    for (name, size) in CATALOG_SIZES {
        c.bench_function(&format!("static/insert/{name}"), |b| {
            b.iter_batched(
                || {
                    let mut tree = catalog(*size);
                    RegionLabeler::new().label_tree(&mut tree).unwrap();
                    tree
                },
                |tree| insert_new_course(tree, RegionLabeler::new()),
                BatchSize::LargeInput,
            );
        });
        c.bench_function(&format!("dynamic/insert/{name}"), |b| {
            b.iter_batched(
                || {
                    let mut tree = catalog(*size);
                    let mut labeler = path_labeler();
                    labeler.label_tree(&mut tree).unwrap();
                    (tree, labeler)
                },
                |(tree, labeler)| insert_new_course(tree, labeler),
                BatchSize::LargeInput,
            );
        });
    }
}

criterion_group!(regression, labeling);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = insertion
}
criterion_main!(regression, reporting);
