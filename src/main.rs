//! relab: label a generated course catalog and insert a new document.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use relab::catalog::{CATALOG_ELEMENT, course_catalog, new_course};
use relab::insertion::{RelabelScope, insert_and_relabel};
use relab::label::path::required_segment_width;
use relab::label::{Label, Labeler, PathLabeler, RegionLabeler};
use relab::model::{Element, MarkupTree, NodeIndex, Tree};
use relab::samples::{new_dataset, new_entry};
use relab::writer::{MarkupWriter, write_markup_file};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Region labels, whole tree relabeled on insertion
    Static,
    /// Path labels, only the inserted document labeled
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DocumentArg {
    /// The new course
    Course,
    /// The astronomy dataset record
    Dataset,
    /// The protein entry
    Entry,
}

impl DocumentArg {
    fn element(self) -> Element {
        match self {
            DocumentArg::Course => new_course(),
            DocumentArg::Dataset => new_dataset(),
            DocumentArg::Entry => new_entry(),
        }
    }
}

#[derive(Parser)]
#[command(name = "relab")]
#[command(about = "Label a course catalog and insert a new document", long_about = None)]
struct Args {
    /// Labeling strategy
    #[arg(long, short = 's', value_enum, default_value_t = StrategyArg::Dynamic)]
    strategy: StrategyArg,

    /// Number of generated courses in the catalog
    #[arg(long, short = 'n', default_value_t = 1000)]
    courses: usize,

    /// Document inserted after the initial labeling
    #[arg(long, short = 'i', value_enum, default_value_t = DocumentArg::Course)]
    insert: DocumentArg,

    /// Label the courses as top-level roots without the catalog element;
    /// the inserted document becomes one more root
    #[arg(long, short = 'f')]
    forest: bool,

    /// Write the labeled catalog as markup to this file
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Bits per path segment (dynamic strategy); derived from the catalog if omitted
    #[arg(long, short = 'w', value_name = "W")]
    segment_width: Option<u8>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let start = Instant::now();
    let catalog = course_catalog(args.courses);
    let mut tree = if args.forest {
        Tree::from_sources(catalog.into_children())
    } else {
        Tree::from_source(catalog)
    };
    info!(
        courses = args.courses,
        nodes = tree.num_nodes(),
        forest = args.forest,
        elapsed = ?start.elapsed(),
        "catalog built"
    );

    let parent = match (args.forest, tree.root()) {
        (true, _) => None,
        (false, Some(root)) => Some(root),
        (false, None) => bail!("catalog has no {CATALOG_ELEMENT} element"),
    };
    let document = Tree::from_source(args.insert.element());

    match args.strategy {
        StrategyArg::Static => run(&mut tree, RegionLabeler::new(), parent, document)?,
        StrategyArg::Dynamic => {
            let width = match args.segment_width {
                Some(width) => width,
                None => {
                    // one more sibling below `parent` after the insertion
                    let fanout = (tree.max_fanout() + 1).max(document.max_fanout());
                    match required_segment_width(fanout) {
                        Some(width) => width,
                        None => bail!("fan-out of {fanout} is too wide for path labels"),
                    }
                }
            };
            run(&mut tree, PathLabeler::new().with_segment_width(width)?, parent, document)?
        }
    }

    if let Some(path) = args.output {
        let mut writer = MarkupWriter::new();
        if args.forest {
            writer = writer.with_document_element(CATALOG_ELEMENT);
        }
        write_markup_file(&path, &tree, &writer)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "labeled catalog written");
    }

    Ok(())
}

/// Labels the catalog, then inserts `document` below `parent`
/// (or as a new top-level root).
fn run<L: Labeler>(
    tree: &mut MarkupTree,
    mut labeler: L,
    parent: Option<NodeIndex>,
    document: MarkupTree,
) -> Result<()> {
    let strategy = labeler.strategy();

    let start = Instant::now();
    let labeled = labeler.label_tree(tree)?;
    info!(
        %strategy,
        nodes = labeled,
        elapsed = ?start.elapsed(),
        label_kb = kib(tree.label_memory()),
        "initial labeling"
    );

    let start = Instant::now();
    let outcome = insert_and_relabel(tree, &mut labeler, parent, document)?;
    let elapsed = start.elapsed();

    // labels written by the insertion, not the growth of the total
    let written: usize = match outcome.scope {
        RelabelScope::WholeTree => tree.label_memory(),
        RelabelScope::Subtree => tree
            .pre_order_from(outcome.node)
            .filter_map(|node| node.label())
            .map(Label::memory_size)
            .sum(),
    };
    info!(
        %strategy,
        scope = ?outcome.scope,
        relabeled = outcome.relabeled,
        elapsed = ?elapsed,
        written_kb = kib(written),
        label_kb = kib(tree.label_memory()),
        "document inserted"
    );
    if let Some(label) = tree.label(outcome.node) {
        info!(name = tree[outcome.node].name(), %label, "label of inserted document");
    }

    Ok(())
}

fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}
