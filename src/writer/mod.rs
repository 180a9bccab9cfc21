//! Write-back of labeled trees as markup.
//!
//! [MarkupWriter] renders every node as an element carrying its label in an
//! attribute. The functions in this module are shortcuts using the default
//! writer configuration.

pub mod escape;
pub mod markup;

pub use markup::{MarkupContent, MarkupWriter};

use crate::model::Tree;
use std::fs::File;
use std::io;
use std::path::Path;

/// Returns the markup of `tree` with the default [MarkupWriter].
pub fn to_markup<M: MarkupContent>(tree: &Tree<M>) -> String {
    MarkupWriter::new().to_markup(tree)
}

/// Writes the markup of `tree` to the file at `path` (created or truncated).
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_markup_file<M: MarkupContent, P: AsRef<Path>>(
    path: P,
    tree: &Tree<M>,
    writer: &MarkupWriter,
) -> io::Result<()> {
    let file = File::create(path)?;
    writer.write(tree, file)
}
