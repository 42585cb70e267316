//! Core operations.
//!
//! This module contains the business logic for thrum commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod compile;
pub mod print;

use std::path::PathBuf;

pub use check::check;
pub use compile::compile;
use eyre::Result;
pub use print::print;
use thrum_core::{Builder, Invocation};
use thrum_manifest::Project;

/// Assemble an invocation for the project's schema files.
///
/// The output directory must already exist.
pub(crate) fn build_invocation(
    project: &Project,
    schema_files: &[PathBuf],
) -> Result<Invocation> {
    let mut builder = Builder::new(&project.executable, &project.output_dir)?;
    builder.generator(&project.generator)?;
    if let Some(root) = &project.work_root {
        builder.work_root(root);
    }
    builder.add_import_paths(&project.import_dirs)?;
    builder.add_schema_files(schema_files)?;

    Ok(builder.build()?)
}
