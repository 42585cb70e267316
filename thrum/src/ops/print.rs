//! Print operation - show thrift command lines without running them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use thrum_manifest::Project;

use super::build_invocation;
use crate::reports::PrintReport;

/// Execute the print operation.
///
/// Builds a throwaway invocation to render its command lines, then removes
/// the working directory it allocated. An output directory that did not exist
/// beforehand is removed again, so nothing is left behind on disk.
pub fn print(project: &Project, schema_files: &[PathBuf]) -> Result<PrintReport> {
    if schema_files.is_empty() {
        return Ok(PrintReport {
            command_lines: Vec::new(),
        });
    }

    let created = first_missing_ancestor(&project.output_dir);
    project.ensure_output_dir()?;

    let command_lines = render_command_lines(project, schema_files);

    if let Some(dir) = created {
        fs::remove_dir_all(&dir)
            .wrap_err_with(|| format!("Failed to remove '{}'", dir.display()))?;
    }

    Ok(PrintReport {
        command_lines: command_lines?,
    })
}

fn render_command_lines(project: &Project, schema_files: &[PathBuf]) -> Result<Vec<String>> {
    let invocation = build_invocation(project, schema_files)?;
    let command_lines = invocation
        .command_lines()
        .lines()
        .map(str::to_string)
        .collect();
    invocation
        .discard()
        .wrap_err("Failed to remove working directory")?;
    Ok(command_lines)
}

/// The outermost directory `create_dir_all(dir)` would have to create.
fn first_missing_ancestor(dir: &Path) -> Option<PathBuf> {
    let mut missing = None;
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.exists() {
            break;
        }
        missing = Some(ancestor.to_path_buf());
    }
    missing
}
