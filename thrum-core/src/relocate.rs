//! Moving compiler output out of the working directory.
//!
//! The Thrift compiler writes everything for one `--gen` target beneath a
//! single `gen-<lang>` directory inside its `-o` directory. Relocation strips
//! that directory and copies the tree below it into the destination,
//! overwriting files that are already there so an existing (possibly
//! version-controlled) source tree can be targeted directly.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, Result, WorkingDirectory};

/// Name prefix of the directory the compiler generates under its output dir.
pub const GENERATED_DIR_PREFIX: &str = "gen-";

/// Summary of a completed relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Name of the generated root that was stripped, e.g. `gen-java`.
    pub generated_root: String,
    /// Files written, relative to the destination, in sorted order.
    pub files: Vec<PathBuf>,
}

/// Find the single `gen-*` directory directly beneath `working_dir`.
///
/// Zero or several matches mean the compiler's output layout is not what we
/// expect; neither case is resolved heuristically.
pub fn locate_generated_root(working_dir: &Path) -> Result<PathBuf> {
    let read_error = |source| Error::ReadWorkingDirectory {
        path: working_dir.to_path_buf(),
        source,
    };

    let mut matches = Vec::new();
    for entry in fs::read_dir(working_dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(GENERATED_DIR_PREFIX) && entry.path().is_dir() {
            matches.push(entry.path());
        }
    }

    match matches.len() {
        0 => Err(Error::GeneratedRootMissing {
            prefix: GENERATED_DIR_PREFIX,
            working_dir: working_dir.to_path_buf(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            let mut names: Vec<String> = matches
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            names.sort();
            Err(Error::GeneratedRootAmbiguous {
                prefix: GENERATED_DIR_PREFIX,
                working_dir: working_dir.to_path_buf(),
                matches: names,
            })
        }
    }
}

/// Copy the generated tree into `destination` and delete the working
/// directory.
///
/// On failure nothing is rolled back: files already copied stay in the
/// destination and the working directory is left in place.
pub fn move_generated_files(
    working_dir: &WorkingDirectory,
    destination: &Path,
) -> Result<Relocation> {
    let gen_root = locate_generated_root(working_dir.path())?;
    let generated_root = gen_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let relocation_error = |source| Error::Relocation {
        destination: destination.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    collect_files(&gen_root, Path::new(""), &mut files).map_err(relocation_error)?;
    files.sort();

    for relative in &files {
        let target = destination.join(relative);
        copy_file(&gen_root.join(relative), &target).map_err(relocation_error)?;
        tracing::debug!(file = %target.display(), "relocated generated file");
    }

    working_dir.remove().map_err(relocation_error)?;

    Ok(Relocation {
        generated_root,
        files,
    })
}

/// Collect every non-directory entry beneath `root`, relative to it.
fn collect_files(root: &Path, relative: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let path = relative.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}
