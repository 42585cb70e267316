//! Schema file discovery and output directory preparation.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, Project, Result};

const THRIFT_SUFFIX: &str = ".thrift";

impl Project {
    /// Every `.thrift` file beneath the source root, sorted.
    pub fn schema_files(&self) -> Result<Vec<PathBuf>> {
        if !self.source_root.is_dir() {
            return Err(Box::new(Error::SourceRoot {
                path: self.source_root.clone(),
            }));
        }

        let mut files = Vec::new();
        collect_schema_files(&self.source_root, &mut files).map_err(|source| {
            Box::new(Error::Discover {
                path: self.source_root.clone(),
                source,
            })
        })?;
        files.sort();
        Ok(files)
    }

    /// Create the output directory if it does not exist yet.
    pub fn ensure_output_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.output_dir).map_err(|source| {
            Box::new(Error::OutputDir {
                path: self.output_dir.clone(),
                source,
            })
        })?;
        Ok(&self.output_dir)
    }
}

fn collect_schema_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_schema_files(&entry.path(), out)?;
        } else if file_type.is_file()
            && entry.file_name().to_string_lossy().ends_with(THRIFT_SUFFIX)
        {
            out.push(entry.path());
        }
    }
    Ok(())
}
