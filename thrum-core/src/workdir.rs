//! Private scratch directories used as the compiler's output target.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{Error, Result};

/// Name prefix of every working directory.
pub const WORK_DIR_PREFIX: &str = "thrift-work-dir_";

/// The directory under which working directories are allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRoot(PathBuf);

impl WorkRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Allocate a fresh, uniquely named working directory.
    pub fn allocate(&self) -> Result<WorkingDirectory> {
        let name = format!("{}{}", WORK_DIR_PREFIX, Uuid::new_v4());
        WorkingDirectory::create(self.0.join(name))
    }
}

impl Default for WorkRoot {
    /// The platform temporary directory.
    fn default() -> Self {
        Self(std::env::temp_dir())
    }
}

/// A working directory owned by exactly one invocation.
///
/// The directory is not removed on drop: it is only deleted once generated
/// files have been relocated, and is otherwise left for inspection.
#[derive(Debug)]
pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    /// Create the directory at `path`, which must not already exist.
    pub fn create(path: PathBuf) -> Result<Self> {
        match fs::create_dir(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "created working directory");
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(Error::WorkingDirectoryExists { path })
            }
            Err(source) => Err(Error::WorkingDirectory { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Remove the directory and everything beneath it.
    pub(crate) fn remove(&self) -> io::Result<()> {
        fs::remove_dir_all(&self.path)
    }
}
