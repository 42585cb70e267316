use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for thrum-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling or running a Thrift invocation.
///
/// A compiler that exits non-zero is not an error; see
/// [`CompileOutcome`](crate::CompileOutcome).
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid {what} '{}': {reason}", .path.display())]
    #[diagnostic(code(thrum::invalid_argument))]
    InvalidArgument {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("{what} must not be empty")]
    #[diagnostic(code(thrum::invalid_argument))]
    EmptyArgument { what: &'static str },

    #[error("schema file '{}' is not beneath any import directory", .path.display())]
    #[diagnostic(
        code(thrum::path_not_in_search_path),
        help("add the directory containing the schema file with add_import_path() first")
    )]
    PathNotInSearchPath { path: PathBuf },

    #[error("no schema files were added")]
    #[diagnostic(code(thrum::illegal_state))]
    NoSchemaFiles,

    #[error("no generator was set")]
    #[diagnostic(
        code(thrum::illegal_state),
        help("set the --gen value, e.g. 'java' or 'java:hashcode'")
    )]
    MissingGenerator,

    #[error("working directory '{}' already exists", .path.display())]
    #[diagnostic(code(thrum::environment))]
    WorkingDirectoryExists { path: PathBuf },

    #[error("failed to create working directory '{}'", .path.display())]
    #[diagnostic(code(thrum::environment))]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run '{executable}'")]
    #[diagnostic(
        code(thrum::environment),
        help("make sure the thrift compiler is installed and on your PATH")
    )]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read working directory '{}'", .path.display())]
    #[diagnostic(code(thrum::environment))]
    ReadWorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no '{prefix}*' directory beneath working directory '{}'", .working_dir.display())]
    #[diagnostic(code(thrum::environment))]
    GeneratedRootMissing {
        prefix: &'static str,
        working_dir: PathBuf,
    },

    #[error(
        "more than one '{prefix}*' directory beneath working directory '{}': {}",
        .working_dir.display(),
        .matches.join(", ")
    )]
    #[diagnostic(code(thrum::environment))]
    GeneratedRootAmbiguous {
        prefix: &'static str,
        working_dir: PathBuf,
        matches: Vec<String>,
    },

    #[error("failed to move generated file(s) to '{}'", .destination.display())]
    #[diagnostic(code(thrum::environment))]
    Relocation {
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error means the orchestration's own assumptions about the
    /// environment were violated, as opposed to bad input from the caller.
    pub fn is_environment_fault(&self) -> bool {
        matches!(
            self,
            Error::WorkingDirectoryExists { .. }
                | Error::WorkingDirectory { .. }
                | Error::Spawn { .. }
                | Error::ReadWorkingDirectory { .. }
                | Error::GeneratedRootMissing { .. }
                | Error::GeneratedRootAmbiguous { .. }
                | Error::Relocation { .. }
        )
    }

    pub(crate) fn invalid(
        what: &'static str,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidArgument {
            what,
            path: path.into(),
            reason: reason.into(),
        }
    }
}
