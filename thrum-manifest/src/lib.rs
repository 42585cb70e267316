//! thrum.toml parsing and validation.
//!
//! The manifest supplies everything a Thrift invocation needs: the compiler
//! executable, the `--gen` value, import directories, the schema files found
//! under the source root, and the output directory.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod discover;
mod error;
mod file;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use file::ThrumToml;
pub use manifest::{Manifest, Project, ThriftConfig, parse_manifest};
