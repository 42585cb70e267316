//! Invocation engine for the Thrift compiler.
//!
//! An [`Invocation`] is assembled with a [`Builder`], compiles each schema
//! file into a private working directory, then relocates the generated tree
//! into the destination directory with the compiler's `gen-*` directory
//! stripped.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod command;
mod error;
mod invocation;
pub mod relocate;
mod runner;
pub mod search_path;
pub mod staleness;
mod workdir;

pub use command::CompilerCommand;
pub use error::{Error, Result};
pub use invocation::{Builder, CompileOutcome, Invocation, SCHEMA_EXTENSION};
pub use relocate::{GENERATED_DIR_PREFIX, Relocation};
pub use runner::{CompilerRunner, RunOutput, SystemRunner};
pub use workdir::{WORK_DIR_PREFIX, WorkRoot, WorkingDirectory};
