//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod compile;
mod output;
mod print;

pub use check::CheckReport;
pub use compile::{CompileReport, CompileResult, CompilerFailure, GeneratedFiles};
#[cfg(test)]
pub use output::StringOutput;
pub use output::{Report, TerminalOutput};
pub use print::PrintReport;
