//! Compile command report data structures.

use std::path::{Path, PathBuf};

use super::output::{Output, Report};

/// Report data from a compile run.
#[derive(Debug)]
pub struct CompileReport {
    /// Directory schema files were discovered in.
    pub source_root: PathBuf,
    /// Destination for generated sources.
    pub output_dir: PathBuf,
    /// Schema files selected for compilation.
    pub schema_files: Vec<PathBuf>,
    /// What happened.
    pub result: CompileResult,
}

/// Result of a compile run.
#[derive(Debug)]
pub enum CompileResult {
    /// No schema files were found.
    NothingToCompile,
    /// The staleness check found nothing to do.
    UpToDate,
    /// Every schema file compiled and output was relocated.
    Compiled(GeneratedFiles),
    /// The compiler rejected a schema file.
    Failed(CompilerFailure),
}

/// Files relocated into the output directory.
#[derive(Debug)]
pub struct GeneratedFiles {
    /// The stripped `gen-*` directory name.
    pub generated_root: String,
    /// Paths relative to the output directory.
    pub files: Vec<PathBuf>,
}

/// Details of a failed compiler run.
#[derive(Debug)]
pub struct CompilerFailure {
    pub schema_file: PathBuf,
    pub code: i32,
    pub command_lines: String,
    pub stdout: String,
    pub stderr: String,
    /// Left in place for inspection.
    pub working_dir: PathBuf,
}

impl CompileReport {
    /// The compiler's exit status if it failed.
    pub fn failure_code(&self) -> Option<i32> {
        match &self.result {
            CompileResult::Failed(failure) => Some(failure.code),
            _ => None,
        }
    }

    fn display_schema(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            CompileResult::NothingToCompile => {
                out.warning(&format!(
                    "no .thrift files found under {}",
                    self.source_root.display()
                ));
            }
            CompileResult::UpToDate => {
                out.preformatted(&format!(
                    "Generated sources in {} are up to date",
                    self.output_dir.display()
                ));
            }
            CompileResult::Compiled(generated) => self.render_compiled(out, generated),
            CompileResult::Failed(failure) => self.render_failure(out, failure),
        }
    }
}

impl CompileReport {
    fn render_compiled(&self, out: &mut dyn Output, generated: &GeneratedFiles) {
        out.section(&format!("Compiled ({})", self.schema_files.len()));
        for file in &self.schema_files {
            out.list_item(&self.display_schema(file));
        }
        out.newline();

        out.section(&format!(
            "Generated ({}, stripped {})",
            generated.files.len(),
            generated.generated_root
        ));
        for file in &generated.files {
            out.added_item(&file.display().to_string());
        }
        out.newline();

        out.key_value("Output", &self.output_dir.display().to_string());
    }

    fn render_failure(&self, out: &mut dyn Output, failure: &CompilerFailure) {
        out.warning(&format!(
            "thrift exited with status {} while compiling {}",
            failure.code,
            self.display_schema(&failure.schema_file)
        ));

        out.divider("Command");
        out.preformatted(&failure.command_lines);

        if !failure.stdout.trim().is_empty() {
            out.divider("stdout");
            out.preformatted(failure.stdout.trim_end());
        }
        if !failure.stderr.trim().is_empty() {
            out.divider("stderr");
            out.preformatted(failure.stderr.trim_end());
        }
        out.newline();

        out.key_value(
            "Working directory",
            &failure.working_dir.display().to_string(),
        );
    }
}
