//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub executable: String,
    pub generator: String,
    pub output_dir: PathBuf,
    pub import_dirs: Vec<PathBuf>,
    pub schema_files: Vec<PathBuf>,
    /// Problems that would make a compile fail or do nothing.
    pub warnings: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        out.key_value("Executable", &self.executable);
        out.key_value("Generator", &self.generator);
        out.key_value("Output", &self.output_dir.display().to_string());
        out.newline();

        out.section(&format!("Import directories ({})", self.import_dirs.len()));
        for dir in &self.import_dirs {
            out.list_item(&dir.display().to_string());
        }
        out.newline();

        out.section(&format!("Schema files ({})", self.schema_files.len()));
        for file in &self.schema_files {
            out.list_item(&file.display().to_string());
        }
    }
}
