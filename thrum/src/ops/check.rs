//! Check operation - manifest validation.

use std::path::{Path, PathBuf};

use thrum_manifest::Project;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Collects the resolved settings and warns about anything that would make
/// a compile fail.
pub fn check(project: &Project, schema_files: &[PathBuf], config_path: &Path) -> CheckReport {
    let mut warnings = Vec::new();

    for dir in &project.import_dirs {
        if !dir.is_dir() {
            warnings.push(format!(
                "import directory '{}' does not exist",
                dir.display()
            ));
        }
    }
    if schema_files.is_empty() {
        warnings.push(format!(
            "no .thrift files found under '{}'",
            project.source_root.display()
        ));
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        executable: project.executable.clone(),
        generator: project.generator.clone(),
        output_dir: project.output_dir.clone(),
        import_dirs: project.import_dirs.clone(),
        schema_files: schema_files.to_vec(),
        warnings,
    }
}
