//! Compile operation - run thrift and relocate generated sources.

use std::path::PathBuf;

use eyre::{Context, Result};
use thrum_core::{CompileOutcome, staleness};
use thrum_manifest::Project;

use super::build_invocation;
use crate::reports::{CompileReport, CompileResult, CompilerFailure, GeneratedFiles};

/// Options for the compile operation.
pub struct CompileOptions {
    /// Compile even when the staleness check says the output is current.
    pub force: bool,
}

/// Execute the compile operation.
pub fn compile(
    project: &Project,
    schema_files: &[PathBuf],
    opts: CompileOptions,
) -> Result<CompileReport> {
    let report = |result: CompileResult| CompileReport {
        source_root: project.source_root.clone(),
        output_dir: project.output_dir.clone(),
        schema_files: schema_files.to_vec(),
        result,
    };

    if schema_files.is_empty() {
        return Ok(report(CompileResult::NothingToCompile));
    }

    project.ensure_output_dir()?;

    if project.check_staleness && !opts.force {
        let up_to_date = staleness::is_up_to_date(
            schema_files.iter().map(PathBuf::as_path),
            &project.output_dir,
            project.stale,
        )
        .wrap_err("Failed to check generated sources for staleness")?;
        if up_to_date {
            tracing::info!("generated sources are up to date, skipping thrift");
            return Ok(report(CompileResult::UpToDate));
        }
    }

    let mut invocation = build_invocation(project, schema_files)?;
    let outcome = invocation
        .compile()
        .wrap_err("Failed to compile thrift sources")?;

    let result = match outcome {
        CompileOutcome::Success(relocation) => CompileResult::Compiled(GeneratedFiles {
            generated_root: relocation.generated_root,
            files: relocation.files,
        }),
        CompileOutcome::CompilerFailure { schema_file, code } => {
            CompileResult::Failed(CompilerFailure {
                schema_file,
                code,
                command_lines: invocation.command_lines(),
                stdout: invocation.stdout().to_string(),
                stderr: invocation.stderr().to_string(),
                working_dir: invocation.working_dir().to_path_buf(),
            })
        }
    };

    Ok(report(result))
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt, path::Path};

    use tempfile::TempDir;
    use thrum_manifest::Manifest;

    use super::*;

    /// Writes `gen-java/<stem>/<Stem>.java` for each schema, fails on `bad.thrift`.
    const FAKE_THRIFT: &str = r#"#!/bin/sh
while [ $# -gt 1 ]; do
  case "$1" in
    -o) shift; out="$1" ;;
  esac
  shift
done
case "$1" in
  *bad.thrift) echo "[FAILURE:$1] syntax error" >&2; exit 2 ;;
esac
stem=$(basename "$1" .thrift)
mkdir -p "$out/gen-java/$stem"
echo "// $stem" > "$out/gen-java/$stem/Generated.java"
"#;

    fn setup(extra: &str) -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/thrift"), FAKE_THRIFT).unwrap();
        fs::set_permissions(root.join("bin/thrift"), fs::Permissions::from_mode(0o755)).unwrap();
        fs::create_dir_all(root.join("idl")).unwrap();
        fs::create_dir_all(root.join("scratch")).unwrap();
        fs::write(root.join("idl/shared.thrift"), "").unwrap();

        let manifest: Manifest = format!(
            "[thrift]\nexecutable = \"bin/thrift\"\nsource_root = \"idl\"\n\
             output_dir = \"out\"\nwork_root = \"scratch\"\n{extra}"
        )
        .parse()
        .unwrap();
        let project = manifest.resolve(root);
        (temp, project)
    }

    fn run(project: &Project, force: bool) -> CompileReport {
        let files = project.schema_files().unwrap();
        compile(project, &files, CompileOptions { force }).unwrap()
    }

    #[test]
    fn test_compile_writes_output() {
        let (_temp, project) = setup("");

        let report = run(&project, false);

        assert!(report.failure_code().is_none());
        assert!(project.output_dir.join("shared/Generated.java").is_file());
        match report.result {
            CompileResult::Compiled(generated) => {
                assert_eq!(generated.generated_root, "gen-java");
                assert_eq!(generated.files, vec![Path::new("shared/Generated.java")]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_compiler_failure_is_reported() {
        let (_temp, project) = setup("");
        fs::write(project.source_root.join("bad.thrift"), "").unwrap();

        let report = run(&project, false);

        assert_eq!(report.failure_code(), Some(2));
        match &report.result {
            CompileResult::Failed(failure) => {
                assert!(failure.schema_file.ends_with("bad.thrift"));
                assert!(failure.stderr.contains("syntax error"));
                assert!(failure.working_dir.is_dir());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_staleness_skips_second_run() {
        let (_temp, project) = setup("check_staleness = true\n");

        assert!(matches!(run(&project, false).result, CompileResult::Compiled(_)));
        assert!(matches!(run(&project, false).result, CompileResult::UpToDate));
        assert!(matches!(run(&project, true).result, CompileResult::Compiled(_)));
    }

    #[test]
    fn test_no_schema_files() {
        let (_temp, project) = setup("");
        fs::remove_file(project.source_root.join("shared.thrift")).unwrap();

        let report = run(&project, false);

        assert!(matches!(report.result, CompileResult::NothingToCompile));
        assert!(!project.output_dir.exists());
    }
}
