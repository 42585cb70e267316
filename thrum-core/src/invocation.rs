//! Assembling and running a Thrift compilation.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    CompilerCommand, CompilerRunner, Error, Relocation, Result, SystemRunner, WorkRoot,
    WorkingDirectory, relocate, search_path,
};

/// File name suffix every schema file must carry.
pub const SCHEMA_EXTENSION: &str = ".thrift";

/// Result of [`Invocation::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Every schema file compiled and the output was relocated.
    Success(Relocation),
    /// The compiler rejected a schema file. Remaining files were not compiled
    /// and nothing was relocated.
    CompilerFailure { schema_file: PathBuf, code: i32 },
}

impl CompileOutcome {
    /// The overall exit status: zero on success, otherwise the failing
    /// compiler's status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileOutcome::Success(_) => 0,
            CompileOutcome::CompilerFailure { code, .. } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success(_))
    }
}

/// Collects and validates the inputs of an [`Invocation`].
///
/// Every add is checked immediately. Import directories must be added before
/// the schema files inside them, since each schema file is checked against
/// the directories registered so far.
#[derive(Debug)]
pub struct Builder {
    executable: String,
    destination: PathBuf,
    generator: Option<String>,
    import_dirs: BTreeSet<PathBuf>,
    schema_files: BTreeSet<PathBuf>,
    work_root: WorkRoot,
}

impl Builder {
    /// Start a builder for the given compiler executable and destination
    /// directory. The destination must already exist.
    pub fn new(executable: impl Into<String>, destination: impl AsRef<Path>) -> Result<Self> {
        let executable = executable.into();
        if executable.is_empty() {
            return Err(Error::EmptyArgument { what: "executable" });
        }

        let destination = destination.as_ref();
        if !destination.is_dir() {
            return Err(Error::invalid(
                "destination directory",
                destination,
                "not an existing directory",
            ));
        }

        Ok(Self {
            executable,
            destination: destination.to_path_buf(),
            generator: None,
            import_dirs: BTreeSet::new(),
            schema_files: BTreeSet::new(),
            work_root: WorkRoot::default(),
        })
    }

    /// Set the value passed to `--gen`, e.g. `java:private-members,hashcode`.
    ///
    /// The value is passed through verbatim.
    pub fn generator(&mut self, generator: impl Into<String>) -> Result<&mut Self> {
        let generator = generator.into();
        if generator.is_empty() {
            return Err(Error::EmptyArgument { what: "generator" });
        }
        self.generator = Some(generator);
        Ok(self)
    }

    /// Allocate the working directory under `root` instead of the platform
    /// temporary directory.
    pub fn work_root(&mut self, root: impl Into<PathBuf>) -> &mut Self {
        self.work_root = WorkRoot::new(root);
        self
    }

    /// Add a directory to the import-search path.
    pub fn add_import_path(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::invalid(
                "import directory",
                dir,
                "not an existing directory",
            ));
        }
        let dir = dir
            .canonicalize()
            .map_err(|e| Error::invalid("import directory", dir, e.to_string()))?;
        self.import_dirs.insert(dir);
        Ok(self)
    }

    /// Add several import directories, stopping at the first invalid one.
    pub fn add_import_paths<I, P>(&mut self, dirs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for dir in dirs {
            self.add_import_path(dir)?;
        }
        Ok(self)
    }

    /// Add a schema file to compile.
    ///
    /// The file must exist, end in `.thrift`, and live beneath an import
    /// directory that has already been added.
    pub fn add_schema_file(&mut self, file: impl AsRef<Path>) -> Result<&mut Self> {
        let file = file.as_ref();
        if !file.is_file() {
            return Err(Error::invalid("schema file", file, "not an existing file"));
        }
        let has_extension = file
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(SCHEMA_EXTENSION));
        if !has_extension {
            return Err(Error::invalid(
                "schema file",
                file,
                format!("expected a '{}' file", SCHEMA_EXTENSION),
            ));
        }

        let file = canonicalize_parent(file)
            .map_err(|e| Error::invalid("schema file", file, e.to_string()))?;
        let import_dirs = self.import_dirs.iter().map(PathBuf::as_path);
        if !search_path::is_in_search_path(&file, import_dirs) {
            return Err(Error::PathNotInSearchPath { path: file });
        }

        self.schema_files.insert(file);
        Ok(self)
    }

    /// Add several schema files, stopping at the first invalid one.
    pub fn add_schema_files<I, P>(&mut self, files: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for file in files {
            self.add_schema_file(file)?;
        }
        Ok(self)
    }

    /// Produce the invocation, allocating its working directory.
    pub fn build(self) -> Result<Invocation> {
        if self.schema_files.is_empty() {
            return Err(Error::NoSchemaFiles);
        }
        let generator = self.generator.ok_or(Error::MissingGenerator)?;
        let working_dir = self.work_root.allocate()?;

        Ok(Invocation {
            executable: self.executable,
            generator,
            import_dirs: self.import_dirs,
            schema_files: self.schema_files,
            destination: self.destination,
            working_dir,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Make `file` absolute without following a symlink at the file itself, so
/// a linked schema file keeps its place beneath the import directory.
fn canonicalize_parent(file: &Path) -> std::io::Result<PathBuf> {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = file.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    Ok(parent.canonicalize()?.join(name))
}

/// A configured run of the Thrift compiler over a set of schema files.
///
/// Each schema file is compiled into a private working directory; once all of
/// them succeed the generated tree is moved into the destination and the
/// working directory is deleted. Call [`compile`](Self::compile) once: a
/// successful run consumes the working directory.
#[derive(Debug)]
pub struct Invocation {
    executable: String,
    generator: String,
    import_dirs: BTreeSet<PathBuf>,
    schema_files: BTreeSet<PathBuf>,
    destination: PathBuf,
    working_dir: WorkingDirectory,
    stdout: String,
    stderr: String,
}

impl Invocation {
    /// Compile every schema file with the system compiler.
    pub fn compile(&mut self) -> Result<CompileOutcome> {
        self.compile_with(&mut SystemRunner)
    }

    /// Compile every schema file using `runner`.
    ///
    /// Stops at the first non-zero exit and returns it as
    /// [`CompileOutcome::CompilerFailure`], leaving the working directory in
    /// place. Environment problems (the compiler could not be started, the
    /// output layout was unexpected, copying failed) are returned as errors.
    pub fn compile_with<R: CompilerRunner + ?Sized>(
        &mut self,
        runner: &mut R,
    ) -> Result<CompileOutcome> {
        for schema_file in &self.schema_files {
            let command = self.command_for(schema_file);
            tracing::info!(file = %schema_file.display(), "compiling");
            tracing::debug!(command = %command);

            let output = runner.run(&command)?;
            self.stdout.push_str(&output.stdout);
            self.stderr.push_str(&output.stderr);

            if !output.success() {
                tracing::warn!(
                    file = %schema_file.display(),
                    code = output.code,
                    "thrift compiler failed"
                );
                return Ok(CompileOutcome::CompilerFailure {
                    schema_file: schema_file.clone(),
                    code: output.code,
                });
            }
        }

        let relocation = relocate::move_generated_files(&self.working_dir, &self.destination)?;
        tracing::info!(
            files = relocation.files.len(),
            destination = %self.destination.display(),
            "relocated generated sources"
        );
        Ok(CompileOutcome::Success(relocation))
    }

    /// The compiler command for one schema file.
    pub fn command_for(&self, schema_file: &Path) -> CompilerCommand {
        CompilerCommand::new(
            &self.executable,
            self.import_dirs.iter().map(PathBuf::as_path),
            &self.generator,
            self.working_dir.path(),
            schema_file,
        )
    }

    /// Equivalent command lines, one per schema file.
    pub fn command_lines(&self) -> String {
        self.to_string()
    }

    /// Everything the compiler wrote to stdout, across all runs.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Everything the compiler wrote to stderr, across all runs.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn import_dirs(&self) -> impl Iterator<Item = &Path> {
        self.import_dirs.iter().map(PathBuf::as_path)
    }

    pub fn schema_files(&self) -> impl Iterator<Item = &Path> {
        self.schema_files.iter().map(PathBuf::as_path)
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn working_dir(&self) -> &Path {
        self.working_dir.path()
    }

    /// Delete the working directory without compiling.
    ///
    /// Used when an invocation is only built to render its command lines.
    pub fn discard(self) -> std::io::Result<()> {
        if self.working_dir.exists() {
            self.working_dir.remove()?;
        }
        Ok(())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, schema_file) in self.schema_files.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.command_for(schema_file))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::RunOutput;

    /// Records commands and replays scripted results.
    struct FakeRunner {
        results: Vec<RunOutput>,
        seen: Vec<CompilerCommand>,
        generate: bool,
    }

    impl FakeRunner {
        fn succeeding() -> Self {
            Self {
                results: Vec::new(),
                seen: Vec::new(),
                generate: true,
            }
        }
    }

    impl CompilerRunner for FakeRunner {
        fn run(&mut self, command: &CompilerCommand) -> Result<RunOutput> {
            self.seen.push(command.clone());
            let result = if self.results.is_empty() {
                RunOutput {
                    code: 0,
                    stdout: format!("run {}\n", self.seen.len()),
                    stderr: String::new(),
                }
            } else {
                self.results.remove(0)
            };

            if self.generate && result.success() {
                // args: ... -o <dir> --gen <g> <file>
                let args = command.args();
                let out = PathBuf::from(&args[args.len() - 4]);
                let stem = Path::new(&args[args.len() - 1])
                    .file_stem()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned();
                let pkg = out.join("gen-java").join(&stem);
                fs::create_dir_all(&pkg).unwrap();
                fs::write(pkg.join("Generated.java"), &stem).unwrap();
            }
            Ok(result)
        }
    }

    struct Fixture {
        temp: TempDir,
        idl: PathBuf,
        dest: PathBuf,
        scratch: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let idl = temp.path().join("idl");
            let dest = temp.path().join("out");
            let scratch = temp.path().join("scratch");
            for dir in [&idl, &dest, &scratch] {
                fs::create_dir_all(dir).unwrap();
            }
            fs::write(idl.join("shared.thrift"), "namespace java shared").unwrap();
            fs::write(idl.join("tutorial.thrift"), "namespace java tutorial").unwrap();
            Self {
                temp,
                idl,
                dest,
                scratch,
            }
        }

        fn builder(&self) -> Builder {
            let mut builder = Builder::new("thrift", &self.dest).unwrap();
            builder.generator("java").unwrap();
            builder.work_root(&self.scratch);
            builder
        }
    }

    #[test]
    fn test_new_rejects_empty_executable() {
        let fx = Fixture::new();
        let err = Builder::new("", &fx.dest).unwrap_err();
        assert!(matches!(err, Error::EmptyArgument { what: "executable" }));
    }

    #[test]
    fn test_new_rejects_missing_destination() {
        let fx = Fixture::new();
        let err = Builder::new("thrift", fx.temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_generator_rejects_empty() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        assert!(matches!(
            builder.generator("").unwrap_err(),
            Error::EmptyArgument { what: "generator" }
        ));
    }

    #[test]
    fn test_add_import_path_rejects_file() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        let err = builder
            .add_import_path(fx.idl.join("shared.thrift"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_add_schema_file_before_import_path_fails() {
        let fx = Fixture::new();
        let mut builder = fx.builder();

        let err = builder
            .add_schema_file(fx.idl.join("shared.thrift"))
            .unwrap_err();

        assert!(matches!(err, Error::PathNotInSearchPath { .. }));
    }

    #[test]
    fn test_add_schema_file_outside_import_path_fails() {
        let fx = Fixture::new();
        let other = fx.temp.path().join("other");
        fs::create_dir(&other).unwrap();
        fs::write(other.join("x.thrift"), "").unwrap();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        let err = builder.add_schema_file(other.join("x.thrift")).unwrap_err();

        assert!(matches!(err, Error::PathNotInSearchPath { .. }));
    }

    #[test]
    fn test_add_schema_file_in_nested_directory() {
        let fx = Fixture::new();
        let nested = fx.idl.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.thrift"), "").unwrap();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        builder.add_schema_file(nested.join("deep.thrift")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_add_symlinked_schema_file_keeps_link_path() {
        let fx = Fixture::new();
        let elsewhere = fx.temp.path().join("elsewhere");
        fs::create_dir(&elsewhere).unwrap();
        fs::write(elsewhere.join("real.thrift"), "namespace java real").unwrap();
        std::os::unix::fs::symlink("../elsewhere/real.thrift", fx.idl.join("link.thrift"))
            .unwrap();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        builder.add_schema_file(fx.idl.join("link.thrift")).unwrap();
        let invocation = builder.build().unwrap();

        let files: Vec<&Path> = invocation.schema_files().collect();
        let idl = fx.idl.canonicalize().unwrap();
        assert_eq!(files, vec![idl.join("link.thrift").as_path()]);
        assert!(invocation.command_lines().ends_with("link.thrift"));
    }

    #[test]
    fn test_add_schema_file_rejects_wrong_extension() {
        let fx = Fixture::new();
        fs::write(fx.idl.join("notes.txt"), "").unwrap();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        let err = builder.add_schema_file(fx.idl.join("notes.txt")).unwrap_err();

        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_add_schema_file_rejects_missing_file() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        let err = builder
            .add_schema_file(fx.idl.join("missing.thrift"))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_build_without_schema_files_fails() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();

        assert!(matches!(builder.build().unwrap_err(), Error::NoSchemaFiles));
    }

    #[test]
    fn test_build_without_generator_fails() {
        let fx = Fixture::new();
        let mut builder = Builder::new("thrift", &fx.dest).unwrap();
        builder.work_root(&fx.scratch);
        builder.add_import_path(&fx.idl).unwrap();
        builder.add_schema_file(fx.idl.join("shared.thrift")).unwrap();

        assert!(matches!(
            builder.build().unwrap_err(),
            Error::MissingGenerator
        ));
    }

    #[test]
    fn test_build_allocates_empty_working_dir() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder.add_schema_file(fx.idl.join("shared.thrift")).unwrap();

        let invocation = builder.build().unwrap();

        let work = invocation.working_dir();
        assert!(work.is_dir());
        assert!(work.starts_with(&fx.scratch));
        assert!(fs::read_dir(work).unwrap().next().is_none());
    }

    #[test]
    fn test_command_lines_one_per_schema_file() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder
            .add_schema_files([fx.idl.join("shared.thrift"), fx.idl.join("tutorial.thrift")])
            .unwrap();
        let invocation = builder.build().unwrap();

        let lines = invocation.command_lines();
        let lines: Vec<&str> = lines.lines().collect();

        assert_eq!(lines.len(), 2);
        let work = invocation.working_dir().display().to_string();
        for line in &lines {
            assert!(line.starts_with("thrift -I "));
            assert!(line.contains(&format!("-o {} --gen java ", work)));
        }
        assert!(lines[0].ends_with("shared.thrift"));
        assert!(lines[1].ends_with("tutorial.thrift"));
    }

    #[test]
    fn test_compile_success_relocates_and_cleans_up() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder
            .add_schema_files([fx.idl.join("shared.thrift"), fx.idl.join("tutorial.thrift")])
            .unwrap();
        let mut invocation = builder.build().unwrap();
        let mut runner = FakeRunner::succeeding();

        let outcome = invocation.compile_with(&mut runner).unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(runner.seen.len(), 2);
        assert!(fx.dest.join("shared/Generated.java").is_file());
        assert!(fx.dest.join("tutorial/Generated.java").is_file());
        assert!(!invocation.working_dir().exists());
        assert_eq!(invocation.stdout(), "run 1\nrun 2\n");
    }

    #[test]
    fn test_compile_stops_at_first_failure() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder
            .add_schema_files([fx.idl.join("shared.thrift"), fx.idl.join("tutorial.thrift")])
            .unwrap();
        let mut invocation = builder.build().unwrap();
        let mut runner = FakeRunner::succeeding();
        runner.results.push(RunOutput {
            code: 1,
            stdout: String::new(),
            stderr: "[FAILURE] boom\n".to_string(),
        });

        let outcome = invocation.compile_with(&mut runner).unwrap();

        match &outcome {
            CompileOutcome::CompilerFailure { schema_file, code } => {
                assert_eq!(*code, 1);
                assert!(schema_file.ends_with("shared.thrift"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(runner.seen.len(), 1);
        assert_eq!(invocation.stderr(), "[FAILURE] boom\n");
        assert!(fs::read_dir(&fx.dest).unwrap().next().is_none());
        assert!(invocation.working_dir().is_dir());
    }

    #[test]
    fn test_compile_without_generated_root_is_environment_fault() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder.add_schema_file(fx.idl.join("shared.thrift")).unwrap();
        let mut invocation = builder.build().unwrap();
        let mut runner = FakeRunner::succeeding();
        runner.generate = false;

        let err = invocation.compile_with(&mut runner).unwrap_err();

        assert!(matches!(err, Error::GeneratedRootMissing { .. }));
        assert!(err.is_environment_fault());
        assert!(invocation.working_dir().is_dir());
    }

    #[test]
    fn test_discard_removes_working_dir() {
        let fx = Fixture::new();
        let mut builder = fx.builder();
        builder.add_import_path(&fx.idl).unwrap();
        builder.add_schema_file(fx.idl.join("shared.thrift")).unwrap();
        let invocation = builder.build().unwrap();
        let work = invocation.working_dir().to_path_buf();

        invocation.discard().unwrap();

        assert!(!work.exists());
    }
}
