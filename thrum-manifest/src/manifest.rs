//! Manifest types and parsing for thrum.toml files.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Root manifest for thrum.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Thrift compiler settings
    pub thrift: ThriftConfig,
}

/// The `[thrift]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThriftConfig {
    /// Compiler executable, looked up on PATH unless it contains a separator
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Value passed to `--gen`
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Directory scanned for `.thrift` files; always the first import directory
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Additional import directories
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Where generated sources are relocated to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Scratch root for working directories (defaults to the system temp dir)
    pub work_root: Option<PathBuf>,

    /// Skip compiling when generated sources are newer than every schema file
    #[serde(default)]
    pub check_staleness: bool,

    /// Extra slack, in milliseconds, for the staleness check
    #[serde(default)]
    pub stale_millis: u64,
}

fn default_executable() -> String {
    "thrift".to_string()
}

fn default_generator() -> String {
    "java:hashcode".to_string()
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src/main/thrift")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("target/generated-sources/thrift")
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "thrum.toml")
    }
}

impl Manifest {
    /// Parse a thrum.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Resolve every path against `base_dir`, the directory holding the manifest.
    pub fn resolve(&self, base_dir: &Path) -> Project {
        let thrift = &self.thrift;
        let source_root = base_dir.join(&thrift.source_root);

        let mut import_dirs = vec![source_root.clone()];
        import_dirs.extend(thrift.include_dirs.iter().map(|dir| base_dir.join(dir)));

        Project {
            executable: resolve_executable(&thrift.executable, base_dir),
            generator: thrift.generator.clone(),
            source_root,
            import_dirs,
            output_dir: base_dir.join(&thrift.output_dir),
            work_root: thrift.work_root.as_ref().map(|root| base_dir.join(root)),
            check_staleness: thrift.check_staleness,
            stale: Duration::from_millis(thrift.stale_millis),
        }
    }
}

/// Bare names are left for PATH lookup; anything with a separator is a path.
fn resolve_executable(executable: &str, base_dir: &Path) -> String {
    if executable.contains(std::path::MAIN_SEPARATOR) || executable.contains('/') {
        base_dir.join(executable).display().to_string()
    } else {
        executable.to_string()
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let thrift = &manifest.thrift;
    if thrift.executable.trim().is_empty() {
        return Err(ctx.validation_error_at_key("executable must not be empty", "executable"));
    }
    if thrift.generator.trim().is_empty() {
        return Err(ctx.validation_error_at_key("generator must not be empty", "generator"));
    }
    Ok(())
}

/// A manifest with all paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub executable: String,
    pub generator: String,
    pub source_root: PathBuf,
    /// Source root first, then include directories
    pub import_dirs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub work_root: Option<PathBuf>,
    pub check_staleness: bool,
    pub stale: Duration,
}
