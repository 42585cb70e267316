use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use thrum_manifest::ThrumToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CompileCommand {
    /// Path to thrum.toml (defaults to ./thrum.toml)
    #[arg(short, long, default_value = "thrum.toml")]
    pub config: PathBuf,

    /// Output directory (overrides thrum.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Value for thrift's --gen option (overrides thrum.toml)
    #[arg(short, long)]
    pub generator: Option<String>,

    /// Thrift executable (overrides thrum.toml)
    #[arg(long)]
    pub executable: Option<String>,

    /// Compile even if generated sources look up to date
    #[arg(long)]
    pub force: bool,
}

impl CompileCommand {
    pub fn run(&self) -> Result<()> {
        let thrum_toml = ThrumToml::open(&self.config).unwrap_or_exit();
        let mut project = thrum_toml.project();
        if let Some(output) = &self.output {
            project.output_dir = output.clone();
        }
        if let Some(generator) = &self.generator {
            project.generator = generator.clone();
        }
        if let Some(executable) = &self.executable {
            project.executable = executable.clone();
        }

        let schema_files = project.schema_files().unwrap_or_exit();
        let report = ops::compile(
            &project,
            &schema_files,
            ops::compile::CompileOptions { force: self.force },
        )?;

        report.render(&mut TerminalOutput::new());

        if let Some(code) = report.failure_code() {
            std::process::exit(code);
        }
        Ok(())
    }
}
