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
pub struct CheckCommand {
    /// Path to thrum.toml (defaults to ./thrum.toml)
    #[arg(short, long, default_value = "thrum.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let thrum_toml = ThrumToml::open(&self.config).unwrap_or_exit();
        let project = thrum_toml.project();
        let schema_files = project.schema_files().unwrap_or_exit();

        let report = ops::check(&project, &schema_files, &self.config);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
