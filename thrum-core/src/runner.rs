//! Running the compiler as a subprocess.

use std::process::Command;

use crate::{CompilerCommand, Error, Result};

/// Captured result of one compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code; `-1` if the process was terminated by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Executes compiler commands.
///
/// [`SystemRunner`] spawns real processes; tests may substitute their own.
pub trait CompilerRunner {
    /// Run the command to completion, capturing its output.
    fn run(&mut self, command: &CompilerCommand) -> Result<RunOutput>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CompilerRunner for SystemRunner {
    fn run(&mut self, command: &CompilerCommand) -> Result<RunOutput> {
        let output = Command::new(command.program())
            .args(command.args())
            .output()
            .map_err(|source| Error::Spawn {
                executable: command.program().to_string(),
                source,
            })?;

        Ok(RunOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_missing_executable_is_spawn_error() {
        let cmd = CompilerCommand::new(
            "thrum-definitely-not-a-real-compiler",
            std::iter::empty(),
            "java",
            Path::new("/w"),
            Path::new("/x.thrift"),
        );

        let err = SystemRunner.run(&cmd).unwrap_err();

        assert!(matches!(err, Error::Spawn { .. }));
        assert!(err.is_environment_fault());
    }
}
