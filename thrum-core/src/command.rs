//! Command line construction for the Thrift compiler.

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::Path,
};

/// A single compiler invocation: the program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    program: String,
    args: Vec<OsString>,
}

impl CompilerCommand {
    /// Build the command that compiles one schema file.
    ///
    /// Emits `-I <dir>` for each import directory, then
    /// `-o <working_dir> --gen <generator> <schema_file>`. The compiler always
    /// writes into the working directory; relocation into the destination
    /// happens after every schema file has compiled.
    pub fn new<'a, I>(
        executable: &str,
        import_dirs: I,
        generator: &str,
        working_dir: &Path,
        schema_file: &Path,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut args = Vec::new();
        for dir in import_dirs {
            args.push(OsString::from("-I"));
            args.push(dir.as_os_str().to_owned());
        }
        args.push(OsString::from("-o"));
        args.push(working_dir.as_os_str().to_owned());
        args.push(OsString::from("--gen"));
        args.push(OsString::from(generator));
        args.push(schema_file.as_os_str().to_owned());

        Self {
            program: executable.to_string(),
            args,
        }
    }

    /// The executable to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable, without the executable itself.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for CompilerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(OsStr::new(&self.program)))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display if it contains whitespace or quotes.
fn quote(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("'{}'", s.replace('\'', r"'\''"))
    } else {
        s.into_owned()
    }
}
