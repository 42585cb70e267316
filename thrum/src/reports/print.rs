//! Print command report data structures.

use super::output::{Output, Report};

/// Command lines that a compile would run.
#[derive(Debug)]
pub struct PrintReport {
    pub command_lines: Vec<String>,
}

impl Report for PrintReport {
    fn render(&self, out: &mut dyn Output) {
        if self.command_lines.is_empty() {
            out.warning("no .thrift files to compile");
            return;
        }
        for line in &self.command_lines {
            out.preformatted(line);
        }
    }
}
