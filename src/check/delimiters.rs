//! T006: no manifest line uses more pipe delimiters than allowed.

use crate::check::{
    manifest_line_message, missing_manifest_message, read_manifest, Check, CheckError, CheckInfo,
    CheckKind,
};
use crate::context::RunContext;
use crate::manifest::{self, DELIMITER};
use crate::report::Message;

#[derive(Default)]
pub struct DelimiterCountCheck {
    errors: Vec<Message>,
}

impl Check for DelimiterCountCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T006",
            name: "DelimiterCount",
            description: "Check that no line exceeds the allowed number of pipe delimiters",
            version: "1.0.0",
            kind: CheckKind::Transcription,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        for name in &ctx.manifest_files {
            let Some(lines) = read_manifest(ctx, name)? else {
                self.errors.push(missing_manifest_message(name));
                continue;
            };
            for (idx, line) in lines.iter().enumerate() {
                if manifest::is_blank(line) {
                    continue;
                }
                // Strictly more than allowed is the defect; fewer is fine
                let count = line.matches(DELIMITER).count();
                if count > ctx.expected.max_delimiter_count {
                    self.errors.push(manifest_line_message(name, idx + 1, line));
                }
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "No line uses more pipe delimiters than allowed"
    }

    fn error_message(&self, count: usize) -> String {
        format!("The pipe delimiter appears more often than allowed in {count} line(s)")
    }
}
