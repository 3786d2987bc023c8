//! T002: no blank lines inside the transcription manifests.

use crate::check::{
    manifest_line_message, missing_manifest_message, read_manifest, Check, CheckError, CheckInfo,
    CheckKind,
};
use crate::context::RunContext;
use crate::manifest;
use crate::report::Message;

#[derive(Default)]
pub struct BlankLinesCheck {
    errors: Vec<Message>,
}

impl Check for BlankLinesCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T002",
            name: "BlankLines",
            description: "Check that the transcription manifests contain no blank lines",
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
                    self.errors
                        .push(manifest_line_message(name, idx + 1, "<blank line>"));
                }
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "No blank lines found in the transcription manifests"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} blank line(s) in the transcription manifests")
    }
}
