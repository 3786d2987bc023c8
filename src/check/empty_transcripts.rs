//! T004: every manifest line carries an actual transcript.

use crate::check::{
    manifest_line_message, missing_manifest_message, read_manifest, Check, CheckError, CheckInfo,
    CheckKind,
};
use crate::context::RunContext;
use crate::manifest;
use crate::report::Message;

#[derive(Default)]
pub struct EmptyTranscriptsCheck {
    errors: Vec<Message>,
}

impl Check for EmptyTranscriptsCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T004",
            name: "EmptyTranscripts",
            description: "Check that no referenced audio file has an empty transcription",
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
                let record = manifest::parse_line(line);
                if manifest::transcript_is_empty(&record.transcript) {
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
        "Every referenced audio file has a transcription"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} empty transcription(s)")
    }
}
