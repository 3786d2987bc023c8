//! T005: transcripts end with terminal punctuation.

use crate::check::{
    manifest_line_message, missing_manifest_message, read_manifest, Check, CheckError, CheckInfo,
    CheckKind,
};
use crate::context::RunContext;
use crate::manifest;
use crate::report::Message;

const TERMINAL_MARKS: [char; 3] = ['.', '?', '!'];

#[derive(Default)]
pub struct PunctuationCheck {
    errors: Vec<Message>,
}

impl Check for PunctuationCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T005",
            name: "TerminalPunctuation",
            description: "Check that every transcription ends with '.', '?' or '!'",
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
                // Empty transcripts belong to T004, not here
                if manifest::transcript_is_empty(&record.transcript) {
                    continue;
                }
                let ends_well = record
                    .transcript
                    .chars()
                    .last()
                    .is_some_and(|c| TERMINAL_MARKS.contains(&c));
                if !ends_well {
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
        "All transcriptions end with '.', '?' or '!'"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} transcription(s) without terminal punctuation")
    }
}
