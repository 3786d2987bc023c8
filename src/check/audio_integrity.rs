//! F003: every audio file decodes cleanly under a strict container scan.
//!
//! Exactly one status per file; only non-clean statuses become errors.
//! Unlike F002, a file that cannot be read as WAV is a defect here.

use crate::audio::{self, WavIntegrity};
use crate::check::{list_audio_files, Check, CheckError, CheckInfo, CheckKind};
use crate::context::RunContext;
use crate::report::{Message, TagKind};

#[derive(Default)]
pub struct AudioIntegrityCheck {
    errors: Vec<Message>,
}

fn status_span(verdict: WavIntegrity) -> Option<(TagKind, &'static str)> {
    match verdict {
        WavIntegrity::Clean => None,
        WavIntegrity::ExtraneousChunk => {
            Some((TagKind::Warning, "has extraneous metadata chunk"))
        }
        WavIntegrity::Truncated => Some((TagKind::Invalid, "truncated")),
        WavIntegrity::NotWav => Some((TagKind::Invalid, "not a WAV file")),
        WavIntegrity::Unknown => Some((TagKind::Invalid, "unknown decoding error")),
    }
}

impl Check for AudioIntegrityCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "F003",
            name: "AudioIntegrity",
            description: "Check that every audio file is a well-formed WAV container",
            version: "1.0.0",
            kind: CheckKind::File,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        for entry in list_audio_files(ctx)? {
            let verdict =
                audio::inspect_container(&entry.path).map_err(|source| CheckError::Io {
                    path: entry.path.clone(),
                    source,
                })?;
            if let Some((tag, label)) = status_span(verdict) {
                self.errors.push(
                    Message::new()
                        .with(TagKind::File, format!("{:>44}", entry.relative))
                        .with(TagKind::Plain, " [")
                        .with(tag, label)
                        .with(TagKind::Plain, "]"),
                );
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "All audio files decode cleanly"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} audio file(s) with container problems")
    }
}
