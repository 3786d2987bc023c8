//! F001: every audio file is referenced by a transcription manifest.

use crate::check::{list_audio_files, read_manifest, Check, CheckError, CheckInfo, CheckKind};
use crate::context::RunContext;
use crate::manifest;
use crate::report::{Message, TagKind};
use std::collections::HashSet;
use tracing::debug;

#[derive(Default)]
pub struct OrphanAudioCheck {
    errors: Vec<Message>,
}

impl OrphanAudioCheck {
    /// Canonical paths referenced anywhere in the existing manifests.
    /// Missing manifests are the structure check's defect, not this one's.
    fn referenced_paths(ctx: &RunContext) -> Result<HashSet<String>, CheckError> {
        let mut referenced = HashSet::new();
        for name in &ctx.manifest_files {
            let Some(lines) = read_manifest(ctx, name)? else {
                continue;
            };
            for line in &lines {
                if manifest::is_blank(line) {
                    continue;
                }
                let record = manifest::parse_line(line);
                referenced.insert(manifest::canonical_path(&record.audio_path));
            }
        }
        Ok(referenced)
    }
}

impl Check for OrphanAudioCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "F001",
            name: "OrphanAudio",
            description: "Check that every audio file appears in a transcription manifest",
            version: "1.0.0",
            kind: CheckKind::File,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        let referenced = Self::referenced_paths(ctx)?;
        let files = list_audio_files(ctx)?;
        debug!(
            audio_files = files.len(),
            referenced = referenced.len(),
            "comparing audio folder against manifests"
        );

        for entry in files {
            if !referenced.contains(&entry.relative) {
                self.errors.push(
                    Message::new().with(TagKind::File, format!("{:>44}", entry.relative)),
                );
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "All audio files are referenced by a transcription manifest"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} audio file(s) missing from the transcription manifests")
    }
}
