//! T001: the audio folder and every configured manifest exist.

use crate::check::{Check, CheckError, CheckInfo, CheckKind};
use crate::context::RunContext;
use crate::report::{Message, TagKind};

#[derive(Default)]
pub struct StructureCheck {
    errors: Vec<Message>,
}

impl Check for StructureCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T001",
            name: "DatasetStructure",
            description: "Check that the audio folder and the transcription manifests exist",
            version: "1.0.0",
            kind: CheckKind::Transcription,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        // Every missing entry is reported, not just the first
        for entry in ctx
            .manifest_files
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ctx.audio_dir_name.as_str()))
        {
            if !ctx.dataset_root.join(entry).exists() {
                self.errors
                    .push(Message::new().with(TagKind::File, format!("{entry:>15}")));
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "All transcription manifests and the audio folder exist"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Detected {count} missing transcription manifest(s) or audio folder")
    }
}
