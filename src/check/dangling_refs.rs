//! T003: every audio path referenced by a manifest exists on disk.

use crate::check::{
    manifest_line_message, missing_manifest_message, read_manifest, Check, CheckError, CheckInfo,
    CheckKind,
};
use crate::context::RunContext;
use crate::manifest;
use crate::report::Message;

#[derive(Default)]
pub struct DanglingRefsCheck {
    errors: Vec<Message>,
}

impl Check for DanglingRefsCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T003",
            name: "DanglingReferences",
            description: "Check that every audio file referenced by a transcription exists",
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
                if !ctx.referenced_path(&record.audio_path).exists() {
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
        "All audio files referenced by the transcriptions exist"
    }

    fn error_message(&self, count: usize) -> String {
        format!("{count} referenced audio file(s) do not exist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testutil::{context, write_wav};
    use tempfile::tempdir;

    #[test]
    fn test_all_references_exist() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("wavs")).unwrap();
        write_wav(&dir.path().join("wavs/a.wav"), 8000, 1, 800);
        std::fs::write(dir.path().join("list.txt"), "wavs/a.wav|Hi.\n").unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut check = DanglingRefsCheck::default();
        check.run(&ctx).unwrap();
        assert!(check.errors().is_empty());
    }

    #[test]
    fn test_dangling_reference_reported_with_location() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("wavs")).unwrap();
        write_wav(&dir.path().join("wavs/a.wav"), 8000, 1, 800);
        std::fs::write(
            dir.path().join("list.txt"),
            "wavs/a.wav|Hi.\nwavs/gone.wav|Bye.\n",
        )
        .unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut check = DanglingRefsCheck::default();
        check.run(&ctx).unwrap();
        assert_eq!(check.errors().len(), 1);
        let text = check.errors()[0].plain_text();
        assert!(text.contains("list.txt"));
        assert!(text.contains("     2: "));
        assert!(text.contains("wavs/gone.wav|Bye."));
    }

    #[test]
    fn test_missing_manifest_is_one_defect_not_per_line() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), &["gone.txt"]);

        let mut check = DanglingRefsCheck::default();
        check.run(&ctx).unwrap();
        assert_eq!(check.errors().len(), 1);
        assert!(check.errors()[0]
            .plain_text()
            .contains("manifest not found in dataset: gone.txt"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("list.txt"), "\n\n").unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut check = DanglingRefsCheck::default();
        check.run(&ctx).unwrap();
        assert!(check.errors().is_empty());
    }
}
