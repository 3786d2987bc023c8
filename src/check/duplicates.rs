//! T007: no audio path is referenced by more than one manifest line.
//!
//! The duplicate index accumulates across every configured manifest before
//! any defect is emitted, so a path referenced once in `list_train.txt` and
//! once in `list_val.txt` is still a duplicate. The index lives inside a
//! single `run` invocation; nothing survives across runs.

use crate::check::{
    missing_manifest_message, read_manifest, Check, CheckError, CheckInfo, CheckKind,
};
use crate::context::{DuplicateKeying, RunContext};
use crate::manifest;
use crate::report::{Message, TagKind};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One manifest line referencing an audio path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Occurrence {
    manifest: String,
    line_number: usize,
    raw_path: String,
    transcript: String,
}

/// Accumulator mapping a keyed audio path to every line referencing it,
/// preserving first-insertion order of the keys.
#[derive(Default)]
struct DuplicateIndex {
    entries: HashMap<String, Vec<Occurrence>>,
    order: Vec<String>,
}

impl DuplicateIndex {
    fn insert(&mut self, key: String, occurrence: Occurrence) {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().push(occurrence),
            Entry::Vacant(slot) => {
                self.order.push(slot.key().clone());
                slot.insert(vec![occurrence]);
            }
        }
    }

    /// Keys with two or more occurrences, in first-insertion order.
    fn duplicates(&self) -> impl Iterator<Item = &[Occurrence]> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(Vec::as_slice))
            .filter(|occurrences| occurrences.len() > 1)
    }
}

#[derive(Default)]
pub struct DuplicatePathsCheck {
    errors: Vec<Message>,
}

impl Check for DuplicatePathsCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "T007",
            name: "DuplicatePaths",
            description: "Check that no audio path is referenced twice across the manifests",
            version: "1.1.0",
            kind: CheckKind::Transcription,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        let mut index = DuplicateIndex::default();

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
                let key = match ctx.duplicate_keying {
                    DuplicateKeying::Canonical => manifest::canonical_path(&record.audio_path),
                    DuplicateKeying::Raw => record.audio_path.clone(),
                };
                index.insert(
                    key,
                    Occurrence {
                        manifest: name.clone(),
                        line_number: idx + 1,
                        raw_path: record.audio_path,
                        transcript: record.transcript,
                    },
                );
            }
        }

        // One aggregated error per duplicated path, occurrences in
        // insertion order
        for occurrences in index.duplicates() {
            let mut message = Message::new();
            for (i, occ) in occurrences.iter().enumerate() {
                if i > 0 {
                    message.push(TagKind::Plain, "\n");
                }
                message.push(TagKind::File, format!("{:>15}", occ.manifest));
                message.push(TagKind::Colon, ": ");
                message.push(TagKind::Integer, format!("{:>6}", occ.line_number));
                message.push(TagKind::Colon, ": ");
                message.push(
                    TagKind::Plain,
                    format!("{}|{}", occ.raw_path, occ.transcript),
                );
            }
            self.errors.push(message);
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "No duplicated audio paths found in the transcriptions"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} duplicated audio path(s) in the transcriptions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testutil::context;
    use crate::context::{ExpectedProperties, RunContext};
    use tempfile::tempdir;

    #[test]
    fn test_no_duplicates() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("list.txt"), "a.wav|Hi.\nb.wav|Bye.\n").unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut check = DuplicatePathsCheck::default();
        check.run(&ctx).unwrap();
        assert!(check.errors().is_empty());
    }

    #[test]
    fn test_cross_manifest_aggregation_in_insertion_order() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("train.txt"),
            "wavs/x.wav|First.\nwavs/y.wav|Other.\nwavs/a.wav|Hello.\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("val.txt"),
            "wavs/z.wav|More.\n\n\nwavs/z2.wav|More.\n\n\nwavs/a.wav|Hi.\n",
        )
        .unwrap();
        let ctx = context(dir.path(), &["train.txt", "val.txt"]);

        let mut check = DuplicatePathsCheck::default();
        check.run(&ctx).unwrap();

        // Exactly one aggregated entry naming both occurrences
        assert_eq!(check.errors().len(), 1);
        let text = check.errors()[0].plain_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("train.txt"));
        assert!(lines[0].contains("     3: "));
        assert!(lines[0].contains("wavs/a.wav|Hello."));
        assert!(lines[1].contains("val.txt"));
        assert!(lines[1].contains("     7: "));
        assert!(lines[1].contains("wavs/a.wav|Hi."));
    }

    #[test]
    fn test_triple_reference_is_one_entry() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("list.txt"),
            "a.wav|One.\na.wav|Two.\na.wav|Three.\n",
        )
        .unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut check = DuplicatePathsCheck::default();
        check.run(&ctx).unwrap();
        assert_eq!(check.errors().len(), 1);
        assert_eq!(check.errors()[0].plain_text().lines().count(), 3);
    }

    #[test]
    fn test_canonical_keying_merges_separator_spellings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("list.txt"),
            "wavs/a.wav|Hi.\nwavs\\a.wav|Bye.\n",
        )
        .unwrap();
        let ctx = context(dir.path(), &["list.txt"]);
        assert_eq!(ctx.duplicate_keying, DuplicateKeying::Canonical);

        let mut check = DuplicatePathsCheck::default();
        check.run(&ctx).unwrap();
        assert_eq!(check.errors().len(), 1);
        // Raw spellings are preserved in the report
        let text = check.errors()[0].plain_text();
        assert!(text.contains("wavs/a.wav|Hi."));
        assert!(text.contains("wavs\\a.wav|Bye."));
    }

    #[test]
    fn test_raw_keying_keeps_spellings_apart() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("list.txt"),
            "wavs/a.wav|Hi.\nwavs\\a.wav|Bye.\n",
        )
        .unwrap();
        let ctx = RunContext::new(
            dir.path(),
            vec!["list.txt".to_string()],
            "wavs",
            ExpectedProperties::default(),
            DuplicateKeying::Raw,
        )
        .unwrap();

        let mut check = DuplicatePathsCheck::default();
        check.run(&ctx).unwrap();
        assert!(check.errors().is_empty());
    }

    #[test]
    fn test_index_does_not_leak_across_runs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("list.txt"), "a.wav|Hi.\na.wav|Bye.\n").unwrap();
        let ctx = context(dir.path(), &["list.txt"]);

        let mut first = DuplicatePathsCheck::default();
        first.run(&ctx).unwrap();
        let mut second = DuplicatePathsCheck::default();
        second.run(&ctx).unwrap();
        // A process-global index would double the occurrences on the
        // second run
        assert_eq!(first.errors(), second.errors());
        assert_eq!(second.errors()[0].plain_text().lines().count(), 2);
    }
}
