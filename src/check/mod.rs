//! The check contract and the built-in registry.
//!
//! Every validation unit implements [`Check`]: a pure metadata descriptor,
//! a single-shot `run` over the shared [`RunContext`], and an append-only
//! error list. Domain defects (missing files, malformed lines) become error
//! entries; `run` only fails for I/O the validation logic cannot recover
//! from, and the driver reports that distinctly from a failed check.

use crate::context::RunContext;
use crate::manifest;
use crate::report::{Message, TagKind};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub mod audio_integrity;
pub mod audio_properties;
pub mod blank_lines;
pub mod dangling_refs;
pub mod delimiters;
pub mod duplicates;
pub mod empty_transcripts;
pub mod orphan_audio;
pub mod punctuation;
pub mod structure;

/// Unrecoverable failure inside a check.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scope of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Walks transcription manifests
    Transcription,
    /// Walks the audio folder
    File,
}

/// Immutable descriptor of a check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInfo {
    /// Short stable code, e.g. `T003`
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub kind: CheckKind,
}

/// A single validation unit.
pub trait Check {
    /// Descriptor; pure, no I/O.
    fn info(&self) -> CheckInfo;

    /// Run the check once, reading under `ctx.dataset_root` and appending
    /// to the error list. Domain defects never produce `Err`.
    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError>;

    /// Errors accumulated by `run`, in detection order.
    fn errors(&self) -> &[Message];

    /// Summary shown when the check found nothing.
    fn success_message(&self) -> &'static str;

    /// Summary shown when the check found `count` defects.
    fn error_message(&self, count: usize) -> String;
}

/// All built-in checks, minus the disabled ids, in ascending id order.
pub fn registry(disabled: &[String]) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = vec![
        Box::new(structure::StructureCheck::default()),
        Box::new(blank_lines::BlankLinesCheck::default()),
        Box::new(dangling_refs::DanglingRefsCheck::default()),
        Box::new(empty_transcripts::EmptyTranscriptsCheck::default()),
        Box::new(punctuation::PunctuationCheck::default()),
        Box::new(delimiters::DelimiterCountCheck::default()),
        Box::new(duplicates::DuplicatePathsCheck::default()),
        Box::new(orphan_audio::OrphanAudioCheck::default()),
        Box::new(audio_properties::AudioPropertiesCheck::default()),
        Box::new(audio_integrity::AudioIntegrityCheck::default()),
    ];
    checks.retain(|c| {
        !disabled
            .iter()
            .any(|d| d.trim().eq_ignore_ascii_case(c.info().id))
    });
    checks.sort_by(|a, b| a.info().id.cmp(b.info().id));
    checks
}

/// Standard `<manifest>: <line>: <content>` location message.
pub(crate) fn manifest_line_message(manifest: &str, line_number: usize, content: &str) -> Message {
    Message::new()
        .with(TagKind::File, format!("{manifest:>15}"))
        .with(TagKind::Colon, ": ")
        .with(TagKind::Integer, format!("{line_number:>6}"))
        .with(TagKind::Colon, ": ")
        .with(TagKind::Plain, content)
}

/// Single defect entry for a manifest that does not exist.
pub(crate) fn missing_manifest_message(name: &str) -> Message {
    Message::new().with(
        TagKind::Invalid,
        format!("ERROR: manifest not found in dataset: {name}"),
    )
}

/// Load a manifest's lines, or `None` when the file does not exist.
///
/// Only real I/O failures (permissions, disk errors) become `CheckError`.
pub(crate) fn read_manifest(
    ctx: &RunContext,
    name: &str,
) -> Result<Option<Vec<String>>, CheckError> {
    let path = ctx.manifest_path(name);
    match manifest::load_lines(&path) {
        Ok(lines) => Ok(Some(lines)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CheckError::Io { path, source }),
    }
}

/// A WAV file found under the audio folder.
pub(crate) struct AudioEntry {
    /// Full path for opening the file
    pub path: PathBuf,
    /// Canonical path relative to the dataset root, as manifests reference it
    pub relative: String,
}

/// Enumerate `*.wav` files under the audio folder, sorted for deterministic
/// reporting. A missing audio folder yields an empty list; the structure
/// check owns that defect.
pub(crate) fn list_audio_files(ctx: &RunContext) -> Result<Vec<AudioEntry>, CheckError> {
    let dir = ctx.audio_dir();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(CheckError::Io { path: dir, source }),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CheckError::Io {
            path: dir.clone(),
            source,
        })?;
        let path = entry.path();
        let is_wav = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if !is_wav || !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = manifest::canonical_path(&format!("{}/{name}", ctx.audio_dir_name));
        files.push(AudioEntry { path, relative });
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::context::{DuplicateKeying, ExpectedProperties, RunContext};
    use std::path::Path;

    /// Context over a temp dataset with test-friendly audio expectations
    /// (8 kHz mono, 100..2000 ms, one pipe per line).
    pub fn context(root: &Path, manifests: &[&str]) -> RunContext {
        RunContext::new(
            root,
            manifests.iter().map(|s| s.to_string()).collect(),
            "wavs",
            ExpectedProperties {
                sample_rate: 8000,
                channel_count: 1,
                min_duration_ms: 100,
                max_duration_ms: 2000,
                max_delimiter_count: 1,
            },
            DuplicateKeying::default(),
        )
        .unwrap()
    }

    /// Write a silent 16-bit PCM WAV file.
    pub fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames * channels as u32 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_ascending_by_id() {
        let checks = registry(&[]);
        let ids: Vec<&str> = checks.iter().map(|c| c.info().id).collect();
        assert_eq!(
            ids,
            vec!["F001", "F002", "F003", "T001", "T002", "T003", "T004", "T005", "T006", "T007"]
        );
    }

    #[test]
    fn test_registry_disable_filter() {
        let disabled = vec!["t007".to_string(), " F002 ".to_string()];
        let checks = registry(&disabled);
        let ids: Vec<&str> = checks.iter().map(|c| c.info().id).collect();
        assert!(!ids.contains(&"T007"));
        assert!(!ids.contains(&"F002"));
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_manifest_line_message_layout() {
        let msg = manifest_line_message("list.txt", 3, "a.wav|Hi.");
        assert_eq!(msg.plain_text(), "       list.txt:      3: a.wav|Hi.");
    }
}
