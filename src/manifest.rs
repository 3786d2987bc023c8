//! Transcription manifest parsing.
//!
//! A manifest is a UTF-8 text file with one `<audio_path>|<transcript...>`
//! record per line. Every line-walking check shares the same pre-filter
//! (blank lines are skipped) and the same split semantics, so both live here.

use std::io;
use std::path::Path;

/// Field delimiter used by transcription manifests.
pub const DELIMITER: char = '|';

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Audio path field (everything before the first delimiter)
    pub audio_path: String,
    /// Remaining fields rejoined with the delimiter; empty when the line
    /// contains no delimiter
    pub transcript: String,
}

/// Split a raw manifest line at the first delimiter.
pub fn parse_line(line: &str) -> ManifestRecord {
    match line.split_once(DELIMITER) {
        Some((audio_path, transcript)) => ManifestRecord {
            audio_path: audio_path.to_string(),
            transcript: transcript.to_string(),
        },
        None => ManifestRecord {
            audio_path: line.to_string(),
            transcript: String::new(),
        },
    }
}

/// Whether a line is blank (empty or whitespace-only).
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether a transcript is empty once punctuation and whitespace are removed.
pub fn transcript_is_empty(transcript: &str) -> bool {
    transcript
        .chars()
        .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Normalize a referenced audio path for cross-platform comparison.
///
/// Manifests written on Windows may spell `wavs\a.wav`; the same file on disk
/// enumerates as `wavs/a.wav`. Comparisons go through this form.
pub fn canonical_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Load a manifest file into lines.
///
/// Line terminators are stripped (`\n` and `\r\n`). A trailing newline does
/// not produce a final empty line; interior blank lines are kept so the
/// blank-line check can report them.
pub fn load_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    Ok(lines)
}
