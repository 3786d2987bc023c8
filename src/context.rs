//! Run context shared by all checks.
//!
//! The context is built once per run from the CLI arguments, validated at
//! construction, and passed by shared reference to every check. Checks never
//! mutate it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from context construction.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("No transcription manifest files configured")]
    NoManifests,

    #[error("Audio directory name is empty")]
    EmptyAudioDir,

    #[error("Sample rate must be positive")]
    ZeroSampleRate,

    #[error("Channel count must be positive")]
    ZeroChannels,

    #[error("Minimum duration {min}ms exceeds maximum duration {max}ms")]
    DurationRange { min: u64, max: u64 },
}

/// Expected audio and manifest properties for a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedProperties {
    /// Exact sample rate every audio file must have
    pub sample_rate: u32,
    /// Maximum channel count an audio file may have
    pub channel_count: u16,
    /// Minimum audio duration in milliseconds (inclusive)
    pub min_duration_ms: u64,
    /// Maximum audio duration in milliseconds (inclusive)
    pub max_duration_ms: u64,
    /// Maximum number of pipe delimiters a manifest line may contain
    pub max_delimiter_count: usize,
}

impl Default for ExpectedProperties {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            channel_count: 1,
            min_duration_ms: 2000,
            max_duration_ms: 10000,
            max_delimiter_count: 1,
        }
    }
}

/// How the duplicate-path check keys referenced audio paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeying {
    /// Separator-normalized keys: `wavs/a.wav` and `wavs\a.wav` collide
    #[default]
    Canonical,
    /// Raw string keys, for datasets that distinguish separator spellings
    Raw,
}

/// Immutable per-run configuration shared by every check.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Base directory containing the audio subfolder and manifest files
    pub dataset_root: PathBuf,
    /// Manifest file names, in reporting order
    pub manifest_files: Vec<String>,
    /// Name of the subfolder holding the audio files
    pub audio_dir_name: String,
    /// Expected audio and manifest properties
    pub expected: ExpectedProperties,
    /// Keying policy for the duplicate-path check
    pub duplicate_keying: DuplicateKeying,
}

impl RunContext {
    /// Build and validate a run context.
    pub fn new(
        dataset_root: impl Into<PathBuf>,
        manifest_files: Vec<String>,
        audio_dir_name: impl Into<String>,
        expected: ExpectedProperties,
        duplicate_keying: DuplicateKeying,
    ) -> Result<Self, ContextError> {
        let audio_dir_name = audio_dir_name.into();

        if manifest_files.is_empty() || manifest_files.iter().all(|f| f.trim().is_empty()) {
            return Err(ContextError::NoManifests);
        }
        if audio_dir_name.trim().is_empty() {
            return Err(ContextError::EmptyAudioDir);
        }
        if expected.sample_rate == 0 {
            return Err(ContextError::ZeroSampleRate);
        }
        if expected.channel_count == 0 {
            return Err(ContextError::ZeroChannels);
        }
        if expected.min_duration_ms > expected.max_duration_ms {
            return Err(ContextError::DurationRange {
                min: expected.min_duration_ms,
                max: expected.max_duration_ms,
            });
        }

        Ok(Self {
            dataset_root: dataset_root.into(),
            manifest_files,
            audio_dir_name,
            expected,
            duplicate_keying,
        })
    }

    /// Absolute or relative path of the audio subfolder.
    pub fn audio_dir(&self) -> PathBuf {
        self.dataset_root.join(&self.audio_dir_name)
    }

    /// Path of a manifest file under the dataset root.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.dataset_root.join(name)
    }

    /// Path of an audio file referenced by a manifest line.
    pub fn referenced_path(&self, raw: &str) -> PathBuf {
        self.dataset_root.join(Path::new(raw))
    }
}
