//! WAV file inspection.
//!
//! Two independent views of an audio file: decoded properties (sample rate,
//! channels, duration) through `hound`, and a strict RIFF container scan that
//! classifies structural problems `hound` tolerates or reports opaquely.

use std::io;
use std::path::Path;

/// Decoded properties of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavProperties {
    pub sample_rate: u32,
    pub channel_count: u16,
    /// Duration in integer milliseconds (`frames * 1000 / sample_rate`)
    pub duration_ms: u64,
}

/// Read the properties of a WAV file.
pub fn probe(path: &Path) -> Result<WavProperties, hound::Error> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    // hound accepts a fmt chunk declaring rate 0; reject it here so the
    // duration division below cannot panic.
    if spec.sample_rate == 0 {
        return Err(hound::Error::FormatError("sample rate is zero"));
    }
    let frames = reader.duration() as u64;
    Ok(WavProperties {
        sample_rate: spec.sample_rate,
        channel_count: spec.channels,
        duration_ms: frames * 1000 / spec.sample_rate as u64,
    })
}

/// Format a millisecond duration as `HH:MM:SS.mmm`.
pub fn format_duration(ms: u64) -> String {
    let (seconds, millis) = (ms / 1000, ms % 1000);
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Outcome of the strict container scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavIntegrity {
    /// Well-formed container with only fmt/fact/data chunks
    Clean,
    /// Well-formed, but carries chunks a plain encoder would not write
    /// (LIST/INFO metadata, cue points, ...)
    ExtraneousChunk,
    /// A chunk header promises more bytes than the file holds
    Truncated,
    /// Missing RIFF/WAVE magic
    NotWav,
    /// Structurally implausible in some other way (e.g. undersized fmt chunk)
    Unknown,
}

/// Classify the container of a WAV file.
///
/// I/O failures are propagated; every readable file gets exactly one
/// classification.
pub fn inspect_container(path: &Path) -> io::Result<WavIntegrity> {
    let bytes = std::fs::read(path)?;
    Ok(classify(&bytes))
}

/// Classify a WAV container from its raw bytes.
pub fn classify(bytes: &[u8]) -> WavIntegrity {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return WavIntegrity::NotWav;
    }

    let riff_size = read_u32(bytes, 4) as usize;
    if riff_size.saturating_add(8) > bytes.len() {
        return WavIntegrity::Truncated;
    }

    let mut offset = 12;
    let mut seen_fmt = false;
    let mut seen_data = false;
    let mut extraneous = false;

    while offset < bytes.len() {
        if offset + 8 > bytes.len() {
            // Leftover bytes too short for a chunk header
            return WavIntegrity::Truncated;
        }
        let id = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4) as usize;
        let body_end = match (offset + 8).checked_add(size) {
            Some(end) if end <= bytes.len() => end,
            _ => return WavIntegrity::Truncated,
        };

        match id {
            b"fmt " => {
                if size < 16 {
                    return WavIntegrity::Unknown;
                }
                seen_fmt = true;
            }
            b"data" => seen_data = true,
            b"fact" => {}
            _ => extraneous = true,
        }

        // Chunk bodies are word-aligned; odd sizes carry a pad byte
        offset = body_end + (size & 1);
    }

    if !seen_fmt || !seen_data {
        return WavIntegrity::Truncated;
    }
    if extraneous {
        return WavIntegrity::ExtraneousChunk;
    }
    WavIntegrity::Clean
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
