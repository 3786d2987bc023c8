//! Fuzz target for manifest line parsing.
//!
//! Malformed manifest lines must parse without panicking, and splitting
//! must never lose text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voxcheck::manifest::{parse_line, transcript_is_empty, DELIMITER};

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let record = parse_line(line);
        let _ = transcript_is_empty(&record.transcript);

        // Rejoining the fields reproduces the input line
        if record.transcript.is_empty() && !line.contains(DELIMITER) {
            assert_eq!(record.audio_path, line);
        } else {
            assert_eq!(
                format!("{}{}{}", record.audio_path, DELIMITER, record.transcript),
                line
            );
        }
    }
});
