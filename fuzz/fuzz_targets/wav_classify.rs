//! Fuzz target for WAV container classification.
//!
//! Ensures arbitrary bytes always classify without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voxcheck::audio::classify;

fuzz_target!(|data: &[u8]| {
    // Every input gets exactly one classification
    let _ = classify(data);
});
