//! Voxcheck library exports.
//!
//! Re-exports the validation engine for use by the CLI binary and the
//! integration tests.

pub mod audio;
pub mod check;
pub mod context;
pub mod driver;
pub mod manifest;
pub mod render;
pub mod report;

// Re-export commonly used types for convenience
pub use check::{Check, CheckError, CheckInfo, CheckKind};
pub use context::{DuplicateKeying, ExpectedProperties, RunContext};
pub use driver::{CheckOutcome, CheckStatus, ReportFormat, RunOptions};
