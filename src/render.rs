//! Presentation of tagged report messages.
//!
//! The checks produce structured [`Message`]s; these renderers turn them into
//! console or file text. Check logic never depends on the presentation
//! encoding, only on the tag vocabulary.

use crate::report::{Message, Span, TagKind};
use colored::Colorize;

/// A message renderer.
pub trait Render {
    fn render(&self, message: &Message) -> String;
}

/// Renders messages with ANSI colors for terminal output.
///
/// `colored` disables itself automatically when stdout is not a terminal.
pub struct AnsiRenderer;

impl Render for AnsiRenderer {
    fn render(&self, message: &Message) -> String {
        message.spans().iter().map(paint).collect()
    }
}

fn paint(span: &Span) -> String {
    match span.kind {
        TagKind::Plain => span.text.clone(),
        TagKind::Error => span.text.bright_red().bold().to_string(),
        TagKind::Valid => span.text.green().bold().to_string(),
        TagKind::Invalid => span.text.red().bold().to_string(),
        TagKind::Warning => span.text.yellow().bold().to_string(),
        TagKind::Info => span.text.cyan().to_string(),
        TagKind::File => span.text.bright_cyan().to_string(),
        TagKind::Integer => span.text.bright_green().bold().to_string(),
        TagKind::Colon => span.text.bright_blue().bold().to_string(),
    }
}

/// Renders messages as plain text with all presentation stripped.
///
/// Used for the persisted report file and the JSON output format.
pub struct PlainRenderer;

impl Render for PlainRenderer {
    fn render(&self, message: &Message) -> String {
        message.plain_text()
    }
}
