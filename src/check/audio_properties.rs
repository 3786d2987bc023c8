//! F002: audio files have the expected channel count, sample rate and
//! duration.
//!
//! Files `hound` cannot decode are skipped here, not flagged; F003 owns the
//! question of whether every file decodes.

use crate::audio::{self, WavProperties};
use crate::check::{list_audio_files, Check, CheckError, CheckInfo, CheckKind};
use crate::context::{ExpectedProperties, RunContext};
use crate::report::{Message, TagKind};
use tracing::debug;

#[derive(Default)]
pub struct AudioPropertiesCheck {
    errors: Vec<Message>,
}

fn channel_mode(channels: u16) -> String {
    match channels {
        1 => "mono".to_string(),
        2 => "stereo".to_string(),
        n => format!("{n}ch"),
    }
}

/// Composite `[ channels, rate, duration ]` message with each sub-property
/// tagged valid or invalid on its own.
fn property_message(relative: &str, props: &WavProperties, expected: &ExpectedProperties) -> Message {
    let mut message = Message::new().with(TagKind::File, format!("{relative:>44}"));
    message.push(TagKind::Plain, " [ ");

    let channel_tag = if props.channel_count == expected.channel_count {
        TagKind::Valid
    } else {
        TagKind::Invalid
    };
    message.push(channel_tag, format!("{:^6}", channel_mode(props.channel_count)));
    message.push(TagKind::Plain, ", ");

    let rate_tag = if props.sample_rate == expected.sample_rate {
        TagKind::Valid
    } else {
        TagKind::Invalid
    };
    message.push(rate_tag, format!("{:^5}", props.sample_rate));
    message.push(TagKind::Plain, ", ");

    let duration_ok = (expected.min_duration_ms..=expected.max_duration_ms)
        .contains(&props.duration_ms);
    let duration_tag = if duration_ok {
        TagKind::Valid
    } else {
        TagKind::Invalid
    };
    message.push(duration_tag, audio::format_duration(props.duration_ms));
    message.push(TagKind::Plain, " ]");
    message
}

impl Check for AudioPropertiesCheck {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "F002",
            name: "AudioProperties",
            description: "Check channel count, sample rate and duration of every audio file",
            version: "1.1.0",
            kind: CheckKind::File,
        }
    }

    fn run(&mut self, ctx: &RunContext) -> Result<(), CheckError> {
        let expected = &ctx.expected;
        for entry in list_audio_files(ctx)? {
            let props = match audio::probe(&entry.path) {
                Ok(props) => props,
                Err(err) => {
                    // Undecodable files are F003's territory
                    debug!(file = %entry.relative, error = %err, "skipping undecodable file");
                    continue;
                }
            };

            let channels_ok = props.channel_count <= expected.channel_count;
            let rate_ok = props.sample_rate == expected.sample_rate;
            let duration_ok = (expected.min_duration_ms..=expected.max_duration_ms)
                .contains(&props.duration_ms);

            if !(channels_ok && rate_ok && duration_ok) {
                self.errors
                    .push(property_message(&entry.relative, &props, expected));
            }
        }
        Ok(())
    }

    fn errors(&self) -> &[Message] {
        &self.errors
    }

    fn success_message(&self) -> &'static str {
        "All audio files have the expected properties"
    }

    fn error_message(&self, count: usize) -> String {
        format!("Found {count} audio file(s) with unexpected properties")
    }
}
