//! Structured report messages.
//!
//! Checks never embed presentation codes in their error text. Instead every
//! error is a sequence of spans, each carrying a semantic tag, and the
//! renderers in [`crate::render`] decide how a tag looks. The inline
//! `<file>…<file-end>` marker form exists only for the serialization
//! boundary.

/// Semantic category of a message span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Untagged text
    Plain,
    Error,
    Valid,
    Invalid,
    Warning,
    Info,
    /// A file path
    File,
    /// A line number or other integer
    Integer,
    /// A separator between location fields
    Colon,
}

impl TagKind {
    /// Marker name for the inline serialized form, `None` for plain text.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            TagKind::Plain => None,
            TagKind::Error => Some("error"),
            TagKind::Valid => Some("valid"),
            TagKind::Invalid => Some("invalid"),
            TagKind::Warning => Some("warning"),
            TagKind::Info => Some("info"),
            TagKind::File => Some("file"),
            TagKind::Integer => Some("int"),
            TagKind::Colon => Some("colon"),
        }
    }
}

/// One tagged text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: TagKind,
}

/// An ordered sequence of tagged spans forming one error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    spans: Vec<Span>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span.
    pub fn push(&mut self, kind: TagKind, text: impl Into<String>) {
        self.spans.push(Span {
            text: text.into(),
            kind,
        });
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, kind: TagKind, text: impl Into<String>) -> Self {
        self.push(kind, text);
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Concatenated text with all tags dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Serialize to the inline matched-marker form, e.g.
    /// `<file>list.txt<file-end><colon>: <colon-end>`.
    pub fn to_tagged(&self) -> String {
        self.spans
            .iter()
            .map(|s| match s.kind.marker() {
                Some(m) => format!("<{m}>{}<{m}-end>", s.text),
                None => s.text.clone(),
            })
            .collect()
    }
}
