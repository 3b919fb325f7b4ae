//! Extracted chat records.
//!
//! A [`Record`] is one logical message as found in the source, before any
//! sanitization. Extractors create them, the formatter consumes them; they
//! never outlive a single `normalize()` call.
//!
//! # Example
//!
//! ```
//! use chatclean::record::{Record, RecordKind};
//!
//! let record = Record::message("Alice", "**hi**", Some("2024-01-01T10:00:00Z"));
//! assert_eq!(record.sender(), Some("Alice"));
//! assert_eq!(record.kind, RecordKind::Message);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Sender label used when a flat-array message has no `sender`.
pub const UNKNOWN_SENDER: &str = "未知发送者";

/// Identifier used in diagnostics when a message has no `id`.
pub const UNKNOWN_ID: &str = "未知ID";

/// Sender label for chunks with role `user`.
pub const USER_LABEL: &str = "(user)";

/// Sender label for chunks with role `model`.
pub const MODEL_LABEL: &str = "(model)";

/// What a record stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A message taken from the source
    #[default]
    Message,
    /// A marker line standing in for an entry that could not be read
    Placeholder,
}

/// One chat message as extracted from the source.
///
/// | Field | Line-oriented | Flat array | Chunked |
/// |-------|---------------|------------|---------|
/// | `sender` | absent | `sender` or [`UNKNOWN_SENDER`] | role label |
/// | `content` | line (timestamp removed when stripping) | `content` | `text` |
/// | `timestamp_raw` | leading digit run | `timestamp` | absent |
/// | `id` | absent | `id` | absent |
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Author label. Absent for line-oriented input.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Message body, raw.
    pub content: String,

    /// Timestamp text exactly as it appeared in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp_raw: Option<String>,

    /// Source identifier, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub kind: RecordKind,
}

impl Record {
    /// Creates a record for one line of a line-oriented export.
    ///
    /// `timestamp_raw` is the leading digit run, if any; `content` is
    /// whatever part of the line the extractor chose to keep.
    pub fn line(content: impl Into<String>, timestamp_raw: Option<&str>) -> Self {
        Self {
            sender: None,
            content: content.into(),
            timestamp_raw: timestamp_raw.map(str::to_owned),
            id: None,
            kind: RecordKind::Message,
        }
    }

    /// Creates a record for a structured message.
    pub fn message(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp_raw: Option<&str>,
    ) -> Self {
        Self {
            sender: Some(sender.into()),
            content: content.into(),
            timestamp_raw: timestamp_raw.map(str::to_owned),
            id: None,
            kind: RecordKind::Message,
        }
    }

    /// Creates a placeholder for an entry that failed to extract.
    ///
    /// The content is the fixed error marker naming `id`; the cause is only
    /// logged, never rendered.
    ///
    /// ```
    /// use chatclean::error::RecordError;
    /// use chatclean::record::Record;
    ///
    /// let record = Record::placeholder("42", &RecordError::NotAnObject);
    /// assert_eq!(record.content, "[错误：处理消息 42 失败]");
    /// assert!(record.is_placeholder());
    /// ```
    pub fn placeholder(id: impl Into<String>, error: &RecordError) -> Self {
        let id = id.into();
        tracing::warn!(id = %id, error = %error, "record could not be extracted, emitting placeholder");
        Self {
            sender: None,
            content: format!("[错误：处理消息 {} 失败]", id),
            timestamp_raw: None,
            id: Some(id),
            kind: RecordKind::Placeholder,
        }
    }

    /// Builder method to set the source identifier.
    #[must_use]
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    /// Returns the sender label, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the raw timestamp text, if any.
    pub fn timestamp_raw(&self) -> Option<&str> {
        self.timestamp_raw.as_deref()
    }

    /// Returns the identifier for diagnostics, [`UNKNOWN_ID`] when absent.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    /// Returns `true` for placeholder records.
    pub fn is_placeholder(&self) -> bool {
        self.kind == RecordKind::Placeholder
    }

    /// Returns `true` if this line-oriented record came from a blank line.
    ///
    /// Such records are kept as empty lines to preserve paragraph spacing.
    pub fn is_blank_line(&self) -> bool {
        self.sender.is_none()
            && self.timestamp_raw.is_none()
            && !self.is_placeholder()
            && self.content.trim().is_empty()
    }
}
