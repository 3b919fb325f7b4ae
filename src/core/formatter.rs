//! Rendering of extracted records into the final transcript.
//!
//! | Format | Record rendering | Joined with |
//! |--------|------------------|-------------|
//! | line-oriented | sanitized line | `\n` |
//! | json-array | `[timestamp\n]sender：content` | `\n\n` |
//! | json-chunked | `sender\ncontent` | `\n\n` |
//!
//! Placeholders render as their marker line alone.

use crate::config::NormalizationOptions;
use crate::error::{NormalizationError, Result};
use crate::format::InputFormat;
use crate::record::Record;
use crate::sanitize::sanitize;
use crate::timestamp::parse_timestamp;

use super::processor::NormalizationStats;

/// Separator between sender and content in flat-array output.
pub const SENDER_SEPARATOR: char = '：';

/// Rendered transcript plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    pub text: String,
    pub stats: NormalizationStats,
}

/// Renders records of one format with one set of options.
///
/// # Example
///
/// ```rust
/// use chatclean::config::NormalizationOptions;
/// use chatclean::core::Formatter;
/// use chatclean::format::InputFormat;
/// use chatclean::record::Record;
///
/// let formatter = Formatter::new(
///     InputFormat::JsonArray,
///     NormalizationOptions::json_array().with_strip_markdown(true),
/// );
/// let records = vec![Record::message("A", "**hi**", Some("2024-01-01T10:00:00Z"))];
/// let formatted = formatter.format(&records)?;
/// assert_eq!(formatted.text, "2024-01-01T10:00:00\nA：hi");
/// # Ok::<(), chatclean::NormalizationError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: InputFormat,
    options: NormalizationOptions,
}

impl Formatter {
    /// Creates a formatter.
    pub fn new(format: InputFormat, options: NormalizationOptions) -> Self {
        Self { format, options }
    }

    /// Returns the text placed between rendered records.
    pub fn record_separator(&self) -> &'static str {
        match self.format {
            InputFormat::LineOriented => "\n",
            InputFormat::JsonArray | InputFormat::JsonChunked => "\n\n",
        }
    }

    /// Renders one record, or `None` if it sanitizes to nothing.
    ///
    /// Line-oriented records that came from a blank line render as an empty
    /// line instead of being dropped.
    pub fn render_record(&self, record: &Record) -> Option<String> {
        if record.is_placeholder() {
            return Some(record.content.clone());
        }

        let body = sanitize(&record.content, self.format, &self.options);
        match self.format {
            InputFormat::LineOriented => {
                if body.is_empty() && !record.is_blank_line() {
                    return None;
                }
                Some(body)
            }
            InputFormat::JsonArray => {
                if body.trim().is_empty() {
                    return None;
                }
                let sender = record.sender().unwrap_or_default();
                let line = format!("{sender}{SENDER_SEPARATOR}{body}");
                if self.options.show_timestamp {
                    let timestamp = parse_timestamp(record.timestamp_raw(), &self.options);
                    Some(format!("{}\n{line}", timestamp.render()))
                } else {
                    Some(line)
                }
            }
            InputFormat::JsonChunked => {
                if body.trim().is_empty() {
                    return None;
                }
                Some(format!("{}\n{body}", record.sender().unwrap_or_default()))
            }
        }
    }

    /// Renders all records in order.
    ///
    /// Returns [`EmptyResult`](NormalizationError::EmptyResult) when nothing
    /// (or only whitespace) would be emitted.
    pub fn format(&self, records: &[Record]) -> Result<Formatted> {
        let mut stats = NormalizationStats {
            records: records.len(),
            ..NormalizationStats::default()
        };

        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            match self.render_record(record) {
                Some(line) => {
                    if record.is_placeholder() {
                        stats.placeholders += 1;
                    }
                    lines.push(line);
                }
                None => {
                    tracing::debug!(id = record.display_id(), "record sanitized to empty, dropped");
                    stats.dropped += 1;
                }
            }
        }
        stats.emitted = lines.len();

        let text = lines.join(self.record_separator());
        if text.trim().is_empty() {
            return Err(NormalizationError::empty_result(format!(
                "{} record(s) extracted, none produced any text",
                stats.records
            )));
        }
        Ok(Formatted { text, stats })
    }
}
