//! Flat JSON array extractor.
//!
//! Handles exports shaped as
//!
//! ```json
//! [
//!   {"id": 1, "sender": "Alice", "content": "hi", "timestamp": "2024-01-01T10:00:00Z"}
//! ]
//! ```

use serde_json::{Map, Value};

use super::{json_type_name, parse_document};
use crate::config::NormalizationOptions;
use crate::error::{NormalizationError, RecordError, Result};
use crate::extractor::Extractor;
use crate::format::InputFormat;
use crate::record::{Record, UNKNOWN_ID, UNKNOWN_SENDER};

/// Extractor for flat arrays of `{sender, content, timestamp, id?}` objects.
///
/// Per entry:
/// - `sender` absent or `null` becomes [`UNKNOWN_SENDER`]
/// - `content` absent or `null` becomes empty
/// - `timestamp` absent, `null` or empty means missing; with
///   `require_timestamp` the entry is skipped
/// - a non-object entry or a field of the wrong type becomes a placeholder
///
/// A root that is not an array is a `MalformedDocument`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayExtractor;

impl JsonArrayExtractor {
    /// Creates a new flat-array extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extracts one entry. `Ok(None)` means the entry was skipped.
    fn extract_entry(
        entry: &Map<String, Value>,
        options: &NormalizationOptions,
    ) -> std::result::Result<Option<Record>, RecordError> {
        let sender = string_field(entry, "sender")?;
        let content = string_field(entry, "content")?;
        let timestamp = string_field(entry, "timestamp")?.filter(|ts| !ts.is_empty());

        if timestamp.is_none() && options.require_timestamp {
            tracing::warn!(
                id = entry_id(entry).as_deref().unwrap_or(UNKNOWN_ID),
                "message has no timestamp, skipping"
            );
            return Ok(None);
        }

        let record = Record::message(
            sender.unwrap_or(UNKNOWN_SENDER),
            content.unwrap_or_default(),
            timestamp,
        )
        .with_id(entry_id(entry));
        Ok(Some(record))
    }
}

/// Reads an optional string field. `null` counts as absent.
fn string_field<'a>(
    entry: &'a Map<String, Value>,
    field: &'static str,
) -> std::result::Result<Option<&'a str>, RecordError> {
    match entry.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(RecordError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Reads `id` for diagnostics; strings and numbers are accepted.
fn entry_id(entry: &Map<String, Value>) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Extractor for JsonArrayExtractor {
    fn name(&self) -> &'static str {
        "JSON array"
    }

    fn format(&self) -> InputFormat {
        InputFormat::JsonArray
    }

    fn extract(&self, text: &str, options: &NormalizationOptions) -> Result<Vec<Record>> {
        let document = parse_document(text)?;
        let entries = match document {
            Value::Array(entries) => entries,
            other => {
                return Err(NormalizationError::malformed(format!(
                    "expected a JSON array of messages, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Value::Object(fields) = entry else {
                records.push(Record::placeholder(UNKNOWN_ID, &RecordError::NotAnObject));
                continue;
            };
            match Self::extract_entry(fields, options) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    let id = entry_id(fields).unwrap_or_else(|| UNKNOWN_ID.to_string());
                    records.push(Record::placeholder(id, &e));
                }
            }
        }
        Ok(records)
    }
}
