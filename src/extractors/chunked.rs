//! Chunked JSON document extractor.
//!
//! Handles prompt-studio style exports:
//!
//! ```json
//! {
//!   "chunkedPrompt": {"chunks": [{"role": "user", "text": "..."}]},
//!   "pendingInputs": [{"role": "model", "text": "..."}]
//! }
//! ```

use serde_json::{Map, Value};

use super::{json_type_name, parse_document};
use crate::config::NormalizationOptions;
use crate::error::{NormalizationError, RecordError, Result};
use crate::extractor::Extractor;
use crate::format::InputFormat;
use crate::record::{MODEL_LABEL, Record, USER_LABEL};

const CHUNKED_PROMPT: &str = "chunkedPrompt";
const CHUNKS: &str = "chunks";
const PENDING_INPUTS: &str = "pendingInputs";

/// Extractor for objects holding `chunkedPrompt.chunks` and/or
/// `pendingInputs` arrays.
///
/// Chunks are read from `chunkedPrompt.chunks` first, then `pendingInputs`.
/// Role `user` maps to `(user)`, `model` to `(model)`. Chunks with another
/// role, with no text, or that are not objects are skipped silently. A
/// non-string `text`, or a container that is not an array, becomes a
/// placeholder tagged with its location.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkedExtractor;

impl ChunkedExtractor {
    /// Creates a new chunked-document extractor.
    pub fn new() -> Self {
        Self
    }

    /// Appends records for one chunk array. `path` names it in diagnostics.
    fn extract_chunks(chunks: &Value, path: &str, records: &mut Vec<Record>) {
        let chunks = match chunks {
            Value::Null => return,
            Value::Array(chunks) => chunks,
            _ => {
                records.push(Record::placeholder(
                    path,
                    &RecordError::NotAnArray {
                        field: path.to_string(),
                    },
                ));
                return;
            }
        };

        for (index, chunk) in chunks.iter().enumerate() {
            let Value::Object(chunk) = chunk else {
                continue;
            };
            match extract_chunk(chunk) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => records.push(Record::placeholder(format!("{path}[{index}]"), &e)),
            }
        }
    }
}

/// Maps a role to its sender label.
fn role_label(role: &str) -> Option<&'static str> {
    match role {
        "user" => Some(USER_LABEL),
        "model" => Some(MODEL_LABEL),
        _ => None,
    }
}

fn extract_chunk(chunk: &Map<String, Value>) -> std::result::Result<Option<Record>, RecordError> {
    let Some(label) = chunk.get("role").and_then(Value::as_str).and_then(role_label) else {
        return Ok(None);
    };
    match chunk.get("text") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(Record::message(label, text.as_str(), None))),
        Some(_) => Err(RecordError::WrongType {
            field: "text",
            expected: "string",
        }),
    }
}

impl Extractor for ChunkedExtractor {
    fn name(&self) -> &'static str {
        "JSON chunks"
    }

    fn format(&self) -> InputFormat {
        InputFormat::JsonChunked
    }

    fn extract(&self, text: &str, _options: &NormalizationOptions) -> Result<Vec<Record>> {
        let document = parse_document(text)?;
        let root = match document {
            Value::Object(root) => root,
            other => {
                return Err(NormalizationError::malformed(format!(
                    "expected a JSON object with `{CHUNKED_PROMPT}` or `{PENDING_INPUTS}`, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let prompt = root.get(CHUNKED_PROMPT);
        let pending = root.get(PENDING_INPUTS);
        if prompt.is_none() && pending.is_none() {
            return Err(NormalizationError::malformed(format!(
                "object has neither `{CHUNKED_PROMPT}` nor `{PENDING_INPUTS}`"
            )));
        }

        let mut records = Vec::new();
        match prompt {
            None | Some(Value::Null) => {}
            Some(Value::Object(prompt)) => {
                if let Some(chunks) = prompt.get(CHUNKS) {
                    Self::extract_chunks(chunks, "chunkedPrompt.chunks", &mut records);
                }
            }
            Some(_) => records.push(Record::placeholder(
                CHUNKED_PROMPT,
                &RecordError::NotAnObject,
            )),
        }
        if let Some(pending) = pending {
            Self::extract_chunks(pending, PENDING_INPUTS, &mut records);
        }
        Ok(records)
    }
}
