//! Extraction strategies, one per [`InputFormat`](crate::format::InputFormat).
//!
//! - [`LineExtractor`] - one record per line of a text export
//! - [`JsonArrayExtractor`] - flat JSON array of message objects
//! - [`ChunkedExtractor`] - JSON object holding chunk arrays

mod chunked;
mod json_array;
mod line;

pub use chunked::ChunkedExtractor;
pub use json_array::JsonArrayExtractor;
pub use line::LineExtractor;

use serde_json::Value;

/// Short JSON type name for diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses decoded text as JSON, mapping syntax errors to `MalformedDocument`.
pub(crate) fn parse_document(text: &str) -> crate::Result<Value> {
    serde_json::from_str(text).map_err(crate::NormalizationError::malformed_json)
}
