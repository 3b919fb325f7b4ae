//! Unified error types for chatclean.
//!
//! This module provides a single [`NormalizationError`] enum covering every
//! way a `normalize()` call can fail as a whole, plus [`RecordError`] for the
//! per-record problems that are contained inside the extractors.
//!
//! # Error Handling Philosophy
//!
//! - **Document-level** problems (undecodable bytes, unrecognized JSON shape)
//!   abort the call.
//! - **Record-level** problems never abort: the record becomes a placeholder
//!   line and a `tracing` warning is emitted.
//! - [`EmptyResult`](NormalizationError::EmptyResult) is an advisory, not a
//!   hard failure. Callers should present it more gently than the others.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized [`Result`] type for chatclean operations.
///
/// # Example
///
/// ```rust
/// use chatclean::error::Result;
///
/// fn my_function() -> Result<String> {
///     Ok(String::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, NormalizationError>;

/// The error type for all chatclean operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormalizationError {
    /// Neither UTF-8 nor the GBK fallback could decode the input.
    #[error("Could not decode input: {detail}")]
    DecodeFailure {
        /// What went wrong, suitable for showing to the end user
        detail: String,
    },

    /// The top-level document shape is not one we recognize.
    ///
    /// This occurs when:
    /// - The JSON is syntactically invalid
    /// - The JSON root is neither an array nor an object
    /// - A root object carries none of the recognized chunk keys
    #[error("Malformed document: {detail}")]
    MalformedDocument {
        /// Description of what's wrong
        detail: String,
        /// The underlying JSON error, if the document failed to parse
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The input was well-formed but produced no usable lines.
    #[error("No usable content: {detail}")]
    EmptyResult {
        /// Why nothing was produced
        detail: String,
    },

    /// An I/O error occurred while the caller was reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The caller refused an input above its configured size cap.
    #[error("Input too large: {size} bytes (maximum: {limit} bytes)")]
    InputTooLarge {
        /// Actual input size in bytes
        size: u64,
        /// Configured maximum in bytes
        limit: u64,
    },
}

/// Tag identifying the kind of a [`NormalizationError`].
///
/// Serializable so that an HTTP layer can forward it to a client verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    DecodeFailure,
    MalformedDocument,
    EmptyResult,
    Io,
    InputTooLarge,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DecodeFailure => write!(f, "DecodeFailure"),
            ErrorKind::MalformedDocument => write!(f, "MalformedDocument"),
            ErrorKind::EmptyResult => write!(f, "EmptyResult"),
            ErrorKind::Io => write!(f, "Io"),
            ErrorKind::InputTooLarge => write!(f, "InputTooLarge"),
        }
    }
}

/// A problem with a single record inside an otherwise valid document.
///
/// Extractors turn these into placeholder records; they are never returned
/// from [`normalize`](crate::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The entry is not a JSON object
    #[error("entry is not a JSON object")]
    NotAnObject,
    /// A field holds a value of the wrong JSON type
    #[error("field `{field}` has the wrong type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// A container that should hold chunks is not an array
    #[error("`{field}` is not an array")]
    NotAnArray { field: String },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl NormalizationError {
    /// Creates a decode failure.
    pub fn decode_failure(detail: impl Into<String>) -> Self {
        NormalizationError::DecodeFailure {
            detail: detail.into(),
        }
    }

    /// Creates a malformed-document error without an underlying source.
    pub fn malformed(detail: impl Into<String>) -> Self {
        NormalizationError::MalformedDocument {
            detail: detail.into(),
            source: None,
        }
    }

    /// Creates a malformed-document error from a JSON syntax error.
    pub fn malformed_json(source: serde_json::Error) -> Self {
        NormalizationError::MalformedDocument {
            detail: format!("invalid JSON: {}", source),
            source: Some(source),
        }
    }

    /// Creates an empty-result advisory.
    pub fn empty_result(detail: impl Into<String>) -> Self {
        NormalizationError::EmptyResult {
            detail: detail.into(),
        }
    }

    /// Creates an input-too-large error.
    pub fn input_too_large(size: u64, limit: u64) -> Self {
        NormalizationError::InputTooLarge { size, limit }
    }

    /// Returns the kind tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NormalizationError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            NormalizationError::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            NormalizationError::EmptyResult { .. } => ErrorKind::EmptyResult,
            NormalizationError::Io(_) => ErrorKind::Io,
            NormalizationError::InputTooLarge { .. } => ErrorKind::InputTooLarge,
        }
    }

    /// Returns the human-readable detail string, without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            NormalizationError::DecodeFailure { detail }
            | NormalizationError::MalformedDocument { detail, .. }
            | NormalizationError::EmptyResult { detail } => detail.clone(),
            NormalizationError::Io(e) => e.to_string(),
            NormalizationError::InputTooLarge { size, limit } => {
                format!("{} bytes exceeds the {} byte limit", size, limit)
            }
        }
    }

    /// Returns `true` if this outcome should be shown as an advisory rather
    /// than an error.
    pub fn is_advisory(&self) -> bool {
        self.is_empty_result()
    }

    /// Returns `true` if this is a decode failure.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, NormalizationError::DecodeFailure { .. })
    }

    /// Returns `true` if this is a malformed-document error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, NormalizationError::MalformedDocument { .. })
    }

    /// Returns `true` if this is an empty-result advisory.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, NormalizationError::EmptyResult { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, NormalizationError::Io(_))
    }
}

impl From<serde_json::Error> for NormalizationError {
    fn from(err: serde_json::Error) -> Self {
        NormalizationError::malformed_json(err)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Display tests
    // =========================================================================

    #[test]
    fn test_decode_failure_display() {
        let err = NormalizationError::decode_failure("neither utf-8 nor gbk");
        let display = err.to_string();
        assert!(display.contains("decode"));
        assert!(display.contains("neither utf-8 nor gbk"));
    }

    #[test]
    fn test_malformed_display() {
        let err = NormalizationError::malformed("JSON root is a number");
        assert!(err.to_string().contains("Malformed document"));
        assert!(err.to_string().contains("JSON root is a number"));
    }

    #[test]
    fn test_malformed_json_keeps_source() {
        use std::error::Error;
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = NormalizationError::malformed_json(json_err);
        assert!(err.is_malformed());
        assert!(err.source().is_some());
        assert!(err.detail().starts_with("invalid JSON"));
    }

    #[test]
    fn test_malformed_without_source() {
        use std::error::Error;
        let err = NormalizationError::malformed("bad root");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_empty_result_display() {
        let err = NormalizationError::empty_result("no records");
        assert!(err.to_string().contains("No usable content"));
    }

    #[test]
    fn test_input_too_large_display() {
        let err = NormalizationError::input_too_large(2048, 1024);
        let display = err.to_string();
        assert!(display.contains("2048"));
        assert!(display.contains("1024"));
    }

    #[test]
    fn test_io_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = NormalizationError::from(io_err);
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("file not found"));
    }

    // =========================================================================
    // Kind / detail
    // =========================================================================

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            NormalizationError::decode_failure("x").kind(),
            ErrorKind::DecodeFailure
        );
        assert_eq!(
            NormalizationError::malformed("x").kind(),
            ErrorKind::MalformedDocument
        );
        assert_eq!(
            NormalizationError::empty_result("x").kind(),
            ErrorKind::EmptyResult
        );
        assert_eq!(
            NormalizationError::input_too_large(2, 1).kind(),
            ErrorKind::InputTooLarge
        );
    }

    #[test]
    fn test_detail_has_no_prefix() {
        let err = NormalizationError::empty_result("nothing left after cleaning");
        assert_eq!(err.detail(), "nothing left after cleaning");
    }

    #[test]
    fn test_only_empty_result_is_advisory() {
        assert!(NormalizationError::empty_result("x").is_advisory());
        assert!(!NormalizationError::decode_failure("x").is_advisory());
        assert!(!NormalizationError::malformed("x").is_advisory());
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&ErrorKind::MalformedDocument).unwrap();
        assert_eq!(json, "\"malformedDocument\"");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: NormalizationError = json_err.into();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_record_error_display() {
        let err = RecordError::WrongType {
            field: "text",
            expected: "string",
        };
        assert_eq!(
            err.to_string(),
            "field `text` has the wrong type (expected string)"
        );
        let err = RecordError::NotAnArray {
            field: "pendingInputs".into(),
        };
        assert!(err.to_string().contains("pendingInputs"));
    }
}
