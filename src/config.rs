//! Normalization options.
//!
//! Every legacy cleaner variant grew its own flags. They are consolidated
//! here into one [`NormalizationOptions`] struct with documented defaults per
//! [`InputFormat`].
//!
//! # Which option applies where
//!
//! | Option                     | line-oriented | json-array | json-chunked |
//! |----------------------------|:-------------:|:----------:|:------------:|
//! | `strip_timestamp`          | yes           | -          | -            |
//! | `show_timestamp`           | -             | yes        | -            |
//! | `keep_subsecond_precision` | -             | yes        | -            |
//! | `require_timestamp`        | -             | yes        | -            |
//! | `strip_media_markers`      | truncate      | replace    | replace      |
//! | `strip_markdown`           | -             | yes        | yes          |
//!
//! Options marked `-` are silently ignored for that format.
//!
//! # Example
//!
//! ```rust
//! use chatclean::config::NormalizationOptions;
//! use chatclean::format::InputFormat;
//!
//! let options = NormalizationOptions::for_format(InputFormat::JsonArray)
//!     .with_strip_markdown(true)
//!     .with_keep_subsecond_precision(true);
//!
//! assert!(options.show_timestamp);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::NormalizationError;
use crate::format::InputFormat;

/// Configuration for one `normalize()` call.
///
/// Serialized field names are camelCase (`stripTimestamp`, `showTimestamp`,
/// ...) so an options document posted by a web form deserializes directly.
/// Missing fields take the [`Default`] (json-array) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NormalizationOptions {
    /// Remove a leading `^\d+\s+` run from each line (line-oriented only)
    pub strip_timestamp: bool,

    /// Emit a timestamp line before each message (json-array only)
    pub show_timestamp: bool,

    /// Render timestamps as UTC with millisecond precision instead of
    /// naive second precision
    pub keep_subsecond_precision: bool,

    /// Drop or relabel embedded image/video path markers
    pub strip_media_markers: bool,

    /// Reduce markdown markup to plain text (JSON formats only)
    pub strip_markdown: bool,

    /// Skip flat-array messages that carry no timestamp. When `false` they
    /// are kept and show a missing-timestamp placeholder instead.
    pub require_timestamp: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self::json_array()
    }
}

impl NormalizationOptions {
    /// Creates options with the default (json-array) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the documented defaults for a source format.
    pub fn for_format(format: InputFormat) -> Self {
        match format {
            InputFormat::LineOriented => Self::line_oriented(),
            InputFormat::JsonArray => Self::json_array(),
            InputFormat::JsonChunked => Self::json_chunked(),
        }
    }

    /// Defaults for line-oriented exports: strip leading timestamps and
    /// truncate lines at media markers.
    pub fn line_oriented() -> Self {
        Self {
            strip_timestamp: true,
            show_timestamp: false,
            keep_subsecond_precision: false,
            strip_media_markers: true,
            strip_markdown: false,
            require_timestamp: false,
        }
    }

    /// Defaults for flat JSON arrays: show second-precision timestamps,
    /// relabel media markers, skip messages without a timestamp.
    pub fn json_array() -> Self {
        Self {
            strip_timestamp: false,
            show_timestamp: true,
            keep_subsecond_precision: false,
            strip_media_markers: true,
            strip_markdown: false,
            require_timestamp: true,
        }
    }

    /// Defaults for chunked JSON documents: markdown reduced to plain text.
    pub fn json_chunked() -> Self {
        Self {
            strip_timestamp: false,
            show_timestamp: false,
            keep_subsecond_precision: false,
            strip_media_markers: false,
            strip_markdown: true,
            require_timestamp: false,
        }
    }

    /// Parses an options document such as `{"showTimestamp": false}`.
    ///
    /// Fields left out keep their [`Default`] values.
    pub fn from_json_str(json: &str) -> Result<Self, NormalizationError> {
        serde_json::from_str(json).map_err(|e| NormalizationError::MalformedDocument {
            detail: format!("invalid options: {}", e),
            source: Some(e),
        })
    }

    /// Overlays the fields present in an options document onto `self`.
    ///
    /// Unlike [`from_json_str`](Self::from_json_str), fields left out keep
    /// the values of `self`, so per-format defaults survive.
    ///
    /// ```rust
    /// use chatclean::config::NormalizationOptions;
    ///
    /// let options = NormalizationOptions::line_oriented()
    ///     .with_json_overrides(r#"{"stripMediaMarkers": false}"#)?;
    /// assert!(options.strip_timestamp);
    /// assert!(!options.strip_media_markers);
    /// # Ok::<(), chatclean::NormalizationError>(())
    /// ```
    pub fn with_json_overrides(self, json: &str) -> Result<Self, NormalizationError> {
        let invalid = |e: serde_json::Error| NormalizationError::MalformedDocument {
            detail: format!("invalid options: {}", e),
            source: Some(e),
        };

        let overrides: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(invalid)?;
        let mut merged = match serde_json::to_value(self).map_err(invalid)? {
            serde_json::Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        merged.extend(overrides);
        serde_json::from_value(serde_json::Value::Object(merged)).map_err(invalid)
    }

    /// Sets whether leading line timestamps are stripped.
    #[must_use]
    pub fn with_strip_timestamp(mut self, strip: bool) -> Self {
        self.strip_timestamp = strip;
        self
    }

    /// Sets whether timestamp lines are shown.
    #[must_use]
    pub fn with_show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    /// Sets whether sub-second precision is kept.
    #[must_use]
    pub fn with_keep_subsecond_precision(mut self, keep: bool) -> Self {
        self.keep_subsecond_precision = keep;
        self
    }

    /// Sets whether media markers are stripped.
    #[must_use]
    pub fn with_strip_media_markers(mut self, strip: bool) -> Self {
        self.strip_media_markers = strip;
        self
    }

    /// Sets whether markdown is stripped.
    #[must_use]
    pub fn with_strip_markdown(mut self, strip: bool) -> Self {
        self.strip_markdown = strip;
        self
    }

    /// Sets whether messages without a timestamp are skipped.
    #[must_use]
    pub fn with_require_timestamp(mut self, require: bool) -> Self {
        self.require_timestamp = require;
        self
    }
}
