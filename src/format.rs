//! Input format types.
//!
//! Chat exports arrive in one of two observed shapes. The line-oriented
//! export is plain text with optional leading numeric timestamps and inline
//! media markers; the structured export is JSON, either a flat array of
//! message objects or an object holding chunk arrays.
//!
//! # Example
//!
//! ```rust
//! use chatclean::format::{InputFormat, RawInput};
//! use std::str::FromStr;
//!
//! let format = InputFormat::from_str("chunked").unwrap();
//! assert_eq!(format, InputFormat::JsonChunked);
//!
//! let input = RawInput::guess(b"[{\"sender\":\"A\"}]", Some("chat.json"));
//! assert_eq!(input.format(), InputFormat::JsonArray);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source format of a chat export.
///
/// Selects the extraction strategy and the default
/// [`NormalizationOptions`](crate::config::NormalizationOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum InputFormat {
    /// One message per line, optional leading digit-run timestamp
    #[default]
    #[serde(alias = "line", alias = "txt")]
    LineOriented,

    /// JSON array of `{sender, content, timestamp, id?}` objects
    #[serde(alias = "array")]
    JsonArray,

    /// JSON object with `chunkedPrompt.chunks` and/or `pendingInputs`
    #[serde(alias = "chunked")]
    JsonChunked,
}

impl InputFormat {
    /// Returns the file extension exports in this format usually carry.
    pub fn default_extension(&self) -> &'static str {
        match self {
            InputFormat::LineOriented => "txt",
            InputFormat::JsonArray | InputFormat::JsonChunked => "json",
        }
    }

    /// Returns `true` for the JSON-based formats.
    pub fn is_structured(&self) -> bool {
        matches!(self, InputFormat::JsonArray | InputFormat::JsonChunked)
    }

    /// Returns all format names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "line-oriented",
            "line",
            "txt",
            "text",
            "json-array",
            "array",
            "json",
            "json-chunked",
            "chunked",
            "chunks",
        ]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [InputFormat] {
        &[
            InputFormat::LineOriented,
            InputFormat::JsonArray,
            InputFormat::JsonChunked,
        ]
    }

    /// Guesses the format family from a file name's extension.
    ///
    /// `.json` yields [`JsonArray`](InputFormat::JsonArray); callers narrow
    /// the JSON shape with [`sniff`](InputFormat::sniff).
    ///
    /// ```rust
    /// use chatclean::format::InputFormat;
    ///
    /// assert_eq!(InputFormat::from_path("log.TXT"), Some(InputFormat::LineOriented));
    /// assert_eq!(InputFormat::from_path("notes.md"), None);
    /// ```
    pub fn from_path(name: impl AsRef<Path>) -> Option<Self> {
        let ext = name.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(InputFormat::LineOriented),
            "json" => Some(InputFormat::JsonArray),
            _ => None,
        }
    }

    /// Guesses the format from the first meaningful byte of the payload.
    ///
    /// A UTF-8 BOM and ASCII whitespace are skipped; `[` means a flat JSON
    /// array, `{` a chunked JSON object, anything else line-oriented text.
    pub fn sniff(bytes: &[u8]) -> Self {
        let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match body.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') => InputFormat::JsonArray,
            Some(b'{') => InputFormat::JsonChunked,
            _ => InputFormat::LineOriented,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::LineOriented => write!(f, "line-oriented"),
            InputFormat::JsonArray => write!(f, "json-array"),
            InputFormat::JsonChunked => write!(f, "json-chunked"),
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line-oriented" | "line" | "txt" | "text" => Ok(InputFormat::LineOriented),
            "json-array" | "array" | "json" => Ok(InputFormat::JsonArray),
            "json-chunked" | "chunked" | "chunks" => Ok(InputFormat::JsonChunked),
            _ => Err(format!(
                "Unknown input format: '{}'. Expected one of: {}",
                s,
                InputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Raw bytes of an export together with their declared or guessed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInput<'a> {
    bytes: &'a [u8],
    format: InputFormat,
}

impl<'a> RawInput<'a> {
    /// Wraps bytes with an explicitly declared format.
    pub fn new(bytes: &'a [u8], format: InputFormat) -> Self {
        Self { bytes, format }
    }

    /// Wraps bytes, guessing the format from the file name and the content.
    ///
    /// A `.json` extension means JSON and the content only picks the shape.
    /// For `.txt` files and unknown extensions the content decides: a payload
    /// that opens with `[` or `{` and parses as JSON gets that JSON shape,
    /// anything else is line-oriented text. Exporters that save JSON under a
    /// `.txt` name are handled this way, while a text line such as
    /// `[图片] 路径: ...` stays text.
    ///
    /// ```rust
    /// use chatclean::format::{InputFormat, RawInput};
    ///
    /// let json_in_txt = br#"{"pendingInputs":[{"role":"user","text":"hi"}]}"#;
    /// let input = RawInput::guess(json_in_txt, Some("gemini_export.txt"));
    /// assert_eq!(input.format(), InputFormat::JsonChunked);
    ///
    /// let input = RawInput::guess("[图片] 路径: /a.png".as_bytes(), Some("chat.txt"));
    /// assert_eq!(input.format(), InputFormat::LineOriented);
    /// ```
    pub fn guess(bytes: &'a [u8], file_name: Option<&str>) -> Self {
        let format = match file_name.and_then(InputFormat::from_path) {
            Some(InputFormat::JsonArray | InputFormat::JsonChunked) => {
                match InputFormat::sniff(bytes) {
                    InputFormat::LineOriented => InputFormat::JsonArray,
                    shape => shape,
                }
            }
            Some(InputFormat::LineOriented) | None => match InputFormat::sniff(bytes) {
                InputFormat::LineOriented => InputFormat::LineOriented,
                shape if parses_as_json(bytes) => shape,
                _ => InputFormat::LineOriented,
            },
        };
        Self { bytes, format }
    }

    /// Returns the format extraction will actually use.
    ///
    /// A declared JSON format is narrowed to the shape of the payload's
    /// root, exactly as [`normalize`](crate::core::normalize) does, so
    /// callers can pick matching default options up front.
    ///
    /// ```rust
    /// use chatclean::format::{InputFormat, RawInput};
    ///
    /// let input = RawInput::new(br#"{"pendingInputs":[]}"#, InputFormat::JsonArray);
    /// assert_eq!(input.resolved_format(), InputFormat::JsonChunked);
    ///
    /// let input = RawInput::new(b"[not json]", InputFormat::LineOriented);
    /// assert_eq!(input.resolved_format(), InputFormat::LineOriented);
    /// ```
    pub fn resolved_format(&self) -> InputFormat {
        if !self.format.is_structured() {
            return self.format;
        }
        match InputFormat::sniff(self.bytes) {
            InputFormat::LineOriented => self.format,
            shape => shape,
        }
    }

    /// Returns the raw payload.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the declared or guessed format.
    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// Returns the payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns `true` if the payload (after an optional UTF-8 BOM) is one
/// well-formed UTF-8 JSON document.
fn parses_as_json(bytes: &[u8]) -> bool {
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    serde_json::from_slice::<serde::de::IgnoredAny>(body).is_ok()
}
