//! The normalization pipeline: decode, extract, format.

use std::path::Path;

use serde::Serialize;

use crate::config::NormalizationOptions;
use crate::decode::{SourceEncoding, decode};
use crate::error::Result;
use crate::extractor::create_extractor;
use crate::format::{InputFormat, RawInput};

use super::formatter::Formatter;

/// Counters for one `normalize()` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationStats {
    /// Records produced by the extractor, placeholders included
    pub records: usize,
    /// Records that made it into the output
    pub emitted: usize,
    /// Records dropped because they sanitized to nothing
    pub dropped: usize,
    /// Placeholder lines among the emitted records
    pub placeholders: usize,
}

impl NormalizationStats {
    /// Share of extracted records that were dropped, in percent.
    pub fn drop_ratio(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        (self.dropped as f64 / self.records as f64) * 100.0
    }
}

/// Successful pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The normalized transcript
    pub text: String,
    /// Encoding the input was decoded with
    pub encoding: SourceEncoding,
    /// Format actually used for extraction
    pub format: InputFormat,
    pub stats: NormalizationStats,
}

impl Normalized {
    /// A non-fatal notice for the end user (currently only the GBK fallback).
    pub fn advisory(&self) -> Option<String> {
        self.encoding.advisory()
    }
}

/// Runs the full pipeline on one input.
///
/// A declared JSON format is narrowed to the shape the document actually
/// has, and a leading byte-order mark is ignored.
///
/// # Example
///
/// ```rust
/// use chatclean::config::NormalizationOptions;
/// use chatclean::core::normalize;
/// use chatclean::format::{InputFormat, RawInput};
///
/// let bytes = "1699999999 hello [图片] 路径: /tmp/a.jpg".as_bytes();
/// let input = RawInput::new(bytes, InputFormat::LineOriented);
/// let normalized = normalize(&input, &NormalizationOptions::line_oriented())?;
/// assert_eq!(normalized.text, "hello");
/// # Ok::<(), chatclean::NormalizationError>(())
/// ```
pub fn normalize(input: &RawInput<'_>, options: &NormalizationOptions) -> Result<Normalized> {
    let decoded = decode(input.bytes())?;
    let text = decoded.text.strip_prefix('\u{FEFF}').unwrap_or(&decoded.text);

    let format = input.resolved_format();
    if format != input.format() {
        tracing::debug!(declared = %input.format(), actual = %format, "refined input format from document root");
    }

    let extractor = create_extractor(format);
    let records = extractor.extract(text, options)?;
    tracing::debug!(extractor = extractor.name(), records = records.len(), "extracted records");

    let formatted = Formatter::new(format, *options).format(&records)?;
    Ok(Normalized {
        text: formatted.text,
        encoding: decoded.encoding,
        format,
        stats: formatted.stats,
    })
}

/// Runs the pipeline with the default options for the format the payload
/// resolves to.
///
/// A chunked document declared as [`JsonArray`](InputFormat::JsonArray)
/// gets the chunked defaults, markdown stripping included.
pub fn normalize_bytes(bytes: &[u8], format: InputFormat) -> Result<Normalized> {
    let input = RawInput::new(bytes, format);
    let options = NormalizationOptions::for_format(input.resolved_format());
    normalize(&input, &options)
}

/// Suggests an output file name for a normalized export.
///
/// Line-oriented and chunked inputs become `cleaned_<stem>.txt`, flat
/// arrays `<stem>_formatted.txt`.
///
/// ```rust
/// use chatclean::core::suggested_file_name;
/// use chatclean::format::InputFormat;
///
/// assert_eq!(suggested_file_name("chat.txt", InputFormat::LineOriented), "cleaned_chat.txt");
/// assert_eq!(suggested_file_name("dir/log.json", InputFormat::JsonArray), "log_formatted.txt");
/// ```
pub fn suggested_file_name(original: &str, format: InputFormat) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("chat");
    match format {
        InputFormat::JsonArray => format!("{stem}_formatted.txt"),
        InputFormat::LineOriented | InputFormat::JsonChunked => format!("cleaned_{stem}.txt"),
    }
}
