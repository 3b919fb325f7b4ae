//! Record extraction trait.
//!
//! One strategy per [`InputFormat`], selected with [`create_extractor`].
//!
//! # Example
//!
//! ```rust
//! use chatclean::config::NormalizationOptions;
//! use chatclean::extractor::create_extractor;
//! use chatclean::format::InputFormat;
//!
//! let extractor = create_extractor(InputFormat::JsonChunked);
//! let records = extractor.extract(
//!     r#"{"pendingInputs":[{"role":"user","text":"hi"}]}"#,
//!     &NormalizationOptions::json_chunked(),
//! )?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].sender(), Some("(user)"));
//! # Ok::<(), chatclean::NormalizationError>(())
//! ```

use crate::config::NormalizationOptions;
use crate::error::Result;
use crate::format::InputFormat;
use crate::record::Record;

/// Walks decoded text and yields raw [`Record`]s in source order.
///
/// # Implementation Notes
///
/// - A problem with one entry becomes a placeholder record, never an error.
/// - Only a top-level shape the strategy does not recognize returns
///   [`MalformedDocument`](crate::NormalizationError::MalformedDocument).
/// - Records are returned unsanitized; the formatter owns sanitization.
pub trait Extractor: Send + Sync {
    /// Returns the human-readable name of this extractor.
    fn name(&self) -> &'static str;

    /// Returns the format this extractor handles.
    fn format(&self) -> InputFormat;

    /// Extracts records from decoded text.
    ///
    /// `options` is consulted for extraction-time decisions only (leading
    /// timestamp splitting, skipping messages without a timestamp).
    fn extract(&self, text: &str, options: &NormalizationOptions) -> Result<Vec<Record>>;
}

/// Creates the extractor for a format.
///
/// ```rust
/// use chatclean::extractor::create_extractor;
/// use chatclean::format::InputFormat;
///
/// let extractor = create_extractor(InputFormat::LineOriented);
/// assert_eq!(extractor.name(), "Line");
/// ```
pub fn create_extractor(format: InputFormat) -> Box<dyn Extractor> {
    match format {
        InputFormat::LineOriented => Box::new(crate::extractors::LineExtractor::new()),
        InputFormat::JsonArray => Box::new(crate::extractors::JsonArrayExtractor::new()),
        InputFormat::JsonChunked => Box::new(crate::extractors::ChunkedExtractor::new()),
    }
}
