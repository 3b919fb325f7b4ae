//! # Chatclean
//!
//! A Rust library for turning exported chat logs into clean, LLM-safe
//! plain-text transcripts.
//!
//! ## Overview
//!
//! Chatclean handles the two export shapes seen in practice:
//! - **Line-oriented text**: one message per line, optional leading numeric
//!   timestamp, inline `[图片] 路径: ...` media markers
//! - **JSON**: a flat array of `{sender, content, timestamp}` objects, or an
//!   object holding `chunkedPrompt.chunks` / `pendingInputs` arrays of
//!   `{role, text}` chunks
//!
//! Input may be UTF-8 or GBK. Output is a single string; malformed records
//! become placeholder lines instead of failing the whole document.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatclean::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let bytes = br#"[{"sender":"A","content":"**hi**","timestamp":"2024-01-01T10:00:00Z"}]"#;
//!     let input = RawInput::new(bytes, InputFormat::JsonArray);
//!     let options = NormalizationOptions::json_array().with_strip_markdown(true);
//!
//!     let normalized = normalize(&input, &options)?;
//!     assert_eq!(normalized.text, "2024-01-01T10:00:00\nA：hi");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`decode`] - UTF-8 / GBK decoding ([`decode::decode`])
//! - [`timestamp`] - Timestamp parsing with fallbacks ([`timestamp::parse_timestamp`])
//! - [`sanitize`] - Media-marker and markdown removal
//! - [`extractor`] / [`extractors`] - One extraction strategy per [`InputFormat`](format::InputFormat)
//! - [`core`] - Formatter and the [`normalize`](core::normalize) pipeline
//! - [`record`] - The extracted [`Record`](record::Record)
//! - [`format`] - [`InputFormat`](format::InputFormat), [`RawInput`](format::RawInput)
//! - [`config`] - [`NormalizationOptions`](config::NormalizationOptions)
//! - [`error`] - [`NormalizationError`], [`Result`]
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod decode;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod format;
pub mod record;
pub mod sanitize;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use error::{NormalizationError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatclean::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorKind, NormalizationError, Result};

    pub use crate::config::NormalizationOptions;
    pub use crate::format::{InputFormat, RawInput};

    pub use crate::core::{Normalized, NormalizationStats, normalize, normalize_bytes, suggested_file_name};

    pub use crate::extractor::{Extractor, create_extractor};
    pub use crate::record::{Record, RecordKind};

    pub use crate::decode::SourceEncoding;
    pub use crate::timestamp::TimestampResult;
}
