//! Core pipeline for chatclean.
//!
//! This module contains:
//! - [`formatter`] - Rendering records into the transcript
//! - [`processor`] - The `normalize()` entry point and its statistics
//!
//! # Quick Start
//!
//! ```rust
//! use chatclean::core::{normalize_bytes, suggested_file_name};
//! use chatclean::format::InputFormat;
//!
//! let out = normalize_bytes(br#"{"pendingInputs":[{"role":"user","text":"a\nb"}]}"#, InputFormat::JsonChunked)?;
//! assert_eq!(out.text, "(user)\na b");
//! assert_eq!(suggested_file_name("prompt.json", out.format), "cleaned_prompt.txt");
//! # Ok::<(), chatclean::NormalizationError>(())
//! ```

pub mod formatter;
pub mod processor;

pub use formatter::{Formatted, Formatter, SENDER_SEPARATOR};
pub use processor::{
    NormalizationStats, Normalized, normalize, normalize_bytes, suggested_file_name,
};
