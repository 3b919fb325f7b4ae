//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Input format selector
//!
//! Options are resolved in three layers: the defaults for the input format,
//! then an optional `--config` JSON document, then individual flags.
//!
//! ```rust
//! use chatclean::cli::Args;
//! use chatclean::format::InputFormat;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatclean", "chat.json", "--hide-timestamp"]);
//! let options = args.resolve_options(InputFormat::JsonArray, None)?;
//! assert!(!options.show_timestamp);
//! # Ok::<(), chatclean::NormalizationError>(())
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::NormalizationOptions;
use crate::error::NormalizationError;
use crate::format::InputFormat;

/// Default cap on the input file size: 64 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 64 * 1024 * 1024;

/// Turn exported chat logs into clean, LLM-safe plain-text transcripts.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatclean")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatclean chat.txt
    chatclean export.json -o transcript.txt
    chatclean prompt.json -f chunked --keep-markdown --stdout
    chatclean export.json --config options.json --subsecond")]
pub struct Args {
    /// Path to input file
    pub input: String,

    /// Input format (guessed from extension and content when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Path to output file (default: cleaned_<name>.txt or <name>_formatted.txt next to the input)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the transcript to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// JSON options document, e.g. {"showTimestamp": false}
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Remove leading numeric timestamps from lines
    #[arg(long, conflicts_with = "keep_timestamp")]
    pub strip_timestamp: bool,

    /// Keep leading numeric timestamps on lines
    #[arg(long)]
    pub keep_timestamp: bool,

    /// Emit a timestamp line before each message
    #[arg(long, conflicts_with = "hide_timestamp")]
    pub show_timestamp: bool,

    /// Omit timestamp lines
    #[arg(long)]
    pub hide_timestamp: bool,

    /// Render timestamps as UTC with millisecond precision
    #[arg(long)]
    pub subsecond: bool,

    /// Leave image/video path markers untouched
    #[arg(long)]
    pub keep_media: bool,

    /// Reduce markdown to plain text
    #[arg(long, conflicts_with = "keep_markdown")]
    pub strip_markdown: bool,

    /// Keep markdown markup
    #[arg(long)]
    pub keep_markdown: bool,

    /// Keep messages without a timestamp (shown with a placeholder)
    #[arg(long)]
    pub allow_missing_timestamp: bool,

    /// Refuse inputs larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u64,

    /// Log progress details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolves the options for `format`: format defaults, then the config
    /// document (if any), then flags.
    pub fn resolve_options(
        &self,
        format: InputFormat,
        config_json: Option<&str>,
    ) -> Result<NormalizationOptions, NormalizationError> {
        let mut options = NormalizationOptions::for_format(format);
        if let Some(json) = config_json {
            options = options.with_json_overrides(json)?;
        }

        if self.strip_timestamp {
            options.strip_timestamp = true;
        }
        if self.keep_timestamp {
            options.strip_timestamp = false;
        }
        if self.show_timestamp {
            options.show_timestamp = true;
        }
        if self.hide_timestamp {
            options.show_timestamp = false;
        }
        if self.subsecond {
            options.keep_subsecond_precision = true;
        }
        if self.keep_media {
            options.strip_media_markers = false;
        }
        if self.strip_markdown {
            options.strip_markdown = true;
        }
        if self.keep_markdown {
            options.strip_markdown = false;
        }
        if self.allow_missing_timestamp {
            options.require_timestamp = false;
        }
        Ok(options)
    }
}

/// Input format selector.
///
/// # Example
///
/// ```rust
/// use chatclean::cli::FormatArg;
/// use chatclean::format::InputFormat;
///
/// let format: InputFormat = FormatArg::Chunked.into();
/// assert_eq!(format, InputFormat::JsonChunked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// Line-oriented text export
    #[value(alias = "txt", alias = "text")]
    Line,

    /// Flat JSON array of messages
    #[value(name = "json-array", alias = "array", alias = "json")]
    #[serde(rename = "json-array", alias = "array")]
    Array,

    /// JSON object with chunk arrays
    #[value(name = "json-chunked", alias = "chunked")]
    #[serde(rename = "json-chunked", alias = "chunked")]
    Chunked,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", InputFormat::from(*self))
    }
}

impl From<FormatArg> for InputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Line => InputFormat::LineOriented,
            FormatArg::Array => InputFormat::JsonArray,
            FormatArg::Chunked => InputFormat::JsonChunked,
        }
    }
}
