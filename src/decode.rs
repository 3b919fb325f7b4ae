//! Byte-to-text decoding.
//!
//! Exports observed in practice are UTF-8 or, from older Windows tools, GBK.
//! Decoding tries exactly those two, strictly, in that order. There is no
//! general charset sniffing.

use encoding_rs::GBK;
use serde::{Deserialize, Serialize};

use crate::error::{NormalizationError, Result};

/// Encoding that successfully decoded the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    Utf8,
    Gbk,
}

impl SourceEncoding {
    /// Returns the conventional label, `"utf-8"` or `"gbk"`.
    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Gbk => "gbk",
        }
    }

    /// Returns `true` if this is the fallback encoding.
    pub fn is_fallback(&self) -> bool {
        matches!(self, SourceEncoding::Gbk)
    }

    /// A notice for the end user when this is the fallback encoding.
    pub fn advisory(&self) -> Option<String> {
        self.is_fallback()
            .then(|| format!("Input was read as {}.", self.name().to_uppercase()))
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded text and the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: SourceEncoding,
}

impl Decoded {
    /// A notice for the end user when the fallback encoding was used.
    pub fn advisory(&self) -> Option<String> {
        self.encoding.advisory()
    }
}

/// Decodes raw bytes as strict UTF-8, falling back to strict GBK.
///
/// # Example
///
/// ```rust
/// use chatclean::decode::{decode, SourceEncoding};
///
/// let decoded = decode("你好".as_bytes())?;
/// assert_eq!(decoded.text, "你好");
/// assert_eq!(decoded.encoding, SourceEncoding::Utf8);
///
/// let gbk = decode(&[0xC4, 0xE3, 0xBA, 0xC3])?;
/// assert_eq!(gbk.text, "你好");
/// assert_eq!(gbk.encoding, SourceEncoding::Gbk);
/// # Ok::<(), chatclean::NormalizationError>(())
/// ```
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    let utf8_err = match std::str::from_utf8(bytes) {
        Ok(text) => {
            return Ok(Decoded {
                text: text.to_owned(),
                encoding: SourceEncoding::Utf8,
            });
        }
        Err(e) => e,
    };

    match GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => {
            tracing::info!(
                utf8_error = %utf8_err,
                "input is not valid UTF-8, decoded as GBK"
            );
            Ok(Decoded {
                text: text.into_owned(),
                encoding: SourceEncoding::Gbk,
            })
        }
        None => Err(NormalizationError::decode_failure(format!(
            "input is neither valid UTF-8 ({}) nor valid GBK",
            utf8_err
        ))),
    }
}
