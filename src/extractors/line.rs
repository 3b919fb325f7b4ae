//! Line-oriented export extractor.

use crate::config::NormalizationOptions;
use crate::error::Result;
use crate::extractor::Extractor;
use crate::format::InputFormat;
use crate::record::Record;
use crate::timestamp::split_leading_timestamp;

/// Extractor for plain-text exports: one record per line.
///
/// The leading digit run of a line is recorded as its raw timestamp. With
/// `strip_timestamp` the record content is the remainder of the line,
/// otherwise the whole line. Line endings may be `\n`, `\r\n` or a lone
/// `\r` (classic Mac exports).
///
/// # Example
///
/// ```rust
/// use chatclean::config::NormalizationOptions;
/// use chatclean::extractor::Extractor;
/// use chatclean::extractors::LineExtractor;
///
/// let records = LineExtractor::new()
///     .extract("1699999999 hello\n\nbye", &NormalizationOptions::line_oriented())?;
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[0].content, "hello");
/// assert!(records[1].is_blank_line());
/// # Ok::<(), chatclean::NormalizationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineExtractor;

impl LineExtractor {
    /// Creates a new line extractor.
    pub fn new() -> Self {
        Self
    }
}

/// Splits on `\n`, `\r\n` and lone `\r`. A trailing line break does not
/// start an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + width..];
        Some(line)
    })
}

impl Extractor for LineExtractor {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn format(&self) -> InputFormat {
        InputFormat::LineOriented
    }

    fn extract(&self, text: &str, options: &NormalizationOptions) -> Result<Vec<Record>> {
        let records = split_lines(text)
            .map(|line| {
                let (timestamp, rest) = split_leading_timestamp(line);
                let content = if options.strip_timestamp { rest } else { line };
                Record::line(content, timestamp)
            })
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, options: &NormalizationOptions) -> Vec<Record> {
        LineExtractor::new().extract(text, options).unwrap()
    }

    #[test]
    fn test_strips_leading_timestamp() {
        let records = extract("1699999999 hello", &NormalizationOptions::line_oriented());
        assert_eq!(records[0].content, "hello");
        assert_eq!(records[0].timestamp_raw(), Some("1699999999"));
    }

    #[test]
    fn test_keeps_timestamp_when_disabled() {
        let options = NormalizationOptions::line_oriented().with_strip_timestamp(false);
        let records = extract("1699999999 hello", &options);
        assert_eq!(records[0].content, "1699999999 hello");
    }

    #[test]
    fn test_digits_without_whitespace_are_content() {
        let records = extract("42abc", &NormalizationOptions::line_oriented());
        assert_eq!(records[0].content, "42abc");
        assert!(records[0].timestamp_raw().is_none());
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let records = extract("a\r\n\r\nb\r\n", &NormalizationOptions::line_oriented());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].content, "a");
        assert!(records[1].is_blank_line());
        assert_eq!(records[2].content, "b");
    }

    #[test]
    fn test_lone_carriage_returns() {
        let records = extract("1 a\r\r2 b\r", &NormalizationOptions::line_oriented());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].content, "a");
        assert!(records[1].is_blank_line());
        assert_eq!(records[2].content, "b");
    }

    #[test]
    fn test_mixed_line_endings() {
        let lines: Vec<&str> = split_lines("a\nb\r\nc\rd").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);
        assert_eq!(split_lines("\n\n").count(), 2);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("", &NormalizationOptions::line_oriented()).is_empty());
    }
}
