//! Timestamp parsing with graceful fallback.
//!
//! Structured exports carry an ISO-8601-ish `timestamp` field whose quality
//! varies: proper RFC 3339, naive local times, trailing garbage, or nothing
//! at all. [`parse_timestamp`] never fails; it classifies the field into a
//! [`TimestampResult`] whose [`render`](TimestampResult::render) always yields
//! something displayable, so no input data is silently lost.
//!
//! Line-oriented exports instead prefix lines with a bare digit run; see
//! [`split_leading_timestamp`].

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;

use crate::config::NormalizationOptions;

/// Rendered in place of a timestamp when the field is absent.
pub const MISSING_TIMESTAMP: &str = "[时间戳缺失]";

/// Strict ISO-8601 shape: date, optional time with optional fraction, and an
/// offset only when a time is present.
static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2})(?:[T ]([0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]{1,9})?)?)(?:([+-])([0-9]{2}):?([0-9]{2}))?)?$",
    )
    .unwrap()
});

/// Fixed-offset `YYYY-MM-DDTHH:MM:SS` prefix used by the truncation heuristic.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}").unwrap()
});

static LEADING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+").unwrap());

/// Outcome of parsing a timestamp field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampResult {
    /// Parsed and re-rendered at the configured precision
    Canonical(String),
    /// Unparseable, but its first 19 characters looked like
    /// `YYYY-MM-DDTHH:MM:SS` and were kept
    Truncated(String),
    /// Unparseable; the original text is kept verbatim
    Unparsed(String),
    /// The field was absent
    Missing,
}

impl TimestampResult {
    /// Returns the text shown on a timestamp line.
    ///
    /// ```rust
    /// use chatclean::timestamp::TimestampResult;
    ///
    /// assert_eq!(TimestampResult::Unparsed("soon".into()).render(), "[无法解析时间: soon]");
    /// assert_eq!(TimestampResult::Missing.render(), "[时间戳缺失]");
    /// ```
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            TimestampResult::Canonical(text) | TimestampResult::Truncated(text) => {
                Cow::Borrowed(text)
            }
            TimestampResult::Unparsed(raw) => Cow::Owned(format!("[无法解析时间: {}]", raw)),
            TimestampResult::Missing => Cow::Borrowed(MISSING_TIMESTAMP),
        }
    }

    /// Returns `true` if the timestamp was fully parsed.
    pub fn is_canonical(&self) -> bool {
        matches!(self, TimestampResult::Canonical(_))
    }
}

/// A parsed timestamp: wall-clock time plus the offset it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedTimestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl ParsedTimestamp {
    /// Wall-clock time at second precision, offset discarded.
    fn to_naive_seconds(self) -> String {
        self.local.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// UTC at millisecond precision. Offset-less times are taken as UTC.
    fn to_utc_millis(self) -> Option<String> {
        let utc = match self.offset {
            Some(offset) => self
                .local
                .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?,
            None => self.local,
        };
        Some(utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
    }
}

/// Parses a strict ISO-8601 timestamp, treating a trailing `Z` as `+00:00`.
fn parse_iso(raw: &str) -> Option<ParsedTimestamp> {
    let normalized: Cow<'_, str> = match raw.strip_suffix(['Z', 'z']) {
        Some(stem) => Cow::Owned(format!("{}+00:00", stem)),
        None => Cow::Borrowed(raw),
    };
    let caps = ISO_RE.captures(&normalized)?;

    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let time = match caps.get(2) {
        Some(t) => {
            let t = t.as_str();
            let fmt = if t.len() == 5 { "%H:%M" } else { "%H:%M:%S%.f" };
            NaiveTime::parse_from_str(t, fmt).ok()?
        }
        None => NaiveTime::MIN,
    };

    let offset = match (caps.get(3), caps.get(4), caps.get(5)) {
        (Some(sign), Some(hours), Some(minutes)) => {
            let hours: i32 = hours.as_str().parse().ok()?;
            let minutes: i32 = minutes.as_str().parse().ok()?;
            if minutes >= 60 {
                return None;
            }
            let seconds = hours * 3600 + minutes * 60;
            let seconds = if sign.as_str() == "-" { -seconds } else { seconds };
            Some(FixedOffset::east_opt(seconds)?)
        }
        _ => None,
    };

    Some(ParsedTimestamp {
        local: date.and_time(time),
        offset,
    })
}

/// Classifies a timestamp field.
///
/// Policy, in order:
/// 1. absent → [`Missing`](TimestampResult::Missing)
/// 2. strict ISO-8601 → [`Canonical`](TimestampResult::Canonical), rendered as
///    naive `YYYY-MM-DDTHH:MM:SS`, or as UTC `YYYY-MM-DDTHH:MM:SS.mmmZ` when
///    `keep_subsecond_precision` is set
/// 3. first 19 characters shaped like `YYYY-MM-DDTHH:MM:SS` →
///    [`Truncated`](TimestampResult::Truncated)
/// 4. otherwise [`Unparsed`](TimestampResult::Unparsed)
///
/// # Example
///
/// ```rust
/// use chatclean::config::NormalizationOptions;
/// use chatclean::timestamp::{parse_timestamp, TimestampResult};
///
/// let options = NormalizationOptions::default();
/// assert_eq!(
///     parse_timestamp(Some("2024-01-01T10:00:00.250+08:00"), &options),
///     TimestampResult::Canonical("2024-01-01T10:00:00".into())
/// );
///
/// let precise = options.with_keep_subsecond_precision(true);
/// assert_eq!(
///     parse_timestamp(Some("2024-01-01T10:00:00.250+08:00"), &precise),
///     TimestampResult::Canonical("2024-01-01T02:00:00.250Z".into())
/// );
/// ```
pub fn parse_timestamp(raw: Option<&str>, options: &NormalizationOptions) -> TimestampResult {
    let Some(raw) = raw else {
        return TimestampResult::Missing;
    };

    let rendered = parse_iso(raw).and_then(|ts| {
        if options.keep_subsecond_precision {
            ts.to_utc_millis()
        } else {
            Some(ts.to_naive_seconds())
        }
    });
    if let Some(text) = rendered {
        return TimestampResult::Canonical(text);
    }

    // The prefix pattern is ASCII-only, so 19 bytes are 19 characters.
    if PREFIX_RE.is_match(raw) {
        tracing::warn!(timestamp = raw, "timestamp did not parse, truncating to seconds");
        return TimestampResult::Truncated(raw[..19].to_owned());
    }

    tracing::warn!(timestamp = raw, "timestamp did not parse, keeping original text");
    TimestampResult::Unparsed(raw.to_owned())
}

/// Splits a line into its leading digit-run timestamp and the remainder.
///
/// The run must be followed by whitespace, which is consumed. Lines without
/// such a prefix are returned whole.
///
/// ```rust
/// use chatclean::timestamp::split_leading_timestamp;
///
/// assert_eq!(split_leading_timestamp("1699999999  hi"), (Some("1699999999"), "hi"));
/// assert_eq!(split_leading_timestamp("2024 was a year"), (Some("2024"), "was a year"));
/// assert_eq!(split_leading_timestamp("no stamp"), (None, "no stamp"));
/// ```
pub fn split_leading_timestamp(line: &str) -> (Option<&str>, &str) {
    match LEADING_DIGITS_RE.captures(line) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            (caps.get(1).map(|m| m.as_str()), &line[whole..])
        }
        None => (None, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds() -> NormalizationOptions {
        NormalizationOptions::default()
    }

    fn millis() -> NormalizationOptions {
        NormalizationOptions::default().with_keep_subsecond_precision(true)
    }

    fn canonical(s: &str) -> TimestampResult {
        TimestampResult::Canonical(s.to_string())
    }

    #[test]
    fn test_missing() {
        assert_eq!(parse_timestamp(None, &seconds()), TimestampResult::Missing);
        assert_eq!(TimestampResult::Missing.render(), MISSING_TIMESTAMP);
    }

    #[test]
    fn test_zulu_second_precision() {
        assert_eq!(
            parse_timestamp(Some("2024-01-01T10:00:00Z"), &seconds()),
            canonical("2024-01-01T10:00:00")
        );
    }

    #[test]
    fn test_offset_is_discarded_at_second_precision() {
        assert_eq!(
            parse_timestamp(Some("2024-03-05T23:59:59.999-05:00"), &seconds()),
            canonical("2024-03-05T23:59:59")
        );
    }

    #[test]
    fn test_millis_converts_to_utc() {
        assert_eq!(
            parse_timestamp(Some("2024-03-05T23:59:59.999-05:00"), &millis()),
            canonical("2024-03-06T04:59:59.999Z")
        );
    }

    #[test]
    fn test_millis_truncates_extra_digits() {
        assert_eq!(
            parse_timestamp(Some("2024-01-01T10:00:00.123456Z"), &millis()),
            canonical("2024-01-01T10:00:00.123Z")
        );
    }

    #[test]
    fn test_naive_millis_is_treated_as_utc() {
        assert_eq!(
            parse_timestamp(Some("2024-01-01T10:00:00"), &millis()),
            canonical("2024-01-01T10:00:00.000Z")
        );
    }

    #[test]
    fn test_date_only_and_minutes_only() {
        assert_eq!(
            parse_timestamp(Some("2024-02-29"), &seconds()),
            canonical("2024-02-29T00:00:00")
        );
        assert_eq!(
            parse_timestamp(Some("2024-02-29 08:15"), &seconds()),
            canonical("2024-02-29T08:15:00")
        );
    }

    #[test]
    fn test_truncation_heuristic() {
        assert_eq!(
            parse_timestamp(Some("2024-01-01T10:00:00.123+garbage"), &seconds()),
            TimestampResult::Truncated("2024-01-01T10:00:00".into())
        );
        // calendar-invalid but structurally matching
        assert_eq!(
            parse_timestamp(Some("2024-13-45T10:00:00"), &seconds()),
            TimestampResult::Truncated("2024-13-45T10:00:00".into())
        );
    }

    #[test]
    fn test_unparsed_keeps_original() {
        let result = parse_timestamp(Some("yesterday at noon"), &seconds());
        assert_eq!(result, TimestampResult::Unparsed("yesterday at noon".into()));
        assert_eq!(result.render(), "[无法解析时间: yesterday at noon]");
    }

    #[test]
    fn test_space_separated_does_not_truncate() {
        // the heuristic requires the literal `T`
        let result = parse_timestamp(Some("2024-01-01 10:00:00 PM"), &seconds());
        assert!(matches!(result, TimestampResult::Unparsed(_)));
    }

    #[test]
    fn test_short_and_non_ascii_input() {
        assert!(matches!(
            parse_timestamp(Some("2024"), &seconds()),
            TimestampResult::Unparsed(_)
        ));
        assert!(matches!(
            parse_timestamp(Some("２０２４-01-01T10:00:00"), &seconds()),
            TimestampResult::Unparsed(_)
        ));
        assert!(matches!(
            parse_timestamp(Some(""), &seconds()),
            TimestampResult::Unparsed(_)
        ));
    }

    #[test]
    fn test_canonical_output_reparses_to_itself() {
        for raw in ["2024-06-15T12:30:45Z", "1999-12-31T23:59:59+09:30"] {
            for options in [seconds(), millis()] {
                let first = parse_timestamp(Some(raw), &options);
                let again = parse_timestamp(Some(&first.render()), &options);
                assert_eq!(first, again, "{raw}");
            }
        }
    }

    #[test]
    fn test_split_leading_timestamp() {
        assert_eq!(
            split_leading_timestamp("1699999999 hello"),
            (Some("1699999999"), "hello")
        );
        assert_eq!(split_leading_timestamp("42\tx"), (Some("42"), "x"));
        assert_eq!(split_leading_timestamp("42"), (None, "42"));
        assert_eq!(split_leading_timestamp(" 42 x"), (None, " 42 x"));
        assert_eq!(split_leading_timestamp(""), (None, ""));
    }
}
