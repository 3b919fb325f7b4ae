//! Content sanitization: media-marker removal and markdown stripping.
//!
//! The exports embed attachments as literal markers followed by a local
//! filesystem path, e.g. `[图片] 路径: C:\Users\...\a.jpg`. Those paths are
//! noise (and a privacy leak) in an LLM transcript. Two historical policies
//! exist and are kept apart on purpose:
//!
//! - [`truncate_media_markers`] cuts the whole line at the first marker
//!   (line-oriented exports).
//! - [`replace_media_markers`] keeps a bare `[图片]`/`[视频]` label and the
//!   text before it (JSON exports).
//!
//! [`strip_markdown`] reduces model output to a single line of plain text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::NormalizationOptions;
use crate::format::InputFormat;

/// Marker preceding an image path in line-oriented exports.
pub const IMAGE_MARKER: &str = "[图片] 路径: ";
/// Marker preceding a video path in line-oriented exports.
pub const VIDEO_MARKER: &str = "[视频] 路径: ";

/// Label left behind when an image marker is replaced.
pub const IMAGE_LABEL: &str = "[图片]";
/// Label left behind when a video marker is replaced.
pub const VIDEO_LABEL: &str = "[视频]";

static IMAGE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[图片\]\s*路径:.*").unwrap());
static VIDEO_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[视频\]\s*路径:.*").unwrap());

/// One markdown rewrite: pattern and replacement.
struct Rule {
    re: Regex,
    with: &'static str,
}

impl Rule {
    fn new(pattern: &str, with: &'static str) -> Self {
        Self {
            re: Regex::new(pattern).unwrap(),
            with,
        }
    }
}

// Order matters: fences before inline code, images before links, emphasis
// before the final whitespace collapse.
static FENCED_CODE: LazyLock<Rule> = LazyLock::new(|| Rule::new(r"```[\s\S]*?```", ""));
static INLINE_CODE: LazyLock<Rule> = LazyLock::new(|| Rule::new(r"`([^`]+)`", "${1}"));
static IMAGE_LINK: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"!\[([^\]]*)\]\([^)]+\)", "${1}"));
static LINK: LazyLock<Rule> = LazyLock::new(|| Rule::new(r"\[([^\]]+)\]\([^)]+\)", "${1}"));

static HEADINGS: LazyLock<[Rule; 2]> = LazyLock::new(|| {
    [
        Rule::new(r"(?m)^[ \t]*#{1,6}\s+", ""),
        Rule::new(r"#{1,6}\s+", ""),
    ]
});

static EMPHASIS: LazyLock<[Rule; 5]> = LazyLock::new(|| {
    [
        Rule::new(r"\*\*(.*?)\*\*", "${1}"),
        Rule::new(r"__(.*?)__", "${1}"),
        Rule::new(r"\*(.*?)\*", "${1}"),
        Rule::new(r"_(.*?)_", "${1}"),
        Rule::new(r"~~(.*?)~~", "${1}"),
    ]
});

static BLOCKQUOTE: LazyLock<Rule> = LazyLock::new(|| Rule::new(r"(?m)^[ \t]*>\s?", ""));

static LIST_BULLETS: LazyLock<[Rule; 2]> = LazyLock::new(|| {
    [
        Rule::new(r"(?m)^[ \t]*[*+-]\s+", ""),
        Rule::new(r"(?m)^[ \t]*\d+\.\s+", ""),
    ]
});

static HORIZONTAL_RULE: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"(?m)^[ \t]*([-*_]){3,}[ \t]*$", ""));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

fn apply(text: String, rule: &Rule) -> String {
    let replaced = match rule.re.replace_all(&text, rule.with) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };
    replaced.unwrap_or(text)
}

/// Cuts a line at the first image or video marker and trims trailing
/// whitespace. Lines without a marker only lose trailing whitespace.
///
/// ```rust
/// use chatclean::sanitize::truncate_media_markers;
///
/// assert_eq!(truncate_media_markers("look [图片] 路径: /tmp/a.jpg"), "look");
/// assert_eq!(truncate_media_markers("[视频] 路径: /v.mp4"), "");
/// assert_eq!(truncate_media_markers("plain  "), "plain");
/// ```
pub fn truncate_media_markers(line: &str) -> &str {
    let cut = [line.find(IMAGE_MARKER), line.find(VIDEO_MARKER)]
        .into_iter()
        .flatten()
        .min();
    match cut {
        Some(idx) => line[..idx].trim_end(),
        None => line.trim_end(),
    }
}

/// Replaces `[图片] 路径: ...` / `[视频] 路径: ...` (case-insensitive, up to
/// the end of the line) with the bare label.
///
/// ```rust
/// use chatclean::sanitize::replace_media_markers;
///
/// assert_eq!(
///     replace_media_markers("see [图片]路径: D:/pics/cat.png"),
///     "see [图片]"
/// );
/// ```
pub fn replace_media_markers(content: &str) -> Cow<'_, str> {
    match IMAGE_PATH_RE.replace_all(content, IMAGE_LABEL) {
        Cow::Borrowed(s) => VIDEO_PATH_RE.replace_all(s, VIDEO_LABEL),
        Cow::Owned(s) => Cow::Owned(VIDEO_PATH_RE.replace_all(&s, VIDEO_LABEL).into_owned()),
    }
}

/// Reduces markdown to single-line plain text.
///
/// Newlines (real and escaped `\n`) become spaces, fenced code blocks are
/// removed, inline code/links/images keep their text, heading, emphasis,
/// blockquote and list markers are dropped, horizontal rules vanish, and
/// whitespace runs collapse to one space.
///
/// ```rust
/// use chatclean::sanitize::strip_markdown;
///
/// assert_eq!(
///     strip_markdown("## Title\n**bold** and [a link](https://x.y)"),
///     "Title bold and a link"
/// );
/// ```
pub fn strip_markdown(text: &str) -> String {
    let mut text = text.replace("\\n", " ").replace('\n', " ");

    text = apply(text, &FENCED_CODE);
    text = apply(text, &INLINE_CODE);
    text = text.replace('`', "");
    // Image links first: the link rule alone would leave `![alt](u)` as `!alt`.
    text = apply(text, &IMAGE_LINK);
    text = apply(text, &LINK);

    for rule in HEADINGS.iter() {
        text = apply(text, rule);
    }
    for rule in EMPHASIS.iter() {
        text = apply(text, rule);
    }

    text = apply(text, &BLOCKQUOTE);
    text = text.replace('>', " ");

    for rule in LIST_BULLETS.iter() {
        text = apply(text, rule);
    }
    text = text.replace("- ", " ");

    text = apply(text, &HORIZONTAL_RULE);

    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Applies the enabled passes for `format` to a message body.
///
/// Line-oriented input is truncated at media markers (or only right-trimmed
/// when media stripping is off). JSON input gets label replacement and then
/// markdown stripping, each when enabled.
pub fn sanitize(content: &str, format: InputFormat, options: &NormalizationOptions) -> String {
    match format {
        InputFormat::LineOriented => {
            if options.strip_media_markers {
                truncate_media_markers(content).to_string()
            } else {
                content.trim_end().to_string()
            }
        }
        InputFormat::JsonArray | InputFormat::JsonChunked => {
            let body = if options.strip_media_markers {
                replace_media_markers(content)
            } else {
                Cow::Borrowed(content)
            };
            if options.strip_markdown {
                strip_markdown(&body)
            } else {
                body.into_owned()
            }
        }
    }
}
