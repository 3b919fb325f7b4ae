//! Additional tests for CLI module to improve coverage

#![cfg(feature = "cli")]

use chatclean::cli::{Args, DEFAULT_MAX_SIZE, FormatArg};
use chatclean::format::InputFormat;
use clap::{CommandFactory, Parser};
use std::str::FromStr;

fn parse(argv: &[&str]) -> Args {
    Args::parse_from(std::iter::once("chatclean").chain(argv.iter().copied()))
}

#[test]
fn test_cli_definition_is_valid() {
    Args::command().debug_assert();
}

#[test]
fn test_input_format_from_str_all_variants() {
    // Standard names
    assert!(InputFormat::from_str("line-oriented").is_ok());
    assert!(InputFormat::from_str("json-array").is_ok());
    assert!(InputFormat::from_str("json-chunked").is_ok());

    // Aliases
    assert!(InputFormat::from_str("txt").is_ok());
    assert!(InputFormat::from_str("json").is_ok());
    assert!(InputFormat::from_str("chunks").is_ok());

    // Case variations
    assert!(InputFormat::from_str("JSON-ARRAY").is_ok());
    assert!(InputFormat::from_str("Line").is_ok());
}

#[test]
fn test_input_format_from_str_errors() {
    assert!(InputFormat::from_str("").is_err());
    assert!(InputFormat::from_str("csv").is_err());
    let err = InputFormat::from_str("xml").unwrap_err();
    assert!(err.contains("json-chunked"));
}

#[test]
fn test_every_name_parses() {
    for name in InputFormat::all_names() {
        assert!(InputFormat::from_str(name).is_ok(), "{name} should parse");
    }
}

#[test]
fn test_format_arg_maps_to_input_format() {
    assert_eq!(InputFormat::from(FormatArg::Line), InputFormat::LineOriented);
    assert_eq!(InputFormat::from(FormatArg::Array), InputFormat::JsonArray);
    assert_eq!(InputFormat::from(FormatArg::Chunked), InputFormat::JsonChunked);
}

#[test]
fn test_format_arg_display() {
    assert_eq!(FormatArg::Line.to_string(), "line-oriented");
    assert_eq!(FormatArg::Chunked.to_string(), "json-chunked");
}

#[test]
fn test_format_arg_serde() {
    assert_eq!(serde_json::to_string(&FormatArg::Array).unwrap(), "\"json-array\"");
    let parsed: FormatArg = serde_json::from_str("\"chunked\"").unwrap();
    assert_eq!(parsed, FormatArg::Chunked);
}

#[test]
fn test_parse_all_flags() {
    let args = parse(&[
        "export.json",
        "-f",
        "array",
        "-o",
        "out.txt",
        "--config",
        "opts.json",
        "--subsecond",
        "--keep-media",
        "--strip-markdown",
        "--allow-missing-timestamp",
        "--max-size",
        "1024",
        "-v",
    ]);
    assert_eq!(args.input, "export.json");
    assert_eq!(args.format, Some(FormatArg::Array));
    assert_eq!(args.output.as_deref(), Some("out.txt"));
    assert_eq!(args.config.as_deref(), Some("opts.json"));
    assert!(args.subsecond);
    assert!(args.keep_media);
    assert!(args.strip_markdown);
    assert!(args.allow_missing_timestamp);
    assert_eq!(args.max_size, 1024);
    assert!(args.verbose);
}

#[test]
fn test_default_max_size() {
    assert_eq!(parse(&["a.txt"]).max_size, DEFAULT_MAX_SIZE);
}

#[test]
fn test_missing_input_rejected() {
    assert!(Args::try_parse_from(["chatclean"]).is_err());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Args::try_parse_from(["chatclean", "a", "-f", "xml"]).is_err());
}

#[test]
fn test_stdout_conflicts_with_output() {
    assert!(Args::try_parse_from(["chatclean", "a", "--stdout", "-o", "b"]).is_err());
}

#[test]
fn test_markdown_flags_conflict() {
    assert!(Args::try_parse_from(["chatclean", "a", "--strip-markdown", "--keep-markdown"]).is_err());
}

#[test]
fn test_resolve_options_per_format() {
    let args = parse(&["a"]);
    let line = args.resolve_options(InputFormat::LineOriented, None).unwrap();
    assert!(line.strip_timestamp);
    let chunked = args.resolve_options(InputFormat::JsonChunked, None).unwrap();
    assert!(chunked.strip_markdown);
}

#[test]
fn test_resolve_options_all_layers() {
    let args = parse(&["a", "--keep-markdown", "--allow-missing-timestamp"]);
    let options = args
        .resolve_options(
            InputFormat::JsonChunked,
            Some(r#"{"stripMediaMarkers": true, "stripMarkdown": true}"#),
        )
        .unwrap();
    // config layer
    assert!(options.strip_media_markers);
    // flags win
    assert!(!options.strip_markdown);
    assert!(!options.require_timestamp);
}

#[test]
fn test_resolve_options_bad_config() {
    let err = parse(&["a"])
        .resolve_options(InputFormat::JsonArray, Some("{not json"))
        .unwrap_err();
    assert!(err.is_malformed());
}
