//! # chatclean CLI
//!
//! Command-line interface for the chatclean library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatclean::NormalizationError;
use chatclean::cli::Args;
use chatclean::core::{normalize, suggested_file_name};
use chatclean::format::RawInput;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        if e.is_advisory() {
            eprintln!("⚠️  {}", e);
            process::exit(2);
        }
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), NormalizationError> {
    let start = Instant::now();

    let size = fs::metadata(&args.input)?.len();
    if size > args.max_size {
        return Err(NormalizationError::input_too_large(size, args.max_size));
    }
    let bytes = fs::read(&args.input)?;

    let input = match args.format {
        Some(format) => RawInput::new(&bytes, format.into()),
        None => RawInput::guess(&bytes, Some(args.input.as_str())),
    };
    let format = input.resolved_format();
    let config = args.config.as_ref().map(fs::read_to_string).transpose()?;
    let options = args.resolve_options(format, config.as_deref())?;

    let quiet = args.stdout;
    if !quiet {
        println!("🧹 chatclean v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {} ({} bytes)", args.input, size);
        println!("📖 Format:  {}", format);
    }

    let normalized = normalize(&input, &options)?;
    if let Some(advisory) = normalized.advisory() {
        eprintln!("⚠️  {}", advisory);
    }

    if quiet {
        println!("{}", normalized.text);
        return Ok(());
    }

    let output_path = args.output.clone().unwrap_or_else(|| {
        let name = suggested_file_name(&args.input, normalized.format);
        Path::new(&args.input)
            .with_file_name(name)
            .to_string_lossy()
            .into_owned()
    });
    fs::write(&output_path, &normalized.text)?;

    let stats = normalized.stats;
    println!("💾 Output:  {}", output_path);
    println!();
    println!("✅ Done!");
    println!();
    println!("📊 Summary:");
    println!("   Encoding:      {}", normalized.encoding);
    if format != input.format() {
        println!("   Declared as:   {}", input.format());
    }
    println!("   Records:       {}", stats.records);
    println!("   Written:       {}", stats.emitted);
    println!(
        "   Dropped:       {} ({:.1}%)",
        stats.dropped,
        stats.drop_ratio()
    );
    if stats.placeholders > 0 {
        println!("   Placeholders:  {}", stats.placeholders);
    }
    println!("   Time:          {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
