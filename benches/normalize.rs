//! Benchmarks for the chatclean pipeline and its stages.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench normalize -- markdown`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatclean::config::NormalizationOptions;
use chatclean::core::normalize;
use chatclean::decode::decode;
use chatclean::extractor::create_extractor;
use chatclean::format::{InputFormat, RawInput};
use chatclean::sanitize::strip_markdown;
use chatclean::timestamp::parse_timestamp;

use encoding_rs::GBK;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_lines(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        if i % 5 == 0 {
            lines.push(format!("{} 看这个 [图片] 路径: C:/pics/{}.jpg", 1_700_000_000 + i, i));
        } else {
            lines.push(format!("{} Message number {}", 1_700_000_000 + i, i));
        }
    }
    lines.join("\n")
}

fn generate_array_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        messages.push(format!(
            r#"{{"id": {}, "sender": "{}", "content": "**Message** number {}", "timestamp": "2024-01-15T10:{:02}:{:02}.250+08:00"}}"#,
            i,
            sender,
            i,
            (i / 60) % 60,
            i % 60
        ));
    }
    format!("[{}]", messages.join(",\n"))
}

fn generate_chunked_json(count: usize) -> String {
    let mut chunks = Vec::with_capacity(count);
    for i in 0..count {
        let role = if i % 2 == 0 { "user" } else { "model" };
        chunks.push(format!(
            r#"{{"role": "{}", "text": "## Step {}\n- use `x`\n- see [link](http://e.x/{})"}}"#,
            role, i, i
        ));
    }
    format!(r#"{{"chunkedPrompt": {{"chunks": [{}]}}}}"#, chunks.join(",\n"))
}

const MARKDOWN_SAMPLE: &str = "# Title\n\nSome **bold** and *italic* text with `code`.\n\n\
```\nlet x = 1;\n```\n\n> quote\n- item [link](https://example.com)\n\n---\n";

// =============================================================================
// Stage Benchmarks
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let text = generate_lines(10_000);
    let (gbk, _, _) = GBK.encode(&text);
    let gbk = gbk.into_owned();

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("utf8", |b| {
        b.iter(|| black_box(decode(black_box(text.as_bytes())).unwrap()));
    });
    group.throughput(Throughput::Bytes(gbk.len() as u64));
    group.bench_function("gbk_fallback", |b| {
        b.iter(|| black_box(decode(black_box(&gbk)).unwrap()));
    });
    group.finish();
}

fn bench_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("timestamp");
    let seconds = NormalizationOptions::json_array();
    let millis = seconds.with_keep_subsecond_precision(true);

    for raw in [
        "2024-01-15T10:30:00Z",
        "2024-01-15T10:30:00.123456+08:00",
        "2024-01-15T10:30:00garbage",
        "not a time",
    ] {
        group.bench_with_input(BenchmarkId::new("seconds", raw), raw, |b, raw| {
            b.iter(|| black_box(parse_timestamp(Some(black_box(raw)), &seconds)));
        });
        group.bench_with_input(BenchmarkId::new("millis", raw), raw, |b, raw| {
            b.iter(|| black_box(parse_timestamp(Some(black_box(raw)), &millis)));
        });
    }
    group.finish();
}

fn bench_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown");
    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));
    group.bench_function("strip", |b| {
        b.iter(|| black_box(strip_markdown(black_box(MARKDOWN_SAMPLE))));
    });
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [100_usize, 1_000, 10_000] {
        let json = generate_array_json(size);
        let extractor = create_extractor(InputFormat::JsonArray);
        let options = NormalizationOptions::json_array();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("json_array", size), &json, |b, json| {
            b.iter(|| black_box(extractor.extract(black_box(json), &options).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Full Pipeline
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in [100_usize, 1_000, 10_000] {
        let inputs = [
            (InputFormat::LineOriented, generate_lines(size)),
            (InputFormat::JsonArray, generate_array_json(size)),
            (InputFormat::JsonChunked, generate_chunked_json(size)),
        ];
        group.throughput(Throughput::Elements(size as u64));
        for (format, text) in &inputs {
            let options = NormalizationOptions::for_format(*format).with_strip_markdown(true);
            group.bench_with_input(
                BenchmarkId::new(format.to_string(), size),
                text,
                |b, text| {
                    b.iter(|| {
                        let input = RawInput::new(black_box(text.as_bytes()), *format);
                        black_box(normalize(&input, &options).unwrap())
                    });
                },
            );
        }
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_decode,
    bench_timestamp,
    bench_markdown,
    bench_extract,
    bench_full_pipeline,
);

criterion_main!(benches);
