//! Sample export generator for stress testing chatclean.
//!
//! Usage: cargo run --features gen-sample --bin gen_sample -- [messages] [output] [format]
//! Formats: line, array, chunked, gbk (line-oriented, GBK-encoded)
//! Example: cargo run --features gen-sample --bin gen_sample -- 100000 heavy.json array

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use encoding_rs::GBK;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const SENDERS: &[&str] = &["Alice", "Bob", "小明", "小红", "Иван", ""];

const MEDIA_PATHS: &[&str] = &[
    "C:\\Users\\me\\Pictures\\IMG_0001.jpg",
    "/home/me/Videos/clip.mp4",
    "D:/导出/图片/截图.png",
];

const MARKDOWN: &[&str] = &[
    "## Summary\n**Key point**: keep it short.",
    "Use `cargo test` and see [docs](https://example.com).",
    "> quoted reply\n- item one\n- item two",
    "```rust\nfn main() {}\n```\nThat was the code.",
    "~~old~~ *new* __bold__",
    "---",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("sample_export.txt");
    let format = args.get(3).map(|s| s.as_str()).unwrap_or("line");

    println!("🧪 Sample Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Format:   {}", format);
    println!();

    let mut rng = rand::thread_rng();
    let start = Instant::now();

    let bytes = match format {
        "line" | "txt" => generate_lines(&mut rng, count).into_bytes(),
        "gbk" => {
            let text = generate_lines(&mut rng, count);
            let (encoded, _, had_errors) = GBK.encode(&text);
            if had_errors {
                eprintln!("   Some characters were not representable in GBK");
            }
            encoded.into_owned()
        }
        "array" | "json" => to_pretty(&generate_array(&mut rng, count))?,
        "chunked" => to_pretty(&generate_chunked(&mut rng, count))?,
        _ => {
            eprintln!(
                "Unknown format: {}. Use 'line', 'gbk', 'array' or 'chunked'",
                format
            );
            std::process::exit(1);
        }
    };

    let mut writer = BufWriter::with_capacity(1024 * 1024, File::create(output)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    let elapsed = start.elapsed();
    println!("✅ Done!");
    println!("   Size: {:.2} MB", bytes.len() as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn to_pretty(value: &Value) -> io::Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(io::Error::other)
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 10 {
        0..=3 => format!("普通消息 #{} normal text", index),
        4 => format!(
            "看这个 [图片] 路径: {}",
            MEDIA_PATHS.choose(rng).copied().unwrap_or_default()
        ),
        5 => format!(
            "[视频] 路径: {}",
            MEDIA_PATHS.choose(rng).copied().unwrap_or_default()
        ),
        6 => (*MARKDOWN.choose(rng).unwrap_or(&"")).to_string(),
        7 => String::new(),
        8 => "   ".to_string(),
        _ => format!("Mixed: Hello 你好 🌍 #{}", index),
    }
}

fn generate_lines(rng: &mut impl Rng, count: usize) -> String {
    let mut out = String::with_capacity(count * 48);
    for i in 0..count {
        let body = generate_body(rng, i).replace('\n', " ");
        if rng.gen_bool(0.8) {
            out.push_str(&format!("{} {}\n", 1_700_000_000 + i, body));
        } else {
            out.push_str(&body);
            out.push('\n');
        }
    }
    out
}

fn generate_timestamp(rng: &mut impl Rng, index: usize) -> Value {
    let second = index % 60;
    let minute = (index / 60) % 60;
    match rng.gen_range(0..10) {
        0..=5 => json!(format!("2024-01-15T10:{:02}:{:02}Z", minute, second)),
        6 => json!(format!("2024-01-15T10:{:02}:{:02}.123+08:00", minute, second)),
        7 => json!(format!("2024-01-15T10:{:02}:{:02}garbage", minute, second)),
        8 => json!("yesterday"),
        _ => Value::Null,
    }
}

fn generate_array(rng: &mut impl Rng, count: usize) -> Value {
    let messages: Vec<Value> = (0..count)
        .map(|i| {
            if i % 97 == 96 {
                // malformed entries
                return match rng.gen_range(0..3) {
                    0 => json!(i),
                    1 => json!({"id": i, "sender": "Alice", "content": {"nested": true}, "timestamp": "2024-01-15"}),
                    _ => json!({"id": i, "sender": 42, "content": "bad sender"}),
                };
            }
            json!({
                "id": i,
                "sender": SENDERS.choose(rng).copied().unwrap_or_default(),
                "content": generate_body(rng, i),
                "timestamp": generate_timestamp(rng, i),
            })
        })
        .collect();
    Value::Array(messages)
}

fn generate_chunk(rng: &mut impl Rng, index: usize) -> Value {
    let role = match index % 7 {
        6 => "system",
        n if n % 2 == 0 => "user",
        _ => "model",
    };
    if index % 89 == 88 {
        return json!({"role": role, "text": ["not", "a", "string"]});
    }
    json!({"role": role, "text": generate_body(rng, index)})
}

fn generate_chunked(rng: &mut impl Rng, count: usize) -> Value {
    let split = count / 2;
    let prompt: Vec<Value> = (0..split).map(|i| generate_chunk(rng, i)).collect();
    let pending: Vec<Value> = (split..count).map(|i| generate_chunk(rng, i)).collect();
    json!({
        "chunkedPrompt": {"chunks": prompt},
        "pendingInputs": pending,
    })
}
