// In riptide-core/benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use riptide_codec::{decode, encode, Decoder, Encoder, EncodeOptions};

// --- Mock Data Generation ---

/// Generates a vector of highly compressible data.
fn generate_low_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern = b"abcdefgABCDEFG12345";
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

/// Generates a vector of less compressible, more random-looking data.
fn generate_high_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern: Vec<u8> = (0..=255u8).collect();
    while data.len() < size {
        data.extend_from_slice(&pattern);
    }
    data.truncate(size);
    data
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn level_opts(level: i32) -> EncodeOptions {
    EncodeOptions {
        level: Some(level),
        ..Default::default()
    }
}

fn bench_codec(c: &mut Criterion) {
    // --- Setup Data ---
    let low_entropy_data = generate_low_entropy_bytes(BENCH_DATA_SIZE);
    let high_entropy_data = generate_high_entropy_bytes(BENCH_DATA_SIZE);

    // Prepare encoded data once to benchmark decoding accurately.
    let encoded_low = encode(&low_entropy_data, None).unwrap();
    let encoded_high = encode(&high_entropy_data, None).unwrap();

    let mut group = c.benchmark_group("Riptide Codec");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    // --- One-shot Encoding ---
    for level in [1, 3, 19] {
        let opts = level_opts(level);
        group.bench_function(format!("Encode one-shot, level {level} (Low Entropy)"), |b| {
            b.iter(|| black_box(encode(black_box(&low_entropy_data), Some(&opts))))
        });
        let opts = level_opts(level);
        group.bench_function(format!("Encode one-shot, level {level} (High Entropy)"), |b| {
            b.iter(|| black_box(encode(black_box(&high_entropy_data), Some(&opts))))
        });
    }

    // --- One-shot Decoding ---
    group.bench_function("Decode one-shot (Low Entropy)", |b| {
        b.iter(|| black_box(decode(black_box(&encoded_low), None)))
    });
    group.bench_function("Decode one-shot (High Entropy)", |b| {
        b.iter(|| black_box(decode(black_box(&encoded_high), None)))
    });

    // --- Streaming Sessions ---
    group.bench_function("Encode session, 4 KiB writes (Low Entropy)", |b| {
        b.iter(|| {
            let mut enc = Encoder::new(Vec::new(), None).unwrap();
            for piece in low_entropy_data.chunks(4096) {
                enc.write(black_box(piece)).unwrap();
            }
            enc.close().unwrap();
            black_box(enc.into_port())
        })
    });
    group.bench_function("Decode session, 4 KiB reads (Low Entropy)", |b| {
        b.iter(|| {
            let mut dec = Decoder::from_bytes(encoded_low.clone(), None).unwrap();
            let mut total = 0usize;
            while let Some(chunk) = dec.read(Some(4096)).unwrap() {
                total += chunk.len();
            }
            black_box(total)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
