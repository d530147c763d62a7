// In: benches/bridge_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shorttext::{compress, decompress, Bridge};

// --- Mock Data Generation ---

/// Short English prose, the workload the codebook is tuned for.
fn generate_prose(size: usize) -> String {
    let pattern = "The quick brown fox jumps over the lazy dog. ";
    let mut text = pattern.repeat(size / pattern.len() + 1);
    text.truncate(size);
    text
}

/// Text with almost no codebook hits, the worst case for the codec.
fn generate_incompressible(size: usize) -> String {
    "\u{e9}\u{fc}\u{f1}".chars().cycle().take(size / 2).collect()
}

// --- Benchmark Suite ---

const SHORT_TEXT_SIZE: usize = 64;
const LONG_TEXT_SIZE: usize = 16 * 1024;

fn bench_bridge(c: &mut Criterion) {
    // --- Setup Data ---
    let short_prose = generate_prose(SHORT_TEXT_SIZE);
    let long_prose = generate_prose(LONG_TEXT_SIZE);
    let long_noise = generate_incompressible(LONG_TEXT_SIZE);

    let compressed_short = compress(&short_prose).unwrap();
    let compressed_long = compress(&long_prose).unwrap();
    let compressed_noise = compress(&long_noise).unwrap();

    // --- Short strings: dominated by per-call buffer setup ---
    let mut group = c.benchmark_group("Bridge Short Text");
    group.throughput(criterion::Throughput::Bytes(SHORT_TEXT_SIZE as u64));
    group.bench_function("Compress (Prose)", |b| {
        b.iter(|| black_box(compress(black_box(&short_prose))))
    });
    group.bench_function("Decompress (Prose)", |b| {
        b.iter(|| black_box(decompress(black_box(&compressed_short))))
    });
    group.finish();

    // --- Long strings: dominated by the codec ---
    let mut group = c.benchmark_group("Bridge Long Text");
    group.throughput(criterion::Throughput::Bytes(LONG_TEXT_SIZE as u64));
    group.bench_function("Compress (Prose)", |b| {
        b.iter(|| black_box(compress(black_box(&long_prose))))
    });
    group.bench_function("Decompress (Prose)", |b| {
        b.iter(|| black_box(decompress(black_box(&compressed_long))))
    });
    group.bench_function("Compress (Incompressible)", |b| {
        b.iter(|| black_box(compress(black_box(&long_noise))))
    });
    group.bench_function("Decompress (Incompressible)", |b| {
        b.iter(|| black_box(decompress(black_box(&compressed_noise))))
    });
    group.finish();

    // --- Rejection path ---
    let bridge: Bridge = Bridge::default();
    let corrupt = [0xFFu8; 10];
    c.bench_function("Bridge Reject Corrupt Input", |b| {
        b.iter(|| black_box(bridge.decompress(black_box(Some(corrupt.as_slice())))))
    });
}

criterion_group!(benches, bench_bridge);
criterion_main!(benches);
