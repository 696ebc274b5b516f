//! Benchmarks for sentence segmentation throughput

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use wikisent_core::Segmenter;

/// Generate test text of roughly the given size
fn generate_test_text(size_kb: usize) -> String {
    let base_text = "Dr. Smith said \"This is a test.\" It contains 3.14 and U.S.A. words! ";
    let repetitions = size_kb * 1024 / base_text.len();
    base_text.repeat(repetitions.max(1))
}

fn benchmark_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let segmenter = Segmenter::new();

    for size_kb in [1, 64, 1024] {
        let text = generate_test_text(size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{size_kb}KB"), |b| {
            b.iter(|| segmenter.segment(black_box(&text)).count());
        });
    }

    group.finish();
}

fn benchmark_punctuation_runs(c: &mut Criterion) {
    let segmenter = Segmenter::new();
    let text = format!("Start{}", ".!?".repeat(100_000));

    c.bench_function("punctuation_run_300KB", |b| {
        b.iter(|| segmenter.segment(black_box(&text)).count());
    });
}

criterion_group!(benches, benchmark_segment, benchmark_punctuation_runs);
criterion_main!(benches);
