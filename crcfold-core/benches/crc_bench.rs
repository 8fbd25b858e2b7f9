//! Performance benchmarks for the CRC-64 folding engine
//!
//! This benchmark suite evaluates:
//! - Throughput (MB/s) of `Crc64::compute` across data sizes
//! - Fold step per backend against slicing-by-8
//! - Incremental vs single-shot calculation
//! - The fold/table crossover around the dispatcher threshold

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use crcfold_core::clmul::Backend;
use crcfold_core::dispatch::Crc64Dispatcher;
use crcfold_core::{Crc64, fold};
use std::hint::black_box;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Random data - varied byte values
    pub fn random(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x123456789ABCDEF0;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const TINY: usize = 16; // 16 B (minimum fold length)
    pub const SMALL: usize = 256; // 256 B
    pub const MEDIUM: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 64 * 1024; // 64 KB
    pub const XLARGE: usize = 1024 * 1024; // 1 MB
}

const SIZES: [(&str, usize); 5] = [
    ("16B", data_sizes::TINY),
    ("256B", data_sizes::SMALL),
    ("4KB", data_sizes::MEDIUM),
    ("64KB", data_sizes::LARGE),
    ("1MB", data_sizes::XLARGE),
];

/// Benchmark `Crc64::compute` across different data sizes
fn bench_crc64_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc64_sizes");

    for (size_name, size) in SIZES {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| black_box(Crc64::compute(black_box(data))));
        });
    }

    group.finish();
}

/// Benchmark the raw fold step on every backend this CPU supports
fn bench_fold_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_backends");

    for (size_name, size) in SIZES {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));

        for backend in Backend::supported() {
            group.bench_with_input(BenchmarkId::new(backend.name(), size_name), &data, |b, data| {
                b.iter(|| {
                    let crc = fold::step_on(backend, 0, black_box(data), data.len() as u32);
                    black_box(crc)
                });
            });
        }

        group.bench_with_input(BenchmarkId::new("slicing-by-8", size_name), &data, |b, data| {
            b.iter(|| black_box(Crc64::compute_software(black_box(data))));
        });
    }

    group.finish();
}

/// Benchmark incremental updates against a single call
fn bench_crc64_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc64_incremental");
    let data = test_data::random(data_sizes::XLARGE);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_with_input(BenchmarkId::from_parameter("single_shot"), &data, |b, data| {
        b.iter(|| black_box(Crc64::compute(black_box(data))));
    });

    for chunk_size in [256, 4096, 65536] {
        group.bench_with_input(
            BenchmarkId::new("chunked", chunk_size),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut crc = Crc64::new();
                    for chunk in data.chunks(chunk_size) {
                        crc.update(black_box(chunk));
                    }
                    black_box(crc.finalize())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark sizes around the dispatcher's fold threshold
fn bench_fold_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_threshold");
    let folding = Crc64Dispatcher::new();
    let table = Crc64Dispatcher::software_only();

    for size in [16, 32, 48, 64, 96, 128, 256] {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("dispatch", size), &data, |b, data| {
            b.iter(|| black_box(folding.update(!0, black_box(data))));
        });
        group.bench_with_input(BenchmarkId::new("table", size), &data, |b, data| {
            b.iter(|| black_box(table.update(!0, black_box(data))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_crc64_sizes,
    bench_fold_backends,
    bench_crc64_incremental,
    bench_fold_threshold,
);
criterion_main!(benches);
