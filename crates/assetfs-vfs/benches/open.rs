//! Benchmarks for `StaticFs::open`.
//!
//! Compares the cold path (first open decodes the payload) against the warm
//! path (cached bytes), and measures override probing overhead.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench open
//! ```

use assetfs_core::{FileRecord, LocalOverride, Manifest, ManifestEntry, codec};
use assetfs_vfs::{AssetTable, StaticFs};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use tempfile::TempDir;

fn manifest(file_count: usize, size: usize) -> Manifest {
    let entries = (0..file_count)
        .map(|i| {
            let data: Vec<u8> = format!("/* asset {i} */ body {{ margin: {i}px; }}\n")
                .into_bytes()
                .into_iter()
                .cycle()
                .take(size)
                .collect();
            ManifestEntry::File(FileRecord {
                path: format!("/assets/file{i}.css"),
                local: format!("public/assets/file{i}.css"),
                size: data.len() as u64,
                mod_time: 0,
                compressed: codec::encode(&data).unwrap(),
            })
        })
        .collect();
    Manifest { entries }
}

/// First open of an entry, including the decode
fn bench_open_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_cold");

    for size in [1024, 64 * 1024] {
        let source = manifest(1, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter_batched(
                || {
                    let table = AssetTable::from_manifest(source.clone());
                    StaticFs::new(Arc::new(table), LocalOverride::default())
                },
                |fs| black_box(fs.open("/assets/file0.css").unwrap()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Repeat opens served from the decode cache
fn bench_open_warm(c: &mut Criterion) {
    let fs = StaticFs::new(
        Arc::new(AssetTable::from_manifest(manifest(100, 4096))),
        LocalOverride::default(),
    );
    fs.open("/assets/file42.css").unwrap();

    c.bench_function("open_warm", |b| {
        b.iter(|| black_box(fs.open(black_box("/assets/file42.css")).unwrap()));
    });
}

/// Open with the override enabled but missing on disk
fn bench_open_override_miss(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let fs = StaticFs::new(
        Arc::new(AssetTable::from_manifest(manifest(100, 4096))),
        LocalOverride::new(dir.path()),
    );
    fs.open("/assets/file42.css").unwrap();

    c.bench_function("open_override_miss", |b| {
        b.iter(|| black_box(fs.open(black_box("/assets/file42.css")).unwrap()));
    });
}

criterion_group!(benches, bench_open_cold, bench_open_warm, bench_open_override_miss);
criterion_main!(benches);
