use assetfs_core::codec;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn sample(size: usize) -> Vec<u8> {
    // Stylesheet-like text: compressible but not trivially so
    b".card { margin: 0 auto; padding: 12px; color: #333; }\n"
        .iter()
        .copied()
        .cycle()
        .enumerate()
        .map(|(i, b)| if i % 97 == 0 { b'a' + (i % 26) as u8 } else { b })
        .take(size)
        .collect()
}

/// Benchmark encoding across payload sizes
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1024, 64 * 1024, 1024 * 1024] {
        let data = sample(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("gzip_base64", size), &data, |b, data| {
            b.iter(|| codec::encode(black_box(data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark decoding of wrapped payloads
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [1024, 64 * 1024, 1024 * 1024] {
        let payload = codec::encode(&sample(size)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("gzip_base64", size), &payload, |b, payload| {
            b.iter(|| codec::decode(black_box(payload)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
