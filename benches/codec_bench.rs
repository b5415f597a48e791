//! Criterion benchmark untuk codec
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kurir::{Decoder, Encoder, Msg};

fn perf_msg(body_size: usize) -> Msg {
    Msg::new(
        "perf123",
        "perf_test",
        (0..10).map(|i| format!("user{}", i)).collect(),
        "performance",
        "x".repeat(body_size),
    )
}

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1));

    let msg = perf_msg(1000);
    let bytes = msg.encode().unwrap();

    // Benchmark encode (buffer reusable)
    group.bench_function("encode", |b| {
        let mut encoder = Encoder::with_capacity(4096);
        b.iter(|| {
            encoder.reset();
            encoder.encode(black_box(&msg)).unwrap();
        });
    });

    // Benchmark decode
    group.bench_function("decode", |b| {
        b.iter(|| {
            let decoded = Msg::decode(black_box(&bytes)).unwrap();
            black_box(decoded);
        });
    });

    // Benchmark full round-trip, termasuk alokasi buffer baru
    group.bench_function("round_trip", |b| {
        b.iter(|| {
            let encoded = msg.encode().unwrap();
            black_box(Msg::decode(&encoded).unwrap());
        });
    });

    group.finish();
}

fn bench_body_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_size");

    for size in [64, 1024, 16384] {
        let bytes = perf_msg(size).encode().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("decode_{}", size), |b| {
            b.iter(|| black_box(Msg::decode(black_box(&bytes)).unwrap()));
        });
    }

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    // 100 record back-to-back dalam satu buffer
    let mut encoder = Encoder::with_capacity(256 * 1024);
    for _ in 0..100 {
        encoder.encode(&perf_msg(256)).unwrap();
    }
    let stream = encoder.into_bytes();

    group.throughput(Throughput::Elements(100));
    group.bench_function("decode_100", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new(black_box(&stream[..]));
            while !decoder.is_empty() {
                black_box(decoder.decode().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode_decode, bench_body_sizes, bench_stream);
criterion_main!(benches);
