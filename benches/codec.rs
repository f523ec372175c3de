//! Encode/decode throughput across a handful of representative payload
//! shapes: fully sparse, fully dense, and an interleaved mix.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;
use tempfile::tempfile;

use sfs::codec::decoder::decode;
use sfs::codec::encoder::{encode, EncoderConfig};

fn all_zero(size: usize) -> Vec<u8> {
    vec![0u8; size]
}

fn all_dense(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn interleaved(size: usize) -> Vec<u8> {
    let mut v = Vec::with_capacity(size);
    let mut sparse = true;
    while v.len() < size {
        let chunk = 8192.min(size - v.len());
        if sparse {
            v.extend(std::iter::repeat(0u8).take(chunk));
        } else {
            v.extend((0..chunk).map(|i| (i % 251) as u8));
        }
        sparse = !sparse;
    }
    v
}

fn bench_encode(c: &mut Criterion) {
    let size = 16 * 1024 * 1024;
    let inputs: [(&str, Vec<u8>); 3] = [
        ("all_zero", all_zero(size)),
        ("all_dense", all_dense(size)),
        ("interleaved", interleaved(size)),
    ];

    let mut group = c.benchmark_group("encode");
    for (name, input) in &inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| {
                let mut out = Vec::new();
                let mut src = Cursor::new(input);
                encode(&mut src, &mut out, &EncoderConfig::default()).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let size = 16 * 1024 * 1024;
    let inputs: [(&str, Vec<u8>); 3] = [
        ("all_zero", all_zero(size)),
        ("all_dense", all_dense(size)),
        ("interleaved", interleaved(size)),
    ];

    let mut group = c.benchmark_group("decode");
    for (name, input) in &inputs {
        let mut stream = Vec::new();
        let mut src = Cursor::new(input);
        encode(&mut src, &mut stream, &EncoderConfig::default()).unwrap();

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &stream, |b, stream| {
            b.iter(|| {
                let mut dst = tempfile().unwrap();
                let mut src = Cursor::new(stream);
                decode(&mut src, &mut dst).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
