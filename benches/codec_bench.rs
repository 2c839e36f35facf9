//! Criterion benchmark untuk encode/decode path
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kurir::{
    decode_arguments, encode_arguments, InterfaceTypeRef, ObjectTable, Signature, Value,
};

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal");
    group.throughput(Throughput::Elements(1));

    // Signature representatif: angka, fixed, string, fd
    let signature = Signature::parse("iufsh").unwrap();
    let types: Vec<InterfaceTypeRef> = vec![None; signature.len()];
    let values = vec![
        Value::Int(-5),
        Value::Uint(7),
        Value::Fixed(12.5),
        Value::str("set_title"),
        Value::Fd(3),
    ];

    group.bench_function("encode", |b| {
        b.iter(|| {
            encode_arguments(black_box(&signature), &types, black_box(&values)).unwrap()
        });
    });

    group.bench_function("decode", |b| {
        let encoded = encode_arguments(&signature, &types, &values).unwrap();
        let mut objects = ObjectTable::new();
        b.iter(|| {
            decode_arguments(
                black_box(&signature),
                &types,
                black_box(encoded.raw()),
                &mut objects,
            )
            .unwrap()
        });
    });

    // Hot path tanpa alokasi: angka saja
    let numeric = Signature::parse("iiuu").unwrap();
    let numeric_types: Vec<InterfaceTypeRef> = vec![None; numeric.len()];
    let numeric_values = vec![
        Value::Int(1),
        Value::Int(2),
        Value::Uint(3),
        Value::Uint(4),
    ];

    group.bench_function("encode_numeric", |b| {
        b.iter(|| {
            encode_arguments(black_box(&numeric), &numeric_types, &numeric_values).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
