use criterion::{Criterion, criterion_group, criterion_main};
use semnotes_engine::{extract_semantics, parse_document, serialize_document};
mod common;

fn bench_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(20);

    for size in [10, 100, 1000] {
        let html = common::generate_note_html(size);
        group.bench_function(format!("parse_document_{size}"), |b| {
            b.iter(|| std::hint::black_box(parse_document(std::hint::black_box(&html))));
        });
    }

    group.finish();
}

fn bench_serialize_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(20);

    let blocks = common::generate_blocks(1000);
    group.bench_function("serialize_document_1000", |b| {
        b.iter(|| std::hint::black_box(serialize_document(std::hint::black_box(&blocks))));
    });

    group.finish();
}

fn bench_extract_semantics(c: &mut Criterion) {
    let mut group = c.benchmark_group("semantics");
    group.sample_size(20);

    let html = common::generate_note_html(1000);
    group.bench_function("extract_semantics_1000", |b| {
        b.iter(|| std::hint::black_box(extract_semantics(std::hint::black_box(&html))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_document,
    bench_serialize_document,
    bench_extract_semantics
);
criterion_main!(benches);
