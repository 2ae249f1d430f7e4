use criterion::{Criterion, criterion_group, criterion_main};
use newsdesk_engine::io::{export::Exporter, to_json_pretty};
mod common;

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(10);

    let doc = common::generate_article(50);
    let exporter = Exporter::default();

    group.bench_function("export_document", |b| {
        b.iter(|| {
            let exported = exporter.export_at(std::hint::black_box(&doc), 0);
            std::hint::black_box(exported);
        });
    });

    group.bench_function("export_to_json", |b| {
        b.iter(|| {
            let json = to_json_pretty(&exporter.export_at(&doc, 0)).unwrap();
            std::hint::black_box(json);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
