use criterion::{Criterion, criterion_group, criterion_main};
use newsdesk_engine::editing::{ClipboardPayload, Cmd, InsertAt};
use newsdesk_engine::models::{BlockPatch, BlockType};
mod common;

fn bench_document_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    group.sample_size(10);

    let doc = common::generate_article(50);
    let middle = doc.blocks()[doc.block_count() / 2].id();

    group.bench_function("insert_paragraph", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            let id = d.insert(
                BlockType::Paragraph,
                InsertAt::Index(std::hint::black_box(10)),
                None,
            );
            std::hint::black_box(id);
        });
    });

    group.bench_function("update_with_word_count", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            let patch = d.update(
                middle,
                BlockPatch::html(std::hint::black_box(
                    "<p>The quick brown fox jumps over the lazy dog</p>",
                )),
            );
            std::hint::black_box(patch);
        });
    });

    group.bench_function("move_block", |b| {
        let mut d = doc.clone();
        let last = d.block_count() - 1;
        b.iter(|| {
            let patch = d.apply(Cmd::MoveBlock {
                from: std::hint::black_box(0),
                to: std::hint::black_box(last),
            });
            std::hint::black_box(patch);
        });
    });

    let clipboard = ClipboardPayload::html(common::generate_clipboard_html(20));
    group.bench_function("paste_fan_out", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            d.select(middle);
            let outcome = d.paste(std::hint::black_box(&clipboard));
            std::hint::black_box(outcome);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_document_operations);
criterion_main!(benches);
