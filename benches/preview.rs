//! Benchmarks for preview rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdpad::persistence::DEFAULT_CONTENT;
use mdpad::preview::render_preview;
use mdpad::ui::style::Theme;

fn bench_render_simple(c: &mut Criterion) {
    let md = "# Hello\n\nWorld";
    let theme = Theme::light();
    c.bench_function("render_simple", |b| {
        b.iter(|| render_preview(black_box(md), &theme, 80))
    });
}

fn bench_render_default_document(c: &mut Criterion) {
    let theme = Theme::dark();
    c.bench_function("render_default_document", |b| {
        b.iter(|| render_preview(black_box(DEFAULT_CONTENT), &theme, 80))
    });
}

criterion_group!(benches, bench_render_simple, bench_render_default_document);
criterion_main!(benches);
