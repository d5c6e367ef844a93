//! Benchmarks for buffer mutation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdpad::editor::{EditorBuffer, InputEvent, TextBufferController, ToolbarAction};
use mdpad::persistence::DEFAULT_CONTENT;

fn controller(text: &str) -> TextBufferController {
    let mut controller = TextBufferController::new(text);
    controller.attach(EditorBuffer::empty());
    controller
}

fn bench_typing(c: &mut Criterion) {
    c.bench_function("type_100_chars", |b| {
        b.iter(|| {
            let mut editor = controller(DEFAULT_CONTENT);
            editor.handle_input(InputEvent::DocumentEnd { extend: false });
            for ch in black_box("the quick brown fox ").chars().cycle().take(100) {
                editor.handle_input(InputEvent::Char(ch));
            }
            editor.revision()
        })
    });
}

fn bench_toolbar_action(c: &mut Criterion) {
    c.bench_function("bold_whole_document", |b| {
        b.iter(|| {
            let mut editor = controller(DEFAULT_CONTENT);
            editor.handle_input(InputEvent::SelectAll);
            editor.apply_action(black_box(ToolbarAction::Bold));
            editor.after_render()
        })
    });
}

criterion_group!(benches, bench_typing, bench_toolbar_action);
criterion_main!(benches);
