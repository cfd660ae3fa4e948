//! # Layout Benchmark
//!
//! Full-frame cost of update + draw for wide and deep trees.
//!
//! Run with: `cargo bench --package tessera_ui`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_ui::{
    Anchor, CommandList, Entity, EntityId, InputSnapshot, Overflow, PanelSkin, Size, UiConfig, UiContext,
};

fn context() -> UiContext {
    let config = UiConfig {
        screen_width: 1920.0,
        screen_height: 1080.0,
        ..UiConfig::default()
    };
    UiContext::with_builtin_theme(config).expect("built-in theme")
}

/// One scrolling panel holding `count` mixed widgets.
fn wide_tree(count: usize) -> UiContext {
    let mut ui = context();
    let panel = ui.add_entity(
        Entity::panel(Size::FILL, PanelSkin::Default, Anchor::Center).with_overflow(Overflow::VerticalScroll),
    );
    for i in 0..count {
        let entity = match i % 4 {
            0 => Entity::paragraph(format!("paragraph number {i} with a few words to wrap")),
            1 => Entity::button(format!("button {i}")),
            2 => Entity::checkbox(format!("option {i}"), i % 3 == 0),
            _ => Entity::slider(0, 100),
        };
        ui.add_child(panel, entity).expect("panel exists");
    }
    ui
}

/// A chain of nested panels `depth` levels deep, two paragraphs per level.
fn deep_tree(depth: usize) -> UiContext {
    let mut ui = context();
    let mut parent: EntityId = ui.add_entity(Entity::panel(Size::FILL, PanelSkin::Default, Anchor::Center));
    for level in 0..depth {
        ui.add_child(parent, Entity::paragraph(format!("level {level}"))).expect("parent exists");
        parent = ui
            .add_child(parent, Entity::panel(Size::FILL, PanelSkin::Simple, Anchor::Auto).with_padding((4.0, 4.0)))
            .expect("parent exists");
        ui.add_child(parent, Entity::label("nested")).expect("parent exists");
    }
    ui
}

fn bench_frame(c: &mut Criterion, name: &str, sizes: &[usize], build: fn(usize) -> UiContext) {
    let mut group = c.benchmark_group(name);
    for &size in sizes {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut ui = build(size);
            let input = InputSnapshot::new();
            let mut renderer = CommandList::new();
            b.iter(|| {
                ui.update(&input, 1.0 / 60.0);
                renderer.begin_frame();
                ui.draw(&mut renderer);
                black_box(renderer.command_count())
            });
        });
    }
    group.finish();
}

fn bench_wide(c: &mut Criterion) {
    bench_frame(c, "frame_wide", &[100, 1_000, 5_000], wide_tree);
}

fn bench_deep(c: &mut Criterion) {
    bench_frame(c, "frame_deep", &[16, 64, 128], deep_tree);
}

criterion_group!(benches, bench_wide, bench_deep);
criterion_main!(benches);
