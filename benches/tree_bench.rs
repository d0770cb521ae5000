//! Benchmark tests for the tree widget

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Widget};
use sprig::model::{NodeId, TreeNode};
use sprig::widget::{Target, TreeOptions, TreeWidget};

/// Build a forest where every node has `fanout` children, `levels` deep.
fn create_forest(roots: usize, fanout: usize, levels: usize) -> Vec<TreeNode> {
    fn subtree(next: &mut i64, fanout: usize, levels: usize) -> TreeNode {
        let id = *next;
        *next += 1;
        let children = if levels == 0 {
            Vec::new()
        } else {
            (0..fanout).map(|_| subtree(next, fanout, levels - 1)).collect()
        };
        TreeNode::new(id, format!("node {}", id)).with_children(children)
    }

    let mut next = 0;
    (0..roots).map(|_| subtree(&mut next, fanout, levels)).collect()
}

fn tree(data: Vec<TreeNode>, depth: usize) -> TreeWidget {
    TreeWidget::new(
        Block::default(),
        TreeOptions::new().with_data(data).with_depth(depth),
    )
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for fanout in [4, 8, 12].iter() {
        let data = create_forest(4, *fanout, 3);

        group.bench_with_input(BenchmarkId::new("eager", fanout), fanout, |b, _| {
            b.iter_batched(|| data.clone(), |data| tree(black_box(data), 1), BatchSize::SmallInput)
        });
    }

    group.finish();
}

fn benchmark_expand_collapse(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_collapse");

    let data = create_forest(4, 8, 3);
    let mut widget = tree(data, usize::MAX);

    group.bench_function("all", |b| {
        b.iter(|| {
            widget.expand(Target::All).unwrap();
            widget.collapse(Target::All).unwrap();
        })
    });

    group.finish();
}

fn benchmark_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");

    let data = create_forest(4, 8, 3);
    let mut widget = tree(data, 1);
    let parent = NodeId::Int(1);
    let extra = NodeId::Int(-1);

    group.bench_function("add_remove", |b| {
        b.iter(|| {
            widget
                .add_node(TreeNode::new(extra.clone(), "extra"), black_box(&parent))
                .unwrap();
            widget.remove_node(black_box(&extra)).unwrap();
        })
    });

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let data = create_forest(4, 8, 3);
    let mut widget = tree(data, usize::MAX);
    let area = Rect::new(0, 0, 120, 60);

    group.bench_function("expanded", |b| {
        b.iter(|| {
            let mut buf = Buffer::empty(area);
            (&mut widget).render(area, &mut buf);
            black_box(buf)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_expand_collapse,
    benchmark_mutation,
    benchmark_render
);
criterion_main!(benches);
