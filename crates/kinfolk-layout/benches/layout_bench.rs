//! Benchmarks for the generation and placement passes.
//!
//! Run with: cargo bench -p kinfolk-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kinfolk_layout::{LayoutMetrics, PersonId, TreeShape, layout, measure, place};
use std::collections::HashMap;
use std::hint::black_box;

struct Tree {
    root: PersonId,
    children: HashMap<PersonId, Vec<PersonId>>,
}

impl TreeShape for Tree {
    fn root(&self) -> &PersonId {
        &self.root
    }

    fn children(&self, id: &PersonId) -> Option<&[PersonId]> {
        self.children.get(id).map(Vec::as_slice)
    }
}

/// Complete tree with `fanout` children per node and `depth` generations.
fn make_wide(fanout: usize, depth: usize) -> Tree {
    let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
    let root = PersonId::from("n0");
    let mut frontier = vec![root.clone()];
    let mut next_id = 1usize;
    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            let kids: Vec<PersonId> = (0..fanout)
                .map(|_| {
                    let id = PersonId::from(format!("n{next_id}"));
                    next_id += 1;
                    id
                })
                .collect();
            next.extend(kids.iter().cloned());
            children.insert(parent.clone(), kids);
        }
        frontier = next;
    }
    for leaf in frontier {
        children.insert(leaf, Vec::new());
    }
    Tree { root, children }
}

/// Chain of `len` generations.
fn make_deep(len: usize) -> Tree {
    let ids: Vec<PersonId> = (0..len).map(|i| PersonId::from(format!("n{i}"))).collect();
    let mut children = HashMap::new();
    for (i, id) in ids.iter().enumerate() {
        let kids = ids.get(i + 1).cloned().into_iter().collect();
        children.insert(id.clone(), kids);
    }
    Tree {
        root: ids[0].clone(),
        children,
    }
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/measure");
    for (fanout, depth) in [(3, 4), (4, 5), (8, 4)] {
        let tree = make_wide(fanout, depth);
        group.bench_with_input(
            BenchmarkId::new("wide", format!("{fanout}x{depth}")),
            &tree,
            |b, tree| b.iter(|| black_box(measure(tree))),
        );
    }
    for len in [100, 1_000] {
        let tree = make_deep(len);
        group.bench_with_input(BenchmarkId::new("deep", len), &tree, |b, tree| {
            b.iter(|| black_box(measure(tree)))
        });
    }
    group.finish();
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/place");
    let metrics = LayoutMetrics::default();
    for (fanout, depth) in [(3, 4), (4, 5), (8, 4)] {
        let generations = measure(&make_wide(fanout, depth));
        group.bench_with_input(
            BenchmarkId::new("wide", format!("{fanout}x{depth}")),
            &generations,
            |b, generations| b.iter(|| black_box(place(generations, &metrics))),
        );
    }
    group.finish();
}

fn bench_full_relayout(c: &mut Criterion) {
    let tree = make_wide(4, 5);
    let metrics = LayoutMetrics::default();
    c.bench_function("layout/full_4x5", |b| {
        b.iter(|| black_box(layout(&tree, &metrics)))
    });
}

criterion_group!(benches, bench_measure, bench_place, bench_full_relayout);
criterion_main!(benches);
