//! Criterion benchmarks for history tree construction

use arbor_engine::Game;
use arbor_games::{KuhnPoker, LeducPoker, LiarsDice};
use arbor_tree::HistoryTree;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_build_kuhn(c: &mut Criterion) {
    let game = KuhnPoker::default();
    c.bench_function("build_kuhn", |b| {
        b.iter(|| {
            let tree = HistoryTree::build(game.new_initial_state(), 0).unwrap();
            black_box(tree.num_histories());
        })
    });
}

fn benchmark_build_leduc(c: &mut Criterion) {
    let game = LeducPoker;
    c.bench_function("build_leduc", |b| {
        b.iter(|| {
            let tree = HistoryTree::build(game.new_initial_state(), 0).unwrap();
            black_box(tree.num_histories());
        })
    });
}

fn benchmark_build_liars_dice(c: &mut Criterion) {
    let game = LiarsDice::default();
    let mut group = c.benchmark_group("liars_dice");
    group.sample_size(10);
    group.bench_function("build", |b| {
        b.iter(|| {
            let tree = HistoryTree::build(game.new_initial_state(), 1).unwrap();
            black_box(tree.num_histories());
        })
    });
    group.finish();
}

fn benchmark_lookup_leduc(c: &mut Criterion) {
    let tree = HistoryTree::build(LeducPoker.new_initial_state(), 0).unwrap();
    let keys: Vec<String> = tree.histories().map(str::to_string).collect();
    c.bench_function("lookup_all_leduc", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.by_history(key));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_build_kuhn,
    benchmark_build_leduc,
    benchmark_build_liars_dice,
    benchmark_lookup_leduc,
);
criterion_main!(benches);
