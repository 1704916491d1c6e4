use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use sudoku_mrv::engine::candidates::CandidateTable;
use sudoku_mrv::engine::propagation::reduce;
use sudoku_mrv::engine::{solve, Grid, Options, Strategy};

const EASY: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

const HARD: &str =
    "..............3.85..1.2.......5.7.....4...1...9.......5......73..2.1........4...9";

fn bench_strategies(c: &mut Criterion) {
    let easy: Grid = EASY.parse().unwrap();
    let hard: Grid = HARD.parse().unwrap();

    let mut group = c.benchmark_group("solve - strategy");

    group.bench_function("mrv - easy", |b| {
        b.iter(|| {
            let report = solve(&easy, &Options::default()).unwrap();
            black_box(report);
        })
    });

    group.bench_function("scan - easy", |b| {
        b.iter(|| {
            let options = Options {
                strategy: Strategy::Scan,
                ..Options::default()
            };
            let report = solve(&easy, &options).unwrap();
            black_box(report);
        })
    });

    group.bench_function("mrv - hard", |b| {
        b.iter(|| {
            let report = solve(&hard, &Options::default()).unwrap();
            black_box(report);
        })
    });

    group.finish();
}

fn bench_trace_overhead(c: &mut Criterion) {
    let easy: Grid = EASY.parse().unwrap();

    let mut group = c.benchmark_group("solve - trace overhead");

    group.bench_function("no trace", |b| {
        b.iter(|| {
            let report = solve(&easy, &Options::default()).unwrap();
            black_box(report);
        })
    });

    group.bench_function("recording", |b| {
        b.iter(|| {
            let options = Options {
                trace: true,
                ..Options::default()
            };
            let report = solve(&easy, &options).unwrap();
            black_box(report);
        })
    });

    group.finish();
}

fn bench_table(c: &mut Criterion) {
    let easy: Grid = EASY.parse().unwrap();

    c.bench_function("candidate table - scan", |b| {
        b.iter(|| {
            let table = CandidateTable::scan(black_box(&easy));
            black_box(table);
        })
    });

    c.bench_function("candidate table - reduce", |b| {
        let table = CandidateTable::scan(&easy);
        let cell = easy.first_empty_from(0).unwrap();
        let digit = table[cell].iter().next().unwrap();
        b.iter(|| {
            let mut child = table.clone();
            let consistent = reduce(&mut child, cell, digit);
            black_box((child, consistent));
        })
    });
}

criterion_group!(benches, bench_strategies, bench_trace_overhead, bench_table);

criterion_main!(benches);
