//! Benchmarks for capture throughput and traversal cost.
//!
//! Run with: cargo bench -p rewind-history

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rewind_core::{RopeBuffer, TextBuffer};
use rewind_history::{EditSession, HistoryConfig};
use std::hint::black_box;

fn session_with_inserts(n: usize) -> EditSession<RopeBuffer> {
    let mut session = EditSession::with_config(RopeBuffer::new(), HistoryConfig::unlimited());
    for _ in 0..n {
        let at = session.buffer().len_chars();
        session.insert(at, "word ").unwrap();
    }
    session
}

fn session_with_replaces(n: usize) -> EditSession<RopeBuffer> {
    let mut session =
        EditSession::with_config(RopeBuffer::from_text("seed text"), HistoryConfig::unlimited());
    for _ in 0..n {
        session.replace(0, 4, "next").unwrap();
    }
    session
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");
    for n in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("inserts", n), &n, |b, &n| {
            b.iter(|| session_with_inserts(black_box(n)));
        });
        group.bench_with_input(BenchmarkId::new("replaces", n), &n, |b, &n| {
            b.iter(|| session_with_replaces(black_box(n)));
        });
    }
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for n in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("undo_redo_cycle", n), &n, |b, &n| {
            b.iter_batched(
                || session_with_inserts(n),
                |mut session| {
                    while session.history().can_undo() {
                        session.undo();
                    }
                    while session.history().can_redo() {
                        session.redo();
                    }
                    session
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.bench_with_input(BenchmarkId::new("grouped_undo", 500), &500usize, |b, &n| {
        b.iter_batched(
            || session_with_replaces(n),
            |mut session| {
                while session.history().can_undo() {
                    session.undo();
                }
                session
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.bench_function("bounded_capture_churn", |b| {
        b.iter(|| {
            let mut session =
                EditSession::with_config(RopeBuffer::new(), HistoryConfig::new(64, 0));
            for _ in 0..512 {
                let at = session.buffer().len_chars();
                session.insert(at, "x").unwrap();
            }
            black_box(session.history().undo_depth())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_capture, bench_traversal, bench_eviction);
criterion_main!(benches);
