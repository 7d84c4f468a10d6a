//! Criterion benchmarks for the streak scanner.
//!
//! Benchmarks:
//! 1. Scanning daily sentiment series of increasing length
//! 2. Scanning a choppy win/loss tape (many short streaks)
//! 3. Derived queries over a large streak list

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streaklab_core::{scan, Observation, Sentiment, StreakList, TradeOutcome, TransitionMatrix};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_sentiment_series(n: usize) -> Vec<Observation<NaiveDate, Sentiment>> {
    let base = NaiveDate::from_ymd_opt(2018, 2, 1).unwrap();
    (0..n)
        .map(|i| {
            // slow regime cycle with occasional flips
            let phase = (i as f64 * 0.05).sin();
            let label = if i % 17 == 0 {
                Sentiment::Neutral
            } else if phase > 0.2 {
                Sentiment::Greed
            } else if phase < -0.2 {
                Sentiment::Fear
            } else {
                Sentiment::Neutral
            };
            Observation::new(base + Duration::days(i as i64), label)
        })
        .collect()
}

fn make_trade_tape(n: usize) -> Vec<TradeOutcome> {
    (0..n)
        .map(|i| TradeOutcome::from_pnl(Some(((i * 7919) % 13) as f64 - 6.0)))
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_scan_sentiment(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_sentiment");
    for n in [1_000, 10_000, 100_000] {
        let series = make_sentiment_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, s| {
            b.iter(|| scan(black_box(s.clone())))
        });
    }
    group.finish();
}

fn bench_scan_trades(c: &mut Criterion) {
    let tape = make_trade_tape(200_000);
    c.bench_function("scan_trades_200k", |b| {
        b.iter(|| StreakList::from_labels(black_box(tape.iter().copied())))
    });
}

fn bench_queries(c: &mut Criterion) {
    let list = scan(make_sentiment_series(100_000));
    c.bench_function("longest_greed", |b| {
        b.iter(|| black_box(&list).longest(&Sentiment::Greed))
    });
    c.bench_function("at_least_5", |b| b.iter(|| black_box(&list).at_least(5)));
    c.bench_function("transition_matrix", |b| {
        b.iter(|| TransitionMatrix::from_streaks(black_box(&list)))
    });
}

criterion_group!(benches, bench_scan_sentiment, bench_scan_trades, bench_queries);
criterion_main!(benches);
