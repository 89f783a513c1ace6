//! Benchmarks for the indicator families on random-walk bars

use cluefin_ta_benchmarks::{bars, SIZES};
use cluefin_ta_core::momentum::{adx, macd, rsi, stoch, StochParams};
use cluefin_ta_core::overlap::{bbands, kama, BbandsParams};
use cluefin_ta_core::pattern::{cdlengulfing, cdlmorningstar};
use cluefin_ta_core::volatility::atr;
use cluefin_ta_core::volume::adosc;
use cluefin_ta_core::{cycle, statistic};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_single_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_series");

    for size in SIZES {
        let b = bars(size, 11);
        let close = &b.close;

        group.bench_with_input(BenchmarkId::new("rsi_14", size), close, |bench, x| {
            bench.iter(|| black_box(rsi(black_box(x), 14).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("macd_12_26_9", size), close, |bench, x| {
            bench.iter(|| black_box(macd(black_box(x), 12, 26, 9).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("bbands_20", size), close, |bench, x| {
            let params = BbandsParams {
                period: 20,
                ..Default::default()
            };
            bench.iter(|| black_box(bbands(black_box(x), &params).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("kama_30", size), close, |bench, x| {
            bench.iter(|| black_box(kama(black_box(x), 30).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("linearreg_14", size), close, |bench, x| {
            bench.iter(|| black_box(statistic::linearreg(black_box(x), 14).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("ht_sine", size), close, |bench, x| {
            bench.iter(|| black_box(cycle::ht_sine(black_box(x)).unwrap()))
        });
    }

    group.finish();
}

fn bench_bar_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_inputs");

    for size in SIZES {
        let b = bars(size, 12);

        group.bench_with_input(BenchmarkId::new("atr_14", size), &b, |bench, b| {
            bench.iter(|| black_box(atr(&b.high, &b.low, black_box(&b.close), 14).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("adx_14", size), &b, |bench, b| {
            bench.iter(|| black_box(adx(&b.high, &b.low, black_box(&b.close), 14).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("stoch", size), &b, |bench, b| {
            let params = StochParams::default();
            bench.iter(|| black_box(stoch(&b.high, &b.low, black_box(&b.close), &params).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("adosc_3_10", size), &b, |bench, b| {
            bench.iter(|| {
                black_box(adosc(&b.high, &b.low, &b.close, black_box(&b.volume), 3, 10).unwrap())
            })
        });
        group.bench_with_input(BenchmarkId::new("cdlengulfing", size), &b, |bench, b| {
            bench.iter(|| {
                black_box(cdlengulfing(&b.open, &b.high, &b.low, black_box(&b.close)).unwrap())
            })
        });
        group.bench_with_input(BenchmarkId::new("cdlmorningstar", size), &b, |bench, b| {
            bench.iter(|| {
                let close = black_box(&b.close);
                black_box(cdlmorningstar(&b.open, &b.high, &b.low, close, 0.3).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_series, bench_bar_inputs);
criterion_main!(benches);
