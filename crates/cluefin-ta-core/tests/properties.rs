// Property tests over random price series
//
// Length preservation, warm-up NaN, determinism, no input mutation and NaN
// propagation for the main indicator families.

use std::ops::Range;

use cluefin_ta_core::dow::{dow_theory, DowTheoryParams};
use cluefin_ta_core::momentum::{
    adx, cmo, dx, macd, macd_lookback, mfi, plus_di, rsi, rsi_lookback, stoch, StochParams,
};
use cluefin_ta_core::overlap::{
    bbands, bbands_lookback, dema, dema_lookback, ema, ema_lookback, kama, sma, sma_lookback,
    tema, tema_lookback, trima, trima_lookback, wma, wma_lookback, BbandsParams,
};
use cluefin_ta_core::pattern::{cdlengulfing, cup_handle, CupHandleParams};
use cluefin_ta_core::regime::{
    regime_combined, regime_ma, regime_ma_duration, regime_ma_lookback, RegimeParams,
};
use cluefin_ta_core::statistic::stddev;
use cluefin_ta_core::volatility::{atr, atr_lookback, natr};
use cluefin_ta_core::volume::{ad, adosc, obv};
use cluefin_ta_core::{Ohlcv, Result};
use proptest::prelude::*;

type Single = fn(&[f64], usize) -> Result<Vec<f64>>;

const SINGLE: [(&str, Single, fn(usize) -> usize); 6] = [
    ("sma", sma, sma_lookback),
    ("ema", ema, ema_lookback),
    ("wma", wma, wma_lookback),
    ("dema", dema, dema_lookback),
    ("tema", tema, tema_lookback),
    ("trima", trima, trima_lookback),
];

fn prices(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1000.0, 0..max_len)
}

/// `(high, low, close)` with `low < close < high`.
fn bars(len: Range<usize>) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    prop::collection::vec((20.0f64..1000.0, 0.1f64..10.0, 0.0f64..1.0), len).prop_map(|rows| {
        let mut high = Vec::with_capacity(rows.len());
        let mut low = Vec::with_capacity(rows.len());
        let mut close = Vec::with_capacity(rows.len());
        for (mid, spread, pos) in rows {
            high.push(mid + spread);
            low.push(mid - spread);
            close.push(mid - spread + 2.0 * spread * pos);
        }
        (high, low, close)
    })
}

fn check_warmup(
    name: &str,
    out: &[f64],
    lookback: usize,
) -> std::result::Result<(), TestCaseError> {
    for (i, v) in out.iter().enumerate().take(lookback) {
        prop_assert!(v.is_nan(), "{name}[{i}] = {v} inside warm-up {lookback}");
    }
    if let Some(v) = out.get(lookback) {
        prop_assert!(v.is_finite(), "{name}[{lookback}] = {v} at first valid index");
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_moving_averages_preserve_length_and_warmup(x in prices(200), period in 1usize..30) {
        for (name, f, lookback) in SINGLE {
            let out = f(&x, period).unwrap();
            prop_assert_eq!(out.len(), x.len());
            check_warmup(name, &out, lookback(period))?;
        }
    }

    #[test]
    fn prop_rsi_bounded(x in prices(200), period in 1usize..30) {
        let out = rsi(&x, period).unwrap();
        prop_assert_eq!(out.len(), x.len());
        check_warmup("rsi", &out, rsi_lookback(period))?;
        for v in out.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn prop_atr_nonnegative((high, low, close) in bars(0..200), period in 1usize..30) {
        let out = atr(&high, &low, &close, period).unwrap();
        prop_assert_eq!(out.len(), close.len());
        check_warmup("atr", &out, atr_lookback(period))?;
        prop_assert!(out.iter().filter(|v| !v.is_nan()).all(|&v| v >= 0.0));
    }

    #[test]
    fn prop_multi_output_warmup(x in prices(200)) {
        let (m, signal, hist) = macd(&x, 12, 26, 9).unwrap();
        for (name, out) in [("macd", &m), ("signal", &signal), ("hist", &hist)] {
            prop_assert_eq!(out.len(), x.len());
            check_warmup(name, out, macd_lookback(12, 26, 9))?;
        }
        let params = BbandsParams::default();
        let (upper, middle, lower) = bbands(&x, &params).unwrap();
        for (name, out) in [("upper", &upper), ("middle", &middle), ("lower", &lower)] {
            check_warmup(name, out, bbands_lookback(&params))?;
        }
    }

    #[test]
    fn prop_inputs_untouched((high, low, close) in bars(0..150)) {
        let volume: Vec<f64> = high
            .iter()
            .zip(&low)
            .map(|(h, l)| 1000.0 * (h - l))
            .collect();
        let open = low.clone();
        let before = (open.clone(), high.clone(), low.clone(), close.clone(), volume.clone());

        sma(&close, 10).unwrap();
        ema(&close, 10).unwrap();
        kama(&close, 10).unwrap();
        rsi(&close, 14).unwrap();
        macd(&close, 12, 26, 9).unwrap();
        bbands(&close, &BbandsParams::default()).unwrap();
        stoch(&high, &low, &close, &StochParams::default()).unwrap();
        adx(&high, &low, &close, 14).unwrap();
        natr(&high, &low, &close, 14).unwrap();
        mfi(&high, &low, &close, &volume, 14).unwrap();
        obv(&close, &volume).unwrap();
        adosc(&high, &low, &close, &volume, 3, 10).unwrap();
        cdlengulfing(&open, &high, &low, &close).unwrap();
        regime_combined(&high, &low, &close, &RegimeParams::default()).unwrap();
        let bars = Ohlcv::from_hlc(&high, &low, &close).with_volume(&volume);
        dow_theory(bars, Some(bars), &DowTheoryParams::default()).unwrap();
        cup_handle(&open, &high, &low, &close, Some(&volume), &CupHandleParams::default()).unwrap();

        prop_assert_eq!((open, high, low, close, volume), before);
    }

    #[test]
    fn prop_deterministic_and_inputs_untouched((high, low, close) in bars(0..150)) {
        let (h0, l0, c0) = (high.clone(), low.clone(), close.clone());
        let a = atr(&high, &low, &close, 14).unwrap();
        let b = atr(&high, &low, &close, 14).unwrap();
        prop_assert_eq!(
            a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
        let r1 = regime_ma(&close, 5, 20, 0.02).unwrap();
        let r2 = regime_ma(&close, 5, 20, 0.02).unwrap();
        prop_assert_eq!(
            r1.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            r2.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
        prop_assert_eq!(high, h0);
        prop_assert_eq!(low, l0);
        prop_assert_eq!(close, c0);
    }

    #[test]
    fn prop_nan_poisons_only_its_windows(
        mut x in prop::collection::vec(1.0f64..1000.0, 40..120),
        period in 1usize..20,
        k_frac in 0.0f64..1.0,
    ) {
        let k = ((x.len() - 1) as f64 * k_frac) as usize;
        x[k] = f64::NAN;
        for out in [sma(&x, period).unwrap(), stddev(&x, period, 1.0).unwrap()] {
            for (i, v) in out.iter().enumerate() {
                let covers_k = i >= k && i < k + period;
                if i + 1 < period {
                    prop_assert!(v.is_nan());
                } else {
                    prop_assert_eq!(v.is_nan(), covers_k, "index {} with NaN at {}", i, k);
                }
            }
        }
    }

    #[test]
    fn prop_nan_poisons_recursive_tails(
        (mut high, mut low, mut close) in bars(40..120),
        period in 1usize..20,
        k_frac in 0.0f64..1.0,
    ) {
        let n = close.len();
        let k = 1 + ((n - 2) as f64 * k_frac) as usize;
        high[k] = f64::NAN;
        low[k] = f64::NAN;
        close[k] = f64::NAN;
        let volume: Vec<f64> = (0..n).map(|i| 1000.0 + i as f64).collect();

        let outputs = [
            ("ema", ema(&close, period).unwrap()),
            ("rsi", rsi(&close, period).unwrap()),
            ("cmo", cmo(&close, period).unwrap()),
            ("atr", atr(&high, &low, &close, period).unwrap()),
            ("dx", dx(&high, &low, &close, period).unwrap()),
            ("plus_di", plus_di(&high, &low, &close, period).unwrap()),
            ("adx", adx(&high, &low, &close, period).unwrap()),
            ("obv", obv(&close, &volume).unwrap()),
            ("ad", ad(&high, &low, &close, &volume).unwrap()),
        ];
        for (name, out) in &outputs {
            prop_assert_eq!(out.len(), n);
            for (i, v) in out.iter().enumerate().skip(k) {
                prop_assert!(v.is_nan(), "{}[{}] = {} after NaN at {}", name, i, v, k);
            }
        }
    }

    #[test]
    fn prop_regime_states_and_durations(x in prices(200)) {
        let states = regime_ma(&x, 5, 20, 0.02).unwrap();
        check_warmup("regime_ma", &states, regime_ma_lookback(5, 20))?;
        prop_assert!(states
            .iter()
            .filter(|v| !v.is_nan())
            .all(|&s| s == 0.0 || s == 1.0 || s == 2.0));

        let durations = regime_ma_duration(&states);
        prop_assert_eq!(durations.len(), states.len());
        for i in 0..states.len() {
            prop_assert_eq!(durations[i].is_nan(), states[i].is_nan());
            if states[i].is_nan() {
                continue;
            }
            let expected = if i > 0 && states[i - 1] == states[i] {
                durations[i - 1] + 1.0
            } else {
                1.0
            };
            prop_assert_eq!(durations[i], expected);
        }
    }
}
