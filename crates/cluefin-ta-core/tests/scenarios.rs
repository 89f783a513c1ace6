// Literal boundary scenarios
//
// Fixed inputs with known answers for the indicator, regime, pattern and Dow
// families.

use std::f64::consts::PI;

use cluefin_ta_core::dow::{dow_theory, DowTheoryParams};
use cluefin_ta_core::momentum::{adx, macd, mfi, rsi, stoch, StochParams};
use cluefin_ta_core::overlap::{bbands, ema, kama, sar, sma, t3, BbandsParams};
use cluefin_ta_core::pattern::{cdlengulfing, cup_handle, CupHandleParams};
use cluefin_ta_core::regime::{
    regime_combined, regime_hmm_returns, regime_ma, regime_ma_duration, regime_volatility,
    RegimeParams, BULL, SIDEWAYS,
};
use cluefin_ta_core::volatility::{atr, natr};
use cluefin_ta_core::volume::{ad, adosc, obv};
use cluefin_ta_core::{cycle, statistic, Ohlcv};

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Runs a representative function from every family on a series of `n` bars
/// and checks each output keeps the input length.
fn assert_short_input(n: usize) {
    let c: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
    let h: Vec<f64> = c.iter().map(|v| v + 1.0).collect();
    let l: Vec<f64> = c.iter().map(|v| v - 1.0).collect();
    let v = vec![1000.0; n];

    assert_eq!(sma(&c, 5).unwrap().len(), n);
    assert_eq!(ema(&c, 5).unwrap().len(), n);
    assert_eq!(kama(&c, 10).unwrap().len(), n);
    assert_eq!(t3(&c, 5, 0.7).unwrap().len(), n);
    assert_eq!(rsi(&c, 14).unwrap().len(), n);
    let (m, s, hist) = macd(&c, 12, 26, 9).unwrap();
    assert_eq!((m.len(), s.len(), hist.len()), (n, n, n));
    let (u, mid, lo) = bbands(&c, &BbandsParams::default()).unwrap();
    assert_eq!((u.len(), mid.len(), lo.len()), (n, n, n));
    let (k, d) = stoch(&h, &l, &c, &StochParams::default()).unwrap();
    assert_eq!((k.len(), d.len()), (n, n));
    assert_eq!(adx(&h, &l, &c, 14).unwrap().len(), n);
    assert_eq!(sar(&h, &l, 0.02, 0.2).unwrap().len(), n);
    assert_eq!(atr(&h, &l, &c, 14).unwrap().len(), n);
    assert_eq!(natr(&h, &l, &c, 14).unwrap().len(), n);
    assert_eq!(obv(&c, &v).unwrap().len(), n);
    assert_eq!(ad(&h, &l, &c, &v).unwrap().len(), n);
    assert_eq!(adosc(&h, &l, &c, &v, 3, 10).unwrap().len(), n);
    assert_eq!(mfi(&h, &l, &c, &v, 14).unwrap().len(), n);
    assert_eq!(statistic::stddev(&c, 5, 1.0).unwrap().len(), n);
    assert_eq!(statistic::linearreg(&c, 14).unwrap().len(), n);
    assert_eq!(cycle::ht_dcperiod(&c).unwrap().len(), n);
    assert_eq!(cdlengulfing(&c, &h, &l, &c).unwrap().len(), n);

    assert_eq!(regime_ma(&c, 20, 50, 0.02).unwrap().len(), n);
    assert_eq!(regime_volatility(&h, &l, &c, 14, 66.0).unwrap().len(), n);
    let combined = regime_combined(&h, &l, &c, &RegimeParams::default()).unwrap();
    assert_eq!(combined.combined.len(), n);
    assert_eq!(regime_hmm_returns(&c).len(), n);

    let cup = cup_handle(&c, &h, &l, &c, Some(&v), &CupHandleParams::default()).unwrap();
    assert_eq!(cup, vec![0; n]);

    let bars = Ohlcv::from_hlc(&h, &l, &c).with_volume(&v);
    let dow = dow_theory(bars, Some(bars), &DowTheoryParams::default()).unwrap();
    assert_eq!((dow.trend.len(), dow.correlation.len()), (n, n));
}

#[test]
fn test_empty_and_single_bar_inputs() {
    assert_short_input(0);
    assert_short_input(1);

    let r = sma(&[42.0], 1).unwrap();
    assert_eq!(r, vec![42.0]);
    assert!(rsi(&[42.0], 14).unwrap()[0].is_nan());
}

#[test]
#[cfg(feature = "hmm")]
fn test_hmm_on_short_input_is_nan() {
    use cluefin_ta_core::regime::{regime_hmm, HmmParams};

    let out = regime_hmm(&[], &HmmParams::default()).unwrap();
    assert!(out.states.is_empty());
    assert!(out.means.iter().all(|m| m.is_nan()));
}

#[test]
fn test_rsi_rising_series() {
    let close: Vec<f64> = (1..=15).map(f64::from).collect();
    let out = rsi(&close, 14).unwrap();
    assert!(out[..14].iter().all(|v| v.is_nan()));
    assert_eq!(out[14], 100.0);
}

#[test]
fn test_regime_ma_linear_uptrend_is_bull() {
    let close = linspace(100.0, 200.0, 100);
    let states = regime_ma(&close, 20, 50, 0.02).unwrap();
    assert!(states[..49].iter().all(|v| v.is_nan()));
    assert!(states[49..].iter().all(|&s| s == BULL));
}

#[test]
fn test_regime_ma_flat_series_is_sideways() {
    let close = vec![150.0; 100];
    let states = regime_ma(&close, 20, 50, 0.02).unwrap();
    assert!(states[49..].iter().all(|&s| s == SIDEWAYS));
}

#[test]
fn test_regime_duration_restarts_on_change() {
    let states = [2.0, 2.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    assert_eq!(
        regime_ma_duration(&states),
        vec![1.0, 2.0, 3.0, 1.0, 2.0, 1.0, 2.0, 3.0, 4.0]
    );
}

#[test]
fn test_cup_handle_single_breakout() {
    // rims near 100 at bars 10 and 90, trough at 80, handle low 95, breakout 101
    let close: Vec<f64> = (0..120)
        .map(|i| {
            let t = i as f64;
            match i {
                0..=9 => 95.0 + 0.5 * t,
                10..=90 => 90.0 + 10.0 * (2.0 * PI * (t - 10.0) / 80.0).cos(),
                91..=100 => 100.0 - 5.0 * (PI * (t - 90.0) / 10.0).sin(),
                _ => 101.0 + 0.5 * (t - 101.0),
            }
        })
        .collect();
    let open: Vec<f64> = std::iter::once(close[0])
        .chain(close[..119].iter().copied())
        .collect();
    let high: Vec<f64> = close
        .iter()
        .zip(&open)
        .map(|(c, o)| c.max(*o) + 0.5)
        .collect();
    let low: Vec<f64> = close
        .iter()
        .zip(&open)
        .map(|(c, o)| c.min(*o) - 0.5)
        .collect();

    let out = cup_handle(&open, &high, &low, &close, None, &CupHandleParams::default()).unwrap();
    let hits: Vec<usize> = (0..out.len()).filter(|&i| out[i] != 0).collect();
    assert_eq!(hits, vec![101]);
    assert_eq!(out[101], 100);
}

#[test]
fn test_dow_rising_market_with_volume() {
    let close = linspace(100.0, 199.0, 100);
    let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
    let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
    let volume = linspace(1000.0, 2000.0, 100);

    let stock = Ohlcv::from_hlc(&high, &low, &close).with_volume(&volume);
    let index = Ohlcv::from_hlc(&high, &low, &close);
    let out = dow_theory(stock, Some(index), &DowTheoryParams::default()).unwrap();

    // a slope needs 11 bars, the volume average 20
    assert!(out.trend[..10].iter().all(|&t| t == 0.0));
    assert!(out.trend[10..19].iter().all(|&t| t == 1.0));
    assert!(out.trend[19..].iter().all(|&t| t == 2.0));
    let confirmed = out.trend.iter().filter(|&&t| t == 2.0).count();
    assert_eq!(confirmed, 81);

    assert!(out.correlation[..10].iter().all(|&c| c == 0.0));
    assert!(out.correlation[10..].iter().all(|&c| c == 1.0));
}
