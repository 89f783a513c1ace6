//! Range and average based oscillators.

use crate::error::Result;
use crate::kernels::{
    after_leading_nans, ema_into, is_zero, mfi_into, per_to_k, rolling_max_index_into,
    rolling_max_into, rolling_min_index_into, rolling_min_into, rolling_sum_into, scratch,
};
use crate::overlap::{ma_into, ma_lookback, sma_into, MaType};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

fn check_hlc(high: &[Float], low: &[Float], close: &[Float]) -> Result<usize> {
    check_same_len(&[("high", high), ("low", low), ("close", close)])
}

/// First valid index of [`cci`] and [`willr`].
pub fn cci_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Commodity channel index, TA-Lib `CCI(high, low, close, timeperiod=14)`.
///
/// A window with zero mean deviation yields 0.
pub fn cci(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close)?;
    check_period("timeperiod", period, 1)?;

    let tp: Vec<Float> = (0..n).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();
    let mut mean = scratch(n, Float::NAN);
    sma_into(&tp, period, &mut mean);
    let mut out = vec![Float::NAN; n];
    for i in cci_lookback(period)..n {
        let m = mean[i];
        if m.is_nan() {
            continue;
        }
        let window = &tp[i + 1 - period..=i];
        let dev = window.iter().map(|v| (v - m).abs()).sum::<Float>() / period as Float;
        out[i] = if is_zero(dev) {
            0.0
        } else {
            (tp[i] - m) / (0.015 * dev)
        };
    }
    Ok(out)
}

/// Williams %R `-100 * (HH - c) / (HH - LL)`, TA-Lib `WILLR(high, low, close, timeperiod=14)`.
///
/// A flat window yields 0.
pub fn willr(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close)?;
    check_period("timeperiod", period, 1)?;

    let mut out = vec![Float::NAN; n];
    let mut ll = scratch(n, Float::NAN);
    rolling_max_into(high, period, &mut out);
    rolling_min_into(low, period, &mut ll);
    for i in 0..n {
        let hh = out[i];
        let range = hh - ll[i];
        out[i] = if range.is_nan() || close[i].is_nan() {
            Float::NAN
        } else if is_zero(range) {
            0.0
        } else {
            -100.0 * (hh - close[i]) / range
        };
    }
    Ok(out)
}

/// Fast and slow averages for APO/PPO, reordered so `fast <= slow`.
fn price_oscillator(
    real: &[Float],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    f: impl Fn(Float, Float) -> Float,
) -> Result<Vec<Float>> {
    check_period("fastperiod", fast_period, 1)?;
    check_period("slowperiod", slow_period, 1)?;
    let (fast_period, slow_period) = if slow_period < fast_period {
        (slow_period, fast_period)
    } else {
        (fast_period, slow_period)
    };

    let n = real.len();
    let mut fast = scratch(n, Float::NAN);
    let mut out = vec![Float::NAN; n];
    ma_into(real, fast_period, ma_type, &mut fast);
    ma_into(real, slow_period, ma_type, &mut out);
    for (s, &f_val) in out.iter_mut().zip(fast.iter()) {
        *s = f(f_val, *s);
    }
    Ok(out)
}

/// First valid index of [`apo`] and [`ppo`].
pub fn apo_lookback(fast_period: usize, slow_period: usize, ma_type: MaType) -> usize {
    ma_lookback(fast_period, ma_type).max(ma_lookback(slow_period, ma_type))
}

/// Absolute price oscillator, TA-Lib `APO(real, fastperiod=12, slowperiod=26, matype=0)`.
pub fn apo(
    real: &[Float],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<Float>> {
    price_oscillator(real, fast_period, slow_period, ma_type, |f, s| f - s)
}

/// Percentage price oscillator, TA-Lib `PPO(real, fastperiod=12, slowperiod=26, matype=0)`.
///
/// A zero slow average yields 0.
pub fn ppo(
    real: &[Float],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<Float>> {
    price_oscillator(real, fast_period, slow_period, ma_type, |f, s| {
        if s.is_nan() || f.is_nan() {
            Float::NAN
        } else if is_zero(s) {
            0.0
        } else {
            100.0 * (f - s) / s
        }
    })
}

/// First valid index of [`trix`].
pub fn trix_lookback(period: usize) -> usize {
    3 * period.saturating_sub(1) + 1
}

/// One-bar rate of change of a triple EMA, TA-Lib `TRIX(real, timeperiod=30)`.
pub fn trix(real: &[Float], period: usize) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let n = real.len();
    let k = per_to_k(period);
    let mut a = scratch(n, Float::NAN);
    let mut b = scratch(n, Float::NAN);
    after_leading_nans(real, &mut a, |x, out| ema_into(x, period, k, out));
    after_leading_nans(&a, &mut b, |x, out| ema_into(x, period, k, out));
    after_leading_nans(&b, &mut a, |x, out| ema_into(x, period, k, out));

    let mut out = vec![Float::NAN; n];
    for i in 1..n {
        let prev = a[i - 1];
        if prev.is_nan() || a[i].is_nan() {
            continue;
        }
        out[i] = if prev == 0.0 {
            0.0
        } else {
            100.0 * (a[i] - prev) / prev
        };
    }
    Ok(out)
}

/// Balance of power `(c - o) / (h - l)`, TA-Lib `BOP(open, high, low, close)`.
///
/// A bar with no range yields 0.
pub fn bop(open: &[Float], high: &[Float], low: &[Float], close: &[Float]) -> Result<Vec<Float>> {
    let n = check_same_len(&[("open", open), ("high", high), ("low", low), ("close", close)])?;
    Ok((0..n)
        .map(|i| {
            let range = high[i] - low[i];
            if range.is_nan() {
                Float::NAN
            } else if range > 0.0 {
                (close[i] - open[i]) / range
            } else {
                0.0
            }
        })
        .collect())
}

/// First valid index of [`ultosc`].
pub fn ultosc_lookback(p1: usize, p2: usize, p3: usize) -> usize {
    p1.max(p2).max(p3)
}

/// Ultimate oscillator, TA-Lib
/// `ULTOSC(high, low, close, timeperiod1=7, timeperiod2=14, timeperiod3=28)`.
///
/// Periods are sorted so the shortest carries weight 4 and the longest
/// weight 1. A window with zero true range contributes 0.
pub fn ultosc(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    p1: usize,
    p2: usize,
    p3: usize,
) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close)?;
    check_period("timeperiod1", p1, 1)?;
    check_period("timeperiod2", p2, 1)?;
    check_period("timeperiod3", p3, 1)?;
    let mut periods = [p1, p2, p3];
    periods.sort_unstable();

    let mut bp = scratch(n, Float::NAN);
    let mut tr = scratch(n, Float::NAN);
    for i in 1..n {
        let true_low = low[i].min(close[i - 1]);
        let true_high = high[i].max(close[i - 1]);
        if low[i].is_nan() || high[i].is_nan() || close[i - 1].is_nan() {
            continue;
        }
        bp[i] = close[i] - true_low;
        tr[i] = true_high - true_low;
    }

    let mut out = vec![0.0; n];
    let mut bp_sum = scratch(n, Float::NAN);
    let mut tr_sum = scratch(n, Float::NAN);
    for (weight, &p) in [4.0, 2.0, 1.0].iter().zip(&periods) {
        rolling_sum_into(&bp, p, &mut bp_sum);
        rolling_sum_into(&tr, p, &mut tr_sum);
        for i in 0..n {
            let (b, t) = (bp_sum[i], tr_sum[i]);
            out[i] += if b.is_nan() || t.is_nan() {
                Float::NAN
            } else if is_zero(t) {
                0.0
            } else {
                weight * b / t
            };
        }
    }
    for v in out.iter_mut() {
        *v *= 100.0 / 7.0;
    }
    Ok(out)
}

/// `(aroondown, aroonup)`
pub type AroonOutput = (Vec<Float>, Vec<Float>);

/// First valid index of [`aroon`] and [`aroonosc`].
pub fn aroon_lookback(period: usize) -> usize {
    period
}

/// Aroon `(down, up)` over `period + 1` bars, TA-Lib `AROON(high, low, timeperiod=14)`.
///
/// Ties resolve to the most recent extreme.
pub fn aroon(high: &[Float], low: &[Float], period: usize) -> Result<AroonOutput> {
    let n = check_same_len(&[("high", high), ("low", low)])?;
    check_period("timeperiod", period, 1)?;

    let mut up = vec![Float::NAN; n];
    let mut down = vec![Float::NAN; n];
    rolling_max_index_into(high, period + 1, &mut up);
    rolling_min_index_into(low, period + 1, &mut down);
    let scale = 100.0 / period as Float;
    for i in 0..n {
        let age = i as Float;
        up[i] = scale * (period as Float - (age - up[i]));
        down[i] = scale * (period as Float - (age - down[i]));
    }
    Ok((down, up))
}

/// `aroonup - aroondown`, TA-Lib `AROONOSC(high, low, timeperiod=14)`.
pub fn aroonosc(high: &[Float], low: &[Float], period: usize) -> Result<Vec<Float>> {
    let (down, up) = aroon(high, low, period)?;
    Ok(up.iter().zip(&down).map(|(u, d)| u - d).collect())
}

/// First valid index of [`mfi`].
pub fn mfi_lookback(period: usize) -> usize {
    period
}

/// Money flow index, TA-Lib `MFI(high, low, close, volume, timeperiod=14)`.
///
/// A window without negative money flow yields 100.
pub fn mfi(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    volume: &[Float],
    period: usize,
) -> Result<Vec<Float>> {
    let n = check_same_len(&[
        ("high", high),
        ("low", low),
        ("close", close),
        ("volume", volume),
    ])?;
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; n];
    mfi_into(high, low, close, volume, period, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cci_hand_computed() {
        let h = [3.0, 4.0, 5.0];
        let l = [1.0, 2.0, 3.0];
        let c = [2.0, 3.0, 4.0];
        let out = cci(&h, &l, &c, 3).unwrap();
        // tp = 2, 3, 4; mean 3; mean deviation 2/3
        assert!((out[2] - 1.0 / (0.015 * 2.0 / 3.0)).abs() < 1e-9);
        assert!(out[1].is_nan());
    }

    #[test]
    fn test_cci_flat_is_zero() {
        let x = [5.0; 6];
        assert_eq!(cci(&x, &x, &x, 3).unwrap()[4], 0.0);
    }

    #[test]
    fn test_willr() {
        let out = willr(&[10.0, 12.0], &[8.0, 9.0], &[9.0, 11.0], 2).unwrap();
        // HH 12, LL 8
        assert!((out[1] - (-100.0 * 1.0 / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_apo_ppo() {
        let x: Vec<Float> = (1..=10).map(Float::from).collect();
        let a = apo(&x, 2, 4, MaType::Sma).unwrap();
        // sma2 at 3 = 3.5, sma4 = 2.5
        assert!((a[3] - 1.0).abs() < 1e-12);
        assert!(a[2].is_nan());
        let p = ppo(&x, 4, 2, MaType::Sma).unwrap();
        assert!((p[3] - 40.0).abs() < 1e-12);
        assert_eq!(apo_lookback(2, 4, MaType::Sma), 3);
    }

    #[test]
    fn test_trix_warmup_and_sign() {
        let x: Vec<Float> = (0..40).map(|i| 10.0 + i as Float).collect();
        let out = trix(&x, 5).unwrap();
        assert_eq!(trix_lookback(5), 13);
        assert!(out[12].is_nan());
        assert!(out[13] > 0.0);
    }

    #[test]
    fn test_bop() {
        let out = bop(&[1.0, 2.0], &[3.0, 2.0], &[0.0, 2.0], &[2.5, 2.0]).unwrap();
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_ultosc_rising_closes_at_high() {
        let n = 40;
        let close: Vec<Float> = (0..n).map(|i| 10.0 + i as Float).collect();
        let high = close.clone();
        let low: Vec<Float> = close.iter().map(|c| c - 1.0).collect();
        let out = ultosc(&high, &low, &close, 7, 14, 28).unwrap();
        assert!(out[27].is_nan());
        // each bar closes at its true high
        assert!((out[28] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_aroon_new_high_is_100() {
        let high: Vec<Float> = (0..10).map(Float::from).collect();
        let low = high.clone();
        let (down, up) = aroon(&high, &low, 4).unwrap();
        assert!(up[3].is_nan());
        assert_eq!(up[4], 100.0);
        assert_eq!(down[4], 0.0);
        let osc = aroonosc(&high, &low, 4).unwrap();
        assert_eq!(osc[9], 100.0);
    }

    #[test]
    fn test_mfi_public_validation() {
        let x = [1.0, 2.0, 3.0];
        assert!(mfi(&x, &x, &x, &x[..2], 2).is_err());
        let out = mfi(&x, &x, &x, &x, 2).unwrap();
        assert_eq!(out[2], 100.0);
    }
}
