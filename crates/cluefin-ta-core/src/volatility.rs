//! Volatility indicators: true range, ATR, NATR.

use crate::error::Result;
use crate::kernels::{is_zero, scratch, true_range_into, wilder_into};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

fn check_hlc(high: &[Float], low: &[Float], close: &[Float]) -> Result<usize> {
    check_same_len(&[("high", high), ("low", low), ("close", close)])
}

/// True range, TA-Lib `TRANGE(high, low, close)`; index 0 is NaN.
pub fn trange(high: &[Float], low: &[Float], close: &[Float]) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close)?;
    let mut out = vec![Float::NAN; n];
    true_range_into(high, low, close, &mut out);
    Ok(out)
}

/// First valid index of [`atr`] and [`natr`].
pub fn atr_lookback(period: usize) -> usize {
    period
}

pub(crate) fn atr_into(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    period: usize,
    out: &mut [Float],
) {
    let n = close.len();
    let mut tr = scratch(n, Float::NAN);
    true_range_into(high, low, close, &mut tr);
    if n <= period {
        out.fill(Float::NAN);
        return;
    }
    let seed = tr[1..=period].iter().sum::<Float>() / period as Float;
    wilder_into(&tr, period, period, seed, out);
}

/// Average true range, TA-Lib `ATR(high, low, close, timeperiod=14)`.
///
/// The first value at `period` is the mean of the first `period` true ranges;
/// later values follow Wilder smoothing.
pub fn atr(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close)?;
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; n];
    atr_into(high, low, close, period, &mut out);
    Ok(out)
}

/// Normalized ATR `100 * ATR / close`, TA-Lib `NATR(high, low, close, timeperiod=14)`.
///
/// A zero close yields 0.
pub fn natr(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let mut out = atr(high, low, close, period)?;
    for (v, &c) in out.iter_mut().zip(close) {
        if v.is_nan() {
            continue;
        }
        *v = if is_zero(c) { 0.0 } else { 100.0 * *v / c };
    }
    Ok(out)
}
