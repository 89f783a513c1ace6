//! Directional movement system: DX, ADX, ADXR, +DI, -DI, +DM, -DM.

use crate::error::Result;
use crate::kernels::{directional_movement_into, dx_into, scratch, wilder_into};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

fn check_hlc(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<usize> {
    let n = check_same_len(&[("high", high), ("low", low), ("close", close)])?;
    check_period("timeperiod", period, 1)?;
    Ok(n)
}

/// `(+DI, -DI, DX)` in one pass.
fn di_dx(high: &[Float], low: &[Float], close: &[Float], period: usize) -> [Vec<Float>; 3] {
    let n = close.len();
    let mut plus = vec![Float::NAN; n];
    let mut minus = vec![Float::NAN; n];
    let mut dx = vec![Float::NAN; n];
    dx_into(high, low, close, period, &mut plus, &mut minus, &mut dx);
    [plus, minus, dx]
}

/// First valid index of [`dx`], [`plus_di`] and [`minus_di`].
pub fn dx_lookback(period: usize) -> usize {
    period
}

/// Directional movement index, TA-Lib `DX(high, low, close, timeperiod=14)`.
pub fn dx(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    check_hlc(high, low, close, period)?;
    let [_, _, dx] = di_dx(high, low, close, period);
    Ok(dx)
}

/// Plus directional indicator, TA-Lib `PLUS_DI(high, low, close, timeperiod=14)`.
pub fn plus_di(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    period: usize,
) -> Result<Vec<Float>> {
    check_hlc(high, low, close, period)?;
    let [plus, _, _] = di_dx(high, low, close, period);
    Ok(plus)
}

/// Minus directional indicator, TA-Lib `MINUS_DI(high, low, close, timeperiod=14)`.
pub fn minus_di(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    period: usize,
) -> Result<Vec<Float>> {
    check_hlc(high, low, close, period)?;
    let [_, minus, _] = di_dx(high, low, close, period);
    Ok(minus)
}

pub(crate) fn adx_into(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    period: usize,
    out: &mut [Float],
) {
    let n = close.len();
    let mut plus = scratch(n, Float::NAN);
    let mut minus = scratch(n, Float::NAN);
    let mut dx = scratch(n, Float::NAN);
    dx_into(high, low, close, period, &mut plus, &mut minus, &mut dx);

    let first = adx_lookback(period);
    if first >= n {
        out.fill(Float::NAN);
        return;
    }
    let seed = dx[period..=first].iter().sum::<Float>() / period as Float;
    wilder_into(&dx, period, first, seed, out);
}

/// First valid index of [`adx`].
pub fn adx_lookback(period: usize) -> usize {
    2 * period - 1
}

/// Average directional index, TA-Lib `ADX(high, low, close, timeperiod=14)`.
///
/// The first value at `2p - 1` is the mean of the first `p` DX values.
pub fn adx(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close, period)?;
    let mut out = vec![Float::NAN; n];
    adx_into(high, low, close, period, &mut out);
    Ok(out)
}

/// First valid index of [`adxr`].
pub fn adxr_lookback(period: usize) -> usize {
    adx_lookback(period) + period - 1
}

/// ADX rating `(ADX[i] + ADX[i - p + 1]) / 2`, TA-Lib `ADXR(high, low, close, timeperiod=14)`.
pub fn adxr(high: &[Float], low: &[Float], close: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_hlc(high, low, close, period)?;
    let mut a = scratch(n, Float::NAN);
    adx_into(high, low, close, period, &mut a);
    let mut out = vec![Float::NAN; n];
    for i in adxr_lookback(period)..n {
        out[i] = (a[i] + a[i + 1 - period]) / 2.0;
    }
    Ok(out)
}

/// First valid index of [`plus_dm`] and [`minus_dm`].
pub fn dm_lookback(period: usize) -> usize {
    if period > 1 {
        period - 1
    } else {
        1
    }
}

fn movements(high: &[Float], low: &[Float], period: usize) -> Result<(Vec<Float>, Vec<Float>)> {
    let n = check_same_len(&[("high", high), ("low", low)])?;
    check_period("timeperiod", period, 1)?;
    let mut plus = vec![Float::NAN; n];
    let mut minus = vec![Float::NAN; n];
    directional_movement_into(high, low, period, &mut plus, &mut minus);
    Ok((plus, minus))
}

/// Smoothed plus directional movement, TA-Lib `PLUS_DM(high, low, timeperiod=14)`.
pub fn plus_dm(high: &[Float], low: &[Float], period: usize) -> Result<Vec<Float>> {
    movements(high, low, period).map(|(plus, _)| plus)
}

/// Smoothed minus directional movement, TA-Lib `MINUS_DM(high, low, timeperiod=14)`.
pub fn minus_dm(high: &[Float], low: &[Float], period: usize) -> Result<Vec<Float>> {
    movements(high, low, period).map(|(_, minus)| minus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(n: usize) -> (Vec<Float>, Vec<Float>, Vec<Float>) {
        let close: Vec<Float> = (0..n)
            .map(|i| 100.0 + i as Float + 3.0 * (i as Float * 0.7).sin())
            .collect();
        let high = close.iter().map(|c| c + 1.5).collect();
        let low = close.iter().map(|c| c - 1.5).collect();
        (high, low, close)
    }

    #[test]
    fn test_adx_lookbacks() {
        let (h, l, c) = trend(80);
        let a = adx(&h, &l, &c, 14).unwrap();
        assert!(a[26].is_nan() && a[27].is_finite());
        let r = adxr(&h, &l, &c, 14).unwrap();
        assert!(r[39].is_nan() && r[40].is_finite());
        let d = dx(&h, &l, &c, 14).unwrap();
        assert!(d[13].is_nan() && d[14].is_finite());
    }

    #[test]
    fn test_adx_seed_is_mean_of_dx() {
        let (h, l, c) = trend(40);
        let d = dx(&h, &l, &c, 5).unwrap();
        let a = adx(&h, &l, &c, 5).unwrap();
        let seed = d[5..=9].iter().sum::<Float>() / 5.0;
        assert!((a[9] - seed).abs() < 1e-10);
        assert!((a[10] - (seed * 4.0 + d[10]) / 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_di_bounds() {
        let (h, l, c) = trend(60);
        let p = plus_di(&h, &l, &c, 14).unwrap();
        let m = minus_di(&h, &l, &c, 14).unwrap();
        for i in 14..60 {
            assert!(p[i] >= 0.0 && m[i] >= 0.0);
            assert!(p[i] <= 100.0 + 1e-9 && m[i] <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_dm_lookback() {
        let (h, l, _) = trend(30);
        let p = plus_dm(&h, &l, 14).unwrap();
        assert!(p[12].is_nan() && p[13].is_finite());
        assert_eq!(dm_lookback(1), 1);
        assert!(minus_dm(&h, &l[..10], 14).is_err());
    }
}
