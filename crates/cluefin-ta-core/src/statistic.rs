//! Statistic functions: deviation, linear regression, correlation, beta.

use crate::error::Result;
use crate::kernels::{is_zero, rolling_std_into, rolling_sum_into, rolling_var_into, scratch};
use crate::simd;
use crate::types::Float;
use crate::validation::{check_finite, check_period, check_same_len};

/// First valid index of [`stddev`], [`var`] and [`correl`].
pub fn stddev_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Population standard deviation times `nbdev`, TA-Lib `STDDEV(real, timeperiod=5, nbdev=1)`.
pub fn stddev(real: &[Float], period: usize, nbdev: Float) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    check_finite("nbdev", nbdev)?;
    let mut out = vec![Float::NAN; real.len()];
    rolling_std_into(real, period, &mut out);
    if nbdev != 1.0 {
        out.iter_mut().for_each(|v| *v *= nbdev);
    }
    Ok(out)
}

/// Population variance, TA-Lib `VAR(real, timeperiod=5)`.
pub fn var(real: &[Float], period: usize) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    rolling_var_into(real, period, &mut out);
    Ok(out)
}

/// Least-squares fit over each window with `t = 0` at the oldest bar.
///
/// `emit(slope, intercept)` maps the fit to the output value.
fn regression(
    real: &[Float],
    period: usize,
    emit: impl Fn(Float, Float) -> Float,
) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 2)?;
    let n = real.len();
    let mut out = vec![Float::NAN; n];
    if n < period {
        return Ok(out);
    }

    let p = period as Float;
    let mut t = scratch(period, 0.0);
    for (j, v) in t.iter_mut().enumerate() {
        *v = j as Float;
    }
    let sum_t = p * (p - 1.0) / 2.0;
    let sum_tt = p * (p - 1.0) * (2.0 * p - 1.0) / 6.0;
    let divisor = p * sum_tt - sum_t * sum_t;

    for i in period - 1..n {
        let window = &real[i + 1 - period..=i];
        let sum_y = simd::sum(window);
        let sum_ty = simd::dot_product(window, &t);
        let slope = (p * sum_ty - sum_t * sum_y) / divisor;
        let intercept = (sum_y - slope * sum_t) / p;
        out[i] = emit(slope, intercept);
    }
    Ok(out)
}

/// First valid index of the LINEARREG family and [`tsf`].
pub fn linearreg_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Fitted value at the newest bar, TA-Lib `LINEARREG(real, timeperiod=14)`.
pub fn linearreg(real: &[Float], period: usize) -> Result<Vec<Float>> {
    let last = period.saturating_sub(1) as Float;
    regression(real, period, |m, b| b + m * last)
}

/// Slope per bar, TA-Lib `LINEARREG_SLOPE(real, timeperiod=14)`.
pub fn linearreg_slope(real: &[Float], period: usize) -> Result<Vec<Float>> {
    regression(real, period, |m, _| m)
}

/// Fitted value at the oldest bar, TA-Lib `LINEARREG_INTERCEPT(real, timeperiod=14)`.
pub fn linearreg_intercept(real: &[Float], period: usize) -> Result<Vec<Float>> {
    regression(real, period, |_, b| b)
}

/// Slope angle in degrees, TA-Lib `LINEARREG_ANGLE(real, timeperiod=14)`.
pub fn linearreg_angle(real: &[Float], period: usize) -> Result<Vec<Float>> {
    regression(real, period, |m, _| m.atan().to_degrees())
}

/// One-bar-ahead forecast, TA-Lib `TSF(real, timeperiod=14)`.
pub fn tsf(real: &[Float], period: usize) -> Result<Vec<Float>> {
    let next = period as Float;
    regression(real, period, |m, b| b + m * next)
}

/// Window sums `(x, y, xx, yy, xy)` for paired statistics.
struct PairSums {
    x: Vec<Float>,
    y: Vec<Float>,
    xx: Vec<Float>,
    yy: Vec<Float>,
    xy: Vec<Float>,
}

impl PairSums {
    fn new(x: &[Float], y: &[Float], period: usize) -> Self {
        let n = x.len();
        let mut sums = Self {
            x: vec![Float::NAN; n],
            y: vec![Float::NAN; n],
            xx: vec![Float::NAN; n],
            yy: vec![Float::NAN; n],
            xy: vec![Float::NAN; n],
        };
        let mut tmp = scratch(n, Float::NAN);
        rolling_sum_into(x, period, &mut sums.x);
        rolling_sum_into(y, period, &mut sums.y);
        tmp.iter_mut().zip(x).for_each(|(t, v)| *t = v * v);
        rolling_sum_into(&tmp, period, &mut sums.xx);
        tmp.iter_mut().zip(y).for_each(|(t, v)| *t = v * v);
        rolling_sum_into(&tmp, period, &mut sums.yy);
        tmp.iter_mut()
            .zip(x.iter().zip(y))
            .for_each(|(t, (a, b))| *t = a * b);
        rolling_sum_into(&tmp, period, &mut sums.xy);
        sums
    }
}

/// Pearson correlation, TA-Lib `CORREL(real0, real1, timeperiod=30)`.
///
/// A window where either series is constant yields 0.
pub fn correl(real0: &[Float], real1: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_same_len(&[("real0", real0), ("real1", real1)])?;
    check_period("timeperiod", period, 1)?;
    let s = PairSums::new(real0, real1, period);
    let p = period as Float;
    Ok((0..n)
        .map(|i| {
            if s.xy[i].is_nan() || s.xx[i].is_nan() || s.yy[i].is_nan() {
                return Float::NAN;
            }
            let denom = (s.xx[i] - s.x[i] * s.x[i] / p) * (s.yy[i] - s.y[i] * s.y[i] / p);
            if denom <= 0.0 || is_zero(denom) {
                0.0
            } else {
                (s.xy[i] - s.x[i] * s.y[i] / p) / denom.sqrt()
            }
        })
        .collect())
}

/// One-bar returns with NaN at index 0; a zero base gives 0.
fn returns(x: &[Float]) -> Vec<Float> {
    let mut out = vec![Float::NAN; x.len()];
    for i in 1..x.len() {
        let prev = x[i - 1];
        out[i] = if prev == 0.0 { 0.0 } else { (x[i] - prev) / prev };
    }
    out
}

/// First valid index of [`beta`].
pub fn beta_lookback(period: usize) -> usize {
    period
}

/// Regression beta of `real0` returns on `real1` returns,
/// TA-Lib `BETA(real0, real1, timeperiod=5)`.
///
/// A window with constant `real1` returns yields 0.
pub fn beta(real0: &[Float], real1: &[Float], period: usize) -> Result<Vec<Float>> {
    let n = check_same_len(&[("real0", real0), ("real1", real1)])?;
    check_period("timeperiod", period, 1)?;
    // regress real0 returns (y) on real1 returns (x)
    let y = returns(real0);
    let x = returns(real1);
    let s = PairSums::new(&x, &y, period);
    let p = period as Float;
    Ok((0..n)
        .map(|i| {
            if s.xy[i].is_nan() || s.xx[i].is_nan() {
                return Float::NAN;
            }
            let denom = p * s.xx[i] - s.x[i] * s.x[i];
            if is_zero(denom) {
                0.0
            } else {
                (p * s.xy[i] - s.x[i] * s.y[i]) / denom
            }
        })
        .collect())
}
