//! Momentum and rate-of-change family.

use crate::error::Result;
use crate::types::Float;
use crate::validation::check_period;

fn lagged(real: &[Float], period: usize, f: impl Fn(Float, Float) -> Float) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    for i in period..real.len() {
        out[i] = f(real[i], real[i - period]);
    }
    Ok(out)
}

/// Ratio-based transform that yields 0 when the lagged value is 0.
#[inline]
fn ratio(cur: Float, prev: Float, f: impl Fn(Float) -> Float) -> Float {
    if prev.is_nan() || cur.is_nan() {
        Float::NAN
    } else if prev == 0.0 {
        0.0
    } else {
        f(cur / prev)
    }
}

/// First valid index of the whole family.
pub fn mom_lookback(period: usize) -> usize {
    period
}

/// `x[i] - x[i-p]`, TA-Lib `MOM(real, timeperiod=10)`.
pub fn mom(real: &[Float], period: usize) -> Result<Vec<Float>> {
    lagged(real, period, |c, p| c - p)
}

/// `100 * (x[i] / x[i-p] - 1)`, TA-Lib `ROC(real, timeperiod=10)`.
pub fn roc(real: &[Float], period: usize) -> Result<Vec<Float>> {
    lagged(real, period, |c, p| ratio(c, p, |r| (r - 1.0) * 100.0))
}

/// `(x[i] - x[i-p]) / x[i-p]`, TA-Lib `ROCP(real, timeperiod=10)`.
pub fn rocp(real: &[Float], period: usize) -> Result<Vec<Float>> {
    lagged(real, period, |c, p| ratio(c, p, |r| r - 1.0))
}

/// `x[i] / x[i-p]`, TA-Lib `ROCR(real, timeperiod=10)`.
pub fn rocr(real: &[Float], period: usize) -> Result<Vec<Float>> {
    lagged(real, period, |c, p| ratio(c, p, |r| r))
}

/// `100 * x[i] / x[i-p]`, TA-Lib `ROCR100(real, timeperiod=10)`.
pub fn rocr100(real: &[Float], period: usize) -> Result<Vec<Float>> {
    lagged(real, period, |c, p| ratio(c, p, |r| r * 100.0))
}
