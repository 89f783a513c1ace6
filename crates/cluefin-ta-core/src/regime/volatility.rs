//! Volatility regime from NATR percentiles.

use super::{HIGH_VOL, LOW_VOL};
use crate::error::Result;
use crate::types::Float;
use crate::validation::check_range;
use crate::volatility::{atr_lookback, natr};

/// First valid index of [`regime_volatility`].
pub fn regime_volatility_lookback(atr_period: usize) -> usize {
    atr_lookback(atr_period)
}

/// Linear-interpolated percentile of `values` (`q` in `[0, 100]`).
///
/// `values` must be non-empty and free of NaN.
pub(crate) fn percentile(values: &mut [Float], q: Float) -> Float {
    values.sort_unstable_by(Float::total_cmp);
    let pos = q / 100.0 * (values.len() - 1) as Float;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as Float)
}

/// Volatility regime: [`HIGH_VOL`] where NATR is strictly above the
/// `threshold_percentile` of its defined values, [`LOW_VOL`] otherwise.
///
/// NATR warm-up positions stay NaN.
pub fn regime_volatility(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    atr_period: usize,
    threshold_percentile: Float,
) -> Result<Vec<Float>> {
    check_range("threshold_percentile", threshold_percentile, 0.0, 100.0)?;
    let mut out = natr(high, low, close, atr_period)?;

    let mut defined: Vec<Float> = out.iter().copied().filter(|v| !v.is_nan()).collect();
    if defined.is_empty() {
        return Ok(out);
    }
    let threshold = percentile(&mut defined, threshold_percentile);
    for v in out.iter_mut().filter(|v| !v.is_nan()) {
        *v = if *v > threshold { HIGH_VOL } else { LOW_VOL };
    }
    Ok(out)
}
