//! Window midpoints.

use crate::error::Result;
use crate::kernels::{rolling_max_into, rolling_min_into};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

/// First valid index of [`midpoint`] and [`midprice`].
pub fn midpoint_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// `(max + min) / 2` over the window, TA-Lib `MIDPOINT(real, timeperiod=14)`.
pub fn midpoint(real: &[Float], period: usize) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let n = real.len();
    let mut hi = vec![Float::NAN; n];
    let mut lo = vec![Float::NAN; n];
    rolling_max_into(real, period, &mut hi);
    rolling_min_into(real, period, &mut lo);
    for (h, l) in hi.iter_mut().zip(&lo) {
        *h = (*h + l) / 2.0;
    }
    Ok(hi)
}

/// `(highest high + lowest low) / 2`, TA-Lib `MIDPRICE(high, low, timeperiod=14)`.
pub fn midprice(high: &[Float], low: &[Float], period: usize) -> Result<Vec<Float>> {
    check_same_len(&[("high", high), ("low", low)])?;
    check_period("timeperiod", period, 1)?;
    let n = high.len();
    let mut hh = vec![Float::NAN; n];
    let mut ll = vec![Float::NAN; n];
    rolling_max_into(high, period, &mut hh);
    rolling_min_into(low, period, &mut ll);
    for (h, l) in hh.iter_mut().zip(&ll) {
        *h = (*h + l) / 2.0;
    }
    Ok(hh)
}
