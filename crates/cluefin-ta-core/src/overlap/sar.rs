//! Parabolic SAR.

use crate::error::Result;
use crate::types::Float;
use crate::validation::{check_range, check_same_len};

/// First valid index of [`sar`].
pub fn sar_lookback() -> usize {
    1
}

/// Parabolic stop-and-reverse, TA-Lib `SAR(high, low, acceleration=0.02, maximum=0.2)`.
///
/// The initial direction is short when the second bar has a positive `-DM`,
/// long otherwise. An acceleration above `maximum` is clamped to it. A NaN
/// bar makes every later value NaN.
pub fn sar(
    high: &[Float],
    low: &[Float],
    acceleration: Float,
    maximum: Float,
) -> Result<Vec<Float>> {
    let n = check_same_len(&[("high", high), ("low", low)])?;
    check_range("acceleration", acceleration, 0.0, Float::MAX)?;
    check_range("maximum", maximum, 0.0, Float::MAX)?;

    let mut out = vec![Float::NAN; n];
    if n < 2 {
        return Ok(out);
    }
    let step = acceleration.min(maximum);
    let mut af = step;

    let up = high[1] - high[0];
    let down = low[0] - low[1];
    let mut is_long = !(down > 0.0 && up < down);

    let (mut sar, mut ep) = if is_long {
        (low[0], high[1])
    } else {
        (high[0], low[1])
    };
    let mut new_high = high[1];
    let mut new_low = low[1];

    for i in 1..n {
        let prev_low = new_low;
        let prev_high = new_high;
        new_low = low[i];
        new_high = high[i];
        if new_low.is_nan() || new_high.is_nan() || sar.is_nan() {
            sar = Float::NAN;
            continue;
        }

        if is_long {
            if new_low <= sar {
                is_long = false;
                sar = ep.max(prev_high).max(new_high);
                out[i] = sar;
                af = step;
                ep = new_low;
                sar += af * (ep - sar);
                sar = sar.max(prev_high).max(new_high);
            } else {
                out[i] = sar;
                if new_high > ep {
                    ep = new_high;
                    af = (af + step).min(maximum);
                }
                sar += af * (ep - sar);
                sar = sar.min(prev_low).min(new_low);
            }
        } else if new_high >= sar {
            is_long = true;
            sar = ep.min(prev_low).min(new_low);
            out[i] = sar;
            af = step;
            ep = new_high;
            sar += af * (ep - sar);
            sar = sar.min(prev_low).min(new_low);
        } else {
            out[i] = sar;
            if new_low < ep {
                ep = new_low;
                af = (af + step).min(maximum);
            }
            sar += af * (ep - sar);
            sar = sar.max(prev_high).max(new_high);
        }
    }
    Ok(out)
}
