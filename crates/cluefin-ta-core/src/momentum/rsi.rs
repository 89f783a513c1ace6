//! Relative Strength Index and Chande Momentum Oscillator.

use crate::error::Result;
use crate::kernels::{after_leading_nans, is_zero};
use crate::types::Float;
use crate::validation::check_period;

/// Wilder-averaged gains and losses fed to `emit(gain, loss)`.
///
/// The first averages are plain means of the first `period` deltas and land
/// on index `period`.
fn gain_loss_into(x: &[Float], period: usize, out: &mut [Float], emit: fn(Float, Float) -> Float) {
    let n = x.len();
    out.fill(Float::NAN);
    if period == 0 || n <= period {
        return;
    }

    let p = period as Float;
    let mut gain = 0.0;
    let mut loss = 0.0;
    for i in 1..=period {
        let d = x[i] - x[i - 1];
        if d < 0.0 {
            loss -= d;
        } else {
            gain += d;
        }
    }
    gain /= p;
    loss /= p;
    out[period] = emit(gain, loss);

    for i in period + 1..n {
        let d = x[i] - x[i - 1];
        let (up, down) = if d < 0.0 { (0.0, -d) } else { (d, 0.0) };
        gain = (gain * (p - 1.0) + up) / p;
        loss = (loss * (p - 1.0) + down) / p;
        out[i] = emit(gain, loss);
    }
}

fn rsi_value(gain: Float, loss: Float) -> Float {
    let total = gain + loss;
    if is_zero(total) {
        0.0
    } else {
        100.0 * (gain / total)
    }
}

fn cmo_value(gain: Float, loss: Float) -> Float {
    let total = gain + loss;
    if is_zero(total) {
        0.0
    } else {
        100.0 * ((gain - loss) / total)
    }
}

pub(crate) fn rsi_into(x: &[Float], period: usize, out: &mut [Float]) {
    after_leading_nans(x, out, |x, out| gain_loss_into(x, period, out, rsi_value));
}

/// First valid index of [`rsi`] and [`cmo`].
pub fn rsi_lookback(period: usize) -> usize {
    period
}

/// Relative strength index, TA-Lib `RSI(real, timeperiod=14)`.
///
/// A window without any movement yields 0.
pub fn rsi(real: &[Float], period: usize) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    rsi_into(real, period, &mut out);
    Ok(out)
}

/// Chande momentum oscillator, TA-Lib `CMO(real, timeperiod=14)`.
pub fn cmo(real: &[Float], period: usize) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    after_leading_nans(real, &mut out, |x, out| gain_loss_into(x, period, out, cmo_value));
    Ok(out)
}
