//! True range and directional movement kernels.

use super::is_zero;
use crate::types::Float;

/// `max(h - l, |h - c[i-1]|, |l - c[i-1]|)`; index 0 is NaN.
pub fn true_range_into(high: &[Float], low: &[Float], close: &[Float], out: &mut [Float]) {
    out.fill(Float::NAN);
    for i in 1..close.len() {
        out[i] = true_range(high[i], low[i], close[i - 1]);
    }
}

#[inline(always)]
pub(crate) fn true_range(high: Float, low: Float, prev_close: Float) -> Float {
    if high.is_nan() || low.is_nan() || prev_close.is_nan() {
        return Float::NAN;
    }
    let range = high - low;
    let up = (high - prev_close).abs();
    let down = (low - prev_close).abs();
    range.max(up).max(down)
}

/// One-bar directional movements `(+DM, -DM)`.
///
/// `+DM` is the up move when it is positive and larger than the down move,
/// symmetrically for `-DM`; otherwise zero.
#[inline(always)]
fn movement(high: Float, prev_high: Float, low: Float, prev_low: Float) -> (Float, Float) {
    let up = high - prev_high;
    let down = prev_low - low;
    if up.is_nan() || down.is_nan() {
        return (Float::NAN, Float::NAN);
    }
    if down > 0.0 && up < down {
        (0.0, down)
    } else if up > 0.0 && up > down {
        (up, 0.0)
    } else {
        (0.0, 0.0)
    }
}

/// Wilder-smoothed `+DM` and `-DM`.
///
/// The first output sits at `period - 1` and is the plain sum of the first
/// `period - 1` one-bar movements; each later bar applies
/// `s = s - s / p + dm`. With `period == 1` the raw movement is emitted from
/// index 1.
pub fn directional_movement_into(
    high: &[Float],
    low: &[Float],
    period: usize,
    plus_dm: &mut [Float],
    minus_dm: &mut [Float],
) {
    let n = high.len();
    plus_dm.fill(Float::NAN);
    minus_dm.fill(Float::NAN);
    if n < 2 || n < period {
        return;
    }

    if period == 1 {
        for i in 1..n {
            let (p, m) = movement(high[i], high[i - 1], low[i], low[i - 1]);
            plus_dm[i] = p;
            minus_dm[i] = m;
        }
        return;
    }

    let p = period as Float;
    let mut sp = 0.0;
    let mut sm = 0.0;
    for i in 1..period {
        let (dp, dm) = movement(high[i], high[i - 1], low[i], low[i - 1]);
        sp += dp;
        sm += dm;
    }
    plus_dm[period - 1] = sp;
    minus_dm[period - 1] = sm;
    for i in period..n {
        let (dp, dm) = movement(high[i], high[i - 1], low[i], low[i - 1]);
        sp = sp - sp / p + dp;
        sm = sm - sm / p + dm;
        plus_dm[i] = sp;
        minus_dm[i] = sm;
    }
}

/// Directional indicator loop producing `(+DI, -DI, DX)` from index `period`.
///
/// `+DM`, `-DM` and `TR` are accumulated as plain sums over the first
/// `period - 1` deltas, then Wilder-updated (`s - s/p + x`) so the value at
/// `period` carries `period` deltas. Zero true range or zero DI sum yields 0.
#[allow(clippy::too_many_arguments)]
pub fn dx_into(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    period: usize,
    plus_di: &mut [Float],
    minus_di: &mut [Float],
    dx: &mut [Float],
) {
    let n = close.len();
    plus_di.fill(Float::NAN);
    minus_di.fill(Float::NAN);
    dx.fill(Float::NAN);
    if period == 0 || n <= period {
        return;
    }

    let p = period as Float;
    let mut sp = 0.0;
    let mut sm = 0.0;
    let mut str_ = 0.0;
    for i in 1..period {
        let (dp, dm) = movement(high[i], high[i - 1], low[i], low[i - 1]);
        sp += dp;
        sm += dm;
        str_ += true_range(high[i], low[i], close[i - 1]);
    }

    for i in period..n {
        let (dp, dm) = movement(high[i], high[i - 1], low[i], low[i - 1]);
        sp = sp - sp / p + dp;
        sm = sm - sm / p + dm;
        str_ = str_ - str_ / p + true_range(high[i], low[i], close[i - 1]);

        if str_.is_nan() {
            continue;
        }
        if is_zero(str_) {
            plus_di[i] = 0.0;
            minus_di[i] = 0.0;
            dx[i] = 0.0;
            continue;
        }
        let pdi = 100.0 * sp / str_;
        let mdi = 100.0 * sm / str_;
        plus_di[i] = pdi;
        minus_di[i] = mdi;
        let total = pdi + mdi;
        dx[i] = if is_zero(total) {
            0.0
        } else {
            100.0 * (pdi - mdi).abs() / total
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range() {
        let h = [10.0, 12.0, 11.0];
        let l = [9.0, 10.0, 8.0];
        let c = [9.5, 11.0, 9.0];
        let mut out = [0.0; 3];
        true_range_into(&h, &l, &c, &mut out);
        assert!(out[0].is_nan());
        // max(2, |12-9.5|, |10-9.5|) = 2.5
        assert_eq!(out[1], 2.5);
        // max(3, |11-11|, |8-11|) = 3
        assert_eq!(out[2], 3.0);
    }

    #[test]
    fn test_movement_convention() {
        assert_eq!(movement(12.0, 10.0, 9.5, 9.0), (2.0, 0.0));
        assert_eq!(movement(10.0, 10.0, 8.0, 9.0), (0.0, 1.0));
        // inside bar: both negative
        assert_eq!(movement(9.0, 10.0, 9.5, 9.0), (0.0, 0.0));
        // equal moves cancel
        assert_eq!(movement(11.0, 10.0, 8.0, 9.0), (0.0, 0.0));
    }

    #[test]
    fn test_dx_pure_uptrend() {
        let n = 20;
        let high: Vec<Float> = (0..n).map(|i| 11.0 + i as Float).collect();
        let low: Vec<Float> = (0..n).map(|i| 9.0 + i as Float).collect();
        let close: Vec<Float> = (0..n).map(|i| 10.0 + i as Float).collect();
        let mut pdi = vec![0.0; n];
        let mut mdi = vec![0.0; n];
        let mut dx = vec![0.0; n];
        dx_into(&high, &low, &close, 5, &mut pdi, &mut mdi, &mut dx);
        assert!(dx[4].is_nan());
        assert!(!dx[5].is_nan());
        assert_eq!(mdi[10], 0.0);
        assert!((dx[10] - 100.0).abs() < 1e-9);
        // every bar moves up by 1 and ranges 2 with TR 2
        assert!((pdi[10] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_directional_movement_first_index() {
        let high = [1.0, 2.0, 3.0, 4.0];
        let low = [0.0, 1.0, 2.0, 3.0];
        let mut p = [0.0; 4];
        let mut m = [0.0; 4];
        directional_movement_into(&high, &low, 3, &mut p, &mut m);
        assert!(p[1].is_nan());
        assert_eq!(p[2], 2.0);
        // 2 - 2/3 + 1
        assert!((p[3] - (2.0 - 2.0 / 3.0 + 1.0)).abs() < 1e-12);
        assert_eq!(m[3], 0.0);
    }
}
