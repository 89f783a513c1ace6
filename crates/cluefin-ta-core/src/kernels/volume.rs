//! Volume-weighted accumulation kernels.

use super::{rolling_sum_into, scratch};
use crate::types::Float;

/// On-balance volume; `OBV[0] = volume[0]`.
///
/// A NaN close or volume makes the running total NaN from that bar on.
pub fn obv_into(close: &[Float], volume: &[Float], out: &mut [Float]) {
    let n = close.len();
    out.fill(Float::NAN);
    if n == 0 {
        return;
    }

    let mut acc = volume[0];
    out[0] = acc;
    for i in 1..n {
        let (c, prev, v) = (close[i], close[i - 1], volume[i]);
        if c.is_nan() || prev.is_nan() || v.is_nan() {
            acc = Float::NAN;
        } else if c > prev {
            acc += v;
        } else if c < prev {
            acc -= v;
        }
        out[i] = acc;
    }
}

/// Chaikin accumulation/distribution line.
///
/// The money flow multiplier is 0 on bars where `high == low`.
pub fn ad_into(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    volume: &[Float],
    out: &mut [Float],
) {
    let mut acc = 0.0;
    for i in 0..close.len() {
        let (h, l, c, v) = (high[i], low[i], close[i], volume[i]);
        if h.is_nan() || l.is_nan() || c.is_nan() || v.is_nan() {
            acc = Float::NAN;
        } else {
            let range = h - l;
            if range > 0.0 {
                acc += ((c - l) - (h - c)) / range * v;
            }
        }
        out[i] = acc;
    }
}

/// Money flow index over `period` typical-price changes.
///
/// First output at `period`. A window without negative flow yields 100.
pub fn mfi_into(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    volume: &[Float],
    period: usize,
    out: &mut [Float],
) {
    let n = close.len();
    out.fill(Float::NAN);
    if period == 0 || n <= period {
        return;
    }

    let mut pos = scratch(n, Float::NAN);
    let mut neg = scratch(n, Float::NAN);
    let mut prev_tp = (high[0] + low[0] + close[0]) / 3.0;
    for i in 1..n {
        let tp = (high[i] + low[i] + close[i]) / 3.0;
        let flow = tp * volume[i];
        if flow.is_nan() || prev_tp.is_nan() {
            pos[i] = Float::NAN;
            neg[i] = Float::NAN;
        } else if tp > prev_tp {
            pos[i] = flow;
            neg[i] = 0.0;
        } else if tp < prev_tp {
            pos[i] = 0.0;
            neg[i] = flow;
        } else {
            pos[i] = 0.0;
            neg[i] = 0.0;
        }
        prev_tp = tp;
    }

    let mut pos_sum = scratch(n - 1, Float::NAN);
    let mut neg_sum = scratch(n - 1, Float::NAN);
    rolling_sum_into(&pos[1..], period, &mut pos_sum);
    rolling_sum_into(&neg[1..], period, &mut neg_sum);

    for i in period..n {
        let (p, m) = (pos_sum[i - 1], neg_sum[i - 1]);
        if p.is_nan() || m.is_nan() {
            continue;
        }
        out[i] = if m <= 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + p / m)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obv() {
        let close = [10.0, 11.0, 11.0, 10.5, 12.0];
        let volume = [100.0, 200.0, 300.0, 400.0, 500.0];
        let mut out = [0.0; 5];
        obv_into(&close, &volume, &mut out);
        assert_eq!(out, [100.0, 300.0, 300.0, -100.0, 400.0]);
    }

    #[test]
    fn test_obv_nan_poisons_tail() {
        let close = [10.0, Float::NAN, 11.0, 12.0];
        let volume = [1.0, 1.0, 1.0, 1.0];
        let mut out = [0.0; 4];
        obv_into(&close, &volume, &mut out);
        assert_eq!(out[0], 1.0);
        assert!(out[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ad_flat_bar_contributes_zero() {
        let high = [10.0, 12.0, 11.0];
        let low = [8.0, 12.0, 9.0];
        let close = [10.0, 12.0, 9.0];
        let volume = [100.0, 500.0, 50.0];
        let mut out = [0.0; 3];
        ad_into(&high, &low, &close, &volume, &mut out);
        // bar 0: ((2) - (0)) / 2 * 100 = 100
        assert_eq!(out[0], 100.0);
        assert_eq!(out[1], 100.0);
        // bar 2: ((0) - (2)) / 2 * 50 = -50
        assert_eq!(out[2], 50.0);
    }

    #[test]
    fn test_mfi_all_rising_is_100() {
        let n = 8;
        let high: Vec<Float> = (0..n).map(|i| 11.0 + i as Float).collect();
        let low: Vec<Float> = (0..n).map(|i| 9.0 + i as Float).collect();
        let close: Vec<Float> = (0..n).map(|i| 10.0 + i as Float).collect();
        let volume = vec![1000.0; n];
        let mut out = vec![0.0; n];
        mfi_into(&high, &low, &close, &volume, 3, &mut out);
        assert!(out[..3].iter().all(|v| v.is_nan()));
        assert!(out[3..].iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_mfi_mixed_flow() {
        // tp equals close here
        let c = [10.0, 11.0, 10.0];
        let v = [1.0, 1.0, 1.0];
        let mut out = [0.0; 3];
        mfi_into(&c, &c, &c, &v, 2, &mut out);
        // pos = 11, neg = 10
        let expected = 100.0 - 100.0 / (1.0 + 11.0 / 10.0);
        assert!((out[2] - expected).abs() < 1e-12);
    }
}
