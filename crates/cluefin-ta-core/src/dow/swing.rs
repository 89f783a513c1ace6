//! Swing pivots and pivot-slope trend classification.

use crate::types::Float;

/// Swing highs and lows, ascending bar indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwingPivots {
    /// Bars whose high strictly exceeds every high within `window` bars on both sides
    pub highs: Vec<usize>,
    /// Bars whose low is strictly below every low within `window` bars on both sides
    pub lows: Vec<usize>,
}

/// Strict swing pivots; the first and last `window` bars are never pivots.
pub fn swing_pivots(high: &[Float], low: &[Float], window: usize) -> SwingPivots {
    let n = high.len().min(low.len());
    let mut pivots = SwingPivots::default();
    if window == 0 || n < 2 * window + 1 {
        return pivots;
    }
    for i in window..n - window {
        let neighbours = (i - window..i).chain(i + 1..=i + window);
        if neighbours.clone().all(|j| high[i] > high[j]) {
            pivots.highs.push(i);
        }
        if neighbours.clone().all(|j| low[i] < low[j]) {
            pivots.lows.push(i);
        }
    }
    pivots
}

/// Least-squares slope of `values[j]` against `j`, divided by the mean value.
fn normalized_slope(idx: impl Iterator<Item = usize> + Clone, values: &[Float]) -> Float {
    let (mut m, mut sum_x, mut sum_y): (Float, Float, Float) = (0.0, 0.0, 0.0);
    for j in idx.clone() {
        m += 1.0;
        sum_x += j as Float;
        sum_y += values[j];
    }
    let (mean_x, mean_y) = (sum_x / m, sum_y / m);
    let (mut sxy, mut sxx): (Float, Float) = (0.0, 0.0);
    for j in idx {
        let dx = j as Float - mean_x;
        sxy += dx * (values[j] - mean_y);
        sxx += dx * dx;
    }
    if sxx == 0.0 || mean_y == 0.0 {
        return 0.0;
    }
    sxy / sxx / mean_y.abs()
}

/// Per-bar trend from the confirmed pivots inside the trailing
/// `primary_period` bars.
///
/// A pivot at `j` is used at bar `i` only once `i >= j + window`, so no bar
/// reads prices after itself. With two highs and two lows the slopes come
/// from the pivots; with fewer, from every high and low in the trailing
/// window, provided it spans the `2 * window + 1` bars a pivot needs. `+1`
/// when both normalized slopes exceed `threshold`, `-1` when both are below
/// `-threshold`, `0` otherwise or while the window is shorter. Bars with a
/// NaN price are NaN.
pub(crate) fn classify_swings(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    window: usize,
    primary_period: usize,
    threshold: Float,
) -> Vec<Float> {
    let pivots = swing_pivots(high, low, window);
    let n = close.len();
    let mut out = vec![0.0; n];
    let (mut hi_end, mut lo_end) = (0, 0);
    let (mut hi_start, mut lo_start) = (0, 0);

    for i in 0..n {
        if high[i].is_nan() || low[i].is_nan() || close[i].is_nan() {
            out[i] = Float::NAN;
            continue;
        }
        let first = (i + 1).saturating_sub(primary_period);
        while hi_end < pivots.highs.len() && pivots.highs[hi_end] + window <= i {
            hi_end += 1;
        }
        while lo_end < pivots.lows.len() && pivots.lows[lo_end] + window <= i {
            lo_end += 1;
        }
        while hi_start < hi_end && pivots.highs[hi_start] < first {
            hi_start += 1;
        }
        while lo_start < lo_end && pivots.lows[lo_start] < first {
            lo_start += 1;
        }

        let highs = &pivots.highs[hi_start..hi_end];
        let lows = &pivots.lows[lo_start..lo_end];
        let (up, down) = if highs.len() >= 2 && lows.len() >= 2 {
            (
                normalized_slope(highs.iter().copied(), high),
                normalized_slope(lows.iter().copied(), low),
            )
        } else if i + 1 - first >= 2 * window + 1 {
            // trending runs without swings
            (
                normalized_slope(first..=i, high),
                normalized_slope(first..=i, low),
            )
        } else {
            continue;
        };
        out[i] = if up > threshold && down > threshold {
            1.0
        } else if up < -threshold && down < -threshold {
            -1.0
        } else {
            0.0
        };
    }
    out
}
