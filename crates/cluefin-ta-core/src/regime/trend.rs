//! Moving-average trend regime and regime run lengths.

use super::{BEAR, BULL, SIDEWAYS};
use crate::error::Result;
use crate::overlap::sma_into;
use crate::types::Float;
use crate::validation::{check_finite, check_period};

/// First valid index of [`regime_ma`].
pub fn regime_ma_lookback(fast_period: usize, slow_period: usize) -> usize {
    fast_period.max(slow_period).saturating_sub(1)
}

/// Trend regime from the spread of a fast and a slow SMA.
///
/// `pct_diff = (fast - slow) / slow` is labelled [`BEAR`] below
/// `-sideways_threshold`, [`BULL`] above `sideways_threshold` and
/// [`SIDEWAYS`] otherwise, including when the slow SMA is zero. Positions
/// where either SMA is undefined are NaN.
pub fn regime_ma(
    close: &[Float],
    fast_period: usize,
    slow_period: usize,
    sideways_threshold: Float,
) -> Result<Vec<Float>> {
    check_period("fast_period", fast_period, 1)?;
    check_period("slow_period", slow_period, 1)?;
    check_finite("sideways_threshold", sideways_threshold)?;

    let n = close.len();
    let mut fast = vec![Float::NAN; n];
    let mut slow = vec![Float::NAN; n];
    sma_into(close, fast_period, &mut fast);
    sma_into(close, slow_period, &mut slow);

    Ok(fast
        .iter()
        .zip(&slow)
        .map(|(&f, &s)| {
            if f.is_nan() || s.is_nan() {
                Float::NAN
            } else if s == 0.0 {
                SIDEWAYS
            } else {
                let pct_diff = (f - s) / s;
                if pct_diff < -sideways_threshold {
                    BEAR
                } else if pct_diff > sideways_threshold {
                    BULL
                } else {
                    SIDEWAYS
                }
            }
        })
        .collect())
}

/// Consecutive-bar count of the current state.
///
/// Restarts at 1 whenever the state changes and after a NaN hole; NaN states
/// stay NaN.
pub fn regime_ma_duration(states: &[Float]) -> Vec<Float> {
    let mut out = Vec::with_capacity(states.len());
    let mut prev = Float::NAN;
    let mut run = 0.0;
    for &s in states {
        if s.is_nan() {
            out.push(Float::NAN);
        } else {
            run = if s == prev { run + 1.0 } else { 1.0 };
            out.push(run);
        }
        prev = s;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regime_ma_labels() {
        let up: Vec<Float> = (0..30).map(|i| 100.0 + i as Float).collect();
        let out = regime_ma(&up, 3, 10, 0.02).unwrap();
        assert!(out[8].is_nan());
        assert_eq!(out[9], BULL);

        let down: Vec<Float> = up.iter().rev().copied().collect();
        assert_eq!(regime_ma(&down, 3, 10, 0.02).unwrap()[29], BEAR);

        let wide = regime_ma(&up, 3, 10, 0.5).unwrap();
        assert_eq!(wide[29], SIDEWAYS);
    }

    #[test]
    fn test_regime_ma_zero_slow() {
        let zeros = [0.0; 6];
        let out = regime_ma(&zeros, 2, 3, 0.02).unwrap();
        assert_eq!(out[5], SIDEWAYS);
    }

    #[test]
    fn test_regime_ma_validation() {
        assert!(regime_ma(&[1.0], 0, 5, 0.02).is_err());
        assert!(regime_ma(&[1.0], 2, 5, Float::NAN).is_err());
        assert_eq!(regime_ma_lookback(20, 50), 49);
    }

    #[test]
    fn test_duration_restarts_on_change() {
        let states = [2.0, 2.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            regime_ma_duration(&states),
            vec![1.0, 2.0, 3.0, 1.0, 2.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_duration_preserves_nan() {
        let states = [Float::NAN, 1.0, 1.0, Float::NAN, 1.0];
        let out = regime_ma_duration(&states);
        assert!(out[0].is_nan() && out[3].is_nan());
        assert_eq!(out[1..3], [1.0, 2.0]);
        assert_eq!(out[4], 1.0);
    }
}
