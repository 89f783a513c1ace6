//! Cup-&-Handle breakout detector
//!
//! Works on closing prices. A cup is two pivot highs (the rims) of similar
//! height with a rounded trough between them; the handle is a shallow
//! pullback after the right rim. The signal fires on the close that breaks
//! above the handle high, optionally after extra confirmation bars and volume
//! checks.
//!
//! # Example
//!
//! ```rust
//! use cluefin_ta_core::pattern::{cup_handle, CupHandleParams};
//!
//! let close = vec![100.0; 60];
//! let params = CupHandleParams::default();
//! let out = cup_handle(&close, &close, &close, &close, None, &params).unwrap();
//! assert!(out.iter().all(|&s| s == 0));
//! ```

use super::pivots::{fractal_pivots, zigzag_pivots, PivotMethod, Pivots};
use crate::error::Result;
use crate::types::{Float, PATTERN_BULLISH, PATTERN_NONE};
use crate::validation::{check_finite, check_period, check_range, check_same_len};

/// Bars of the rolling return used for the right-side slope test
const SLOPE_BARS: usize = 5;

/// Cup-&-Handle detector parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CupHandleParams {
    /// Pivot extraction method
    pub pivot_method: PivotMethod,
    /// Fractal bars required on the left of a pivot
    pub pivot_left: usize,
    /// Fractal bars required on the right of a pivot
    pub pivot_right: usize,
    /// Zigzag reversal fraction
    pub pivot_pct: Float,
    /// Maximum bars between the two rims
    pub cup_lookback: usize,
    /// Minimum bars between the two rims
    pub cup_min_len: usize,
    /// Maximum rim mismatch relative to the rim average
    pub rim_tolerance: Float,
    /// Minimum cup depth relative to the rim average
    pub cup_depth_min: Float,
    /// Maximum cup depth relative to the rim average
    pub cup_depth_max: Float,
    /// Maximum 5-bar return on the right side of the cup
    pub cup_slope_max: Float,
    /// Bars after the right rim searched for the handle and breakout
    pub handle_len: usize,
    /// Maximum handle pullback relative to the handle high
    pub handle_depth_max: Float,
    /// Closes above the handle high required to confirm the breakout
    pub confirm_bars: usize,
    /// Apply the volume tests when volume is supplied
    pub use_volume: bool,
    /// Window of the baseline volume averages
    pub vol_ma_period: usize,
    /// Cup-start volume versus the preceding baseline
    pub vol_cup_start_mult: Float,
    /// Handle volume ceiling versus the cup volume
    pub vol_handle_max_mult: Float,
    /// Breakout volume versus its trailing mean
    pub vol_breakout_mult: Float,
}

impl Default for CupHandleParams {
    fn default() -> Self {
        Self {
            pivot_method: PivotMethod::Fractal,
            pivot_left: 3,
            pivot_right: 3,
            pivot_pct: 0.05,
            cup_lookback: 150,
            cup_min_len: 30,
            rim_tolerance: 0.05,
            cup_depth_min: 0.12,
            cup_depth_max: 0.35,
            cup_slope_max: 0.08,
            handle_len: 15,
            handle_depth_max: 0.12,
            confirm_bars: 1,
            use_volume: true,
            vol_ma_period: 20,
            vol_cup_start_mult: 1.0,
            vol_handle_max_mult: 1.0,
            vol_breakout_mult: 1.2,
        }
    }
}

impl CupHandleParams {
    fn validate(&self) -> Result<()> {
        check_period("pivot_left", self.pivot_left, 1)?;
        check_period("pivot_right", self.pivot_right, 1)?;
        check_period("cup_min_len", self.cup_min_len, 1)?;
        check_period("cup_lookback", self.cup_lookback, self.cup_min_len)?;
        check_period("handle_len", self.handle_len, 1)?;
        check_period("vol_ma_period", self.vol_ma_period, 1)?;
        check_range("pivot_pct", self.pivot_pct, 0.0, 1.0)?;
        check_range("rim_tolerance", self.rim_tolerance, 0.0, 1.0)?;
        check_range("cup_depth_min", self.cup_depth_min, 0.0, 1.0)?;
        check_range("cup_depth_max", self.cup_depth_max, self.cup_depth_min, 1.0)?;
        check_range("handle_depth_max", self.handle_depth_max, 0.0, 1.0)?;
        check_finite("cup_slope_max", self.cup_slope_max)?;
        check_finite("vol_cup_start_mult", self.vol_cup_start_mult)?;
        check_finite("vol_handle_max_mult", self.vol_handle_max_mult)?;
        check_finite("vol_breakout_mult", self.vol_breakout_mult)
    }
}

/// Bars before the first possible signal
pub fn cup_handle_lookback(params: &CupHandleParams) -> usize {
    params.pivot_left + params.cup_min_len + 2
}

fn mean(x: &[Float]) -> Option<Float> {
    if x.is_empty() {
        None
    } else {
        Some(x.iter().sum::<Float>() / x.len() as Float)
    }
}

/// Mean of up to `period` values before `i`; `None` at the start of the series.
fn trailing_mean(x: &[Float], i: usize, period: usize) -> Option<Float> {
    mean(&x[i.saturating_sub(period)..i])
}

/// Cup-&-Handle detector.
///
/// Returns `+100` on the bar that confirms a breakout and `0` elsewhere.
/// `open`, `high` and `low` are validated for shape only. Volume tests are
/// skipped when `volume` is `None` or `params.use_volume` is false.
pub fn cup_handle(
    open: &[Float],
    high: &[Float],
    low: &[Float],
    close: &[Float],
    volume: Option<&[Float]>,
    params: &CupHandleParams,
) -> Result<Vec<i32>> {
    let n = check_same_len(&[("open", open), ("high", high), ("low", low), ("close", close)])?;
    if let Some(v) = volume {
        check_same_len(&[("close", close), ("volume", v)])?;
    }
    params.validate()?;

    let mut out = vec![PATTERN_NONE; n];
    let pivots = match params.pivot_method {
        PivotMethod::Fractal => fractal_pivots(close, params.pivot_left, params.pivot_right),
        PivotMethod::Zigzag => zigzag_pivots(close, params.pivot_pct),
    };
    let volume = volume.filter(|_| params.use_volume);
    let detector = Detector {
        close,
        volume,
        params,
        pivots: &pivots,
    };

    let mut signals: Vec<usize> = Vec::new();
    for (a, &t0) in pivots.highs.iter().enumerate() {
        for &t2 in &pivots.highs[a + 1..] {
            let span = t2 - t0;
            if span > params.cup_lookback {
                break;
            }
            if span < params.cup_min_len {
                continue;
            }
            if let Some(bar) = detector.cup(t0, t2).and_then(|t1| detector.breakout(t0, t1, t2)) {
                signals.push(bar);
            }
        }
    }

    signals.sort_unstable();
    signals.dedup();
    let mut last: Option<usize> = None;
    for bar in signals {
        if last.map_or(true, |prev| bar > prev + params.handle_len) {
            out[bar] = PATTERN_BULLISH;
            last = Some(bar);
        }
    }
    Ok(out)
}

struct Detector<'a> {
    close: &'a [Float],
    volume: Option<&'a [Float]>,
    params: &'a CupHandleParams,
    pivots: &'a Pivots,
}

impl Detector<'_> {
    /// Validates the cup between rims `t0` and `t2`, returning its trough.
    fn cup(&self, t0: usize, t2: usize) -> Option<usize> {
        let c = self.close;
        let p = self.params;
        let window = &c[t0..=t2];
        if window.iter().any(|v| v.is_nan()) {
            return None;
        }

        let mut t1 = t0;
        for (j, &v) in window.iter().enumerate() {
            if v < c[t1] {
                t1 = t0 + j;
            }
        }
        if self.pivots.lows.binary_search(&t1).is_err() {
            return None;
        }

        let (r0, r2) = (c[t0], c[t2]);
        let rim_avg = (r0 + r2) / 2.0;
        if rim_avg <= 0.0 || (r0 - r2).abs() / rim_avg > p.rim_tolerance {
            return None;
        }
        let depth = (rim_avg - c[t1]) / rim_avg;
        if depth < p.cup_depth_min || depth > p.cup_depth_max {
            return None;
        }
        let v_recovery = (t1 + SLOPE_BARS..=t2)
            .any(|j| c[j - SLOPE_BARS] > 0.0 && c[j] / c[j - SLOPE_BARS] - 1.0 > p.cup_slope_max);
        if v_recovery {
            return None;
        }

        if let Some(vol) = self.volume {
            if let Some(base) = trailing_mean(vol, t0, p.vol_ma_period) {
                if vol[t0] <= p.vol_cup_start_mult * base {
                    return None;
                }
            }
            let left = mean(&vol[t0..=t1]).unwrap_or(Float::NAN);
            let right = mean(&vol[t1..=t2]).unwrap_or(Float::NAN);
            if !(left > right) {
                return None;
            }
        }
        Some(t1)
    }

    /// Scans the handle after `t2` and returns the confirmed breakout bar.
    ///
    /// The scan only looks back: the handle high is the larger of the right
    /// rim and the first bar after it, the trough is the lowest close seen so
    /// far, and the breakout is the first later close above the handle high.
    fn breakout(&self, t0: usize, t1: usize, t2: usize) -> Option<usize> {
        let c = self.close;
        let p = self.params;
        let n = c.len();
        let end = (t2 + p.handle_len).min(n.saturating_sub(1));

        let mut t3: Option<usize> = None;
        let mut handle_high = c[t2];
        for k in t2 + 1..=end {
            if c[k].is_nan() {
                return None;
            }
            let Some(trough) = t3 else {
                if c[k] > handle_high {
                    handle_high = c[k];
                }
                t3 = Some(k);
                continue;
            };
            if c[k] > handle_high {
                return self.confirm(t0, t1, t2, trough, handle_high, k);
            }
            if c[k] < c[trough] {
                t3 = Some(k);
            }
        }
        None
    }

    fn confirm(
        &self,
        t0: usize,
        t1: usize,
        t2: usize,
        t3: usize,
        handle_high: Float,
        t4: usize,
    ) -> Option<usize> {
        let c = self.close;
        let p = self.params;
        let rim_max = if c[t0] > c[t2] { c[t0] } else { c[t2] };
        let handle_low = c[t3];
        if handle_high <= 0.0 || handle_low >= handle_high {
            return None;
        }
        let handle_depth = (handle_high - handle_low) / handle_high;
        if handle_depth > p.handle_depth_max || handle_low <= c[t1] || handle_high > rim_max {
            return None;
        }

        if let Some(vol) = self.volume {
            let cup_vol = mean(&vol[t0..=t2])?;
            let handle_vol = mean(&vol[t2 + 1..=t3])?;
            if handle_vol > p.vol_handle_max_mult * cup_vol {
                return None;
            }
            if let Some(base) = trailing_mean(vol, t4, p.vol_ma_period) {
                if vol[t4] < p.vol_breakout_mult * base {
                    return None;
                }
            }
        }

        let confirm = p.confirm_bars.max(1);
        let last = t4 + confirm - 1;
        if last >= c.len() || c[t4..=last].iter().any(|&v| !(v > handle_high)) {
            return None;
        }
        Some(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Lead-in to a rim at bar 10, cup trough at bar 50, right rim at 90,
    /// handle trough at 95 and breakout at 101.
    fn cup_series() -> Vec<Float> {
        (0..120)
            .map(|i| {
                let t = i as Float;
                match i {
                    0..=9 => 95.0 + 0.5 * t,
                    10..=90 => 90.0 + 10.0 * (2.0 * PI * (t - 10.0) / 80.0).cos(),
                    91..=100 => 100.0 - 5.0 * (PI * (t - 90.0) / 10.0).sin(),
                    _ => 101.0 + 0.5 * (t - 101.0),
                }
            })
            .collect()
    }

    fn cup_volume(start: Float, breakout: Float) -> Vec<Float> {
        (0..120)
            .map(|i| match i {
                0..=9 => 1000.0,
                10 => start,
                11..=50 => 1200.0,
                51..=90 => 800.0,
                91..=100 => 600.0,
                101 => breakout,
                _ => 900.0,
            })
            .collect()
    }

    fn detect(close: &[Float], volume: Option<&[Float]>, params: &CupHandleParams) -> Vec<i32> {
        cup_handle(close, close, close, close, volume, params).unwrap()
    }

    #[test]
    fn test_single_breakout_without_volume() {
        let close = cup_series();
        let out = detect(&close, None, &CupHandleParams::default());
        let hits: Vec<usize> = (0..out.len()).filter(|&i| out[i] != 0).collect();
        assert_eq!(hits, vec![101]);
        assert_eq!(out[101], 100);
    }

    #[test]
    fn test_volume_shape() {
        let close = cup_series();
        let vol = cup_volume(1500.0, 2000.0);
        let out = detect(&close, Some(&vol), &CupHandleParams::default());
        assert_eq!(out[101], 100);

        let weak = cup_volume(1500.0, 700.0);
        let out = detect(&close, Some(&weak), &CupHandleParams::default());
        assert!(out.iter().all(|&s| s == 0));

        let params = CupHandleParams {
            use_volume: false,
            ..Default::default()
        };
        assert_eq!(detect(&close, Some(&weak), &params)[101], 100);
    }

    #[test]
    fn test_cup_start_volume_must_exceed_baseline() {
        let close = cup_series();
        // baseline is the mean of bars 0..10, exactly 1000
        let level = cup_volume(1000.0, 2000.0);
        assert!(detect(&close, Some(&level), &CupHandleParams::default())
            .iter()
            .all(|&s| s == 0));

        let above = cup_volume(1000.5, 2000.0);
        assert_eq!(detect(&close, Some(&above), &CupHandleParams::default())[101], 100);
    }

    #[test]
    fn test_confirmation_bars_shift_signal() {
        let close = cup_series();
        let params = CupHandleParams {
            confirm_bars: 3,
            ..Default::default()
        };
        let out = detect(&close, None, &params);
        assert_eq!(out[103], 100);
        assert_eq!(out.iter().filter(|&&s| s != 0).count(), 1);
    }

    #[test]
    fn test_signal_ignores_later_bars() {
        let close = cup_series();
        let params = CupHandleParams::default();
        let full = detect(&close, None, &params);

        let cut = detect(&close[..102], None, &params);
        assert_eq!(cut[..], full[..102]);

        let mut crash = close.clone();
        crash[102..].fill(50.0);
        let out = detect(&crash, None, &params);
        assert_eq!(out[..102], full[..102]);
        assert_eq!(out[101], 100);
    }

    #[test]
    fn test_shallow_cup_rejected() {
        let close: Vec<Float> = cup_series()
            .iter()
            .map(|v| 100.0 + (v - 100.0) * 0.3)
            .collect();
        let out = detect(&close, None, &CupHandleParams::default());
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_zigzag_pivots_find_same_cup() {
        let close = cup_series();
        let params = CupHandleParams {
            pivot_method: PivotMethod::Zigzag,
            pivot_pct: 0.04,
            ..Default::default()
        };
        let out = detect(&close, None, &params);
        assert_eq!(out[101], 100);
    }

    #[test]
    fn test_validation() {
        let close = cup_series();
        let bad = CupHandleParams {
            cup_depth_max: 0.05,
            ..Default::default()
        };
        assert!(cup_handle(&close, &close, &close, &close, None, &bad).is_err());
        let params = CupHandleParams::default();
        assert!(cup_handle(&close, &close[1..], &close, &close, None, &params).is_err());
        assert!(detect(&[], None, &CupHandleParams::default()).is_empty());
    }
}
