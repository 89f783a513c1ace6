//! Pivot extraction on a close series.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TalibError};
use crate::types::Float;

/// How pivot highs and lows are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PivotMethod {
    /// Local extreme against fixed neighbourhoods on both sides
    #[default]
    Fractal,
    /// Swing points of a percentage zigzag
    Zigzag,
}

impl PivotMethod {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PivotMethod::Fractal => "fractal",
            PivotMethod::Zigzag => "zigzag",
        }
    }
}

impl fmt::Display for PivotMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PivotMethod {
    type Err = TalibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fractal" => Ok(PivotMethod::Fractal),
            "zigzag" => Ok(PivotMethod::Zigzag),
            _ => Err(TalibError::invalid_parameter(
                "pivot_method",
                s,
                "one of fractal, zigzag",
            )),
        }
    }
}

/// Ascending bar indices of pivot highs and lows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pivots {
    /// Pivot highs
    pub highs: Vec<usize>,
    /// Pivot lows
    pub lows: Vec<usize>,
}

/// Fractal pivots.
///
/// Bar `i` is a pivot high when `close[i]` is strictly greater than each of
/// the `left` closes before it and greater than or equal to each of the
/// `right` closes after it; pivot lows mirror this. Bars without a full
/// neighbourhood and NaN bars are never pivots.
pub fn fractal_pivots(close: &[Float], left: usize, right: usize) -> Pivots {
    let n = close.len();
    let mut pivots = Pivots::default();
    if n < left + right + 1 {
        return pivots;
    }
    for i in left..n - right {
        let c = close[i];
        if c.is_nan() {
            continue;
        }
        let before = &close[i - left..i];
        let after = &close[i + 1..=i + right];
        if before.iter().all(|&v| c > v) && after.iter().all(|&v| c >= v) {
            pivots.highs.push(i);
        } else if before.iter().all(|&v| c < v) && after.iter().all(|&v| c <= v) {
            pivots.lows.push(i);
        }
    }
    pivots
}

#[derive(Clone, Copy, PartialEq)]
enum Leg {
    Unknown,
    Up,
    Down,
}

/// Zigzag pivots.
///
/// Tracks the running extreme of the current leg and records it as a pivot
/// once price retraces by `pct` (a fraction, `0.05` = 5%) from it. The final,
/// unconfirmed extreme is not reported. NaN bars are skipped.
pub fn zigzag_pivots(close: &[Float], pct: Float) -> Pivots {
    let mut pivots = Pivots::default();
    let mut leg = Leg::Unknown;
    let Some(first) = close.iter().position(|v| !v.is_nan()) else {
        return pivots;
    };
    let (mut hi, mut lo) = (first, first);

    for (i, &v) in close.iter().enumerate().skip(first + 1) {
        if v.is_nan() {
            continue;
        }
        match leg {
            Leg::Unknown => {
                if v >= close[lo] * (1.0 + pct) {
                    pivots.lows.push(lo);
                    leg = Leg::Up;
                    hi = i;
                } else if v <= close[hi] * (1.0 - pct) {
                    pivots.highs.push(hi);
                    leg = Leg::Down;
                    lo = i;
                } else {
                    if v > close[hi] {
                        hi = i;
                    }
                    if v < close[lo] {
                        lo = i;
                    }
                }
            }
            Leg::Up => {
                if v > close[hi] {
                    hi = i;
                } else if v <= close[hi] * (1.0 - pct) {
                    pivots.highs.push(hi);
                    leg = Leg::Down;
                    lo = i;
                }
            }
            Leg::Down => {
                if v < close[lo] {
                    lo = i;
                } else if v >= close[lo] * (1.0 + pct) {
                    pivots.lows.push(lo);
                    leg = Leg::Up;
                    hi = i;
                }
            }
        }
    }
    pivots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractal_strict_left_inclusive_right() {
        let close = [1.0, 2.0, 3.0, 5.0, 5.0, 4.0, 3.0, 2.0, 3.0, 4.0];
        let p = fractal_pivots(&close, 2, 2);
        // bar 3 ties bar 4 on the right and qualifies; bar 4 ties on the left and does not
        assert_eq!(p.highs, vec![3]);
        assert_eq!(p.lows, vec![7]);
    }

    #[test]
    fn test_fractal_short_input() {
        assert_eq!(fractal_pivots(&[1.0, 2.0], 3, 3), Pivots::default());
    }

    #[test]
    fn test_zigzag_alternates() {
        let close = [100.0, 104.0, 110.0, 103.0, 101.0, 108.0, 112.0, 105.0];
        let p = zigzag_pivots(&close, 0.05);
        assert_eq!(p.lows, vec![0, 4]);
        assert_eq!(p.highs, vec![2, 6]);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("ZigZag".parse::<PivotMethod>().unwrap(), PivotMethod::Zigzag);
        assert!("swing".parse::<PivotMethod>().is_err());
        assert_eq!(PivotMethod::default().to_string(), "fractal");
    }
}
