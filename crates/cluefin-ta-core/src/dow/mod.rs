//! Dow theory trend detection
//!
//! Produces a per-bar trend label and, when index bars are supplied, whether
//! the index confirms it.
//!
//! Trend codes: `-2` confirmed bear, `-1` bear, `0` sideways, `+1` bull,
//! `+2` confirmed bull. "Confirmed" means the bar traded above its average
//! volume. Correlation codes: `+1` same direction as the index, `-1`
//! opposite, `0` either side sideways.
//!
//! # Example
//!
//! ```rust
//! use cluefin_ta_core::dow::{dow_theory, DowTheoryParams};
//! use cluefin_ta_core::Ohlcv;
//!
//! let close: Vec<f64> = (0..120)
//!     .map(|i| 100.0 + 0.5 * i as f64 + 3.0 * (i as f64 * std::f64::consts::PI / 5.0).sin())
//!     .collect();
//! let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
//! let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
//!
//! let bars = Ohlcv::from_hlc(&high, &low, &close);
//! let out = dow_theory(bars, Some(bars), &DowTheoryParams::default()).unwrap();
//! assert_eq!(out.trend[119], 1.0);
//! assert_eq!(out.correlation[119], 1.0);
//! ```

mod confirmation;
mod swing;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TalibError};
use crate::overlap::sma_into;
use crate::types::{Float, Ohlcv};
use crate::validation::{check_finite, check_period, check_same_len};

use confirmation::{confirm_with_volume, index_agreement};
use swing::classify_swings;

pub use swing::{swing_pivots, SwingPivots};

/// Base trend method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DowMethod {
    /// Slopes of confirmed swing highs and lows
    #[default]
    Swing,
    /// Ordering of the minor, secondary and primary SMAs
    MaCross,
    /// Swing and MA-cross must agree
    Hybrid,
}

impl DowMethod {
    /// Name used by the bindings
    pub fn as_str(&self) -> &'static str {
        match self {
            DowMethod::Swing => "swing",
            DowMethod::MaCross => "ma_cross",
            DowMethod::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for DowMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DowMethod {
    type Err = TalibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "swing" => Ok(DowMethod::Swing),
            "ma_cross" => Ok(DowMethod::MaCross),
            "hybrid" => Ok(DowMethod::Hybrid),
            _ => Err(TalibError::invalid_parameter(
                "method",
                s,
                "one of swing, ma_cross, hybrid",
            )),
        }
    }
}

/// Parameters of [`dow_theory`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DowTheoryParams {
    /// Bars on each side a swing pivot must dominate
    pub swing_window: usize,
    /// Minor (short) SMA period
    pub minor_period: usize,
    /// Secondary (intermediate) SMA period
    pub secondary_period: usize,
    /// Primary (long) SMA period and pivot lookback
    pub primary_period: usize,
    /// Volume average period for confirmation
    pub volume_ma_period: usize,
    /// Base trend method
    pub method: DowMethod,
    /// Minimum normalized pivot slope per bar
    pub slope_threshold: Float,
}

impl Default for DowTheoryParams {
    fn default() -> Self {
        Self {
            swing_window: 5,
            minor_period: 20,
            secondary_period: 60,
            primary_period: 200,
            volume_ma_period: 20,
            method: DowMethod::Swing,
            slope_threshold: 1e-4,
        }
    }
}

impl DowTheoryParams {
    fn validate(&self) -> Result<()> {
        check_period("swing_window", self.swing_window, 1)?;
        check_period("minor_period", self.minor_period, 1)?;
        check_period("secondary_period", self.secondary_period, 1)?;
        check_period("primary_period", self.primary_period, 1)?;
        check_period("volume_ma_period", self.volume_ma_period, 1)?;
        check_finite("slope_threshold", self.slope_threshold)
    }
}

/// Output of [`dow_theory`]
#[derive(Debug, Clone, PartialEq)]
pub struct DowTheoryOutput {
    /// Trend label per bar, `-2..=2` or NaN
    pub trend: Vec<Float>,
    /// Index agreement per bar, `-1`, `0`, `1` or NaN; all NaN without index bars
    pub correlation: Vec<Float>,
}

/// First index where the trend can be defined.
///
/// The swing method has no NaN warm-up; it reports sideways until the
/// trailing window spans `2 * swing_window + 1` bars.
pub fn dow_theory_lookback(params: &DowTheoryParams) -> usize {
    match params.method {
        DowMethod::Swing => 0,
        DowMethod::MaCross | DowMethod::Hybrid => params
            .minor_period
            .max(params.secondary_period)
            .max(params.primary_period)
            .saturating_sub(1),
    }
}

/// Builds index bars from optional series; all three or none must be given.
pub fn index_bars<'a>(
    high: Option<&'a [Float]>,
    low: Option<&'a [Float]>,
    close: Option<&'a [Float]>,
) -> Result<Option<Ohlcv<'a>>> {
    match (high, low, close) {
        (None, None, None) => Ok(None),
        (Some(h), Some(l), Some(c)) => Ok(Some(Ohlcv::from_hlc(h, l, c))),
        _ => Err(TalibError::invalid_input(
            "index_high, index_low and index_close must be provided together",
        )),
    }
}

/// High and low of a bundle that must carry them, checked against `close`.
fn hlc<'a>(bars: &Ohlcv<'a>, what: &str) -> Result<(&'a [Float], &'a [Float], &'a [Float])> {
    let (Some(high), Some(low)) = (bars.high, bars.low) else {
        return Err(TalibError::invalid_input(format!(
            "{what} bars need high and low series"
        )));
    };
    check_same_len(&[("close", bars.close), ("high", high), ("low", low)])?;
    Ok((high, low, bars.close))
}

fn ma_cross(close: &[Float], params: &DowTheoryParams) -> Vec<Float> {
    let n = close.len();
    let mut minor = vec![Float::NAN; n];
    let mut secondary = vec![Float::NAN; n];
    let mut primary = vec![Float::NAN; n];
    sma_into(close, params.minor_period, &mut minor);
    sma_into(close, params.secondary_period, &mut secondary);
    sma_into(close, params.primary_period, &mut primary);
    (0..n)
        .map(|i| {
            let (a, b, c) = (minor[i], secondary[i], primary[i]);
            if a.is_nan() || b.is_nan() || c.is_nan() {
                Float::NAN
            } else if a > b && b > c {
                1.0
            } else if a < b && b < c {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}

fn base_trend(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    params: &DowTheoryParams,
) -> Vec<Float> {
    let swings = || {
        classify_swings(
            high,
            low,
            close,
            params.swing_window,
            params.primary_period,
            params.slope_threshold,
        )
    };
    match params.method {
        DowMethod::Swing => swings(),
        DowMethod::MaCross => ma_cross(close, params),
        DowMethod::Hybrid => swings()
            .iter()
            .zip(ma_cross(close, params))
            .map(|(&s, m)| {
                if s.is_nan() || m.is_nan() {
                    Float::NAN
                } else if s == m {
                    s
                } else {
                    0.0
                }
            })
            .collect(),
    }
}

/// Dow theory trend with volume confirmation and index agreement.
///
/// `bars` must carry high and low; its volume, when present, upgrades
/// directional bars traded above their volume SMA to `±2`. With `index`
/// bars the index base trend is computed the same way and compared with
/// the stock's base trend.
pub fn dow_theory(
    bars: Ohlcv<'_>,
    index: Option<Ohlcv<'_>>,
    params: &DowTheoryParams,
) -> Result<DowTheoryOutput> {
    let (high, low, close) = hlc(&bars, "stock")?;
    let n = close.len();
    if let Some(volume) = bars.volume {
        check_same_len(&[("close", close), ("volume", volume)])?;
    }
    let index = index
        .map(|ix| {
            let parts = hlc(&ix, "index")?;
            check_same_len(&[("close", close), ("index_close", parts.2)])?;
            Ok::<_, TalibError>(parts)
        })
        .transpose()?;
    params.validate()?;

    let base = base_trend(high, low, close, params);
    let correlation = match index {
        Some((ih, il, ic)) => index_agreement(&base, &base_trend(ih, il, ic, params)),
        None => vec![Float::NAN; n],
    };
    let mut trend = base;
    if let Some(volume) = bars.volume {
        confirm_with_volume(&mut trend, volume, params.volume_ma_period);
    }
    Ok(DowTheoryOutput { trend, correlation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn wave(n: usize, drift: Float) -> (Vec<Float>, Vec<Float>, Vec<Float>) {
        let close: Vec<Float> = (0..n)
            .map(|i| 100.0 + drift * i as Float + 3.0 * (i as Float * PI / 5.0).sin())
            .collect();
        let high = close.iter().map(|c| c + 1.0).collect();
        let low = close.iter().map(|c| c - 1.0).collect();
        (high, low, close)
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("MA_CROSS".parse::<DowMethod>().unwrap(), DowMethod::MaCross);
        assert!("weekly".parse::<DowMethod>().is_err());
        assert_eq!(DowMethod::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn test_swing_bear() {
        let (h, l, c) = wave(120, -0.5);
        let out =
            dow_theory(Ohlcv::from_hlc(&h, &l, &c), None, &DowTheoryParams::default()).unwrap();
        assert_eq!(out.trend[119], -1.0);
        assert!(out.correlation.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ma_cross_warmup_and_label() {
        let (h, l, c) = wave(80, 0.5);
        let params = DowTheoryParams {
            method: DowMethod::MaCross,
            minor_period: 5,
            secondary_period: 10,
            primary_period: 20,
            ..Default::default()
        };
        let out = dow_theory(Ohlcv::from_hlc(&h, &l, &c), None, &params).unwrap();
        assert_eq!(dow_theory_lookback(&params), 19);
        assert!(out.trend[18].is_nan());
        let defined = &out.trend[19..];
        assert!(defined.iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(defined.iter().filter(|&&v| v == 1.0).count() > 40);
    }

    #[test]
    fn test_hybrid_requires_agreement() {
        let (h, l, c) = wave(120, 0.5);
        let params = DowTheoryParams {
            method: DowMethod::Hybrid,
            minor_period: 5,
            secondary_period: 10,
            primary_period: 20,
            swing_window: 3,
            ..Default::default()
        };
        let out = dow_theory(Ohlcv::from_hlc(&h, &l, &c), None, &params).unwrap();
        for v in out.trend.iter().filter(|v| !v.is_nan()) {
            assert!(*v == 0.0 || *v == 1.0);
        }
    }

    #[test]
    fn test_volume_and_index() {
        let (h, l, c) = wave(120, 0.5);
        let volume: Vec<Float> = (0..120).map(|i| 1000.0 + 10.0 * i as Float).collect();
        let (ih, il, ic) = wave(120, -0.5);
        let bars = Ohlcv::from_hlc(&h, &l, &c).with_volume(&volume);
        let index = Ohlcv::from_hlc(&ih, &il, &ic);
        let out = dow_theory(bars, Some(index), &DowTheoryParams::default()).unwrap();
        assert_eq!(out.trend[119], 2.0);
        assert_eq!(out.correlation[119], -1.0);
    }

    #[test]
    fn test_validation() {
        let (h, l, c) = wave(30, 0.5);
        let no_low = Ohlcv {
            low: None,
            ..Ohlcv::from_hlc(&h, &l, &c)
        };
        assert!(dow_theory(no_low, None, &DowTheoryParams::default()).is_err());
        assert!(index_bars(Some(&h), None, Some(&c)).is_err());
        assert!(index_bars(None, None, None).unwrap().is_none());
        let short = Ohlcv::from_hlc(&h[..10], &l[..10], &c[..10]);
        let bars = Ohlcv::from_hlc(&h, &l, &c);
        assert!(dow_theory(bars, Some(short), &DowTheoryParams::default()).is_err());
        let params = DowTheoryParams {
            swing_window: 0,
            ..Default::default()
        };
        assert!(dow_theory(bars, None, &params).is_err());
    }

    #[test]
    fn test_empty_input() {
        let out =
            dow_theory(Ohlcv::from_hlc(&[], &[], &[]), None, &DowTheoryParams::default()).unwrap();
        assert!(out.trend.is_empty() && out.correlation.is_empty());
    }
}
