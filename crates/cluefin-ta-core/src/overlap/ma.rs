//! Moving-average type selector and the generic `MA` function.

use core::fmt;
use core::str::FromStr;

use super::dema::{dema_into, dema_lookback, tema_into, tema_lookback};
use super::ema::{ema_lookback, ema_series};
use super::kama::{kama_lookback, kama_series};
use super::sma::{sma_into, sma_lookback};
use super::t3::{t3_into, t3_lookback, T3_DEFAULT_VFACTOR};
use super::trima::{trima_into, trima_lookback};
use super::wma::{wma_into, wma_lookback};
use crate::error::{Result, TalibError};
use crate::types::Float;
use crate::validation::check_period;

/// Moving average used by MA-parameterised indicators
///
/// Numeric codes follow the reference library (`0 = SMA` ... `8 = T3`);
/// code 7 (MAMA) is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaType {
    /// Simple
    #[default]
    Sma,
    /// Exponential
    Ema,
    /// Weighted
    Wma,
    /// Double exponential
    Dema,
    /// Triple exponential
    Tema,
    /// Triangular
    Trima,
    /// Kaufman adaptive
    Kama,
    /// Tillson T3 with volume factor 0.7
    T3,
}

impl MaType {
    /// Map a reference-library `matype` code.
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            0 => Self::Sma,
            1 => Self::Ema,
            2 => Self::Wma,
            3 => Self::Dema,
            4 => Self::Tema,
            5 => Self::Trima,
            6 => Self::Kama,
            8 => Self::T3,
            _ => {
                return Err(TalibError::invalid_parameter(
                    "matype",
                    code.to_string(),
                    "0..=6 or 8",
                ))
            }
        })
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Wma => "wma",
            Self::Dema => "dema",
            Self::Tema => "tema",
            Self::Trima => "trima",
            Self::Kama => "kama",
            Self::T3 => "t3",
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaType {
    type Err = TalibError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "sma" => Self::Sma,
            "ema" => Self::Ema,
            "wma" => Self::Wma,
            "dema" => Self::Dema,
            "tema" => Self::Tema,
            "trima" => Self::Trima,
            "kama" => Self::Kama,
            "t3" => Self::T3,
            other => {
                return Err(TalibError::invalid_parameter(
                    "matype",
                    other,
                    "one of sma, ema, wma, dema, tema, trima, kama, t3",
                ))
            }
        })
    }
}

/// Moving average of `x` selected by `ma_type`; period 1 copies the input.
pub(crate) fn ma_into(x: &[Float], period: usize, ma_type: MaType, out: &mut [Float]) {
    if period == 1 {
        out.copy_from_slice(x);
        return;
    }
    match ma_type {
        MaType::Sma => sma_into(x, period, out),
        MaType::Ema => ema_series(x, period, out),
        MaType::Wma => wma_into(x, period, out),
        MaType::Dema => dema_into(x, period, out),
        MaType::Tema => tema_into(x, period, out),
        MaType::Trima => trima_into(x, period, out),
        MaType::Kama => kama_series(x, period, out),
        MaType::T3 => t3_into(x, period, T3_DEFAULT_VFACTOR, out),
    }
}

/// First valid index of [`ma`].
pub fn ma_lookback(period: usize, ma_type: MaType) -> usize {
    if period <= 1 {
        return 0;
    }
    match ma_type {
        MaType::Sma => sma_lookback(period),
        MaType::Ema => ema_lookback(period),
        MaType::Wma => wma_lookback(period),
        MaType::Dema => dema_lookback(period),
        MaType::Tema => tema_lookback(period),
        MaType::Trima => trima_lookback(period),
        MaType::Kama => kama_lookback(period),
        MaType::T3 => t3_lookback(period),
    }
}

/// Generic moving average, TA-Lib `MA(real, timeperiod=30, matype=0)`.
pub fn ma(real: &[Float], period: usize, ma_type: MaType) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    ma_into(real, period, ma_type, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MaType; 8] = [
        MaType::Sma,
        MaType::Ema,
        MaType::Wma,
        MaType::Dema,
        MaType::Tema,
        MaType::Trima,
        MaType::Kama,
        MaType::T3,
    ];

    #[test]
    fn test_from_str_roundtrips_display() {
        for t in ALL {
            assert_eq!(t.to_string().parse::<MaType>().unwrap(), t);
        }
        assert_eq!("EMA".parse::<MaType>().unwrap(), MaType::Ema);
        assert!("mama".parse::<MaType>().is_err());
    }

    #[test]
    fn test_codes() {
        assert_eq!(MaType::from_code(0).unwrap(), MaType::Sma);
        assert_eq!(MaType::from_code(8).unwrap(), MaType::T3);
        assert!(MaType::from_code(7).is_err());
    }

    #[test]
    fn test_lookback_matches_output() {
        let x: Vec<Float> = (0..120).map(|i| 100.0 + (i as Float * 0.1).cos()).collect();
        for t in ALL {
            let out = ma(&x, 5, t).unwrap();
            let lb = ma_lookback(5, t);
            assert!(out[..lb].iter().all(|v| v.is_nan()), "{t}");
            assert!(out[lb].is_finite(), "{t}");
        }
    }

    #[test]
    fn test_period_one_copies() {
        let x = [1.0, 2.0, 3.0];
        assert_eq!(ma(&x, 1, MaType::Kama).unwrap(), x.to_vec());
    }
}
