//! Trend × volatility regime.

use super::trend::{regime_ma, regime_ma_lookback};
use super::volatility::{regime_volatility, regime_volatility_lookback};
use crate::error::Result;
use crate::types::Float;
use crate::validation::check_same_len;

/// Parameters of [`regime_combined`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegimeParams {
    /// Fast SMA period
    pub fast_period: usize,
    /// Slow SMA period
    pub slow_period: usize,
    /// Relative SMA spread treated as sideways
    pub sideways_threshold: Float,
    /// ATR period of the volatility component
    pub atr_period: usize,
    /// NATR percentile separating low and high volatility
    pub threshold_percentile: Float,
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
            sideways_threshold: 0.02,
            atr_period: 14,
            threshold_percentile: 66.0,
        }
    }
}

/// Output of [`regime_combined`]
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRegime {
    /// Trend state 0..=2
    pub trend: Vec<Float>,
    /// Volatility state 0..=1
    pub volatility: Vec<Float>,
    /// `2 * trend + volatility`, 0..=5
    pub combined: Vec<Float>,
}

/// First valid index of [`regime_combined`].
pub fn regime_combined_lookback(params: &RegimeParams) -> usize {
    regime_ma_lookback(params.fast_period, params.slow_period)
        .max(regime_volatility_lookback(params.atr_period))
}

/// Trend and volatility regimes with their joint code.
///
/// `combined` is NaN wherever either component is.
pub fn regime_combined(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    params: &RegimeParams,
) -> Result<CombinedRegime> {
    check_same_len(&[("high", high), ("low", low), ("close", close)])?;
    let trend = regime_ma(
        close,
        params.fast_period,
        params.slow_period,
        params.sideways_threshold,
    )?;
    let volatility = regime_volatility(
        high,
        low,
        close,
        params.atr_period,
        params.threshold_percentile,
    )?;
    let combined = trend
        .iter()
        .zip(&volatility)
        .map(|(&t, &v)| 2.0 * t + v)
        .collect();
    Ok(CombinedRegime {
        trend,
        volatility,
        combined,
    })
}
