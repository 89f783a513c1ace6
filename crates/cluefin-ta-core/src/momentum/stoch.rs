//! Stochastic oscillators: STOCH, STOCHF, STOCHRSI.

use super::rsi::{rsi_into, rsi_lookback};
use crate::error::Result;
use crate::kernels::{rolling_max_into, rolling_min_into, scratch};
use crate::overlap::{ma_into, ma_lookback, MaType};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

/// `(k, d)` lines
pub type StochOutput = (Vec<Float>, Vec<Float>);

/// Parameters of [`stoch`]; defaults are `(5, 3, SMA, 3, SMA)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochParams {
    /// Raw %K window
    pub fastk_period: usize,
    /// Slow %K smoothing period
    pub slowk_period: usize,
    /// Slow %K smoothing average
    pub slowk_ma: MaType,
    /// Slow %D smoothing period
    pub slowd_period: usize,
    /// Slow %D smoothing average
    pub slowd_ma: MaType,
}

impl Default for StochParams {
    fn default() -> Self {
        Self {
            fastk_period: 5,
            slowk_period: 3,
            slowk_ma: MaType::Sma,
            slowd_period: 3,
            slowd_ma: MaType::Sma,
        }
    }
}

/// Raw `%K = 100 * (c - LL) / (HH - LL)`; a flat window gives 0.
fn fastk_into(high: &[Float], low: &[Float], close: &[Float], period: usize, out: &mut [Float]) {
    let n = close.len();
    let mut hh = scratch(n, Float::NAN);
    let mut ll = scratch(n, Float::NAN);
    rolling_max_into(high, period, &mut hh);
    rolling_min_into(low, period, &mut ll);
    for i in 0..n {
        let range = hh[i] - ll[i];
        out[i] = if range.is_nan() || close[i].is_nan() {
            Float::NAN
        } else if range > 0.0 {
            100.0 * (close[i] - ll[i]) / range
        } else {
            0.0
        };
    }
}

fn mask(start: usize, a: &mut [Float], b: &mut [Float]) {
    let start = start.min(a.len());
    a[..start].fill(Float::NAN);
    b[..start].fill(Float::NAN);
}

/// First valid index of [`stoch`].
pub fn stoch_lookback(params: &StochParams) -> usize {
    params.fastk_period.saturating_sub(1)
        + ma_lookback(params.slowk_period, params.slowk_ma)
        + ma_lookback(params.slowd_period, params.slowd_ma)
}

/// Slow stochastic `(slowk, slowd)`, TA-Lib `STOCH`.
pub fn stoch(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    params: &StochParams,
) -> Result<StochOutput> {
    let n = check_same_len(&[("high", high), ("low", low), ("close", close)])?;
    check_period("fastk_period", params.fastk_period, 1)?;
    check_period("slowk_period", params.slowk_period, 1)?;
    check_period("slowd_period", params.slowd_period, 1)?;

    let mut fastk = scratch(n, Float::NAN);
    fastk_into(high, low, close, params.fastk_period, &mut fastk);
    let mut slowk = vec![Float::NAN; n];
    let mut slowd = vec![Float::NAN; n];
    ma_into(&fastk, params.slowk_period, params.slowk_ma, &mut slowk);
    ma_into(&slowk, params.slowd_period, params.slowd_ma, &mut slowd);
    mask(stoch_lookback(params), &mut slowk, &mut slowd);
    Ok((slowk, slowd))
}

/// First valid index of [`stochf`].
pub fn stochf_lookback(fastk_period: usize, fastd_period: usize, fastd_ma: MaType) -> usize {
    fastk_period.saturating_sub(1) + ma_lookback(fastd_period, fastd_ma)
}

/// Fast stochastic `(fastk, fastd)`,
/// TA-Lib `STOCHF(high, low, close, fastk_period=5, fastd_period=3, fastd_matype=0)`.
pub fn stochf(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma: MaType,
) -> Result<StochOutput> {
    let n = check_same_len(&[("high", high), ("low", low), ("close", close)])?;
    check_period("fastk_period", fastk_period, 1)?;
    check_period("fastd_period", fastd_period, 1)?;

    let mut fastk = vec![Float::NAN; n];
    let mut fastd = vec![Float::NAN; n];
    fastk_into(high, low, close, fastk_period, &mut fastk);
    ma_into(&fastk, fastd_period, fastd_ma, &mut fastd);
    mask(stochf_lookback(fastk_period, fastd_period, fastd_ma), &mut fastk, &mut fastd);
    Ok((fastk, fastd))
}

/// First valid index of [`stochrsi`].
pub fn stochrsi_lookback(
    period: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma: MaType,
) -> usize {
    rsi_lookback(period) + stochf_lookback(fastk_period, fastd_period, fastd_ma)
}

/// Fast stochastic of RSI `(fastk, fastd)`,
/// TA-Lib `STOCHRSI(real, timeperiod=14, fastk_period=5, fastd_period=3, fastd_matype=0)`.
pub fn stochrsi(
    real: &[Float],
    period: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma: MaType,
) -> Result<StochOutput> {
    check_period("timeperiod", period, 1)?;
    check_period("fastk_period", fastk_period, 1)?;
    check_period("fastd_period", fastd_period, 1)?;

    let n = real.len();
    let mut r = scratch(n, Float::NAN);
    rsi_into(real, period, &mut r);
    let mut fastk = vec![Float::NAN; n];
    let mut fastd = vec![Float::NAN; n];
    fastk_into(&r, &r, &r, fastk_period, &mut fastk);
    ma_into(&fastk, fastd_period, fastd_ma, &mut fastd);
    mask(
        stochrsi_lookback(period, fastk_period, fastd_period, fastd_ma),
        &mut fastk,
        &mut fastd,
    );
    Ok((fastk, fastd))
}
