//! cluefin-ta-wasm: WebAssembly bindings for the cluefin technical analysis engine
//!
//! Exposes the common indicators, the regime detectors, Dow theory and the
//! Cup-&-Handle detector to JavaScript through wasm-bindgen. Arrays cross the
//! boundary as `Float64Array`; validation failures surface as thrown `Error`s.
//!
//! HMM regimes are not part of this surface: the core is built without the
//! `hmm` feature for the browser.

use cluefin_ta_core::dow::{dow_theory, index_bars, DowTheoryParams};
use cluefin_ta_core::overlap::{BbandsParams, MaType};
use cluefin_ta_core::pattern::CupHandleParams;
use cluefin_ta_core::regime::RegimeParams;
use cluefin_ta_core::{momentum, overlap, pattern, regime, volatility, volume, Ohlcv};
use wasm_bindgen::prelude::*;

/// Installs the panic hook that forwards Rust panics to `console.error`.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ============================================================================
// Multi-output results
// ============================================================================

/// Three aligned series returned by `bbands`, `macd` and `regime_combined`
#[wasm_bindgen]
pub struct Series3 {
    first: Vec<f64>,
    second: Vec<f64>,
    third: Vec<f64>,
}

#[wasm_bindgen]
impl Series3 {
    /// Upper band, MACD line or trend state
    #[wasm_bindgen(getter)]
    pub fn first(&self) -> Vec<f64> {
        self.first.clone()
    }

    /// Middle band, signal line or volatility state
    #[wasm_bindgen(getter)]
    pub fn second(&self) -> Vec<f64> {
        self.second.clone()
    }

    /// Lower band, histogram or combined state
    #[wasm_bindgen(getter)]
    pub fn third(&self) -> Vec<f64> {
        self.third.clone()
    }
}

/// Dow theory trend and index agreement
#[wasm_bindgen]
pub struct DowResult {
    trend: Vec<f64>,
    correlation: Vec<f64>,
}

#[wasm_bindgen]
impl DowResult {
    /// Trend label per bar, `-2..=2` or NaN
    #[wasm_bindgen(getter)]
    pub fn trend(&self) -> Vec<f64> {
        self.trend.clone()
    }

    /// Agreement with the index per bar
    #[wasm_bindgen(getter)]
    pub fn correlation(&self) -> Vec<f64> {
        self.correlation.clone()
    }
}

// ============================================================================
// Indicators
// ============================================================================

/// Simple moving average
#[wasm_bindgen]
pub fn sma(real: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(overlap::sma(real, period)?)
}

/// Exponential moving average
#[wasm_bindgen]
pub fn ema(real: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(overlap::ema(real, period)?)
}

/// Moving average selected by reference-library `matype` code
#[wasm_bindgen]
pub fn ma(real: &[f64], period: usize, matype: i32) -> Result<Vec<f64>, JsError> {
    Ok(overlap::ma(real, period, MaType::from_code(matype)?)?)
}

/// Bollinger Bands as `(upper, middle, lower)`
#[wasm_bindgen]
pub fn bbands(
    real: &[f64],
    period: usize,
    nbdev_up: f64,
    nbdev_dn: f64,
    matype: i32,
) -> Result<Series3, JsError> {
    let params = BbandsParams {
        period,
        nbdev_up,
        nbdev_dn,
        ma_type: MaType::from_code(matype)?,
    };
    let (first, second, third) = overlap::bbands(real, &params)?;
    Ok(Series3 { first, second, third })
}

/// Relative strength index
#[wasm_bindgen]
pub fn rsi(real: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(momentum::rsi(real, period)?)
}

/// MACD as `(macd, signal, hist)`
#[wasm_bindgen]
pub fn macd(
    real: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<Series3, JsError> {
    let (first, second, third) = momentum::macd(real, fast_period, slow_period, signal_period)?;
    Ok(Series3 { first, second, third })
}

/// Average directional index
#[wasm_bindgen]
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(momentum::adx(high, low, close, period)?)
}

/// Average true range
#[wasm_bindgen]
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(volatility::atr(high, low, close, period)?)
}

/// Normalized average true range
#[wasm_bindgen]
pub fn natr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<Vec<f64>, JsError> {
    Ok(volatility::natr(high, low, close, period)?)
}

/// On-balance volume
#[wasm_bindgen]
pub fn obv(close: &[f64], volume: &[f64]) -> Result<Vec<f64>, JsError> {
    Ok(volume::obv(close, volume)?)
}

/// Money flow index
#[wasm_bindgen]
pub fn mfi(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    period: usize,
) -> Result<Vec<f64>, JsError> {
    Ok(momentum::mfi(high, low, close, volume, period)?)
}

// ============================================================================
// Regime, Dow theory and Cup-&-Handle
// ============================================================================

/// Moving-average trend regime: 0 bear, 1 sideways, 2 bull
#[wasm_bindgen]
pub fn regime_ma(
    close: &[f64],
    fast_period: usize,
    slow_period: usize,
    sideways_threshold: f64,
) -> Result<Vec<f64>, JsError> {
    Ok(regime::regime_ma(close, fast_period, slow_period, sideways_threshold)?)
}

/// Run length of each regime state
#[wasm_bindgen]
pub fn regime_ma_duration(states: &[f64]) -> Vec<f64> {
    regime::regime_ma_duration(states)
}

/// Volatility regime: 0 low, 1 high
#[wasm_bindgen]
pub fn regime_volatility(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    atr_period: usize,
    threshold_percentile: f64,
) -> Result<Vec<f64>, JsError> {
    Ok(regime::regime_volatility(high, low, close, atr_period, threshold_percentile)?)
}

/// Combined regime with default parameters as `(trend, volatility, combined)`
#[wasm_bindgen]
pub fn regime_combined(high: &[f64], low: &[f64], close: &[f64]) -> Result<Series3, JsError> {
    let out = regime::regime_combined(high, low, close, &RegimeParams::default())?;
    Ok(Series3 {
        first: out.trend,
        second: out.volatility,
        third: out.combined,
    })
}

/// One-bar returns with a leading NaN
#[wasm_bindgen]
pub fn regime_hmm_returns(close: &[f64]) -> Vec<f64> {
    regime::regime_hmm_returns(close)
}

/// Dow theory trend; volume and the three index series are optional.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn dow_theory_trend(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: Option<Vec<f64>>,
    index_high: Option<Vec<f64>>,
    index_low: Option<Vec<f64>>,
    index_close: Option<Vec<f64>>,
    method: &str,
) -> Result<DowResult, JsError> {
    let params = DowTheoryParams {
        method: method.parse()?,
        ..Default::default()
    };
    let mut bars = Ohlcv::from_hlc(high, low, close);
    if let Some(v) = volume.as_deref() {
        bars = bars.with_volume(v);
    }
    let index = index_bars(index_high.as_deref(), index_low.as_deref(), index_close.as_deref())?;
    let out = dow_theory(bars, index, &params)?;
    Ok(DowResult {
        trend: out.trend,
        correlation: out.correlation,
    })
}

/// Cup-&-Handle breakout signals with default parameters
#[wasm_bindgen]
pub fn cup_handle(
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: Option<Vec<f64>>,
) -> Result<Vec<i32>, JsError> {
    Ok(pattern::cup_handle(
        open,
        high,
        low,
        close,
        volume.as_deref(),
        &CupHandleParams::default(),
    )?)
}
