//! Pattern recognition
//!
//! Candlestick patterns following the reference library's candle settings,
//! plus the multi-bar Cup-&-Handle breakout detector and the pivot
//! extraction it is built on. All detectors return `i32` codes:
//! `+100` bullish, `-100` bearish, `0` no pattern.

mod candlestick;
mod cup_handle;
mod pivots;
mod settings;

pub use candlestick::{
    cdl_lookback, cdldarkcloudcover, cdldoji, cdlengulfing, cdleveningstar, cdlhammer,
    cdlhangingman, cdlharami, cdlmorningstar, cdlpiercing, cdlshootingstar, CandlePattern,
    CLOUD_PENETRATION, STAR_PENETRATION,
};
pub use cup_handle::{cup_handle, cup_handle_lookback, CupHandleParams};
pub use pivots::{fractal_pivots, zigzag_pivots, PivotMethod, Pivots};
pub use settings::{CandleSetting, CandleSettings, RangeType};
