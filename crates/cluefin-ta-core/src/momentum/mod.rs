//! Momentum indicators
//!
//! Oscillators and rate-of-change measures: RSI, MACD, the stochastics,
//! the directional movement system and the range-based oscillators.

mod directional;
mod macd;
mod oscillators;
mod roc;
mod rsi;
mod stoch;

pub use directional::{
    adx, adx_lookback, adxr, adxr_lookback, dm_lookback, dx, dx_lookback, minus_di, minus_dm,
    plus_di, plus_dm,
};
pub use macd::{macd, macd_lookback, macdext, macdext_lookback, macdfix, MacdExtParams, MacdOutput};
pub use oscillators::{
    apo, apo_lookback, aroon, aroon_lookback, aroonosc, bop, cci, cci_lookback, mfi, mfi_lookback,
    ppo, trix, trix_lookback, ultosc, ultosc_lookback, willr, AroonOutput,
};
pub use roc::{mom, mom_lookback, roc, rocp, rocr, rocr100};
pub use rsi::{cmo, rsi, rsi_lookback};
pub use stoch::{
    stoch, stoch_lookback, stochf, stochf_lookback, stochrsi, stochrsi_lookback, StochOutput,
    StochParams,
};
