//! Overlap Studies indicators
//!
//! This module contains indicators that "overlap" with the price data, meaning
//! they are plotted directly on the same chart as the price bars. Common examples
//! include:
//! - Simple Moving Average (SMA)
//! - Exponential Moving Average (EMA)
//! - Weighted Moving Average (WMA)
//! - Bollinger Bands
//!
//! The moving averages are available both as [`Indicator`](crate::Indicator)
//! objects and as free functions named after the reference library.

mod bbands;
mod dema;
mod ema;
mod kama;
mod ma;
mod midpoint;
mod sar;
mod sma;
mod t3;
mod trima;
mod wma;

pub use bbands::{bbands, bbands_lookback, Bands, BbandsParams};
pub use dema::{dema, dema_lookback, tema, tema_lookback, Dema, Tema};
pub use ema::{ema, ema_lookback, Ema};
pub use kama::{kama, kama_lookback, Kama, KAMA_FAST_SC, KAMA_SLOW_SC};
pub use ma::{ma, ma_lookback, MaType};
pub use midpoint::{midpoint, midpoint_lookback, midprice};
pub use sar::{sar, sar_lookback};
pub use sma::{sma, sma_lookback, Sma};
pub use t3::{t3, t3_lookback, T3, T3_DEFAULT_VFACTOR};
pub use trima::{trima, trima_lookback, Trima};
pub use wma::{wma, wma_lookback, Wma};

pub use crate::cycle::{ht_trendline, ht_trendline_lookback};

pub(crate) use ema::{ema_k_into, ema_series};
pub(crate) use ma::ma_into;
pub(crate) use sma::sma_into;
