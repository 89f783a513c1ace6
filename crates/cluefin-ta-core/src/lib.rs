//! cluefin-ta-core: technical analysis engine
//!
//! A batch, array-in/array-out numerical library reproducing the TA-Lib
//! function set, plus market-regime classification, Dow-theory trend detection
//! and a Cup-&-Handle breakout detector.
//!
//! Every function takes equal-length `f64` slices and returns vectors of the
//! same length. Positions without enough history are `NaN`; pattern detectors
//! return `i32` codes where `0` means "no pattern".
//!
//! # Features
//!
//! - `simd` (default): runtime-selected vectorized reductions
//! - `hmm` (default): Gaussian hidden Markov model regime detection
//! - `serde`: serialization of parameter structs and enums
//!
//! # Modules
//!
//! - [`overlap`], [`momentum`], [`volatility`], [`volume`], [`price`],
//!   [`cycle`], [`statistic`], [`math`]: reference-library indicator families
//! - [`pattern`]: candlestick patterns and Cup-&-Handle
//! - [`regime`]: trend, volatility and HMM regime labels
//! - [`dow`]: Dow-theory trend and index confirmation
//! - [`kernels`]: shared numeric loops
//! - [`simd`]: dispatch of vectorized reductions
//!
//! # Example
//!
//! ```rust
//! use cluefin_ta_core::{momentum::rsi, overlap::sma};
//!
//! let close: Vec<f64> = (1..=15).map(f64::from).collect();
//! let r = rsi(&close, 14).unwrap();
//! assert_eq!(r[14], 100.0);
//!
//! let s = sma(&close, 5).unwrap();
//! assert_eq!(s[4], 3.0);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod cycle;
pub mod dow;
pub mod error;
pub mod kernels;
pub mod math;
pub mod momentum;
pub mod overlap;
pub mod pattern;
pub mod price;
pub mod regime;
pub mod simd;
pub mod statistic;
pub mod traits;
pub mod types;
pub mod validation;
pub mod volatility;
pub mod volume;

pub use error::{Result, TalibError};
pub use traits::Indicator;
pub use types::{Float, Ohlcv};
