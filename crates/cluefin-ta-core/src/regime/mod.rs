//! Market regime detection
//!
//! Composes indicator primitives into per-bar state labels:
//!
//! - [`regime_ma`]: trend from the fast/slow SMA spread (0 bear, 1 sideways, 2 bull)
//! - [`regime_volatility`]: NATR above or below a percentile (0 low, 1 high)
//! - [`regime_combined`]: `2 * trend + volatility` (0..=5)
//! - [`regime_ma_duration`]: run length of the current state
//! - [`regime_hmm`]: Gaussian HMM states ordered by mean return
//!
//! States are `f64` so warm-up positions can be NaN.
//!
//! # Example
//!
//! ```rust
//! use cluefin_ta_core::regime::{regime_ma, regime_ma_duration, BULL};
//!
//! let close: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
//! let states = regime_ma(&close, 20, 50, 0.02).unwrap();
//! assert_eq!(states[99], BULL);
//! assert_eq!(regime_ma_duration(&states)[99], 51.0);
//! ```

mod combined;
#[cfg(feature = "hmm")]
mod gaussian_hmm;
mod hmm;
mod trend;
mod volatility;

use crate::types::Float;

/// Trend state: falling market
pub const BEAR: Float = 0.0;
/// Trend state: range-bound market
pub const SIDEWAYS: Float = 1.0;
/// Trend state: rising market
pub const BULL: Float = 2.0;
/// Volatility state: NATR at or below the threshold
pub const LOW_VOL: Float = 0.0;
/// Volatility state: NATR above the threshold
pub const HIGH_VOL: Float = 1.0;

pub use combined::{regime_combined, regime_combined_lookback, CombinedRegime, RegimeParams};
pub use hmm::{hmm_available, regime_hmm, regime_hmm_returns, CovarianceType, HmmParams, HmmRegime};
pub use trend::{regime_ma, regime_ma_duration, regime_ma_lookback};
pub use volatility::{regime_volatility, regime_volatility_lookback};
