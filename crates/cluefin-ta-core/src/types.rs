//! Value types shared by every indicator family
//!
//! The engine works on contiguous `f64` series. NaN marks an undefined position
//! (warm-up or propagated from a NaN input); pattern outputs are integers where
//! `0` is the defined "no pattern" state.
//!
//! # Example
//!
//! ```rust
//! use cluefin_ta_core::types::{Float, PATTERN_BULLISH};
//!
//! let x: Float = 1.0;
//! assert_eq!(x + 2.0, 3.0);
//! assert_eq!(PATTERN_BULLISH, 100);
//! ```

/// Floating-point type used throughout the library
pub type Float = f64;

/// Bullish pattern signal
pub const PATTERN_BULLISH: i32 = 100;

/// Bearish pattern signal
pub const PATTERN_BEARISH: i32 = -100;

/// No pattern on this bar
pub const PATTERN_NONE: i32 = 0;

/// Borrowed OHLCV bundle
///
/// Only `close` is mandatory; each function documents which other series it
/// reads and rejects a bundle missing one of them.
#[derive(Debug, Clone, Copy)]
pub struct Ohlcv<'a> {
    /// Opening prices
    pub open: Option<&'a [Float]>,
    /// High prices
    pub high: Option<&'a [Float]>,
    /// Low prices
    pub low: Option<&'a [Float]>,
    /// Closing prices
    pub close: &'a [Float],
    /// Traded volume
    pub volume: Option<&'a [Float]>,
}

impl<'a> Ohlcv<'a> {
    /// Bundle with only closing prices
    pub fn from_close(close: &'a [Float]) -> Self {
        Self {
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// Bundle with high, low and close
    pub fn from_hlc(high: &'a [Float], low: &'a [Float], close: &'a [Float]) -> Self {
        Self {
            open: None,
            high: Some(high),
            low: Some(low),
            close,
            volume: None,
        }
    }

    /// Attach a volume series
    pub fn with_volume(mut self, volume: &'a [Float]) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Attach an open series
    pub fn with_open(mut self, open: &'a [Float]) -> Self {
        self.open = Some(open);
        self
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// True when there are no bars
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
