//! Candle size settings.
//!
//! Pattern rules compare a bar's body or shadow with the average size of
//! the preceding bars. Each setting names which range is measured, how many
//! preceding bars are averaged, and a factor applied to that average.

use crate::types::Float;

/// Part of the candle a setting measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeType {
    /// `|close - open|`
    RealBody,
    /// `high - low`
    HighLow,
    /// Upper plus lower shadow; the average is halved
    Shadows,
}

/// One size reference
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandleSetting {
    /// Measured range
    pub range_type: RangeType,
    /// Number of preceding bars averaged; 0 uses the bar itself
    pub avg_period: usize,
    /// Multiplier applied to the average
    pub factor: Float,
}

impl CandleSetting {
    const fn new(range_type: RangeType, avg_period: usize, factor: Float) -> Self {
        Self {
            range_type,
            avg_period,
            factor,
        }
    }
}

/// Size references used by the candlestick patterns
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandleSettings {
    /// Long real body
    pub body_long: CandleSetting,
    /// Very long real body
    pub body_very_long: CandleSetting,
    /// Short real body
    pub body_short: CandleSetting,
    /// Doji body
    pub body_doji: CandleSetting,
    /// Long shadow
    pub shadow_long: CandleSetting,
    /// Very long shadow
    pub shadow_very_long: CandleSetting,
    /// Short shadow
    pub shadow_short: CandleSetting,
    /// Very short shadow
    pub shadow_very_short: CandleSetting,
    /// "Near" price distance
    pub near: CandleSetting,
    /// "Far" price distance
    pub far: CandleSetting,
    /// "Equal" price distance
    pub equal: CandleSetting,
}

impl Default for CandleSettings {
    fn default() -> Self {
        use RangeType::*;
        Self {
            body_long: CandleSetting::new(RealBody, 10, 1.0),
            body_very_long: CandleSetting::new(RealBody, 10, 3.0),
            body_short: CandleSetting::new(RealBody, 10, 1.0),
            body_doji: CandleSetting::new(HighLow, 10, 0.1),
            shadow_long: CandleSetting::new(RealBody, 0, 1.0),
            shadow_very_long: CandleSetting::new(RealBody, 0, 2.0),
            shadow_short: CandleSetting::new(Shadows, 10, 1.0),
            shadow_very_short: CandleSetting::new(HighLow, 10, 0.1),
            near: CandleSetting::new(HighLow, 5, 0.2),
            far: CandleSetting::new(HighLow, 5, 0.6),
            equal: CandleSetting::new(HighLow, 5, 0.05),
        }
    }
}

/// Borrowed OHLC bars with the candle geometry helpers.
pub(crate) struct Candles<'a> {
    pub open: &'a [Float],
    pub high: &'a [Float],
    pub low: &'a [Float],
    pub close: &'a [Float],
}

impl Candles<'_> {
    #[inline]
    pub fn real_body(&self, i: usize) -> Float {
        (self.close[i] - self.open[i]).abs()
    }

    #[inline]
    pub fn body_top(&self, i: usize) -> Float {
        self.close[i].max(self.open[i])
    }

    #[inline]
    pub fn body_bottom(&self, i: usize) -> Float {
        self.close[i].min(self.open[i])
    }

    #[inline]
    pub fn upper_shadow(&self, i: usize) -> Float {
        self.high[i] - self.body_top(i)
    }

    #[inline]
    pub fn lower_shadow(&self, i: usize) -> Float {
        self.body_bottom(i) - self.low[i]
    }

    /// `1` for a white (close >= open) candle, `-1` for black.
    #[inline]
    pub fn color(&self, i: usize) -> i32 {
        if self.close[i] >= self.open[i] {
            1
        } else {
            -1
        }
    }

    fn range(&self, range_type: RangeType, i: usize) -> Float {
        match range_type {
            RangeType::RealBody => self.real_body(i),
            RangeType::HighLow => self.high[i] - self.low[i],
            RangeType::Shadows => self.upper_shadow(i) + self.lower_shadow(i),
        }
    }

    /// Reference size of `setting` at bar `i`, averaged over the bars before `i`.
    pub fn average(&self, setting: &CandleSetting, i: usize) -> Float {
        let base = if setting.avg_period == 0 {
            self.range(setting.range_type, i)
        } else {
            let start = i.saturating_sub(setting.avg_period);
            let total: Float = (start..i).map(|j| self.range(setting.range_type, j)).sum();
            total / setting.avg_period as Float
        };
        let divisor = if setting.range_type == RangeType::Shadows {
            2.0
        } else {
            1.0
        };
        setting.factor * base / divisor
    }
}
