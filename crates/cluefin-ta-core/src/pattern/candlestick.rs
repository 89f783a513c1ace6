//! Candlestick pattern recognition
//!
//! Each pattern scans OHLC bars and emits `+100` (bullish), `-100` (bearish)
//! or `0`. Multi-bar patterns report on their final bar. Size tests ("long
//! body", "short shadow", "near the low") compare against [`CandleSettings`]
//! averages over the bars preceding the one being measured, so a pattern's
//! first bar needs `avg_period` bars of history before it.
//!
//! Bars containing NaN never match.

use std::fmt;
use std::str::FromStr;

use super::settings::{CandleSettings, Candles};
use crate::error::{Result, TalibError};
use crate::types::{Float, PATTERN_BEARISH, PATTERN_BULLISH, PATTERN_NONE};
use crate::validation::{check_range, check_same_len};

/// Default penetration of Piercing and Dark Cloud Cover
pub const CLOUD_PENETRATION: Float = 0.5;

/// Default penetration of Morning and Evening Star
pub const STAR_PENETRATION: Float = 0.3;

/// Supported candlestick patterns
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CandlePattern {
    /// Body no larger than a doji body
    Doji,
    /// Small body near the prior low with a long lower shadow
    Hammer,
    /// Hammer shape near the prior high
    HangingMan,
    /// Small body gapping up with a long upper shadow
    ShootingStar,
    /// Body engulfing the opposite-colored prior body
    Engulfing,
    /// Small body inside a long opposite prior body
    Harami,
    /// White bar closing above the midpoint of a long black bar
    Piercing,
    /// Black bar closing below the midpoint of a long white bar
    DarkCloudCover {
        /// Fraction of the first body the second close must penetrate
        penetration: Float,
    },
    /// Long black, gapped star, white close into the first body
    MorningStar {
        /// Fraction of the first body the third close must penetrate
        penetration: Float,
    },
    /// Long white, gapped star, black close into the first body
    EveningStar {
        /// Fraction of the first body the third close must penetrate
        penetration: Float,
    },
}

impl CandlePattern {
    /// Pattern name as used by the bindings (`"doji"`, `"morning_star"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            CandlePattern::Doji => "doji",
            CandlePattern::Hammer => "hammer",
            CandlePattern::HangingMan => "hanging_man",
            CandlePattern::ShootingStar => "shooting_star",
            CandlePattern::Engulfing => "engulfing",
            CandlePattern::Harami => "harami",
            CandlePattern::Piercing => "piercing",
            CandlePattern::DarkCloudCover { .. } => "dark_cloud_cover",
            CandlePattern::MorningStar { .. } => "morning_star",
            CandlePattern::EveningStar { .. } => "evening_star",
        }
    }

    /// Index of the first bar that can carry a signal
    pub fn lookback(&self, s: &CandleSettings) -> usize {
        match self {
            CandlePattern::Doji => s.body_doji.avg_period,
            CandlePattern::Hammer | CandlePattern::HangingMan => {
                s.body_short
                    .avg_period
                    .max(s.shadow_long.avg_period)
                    .max(s.shadow_very_short.avg_period)
                    .max(s.near.avg_period)
                    + 1
            }
            CandlePattern::ShootingStar => {
                s.body_short
                    .avg_period
                    .max(s.shadow_long.avg_period)
                    .max(s.shadow_very_short.avg_period)
                    + 1
            }
            CandlePattern::Engulfing => 2,
            CandlePattern::Harami => s.body_short.avg_period.max(s.body_long.avg_period) + 1,
            CandlePattern::Piercing | CandlePattern::DarkCloudCover { .. } => {
                s.body_long.avg_period + 1
            }
            CandlePattern::MorningStar { .. } | CandlePattern::EveningStar { .. } => {
                s.body_short.avg_period.max(s.body_long.avg_period) + 2
            }
        }
    }

    /// Scan the bars with the given size settings.
    pub fn detect(
        &self,
        open: &[Float],
        high: &[Float],
        low: &[Float],
        close: &[Float],
        settings: &CandleSettings,
    ) -> Result<Vec<i32>> {
        let n = check_same_len(&[("open", open), ("high", high), ("low", low), ("close", close)])?;
        match *self {
            CandlePattern::DarkCloudCover { penetration }
            | CandlePattern::MorningStar { penetration }
            | CandlePattern::EveningStar { penetration } => {
                check_range("penetration", penetration, 0.0, Float::MAX)?;
            }
            _ => {}
        }

        let bars = Candles {
            open,
            high,
            low,
            close,
        };
        let mut out = vec![PATTERN_NONE; n];
        for (i, o) in out.iter_mut().enumerate().skip(self.lookback(settings)) {
            *o = self.at(&bars, settings, i);
        }
        Ok(out)
    }

    fn at(&self, c: &Candles<'_>, s: &CandleSettings, i: usize) -> i32 {
        match *self {
            CandlePattern::Doji => signal(
                c.real_body(i) <= c.average(&s.body_doji, i),
                PATTERN_BULLISH,
            ),
            CandlePattern::Hammer => signal(
                hammer_shape(c, s, i)
                    && c.body_bottom(i) <= c.low[i - 1] + c.average(&s.near, i - 1),
                PATTERN_BULLISH,
            ),
            CandlePattern::HangingMan => signal(
                hammer_shape(c, s, i)
                    && c.body_bottom(i) >= c.high[i - 1] - c.average(&s.near, i - 1),
                PATTERN_BEARISH,
            ),
            CandlePattern::ShootingStar => signal(
                c.real_body(i) < c.average(&s.body_short, i)
                    && c.upper_shadow(i) > c.average(&s.shadow_long, i)
                    && c.lower_shadow(i) < c.average(&s.shadow_very_short, i)
                    && c.body_bottom(i) > c.body_top(i - 1),
                PATTERN_BEARISH,
            ),
            CandlePattern::Engulfing => engulfing(c, i),
            CandlePattern::Harami => signal(
                c.real_body(i - 1) > c.average(&s.body_long, i - 1)
                    && c.real_body(i) <= c.average(&s.body_short, i)
                    && c.body_top(i) <= c.body_top(i - 1)
                    && c.body_bottom(i) >= c.body_bottom(i - 1),
                -c.color(i - 1) * PATTERN_BULLISH,
            ),
            CandlePattern::Piercing => signal(
                c.color(i - 1) == -1
                    && c.real_body(i - 1) > c.average(&s.body_long, i - 1)
                    && c.color(i) == 1
                    && c.real_body(i) > c.average(&s.body_long, i)
                    && c.open[i] < c.low[i - 1]
                    && c.close[i] < c.open[i - 1]
                    && c.close[i] > c.close[i - 1] + c.real_body(i - 1) * CLOUD_PENETRATION,
                PATTERN_BULLISH,
            ),
            CandlePattern::DarkCloudCover { penetration } => signal(
                c.color(i - 1) == 1
                    && c.real_body(i - 1) > c.average(&s.body_long, i - 1)
                    && c.color(i) == -1
                    && c.open[i] > c.high[i - 1]
                    && c.close[i] > c.open[i - 1]
                    && c.close[i] < c.close[i - 1] - c.real_body(i - 1) * penetration,
                PATTERN_BEARISH,
            ),
            CandlePattern::MorningStar { penetration } => signal(
                c.real_body(i - 2) > c.average(&s.body_long, i - 2)
                    && c.color(i - 2) == -1
                    && c.real_body(i - 1) <= c.average(&s.body_short, i - 1)
                    && c.body_top(i - 1) < c.body_bottom(i - 2)
                    && c.real_body(i) > c.average(&s.body_short, i)
                    && c.color(i) == 1
                    && c.close[i] > c.close[i - 2] + c.real_body(i - 2) * penetration,
                PATTERN_BULLISH,
            ),
            CandlePattern::EveningStar { penetration } => signal(
                c.real_body(i - 2) > c.average(&s.body_long, i - 2)
                    && c.color(i - 2) == 1
                    && c.real_body(i - 1) <= c.average(&s.body_short, i - 1)
                    && c.body_bottom(i - 1) > c.body_top(i - 2)
                    && c.real_body(i) > c.average(&s.body_short, i)
                    && c.color(i) == -1
                    && c.close[i] < c.close[i - 2] - c.real_body(i - 2) * penetration,
                PATTERN_BEARISH,
            ),
        }
    }
}

#[inline]
fn signal(matched: bool, code: i32) -> i32 {
    if matched {
        code
    } else {
        PATTERN_NONE
    }
}

/// Small body, long lower shadow, almost no upper shadow.
fn hammer_shape(c: &Candles<'_>, s: &CandleSettings, i: usize) -> bool {
    c.real_body(i) < c.average(&s.body_short, i)
        && c.lower_shadow(i) > c.average(&s.shadow_long, i)
        && c.upper_shadow(i) < c.average(&s.shadow_very_short, i)
}

fn engulfing(c: &Candles<'_>, i: usize) -> i32 {
    let (o, cl) = (c.open, c.close);
    let white_engulfs = c.color(i) == 1
        && c.color(i - 1) == -1
        && ((cl[i] >= o[i - 1] && o[i] < cl[i - 1]) || (cl[i] > o[i - 1] && o[i] <= cl[i - 1]));
    let black_engulfs = c.color(i) == -1
        && c.color(i - 1) == 1
        && ((o[i] >= cl[i - 1] && cl[i] < o[i - 1]) || (o[i] > cl[i - 1] && cl[i] <= o[i - 1]));
    if white_engulfs || black_engulfs {
        c.color(i) * PATTERN_BULLISH
    } else {
        PATTERN_NONE
    }
}

impl fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandlePattern {
    type Err = TalibError;

    /// Parses a pattern name; penetration-based patterns get their default.
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "doji" => CandlePattern::Doji,
            "hammer" => CandlePattern::Hammer,
            "hanging_man" | "hangingman" => CandlePattern::HangingMan,
            "shooting_star" | "shootingstar" => CandlePattern::ShootingStar,
            "engulfing" => CandlePattern::Engulfing,
            "harami" => CandlePattern::Harami,
            "piercing" => CandlePattern::Piercing,
            "dark_cloud_cover" | "darkcloudcover" => CandlePattern::DarkCloudCover {
                penetration: CLOUD_PENETRATION,
            },
            "morning_star" | "morningstar" => CandlePattern::MorningStar {
                penetration: STAR_PENETRATION,
            },
            "evening_star" | "eveningstar" => CandlePattern::EveningStar {
                penetration: STAR_PENETRATION,
            },
            _ => {
                return Err(TalibError::invalid_parameter(
                    "pattern",
                    s,
                    "a supported candlestick pattern name",
                ))
            }
        })
    }
}

/// First signalling bar of `pattern` under the default settings.
pub fn cdl_lookback(pattern: CandlePattern) -> usize {
    pattern.lookback(&CandleSettings::default())
}

macro_rules! candle_fn {
    ($($(#[$doc:meta])* $name:ident => $pattern:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(
                open: &[Float],
                high: &[Float],
                low: &[Float],
                close: &[Float],
            ) -> Result<Vec<i32>> {
                $pattern.detect(open, high, low, close, &CandleSettings::default())
            }
        )*
    };
}

candle_fn! {
    /// Doji, TA-Lib `CDLDOJI`. Emits `+100`.
    cdldoji => CandlePattern::Doji;
    /// Hammer, TA-Lib `CDLHAMMER`. Emits `+100`.
    cdlhammer => CandlePattern::Hammer;
    /// Hanging Man, TA-Lib `CDLHANGINGMAN`. Emits `-100`.
    cdlhangingman => CandlePattern::HangingMan;
    /// Shooting Star, TA-Lib `CDLSHOOTINGSTAR`. Emits `-100`.
    cdlshootingstar => CandlePattern::ShootingStar;
    /// Engulfing, TA-Lib `CDLENGULFING`. Sign follows the engulfing bar.
    cdlengulfing => CandlePattern::Engulfing;
    /// Harami, TA-Lib `CDLHARAMI`. Sign is opposite to the mother bar.
    cdlharami => CandlePattern::Harami;
    /// Piercing Line, TA-Lib `CDLPIERCING`. Emits `+100`.
    cdlpiercing => CandlePattern::Piercing;
}

/// Dark Cloud Cover, TA-Lib `CDLDARKCLOUDCOVER(penetration=0.5)`. Emits `-100`.
pub fn cdldarkcloudcover(
    open: &[Float],
    high: &[Float],
    low: &[Float],
    close: &[Float],
    penetration: Float,
) -> Result<Vec<i32>> {
    CandlePattern::DarkCloudCover { penetration }.detect(
        open,
        high,
        low,
        close,
        &CandleSettings::default(),
    )
}

/// Morning Star, TA-Lib `CDLMORNINGSTAR(penetration=0.3)`. Emits `+100`.
pub fn cdlmorningstar(
    open: &[Float],
    high: &[Float],
    low: &[Float],
    close: &[Float],
    penetration: Float,
) -> Result<Vec<i32>> {
    CandlePattern::MorningStar { penetration }.detect(
        open,
        high,
        low,
        close,
        &CandleSettings::default(),
    )
}

/// Evening Star, TA-Lib `CDLEVENINGSTAR(penetration=0.3)`. Emits `-100`.
pub fn cdleveningstar(
    open: &[Float],
    high: &[Float],
    low: &[Float],
    close: &[Float],
    penetration: Float,
) -> Result<Vec<i32>> {
    CandlePattern::EveningStar { penetration }.detect(
        open,
        high,
        low,
        close,
        &CandleSettings::default(),
    )
}
