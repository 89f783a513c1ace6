//! Kaufman Adaptive Moving Average (KAMA).

use crate::error::Result;
use crate::kernels::{after_leading_nans, kama_into};
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// Fast smoothing constant, `2 / (2 + 1)`.
pub const KAMA_FAST_SC: Float = 2.0 / 3.0;

/// Slow smoothing constant, `2 / (30 + 1)`.
pub const KAMA_SLOW_SC: Float = 2.0 / 31.0;

/// Kaufman adaptive moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kama {
    period: usize,
}

impl Kama {
    /// Create a new KAMA indicator with the given efficiency-ratio period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }
}

impl Indicator for Kama {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        kama_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        kama_series(inputs, self.period, outputs);
        Ok(())
    }
}

pub(crate) fn kama_series(x: &[Float], period: usize, out: &mut [Float]) {
    after_leading_nans(x, out, |x, out| {
        kama_into(x, period, KAMA_FAST_SC, KAMA_SLOW_SC, out)
    });
}

/// First valid index of [`kama`].
pub fn kama_lookback(period: usize) -> usize {
    period
}

/// Kaufman adaptive moving average, TA-Lib `KAMA(real, timeperiod=30)`.
pub fn kama(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Kama::new(period)?.compute_to_vec(real)
}
