//! Exponential Moving Average (EMA).

use crate::error::Result;
use crate::kernels::{after_leading_nans, ema_into, per_to_k};
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// SMA-seeded exponential moving average with `k = 2 / (period + 1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ema {
    period: usize,
    k: Float,
}

impl Ema {
    /// Create a new EMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self {
            period,
            k: per_to_k(period),
        })
    }

    /// Window length used for the seed
    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor
    pub fn k(&self) -> Float {
        self.k
    }
}

impl Indicator for Ema {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        ema_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        ema_k_into(inputs, self.period, self.k, outputs);
        Ok(())
    }
}

/// EMA with an explicit smoothing factor; the seed starts after leading NaN.
pub(crate) fn ema_k_into(x: &[Float], period: usize, k: Float, out: &mut [Float]) {
    after_leading_nans(x, out, |x, out| ema_into(x, period, k, out));
}

pub(crate) fn ema_series(x: &[Float], period: usize, out: &mut [Float]) {
    ema_k_into(x, period, per_to_k(period), out);
}

/// First valid index of [`ema`].
pub fn ema_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Exponential moving average, TA-Lib `EMA(real, timeperiod=30)`.
pub fn ema(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Ema::new(period)?.compute_to_vec(real)
}
