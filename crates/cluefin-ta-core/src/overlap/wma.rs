//! Weighted Moving Average (WMA).

use crate::error::Result;
use crate::kernels::scratch;
use crate::simd;
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// Linearly weighted moving average; the newest bar has weight `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wma {
    period: usize,
}

impl Wma {
    /// Create a new WMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }
}

impl Indicator for Wma {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        wma_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        wma_into(inputs, self.period, outputs);
        Ok(())
    }
}

pub(crate) fn wma_into(x: &[Float], period: usize, out: &mut [Float]) {
    let n = x.len();
    out.fill(Float::NAN);
    if period == 0 || n < period {
        return;
    }

    let mut weights = scratch(period, 0.0);
    for (j, w) in weights.iter_mut().enumerate() {
        *w = (j + 1) as Float;
    }
    let divisor = (period * (period + 1)) as Float / 2.0;
    for i in period - 1..n {
        out[i] = simd::dot_product(&x[i + 1 - period..=i], &weights) / divisor;
    }
}

/// First valid index of [`wma`].
pub fn wma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Weighted moving average, TA-Lib `WMA(real, timeperiod=30)`.
pub fn wma(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Wma::new(period)?.compute_to_vec(real)
}
