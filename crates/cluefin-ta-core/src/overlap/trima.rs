//! Triangular Moving Average (TRIMA).

use super::sma::sma_into;
use crate::error::Result;
use crate::kernels::scratch;
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// SMA of an SMA; the window pair sums to `period + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trima {
    period: usize,
}

impl Trima {
    /// Create a new TRIMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }
}

impl Indicator for Trima {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        trima_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        trima_into(inputs, self.period, outputs);
        Ok(())
    }
}

/// Inner and outer window lengths.
fn windows(period: usize) -> (usize, usize) {
    if period % 2 == 1 {
        let half = (period + 1) / 2;
        (half, half)
    } else {
        (period / 2, period / 2 + 1)
    }
}

pub(crate) fn trima_into(x: &[Float], period: usize, out: &mut [Float]) {
    let (inner, outer) = windows(period);
    let mut first = scratch(x.len(), Float::NAN);
    sma_into(x, inner, &mut first);
    sma_into(&first, outer, out);
}

/// First valid index of [`trima`].
pub fn trima_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Triangular moving average, TA-Lib `TRIMA(real, timeperiod=30)`.
pub fn trima(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Trima::new(period)?.compute_to_vec(real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trima_odd_period_weights() {
        // period 3 gives weights 1, 2, 1 over 4
        let out = trima(&[1.0, 2.0, 7.0, 4.0], 3).unwrap();
        assert!(out[1].is_nan());
        assert!((out[2] - (1.0 + 4.0 + 7.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_trima_even_period_weights() {
        // period 4 gives weights 1, 2, 2, 1 over 6
        let out = trima(&[1.0, 2.0, 3.0, 10.0], 4).unwrap();
        assert!(out[2].is_nan());
        assert!((out[3] - (1.0 + 4.0 + 6.0 + 10.0) / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_trima_lookback() {
        assert_eq!(Trima::new(30).unwrap().lookback(), 29);
        assert_eq!(windows(1), (1, 1));
    }
}
