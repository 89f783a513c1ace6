//! Implementation of the Simple Moving Average (SMA) indicator.

use crate::error::Result;
use crate::kernels::rolling_sum_into;
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// Simple moving average over a fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        sma_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        sma_into(inputs, self.period, outputs);
        Ok(())
    }
}

pub(crate) fn sma_into(x: &[Float], period: usize, out: &mut [Float]) {
    rolling_sum_into(x, period, out);
    let p = period as Float;
    for v in out.iter_mut() {
        *v /= p;
    }
}

/// First valid index of [`sma`].
pub fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Simple moving average, TA-Lib `SMA(real, timeperiod=30)`.
pub fn sma(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Sma::new(period)?.compute_to_vec(real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_basic() {
        let sma = Sma::new(3).unwrap();
        let inputs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.compute_to_vec(&inputs).unwrap();

        // First two values should be NaN due to insufficient data
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());

        // SMA(3) of [1,2,3] = 2.0
        assert!((result[2] - 2.0).abs() < 1e-10);
        // SMA(3) of [2,3,4] = 3.0
        assert!((result[3] - 3.0).abs() < 1e-10);
        // SMA(3) of [3,4,5] = 4.0
        assert!((result[4] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_lookback() {
        assert_eq!(Sma::new(5).unwrap().lookback(), 4);
        assert_eq!(Sma::new(1).unwrap().lookback(), 0);
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        assert!(Sma::new(0).is_err());
        assert!(sma(&[1.0], 0).is_err());
    }

    #[test]
    fn test_sma_buffer_mismatch() {
        let mut out = [0.0; 2];
        let kernel = Sma::new(2).unwrap();
        assert!(kernel.compute(&[1.0, 2.0, 3.0], &mut out).is_err());
    }

    #[test]
    fn test_sma_short_input() {
        let out = sma(&[1.0, 2.0], 3).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
        assert!(sma(&[], 3).unwrap().is_empty());
    }
}
