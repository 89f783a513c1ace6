//! Tillson T3 moving average.

use super::ema::ema_series;
use crate::error::Result;
use crate::kernels::scratch;
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::{check_period, check_range};

/// Default volume factor
pub const T3_DEFAULT_VFACTOR: Float = 0.7;

/// Six chained EMAs combined with volume-factor weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct T3 {
    period: usize,
    vfactor: Float,
}

impl T3 {
    /// Create a new T3 indicator; `vfactor` must lie in `[0, 1]`.
    pub fn new(period: usize, vfactor: Float) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        check_range("vfactor", vfactor, 0.0, 1.0)?;
        Ok(Self { period, vfactor })
    }
}

impl Indicator for T3 {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        t3_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        t3_into(inputs, self.period, self.vfactor, outputs);
        Ok(())
    }
}

pub(crate) fn t3_into(x: &[Float], period: usize, v: Float, out: &mut [Float]) {
    let n = x.len();
    let mut a = scratch(n, Float::NAN);
    let mut b = scratch(n, Float::NAN);
    ema_series(x, period, &mut a);
    ema_series(&a, period, &mut b);
    let mut e3 = scratch(n, Float::NAN);
    ema_series(&b, period, &mut e3);
    let mut e4 = scratch(n, Float::NAN);
    ema_series(&e3, period, &mut e4);
    let mut e5 = scratch(n, Float::NAN);
    ema_series(&e4, period, &mut e5);
    // reuse the first buffer for the sixth pass
    ema_series(&e5, period, &mut a);

    let v2 = v * v;
    let v3 = v2 * v;
    let c1 = -v3;
    let c2 = 3.0 * (v2 + v3);
    let c3 = -6.0 * v2 - 3.0 * (v + v3);
    let c4 = 1.0 + 3.0 * v + v3 + 3.0 * v2;
    for i in 0..n {
        out[i] = c1 * a[i] + c2 * e5[i] + c3 * e4[i] + c4 * e3[i];
    }
}

/// First valid index of [`t3`].
pub fn t3_lookback(period: usize) -> usize {
    6 * period.saturating_sub(1)
}

/// Tillson T3, TA-Lib `T3(real, timeperiod=5, vfactor=0.7)`.
pub fn t3(real: &[Float], period: usize, vfactor: Float) -> Result<Vec<Float>> {
    T3::new(period, vfactor)?.compute_to_vec(real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t3_coefficients_sum_to_one() {
        let out = t3(&[9.0; 40], 5, T3_DEFAULT_VFACTOR).unwrap();
        assert!(out[23].is_nan());
        assert!(out[24..].iter().all(|&v| (v - 9.0).abs() < 1e-9));
    }

    #[test]
    fn test_t3_rejects_bad_vfactor() {
        assert!(T3::new(5, 1.5).is_err());
        assert!(T3::new(5, Float::NAN).is_err());
    }
}
