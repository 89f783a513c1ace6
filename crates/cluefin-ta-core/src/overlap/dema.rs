//! Double and triple exponential moving averages (DEMA, TEMA).

use super::ema::ema_series;
use crate::error::Result;
use crate::kernels::scratch;
use crate::traits::{check_buffers, Indicator};
use crate::types::Float;
use crate::validation::check_period;

/// `2 * EMA - EMA(EMA)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dema {
    period: usize,
}

impl Dema {
    /// Create a new DEMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }
}

impl Indicator for Dema {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        dema_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        dema_into(inputs, self.period, outputs);
        Ok(())
    }
}

/// `3 * EMA - 3 * EMA(EMA) + EMA(EMA(EMA))`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tema {
    period: usize,
}

impl Tema {
    /// Create a new TEMA indicator with the given period.
    pub fn new(period: usize) -> Result<Self> {
        check_period("timeperiod", period, 1)?;
        Ok(Self { period })
    }
}

impl Indicator for Tema {
    type Input = Float;
    type Output = Float;

    fn lookback(&self) -> usize {
        tema_lookback(self.period)
    }

    fn warmup_value(&self) -> Float {
        Float::NAN
    }

    fn compute(&self, inputs: &[Float], outputs: &mut [Float]) -> Result<()> {
        check_buffers(inputs, outputs)?;
        tema_into(inputs, self.period, outputs);
        Ok(())
    }
}

pub(crate) fn dema_into(x: &[Float], period: usize, out: &mut [Float]) {
    let n = x.len();
    let mut e1 = scratch(n, Float::NAN);
    let mut e2 = scratch(n, Float::NAN);
    ema_series(x, period, &mut e1);
    ema_series(&e1, period, &mut e2);
    for i in 0..n {
        out[i] = 2.0 * e1[i] - e2[i];
    }
}

pub(crate) fn tema_into(x: &[Float], period: usize, out: &mut [Float]) {
    let n = x.len();
    let mut e1 = scratch(n, Float::NAN);
    let mut e2 = scratch(n, Float::NAN);
    let mut e3 = scratch(n, Float::NAN);
    ema_series(x, period, &mut e1);
    ema_series(&e1, period, &mut e2);
    ema_series(&e2, period, &mut e3);
    for i in 0..n {
        out[i] = 3.0 * e1[i] - 3.0 * e2[i] + e3[i];
    }
}

/// First valid index of [`dema`].
pub fn dema_lookback(period: usize) -> usize {
    2 * period.saturating_sub(1)
}

/// First valid index of [`tema`].
pub fn tema_lookback(period: usize) -> usize {
    3 * period.saturating_sub(1)
}

/// Double exponential moving average, TA-Lib `DEMA(real, timeperiod=30)`.
pub fn dema(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Dema::new(period)?.compute_to_vec(real)
}

/// Triple exponential moving average, TA-Lib `TEMA(real, timeperiod=30)`.
pub fn tema(real: &[Float], period: usize) -> Result<Vec<Float>> {
    Tema::new(period)?.compute_to_vec(real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dema_tema_warmup() {
        let x: Vec<Float> = (0..30).map(|i| (i as Float).sin() + 10.0).collect();
        let d = dema(&x, 5).unwrap();
        let t = tema(&x, 5).unwrap();
        assert!(d[7].is_nan() && d[8].is_finite());
        assert!(t[11].is_nan() && t[12].is_finite());
    }

    #[test]
    fn test_dema_tracks_linear_trend_exactly() {
        // EMA lags a line by a constant, DEMA removes that lag
        let x: Vec<Float> = (0..60).map(|i| 2.0 * i as Float).collect();
        let d = dema(&x, 4).unwrap();
        assert!((d[59] - 118.0).abs() < 1e-6);
    }

    #[test]
    fn test_tema_constant() {
        let t = tema(&[4.0; 20], 3).unwrap();
        assert!(t[6..].iter().all(|&v| (v - 4.0).abs() < 1e-12));
    }
}
