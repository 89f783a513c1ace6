//! Core traits for technical analysis indicators
//!
//! ## NaN Value Semantics
//!
//! - **Batch warm-up**: `Float::NAN` in output arrays is the normal placeholder
//!   for the first `lookback()` positions.
//! - **NaN input**: propagates to every output whose window touches it; it is
//!   never imputed and never rejected.
//!
//! `Float::NAN` is used instead of `Option<Float>` so outputs stay plain `f64`
//! buffers that SIMD reductions and foreign bindings consume directly.

use crate::error::{Result, TalibError};
use crate::types::Float;

/// Batch interface implemented by parameterised indicators
///
/// Implementors validate their parameters in the constructor, so `compute`
/// only checks buffer shape.
///
/// # Example
///
/// ```rust
/// use cluefin_ta_core::{overlap::Sma, Indicator};
///
/// let sma = Sma::new(3).unwrap();
/// assert_eq!(sma.lookback(), 2);
///
/// let out = sma.compute_to_vec(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert!(out[1].is_nan());
/// assert_eq!(out[2], 2.0);
/// ```
pub trait Indicator {
    /// Input element type
    type Input: Copy;

    /// Output element type
    type Output: Copy;

    /// Index of the first valid output for an input without leading NaN
    ///
    /// - SMA(20) returns 19 (needs 20 data points, first output on index 19)
    /// - RSI(14) returns 14 (needs 14 deltas)
    fn lookback(&self) -> usize;

    /// Value written to warm-up positions
    fn warmup_value(&self) -> Self::Output;

    /// Zero-copy batch computation
    ///
    /// `outputs` must have the same length as `inputs`. Warm-up positions are
    /// overwritten with [`Indicator::warmup_value`].
    fn compute(&self, inputs: &[Self::Input], outputs: &mut [Self::Output]) -> Result<()>;

    /// Convenient batch computation with automatic memory management
    ///
    /// The output has the same length as `inputs`; filter NaN to keep only
    /// defined values.
    fn compute_to_vec(&self, inputs: &[Self::Input]) -> Result<Vec<Self::Output>> {
        let mut outputs = vec![self.warmup_value(); inputs.len()];
        self.compute(inputs, &mut outputs)?;
        Ok(outputs)
    }
}

/// Reject an output buffer that does not match its input.
#[inline]
pub(crate) fn check_buffers(inputs: &[Float], outputs: &[Float]) -> Result<()> {
    if inputs.len() != outputs.len() {
        return Err(TalibError::invalid_input(format!(
            "output buffer has length {}, expected {}",
            outputs.len(),
            inputs.len()
        )));
    }
    Ok(())
}
