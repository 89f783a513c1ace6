//! Validation prelude shared by every public function
//!
//! Checks run before any computation. They reject shape problems and invalid
//! parameters only; short series are valid input and produce NaN output.

use crate::error::{Result, TalibError};
use crate::types::Float;

/// Reject a period below `min`.
#[inline]
pub fn check_period(name: &str, period: usize, min: usize) -> Result<()> {
    if period < min {
        return Err(TalibError::invalid_period(
            period,
            format!("{name} must be >= {min}"),
        ));
    }
    Ok(())
}

/// Require all companion series to share the length of the first one.
///
/// Returns the common length.
pub fn check_same_len(series: &[(&str, &[Float])]) -> Result<usize> {
    let Some(&(first_name, first)) = series.first() else {
        return Ok(0);
    };
    let n = first.len();
    for &(name, s) in &series[1..] {
        if s.len() != n {
            return Err(TalibError::invalid_input(format!(
                "{name} has length {}, expected {n} to match {first_name}",
                s.len()
            )));
        }
    }
    Ok(n)
}

/// Reject NaN or infinite scalar parameters.
#[inline]
pub fn check_finite(name: &str, value: Float) -> Result<()> {
    if !value.is_finite() {
        return Err(TalibError::invalid_parameter(
            name,
            value.to_string(),
            "a finite number",
        ));
    }
    Ok(())
}

/// Reject a scalar outside the closed range `[lo, hi]`.
#[inline]
pub fn check_range(name: &str, value: Float, lo: Float, hi: Float) -> Result<()> {
    if !(value >= lo && value <= hi) {
        return Err(TalibError::invalid_parameter(
            name,
            value.to_string(),
            format!("value in [{lo}, {hi}]"),
        ));
    }
    Ok(())
}

/// Number of leading NaN values.
///
/// Composed indicators start their own warm-up after the leading NaN run of
/// their input, the way the reference library chains lookbacks.
#[inline]
pub fn leading_nans(x: &[Float]) -> usize {
    x.iter().take_while(|v| v.is_nan()).count()
}
