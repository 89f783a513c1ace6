//! Math transforms and operators.
//!
//! Element-wise wrappers named after the reference library. Domain errors
//! (`ln(-1)`, `acos(2)`) produce NaN the way `f64` does.

use crate::error::Result;
use crate::kernels::{
    rolling_max_index_into, rolling_max_into, rolling_min_index_into, rolling_min_into,
    rolling_sum_into,
};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

macro_rules! transform {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(real: &[Float]) -> Vec<Float> {
                let f: fn(Float) -> Float = $f;
                real.iter().map(|&v| f(v)).collect()
            }
        )*
    };
}

transform! {
    /// Arc cosine, TA-Lib `ACOS`.
    acos => Float::acos;
    /// Arc sine, TA-Lib `ASIN`.
    asin => Float::asin;
    /// Arc tangent, TA-Lib `ATAN`.
    atan => Float::atan;
    /// Ceiling, TA-Lib `CEIL`.
    ceil => Float::ceil;
    /// Cosine, TA-Lib `COS`.
    cos => Float::cos;
    /// Hyperbolic cosine, TA-Lib `COSH`.
    cosh => Float::cosh;
    /// Exponential, TA-Lib `EXP`.
    exp => Float::exp;
    /// Floor, TA-Lib `FLOOR`.
    floor => Float::floor;
    /// Natural logarithm, TA-Lib `LN`.
    ln => Float::ln;
    /// Base-10 logarithm, TA-Lib `LOG10`.
    log10 => Float::log10;
    /// Sine, TA-Lib `SIN`.
    sin => Float::sin;
    /// Hyperbolic sine, TA-Lib `SINH`.
    sinh => Float::sinh;
    /// Square root, TA-Lib `SQRT`.
    sqrt => Float::sqrt;
    /// Tangent, TA-Lib `TAN`.
    tan => Float::tan;
    /// Hyperbolic tangent, TA-Lib `TANH`.
    tanh => Float::tanh;
}

fn binary(
    real0: &[Float],
    real1: &[Float],
    f: impl Fn(Float, Float) -> Float,
) -> Result<Vec<Float>> {
    check_same_len(&[("real0", real0), ("real1", real1)])?;
    Ok(real0.iter().zip(real1).map(|(&a, &b)| f(a, b)).collect())
}

/// Element-wise sum, TA-Lib `ADD`.
pub fn add(real0: &[Float], real1: &[Float]) -> Result<Vec<Float>> {
    binary(real0, real1, |a, b| a + b)
}

/// Element-wise difference, TA-Lib `SUB`.
pub fn sub(real0: &[Float], real1: &[Float]) -> Result<Vec<Float>> {
    binary(real0, real1, |a, b| a - b)
}

/// Element-wise product, TA-Lib `MULT`.
pub fn mult(real0: &[Float], real1: &[Float]) -> Result<Vec<Float>> {
    binary(real0, real1, |a, b| a * b)
}

/// Element-wise quotient, TA-Lib `DIV`.
pub fn div(real0: &[Float], real1: &[Float]) -> Result<Vec<Float>> {
    binary(real0, real1, |a, b| a / b)
}

fn windowed(
    real: &[Float],
    period: usize,
    kernel: fn(&[Float], usize, &mut [Float]),
) -> Result<Vec<Float>> {
    check_period("timeperiod", period, 1)?;
    let mut out = vec![Float::NAN; real.len()];
    kernel(real, period, &mut out);
    Ok(out)
}

/// First valid index of the windowed operators.
pub fn window_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Rolling maximum, TA-Lib `MAX(real, timeperiod=30)`.
pub fn max(real: &[Float], period: usize) -> Result<Vec<Float>> {
    windowed(real, period, rolling_max_into)
}

/// Rolling minimum, TA-Lib `MIN(real, timeperiod=30)`.
pub fn min(real: &[Float], period: usize) -> Result<Vec<Float>> {
    windowed(real, period, rolling_min_into)
}

/// Rolling sum, TA-Lib `SUM(real, timeperiod=30)`.
pub fn sum(real: &[Float], period: usize) -> Result<Vec<Float>> {
    windowed(real, period, rolling_sum_into)
}

/// Absolute index of the rolling maximum, TA-Lib `MAXINDEX(real, timeperiod=30)`.
pub fn maxindex(real: &[Float], period: usize) -> Result<Vec<Float>> {
    windowed(real, period, rolling_max_index_into)
}

/// Absolute index of the rolling minimum, TA-Lib `MININDEX(real, timeperiod=30)`.
pub fn minindex(real: &[Float], period: usize) -> Result<Vec<Float>> {
    windowed(real, period, rolling_min_index_into)
}

/// Rolling `(min, max)`, TA-Lib `MINMAX(real, timeperiod=30)`.
pub fn minmax(real: &[Float], period: usize) -> Result<(Vec<Float>, Vec<Float>)> {
    Ok((min(real, period)?, max(real, period)?))
}
