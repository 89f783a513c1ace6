//! Scalar fallback reductions.

use crate::types::Float;

/// Sum of all elements.
///
/// ```rust
/// use cluefin_ta_core::simd::scalar::sum;
///
/// assert_eq!(sum(&[1.0, 2.0, 3.0, 4.0, 5.0]), 15.0);
/// ```
#[inline]
pub fn sum(data: &[Float]) -> Float {
    data.iter().sum()
}

/// Dot product over the common prefix of `a` and `b`.
///
/// ```rust
/// use cluefin_ta_core::simd::scalar::dot_product;
///
/// assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
#[inline]
pub fn dot_product(a: &[Float], b: &[Float]) -> Float {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_empty() {
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_sum_propagates_nan() {
        assert!(sum(&[1.0, Float::NAN]).is_nan());
    }

    #[test]
    fn test_dot_product_with_negatives() {
        let result = dot_product(&[1.0, -2.0, 3.0], &[4.0, 5.0, -6.0]);
        assert!((result + 24.0).abs() < 1e-10);
    }
}
