//! Portable SIMD reductions built on `wide`.

use crate::types::Float;
use wide::f64x4;

const LANES: usize = 4;

#[inline(always)]
fn load(chunk: &[Float]) -> f64x4 {
    f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]])
}

/// Sum of all elements, four lanes at a time.
#[inline]
pub fn sum(data: &[Float]) -> Float {
    let chunks = data.chunks_exact(LANES);
    let remainder = chunks.remainder();

    let mut acc = f64x4::ZERO;
    for chunk in chunks {
        acc += load(chunk);
    }

    let mut total = acc.reduce_add();
    for &x in remainder {
        total += x;
    }
    total
}

/// Dot product over the common prefix of `a` and `b`, four lanes at a time.
#[inline]
pub fn dot_product(a: &[Float], b: &[Float]) -> Float {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);

    let mut acc = f64x4::ZERO;
    for (ca, cb) in a.chunks_exact(LANES).zip(b.chunks_exact(LANES)) {
        acc += load(ca) * load(cb);
    }

    let mut total = acc.reduce_add();
    let tail = n - n % LANES;
    for i in tail..n {
        total += a[i] * b[i];
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar;

    #[test]
    fn test_sum_matches_scalar_with_remainder() {
        let data: Vec<Float> = (0..17).map(|i| i as Float * 0.5).collect();
        assert!((sum(&data) - scalar::sum(&data)).abs() < 1e-10);
    }

    #[test]
    fn test_dot_product_matches_scalar() {
        let a: Vec<Float> = (0..1001).map(|i| (i as Float).sin()).collect();
        let b: Vec<Float> = (0..1001).map(|i| (i as Float).cos()).collect();
        assert!((dot_product(&a, &b) - scalar::dot_product(&a, &b)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(dot_product(&[], &[]), 0.0);
    }
}
