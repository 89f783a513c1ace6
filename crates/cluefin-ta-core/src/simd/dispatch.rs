//! Runtime SIMD dispatch system.
//!
//! The dispatch table is initialized once using `OnceLock`; subsequent calls go
//! straight through the stored function pointers.

use std::sync::OnceLock;

use super::types::SimdLevel;
use super::{scalar, vector};
use crate::types::Float;

/// Function pointer type for sum operations.
pub type SumFn = fn(&[Float]) -> Float;

/// Function pointer type for dot product operations.
pub type DotProductFn = fn(&[Float], &[Float]) -> Float;

/// Dispatch table containing function pointers for all reductions.
#[derive(Debug, Clone, Copy)]
pub struct DispatchTable {
    /// Level the table was built for
    pub level: SimdLevel,
    /// Function pointer for sum operations
    pub sum: SumFn,
    /// Function pointer for dot product operations
    pub dot_product: DotProductFn,
}

impl DispatchTable {
    /// Scalar dispatch table (no SIMD acceleration).
    #[inline]
    const fn scalar() -> Self {
        Self {
            level: SimdLevel::Scalar,
            sum: scalar::sum,
            dot_product: scalar::dot_product,
        }
    }

    /// Vectorized dispatch table for `level`.
    #[inline]
    const fn vector(level: SimdLevel) -> Self {
        Self {
            level,
            sum: vector::sum,
            dot_product: vector::dot_product,
        }
    }
}

static DISPATCH: OnceLock<DispatchTable> = OnceLock::new();

#[cold]
fn init_dispatch() -> DispatchTable {
    let level = if cfg!(feature = "simd") {
        SimdLevel::detect()
    } else {
        SimdLevel::Scalar
    };
    tracing::debug!(%level, "selected reduction kernels");

    match level {
        SimdLevel::Scalar => DispatchTable::scalar(),
        level => DispatchTable::vector(level),
    }
}

/// Get the global dispatch table, initializing it if necessary.
#[inline]
pub fn get_dispatch() -> &'static DispatchTable {
    DISPATCH.get_or_init(init_dispatch)
}

/// SIMD level selected for this process.
#[inline]
pub fn active_level() -> SimdLevel {
    get_dispatch().level
}

/// Sum of all elements in a slice.
///
/// ```rust
/// use cluefin_ta_core::simd::dispatch;
///
/// assert_eq!(dispatch::sum(&[1.0, 2.0, 3.0]), 6.0);
/// ```
#[inline]
pub fn sum(data: &[Float]) -> Float {
    (get_dispatch().sum)(data)
}

/// Dot product of two equal-length slices.
///
/// ```rust
/// use cluefin_ta_core::simd::dispatch;
///
/// // (1*4) + (2*5) + (3*6) = 32
/// assert_eq!(dispatch::dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
#[inline]
pub fn dot_product(a: &[Float], b: &[Float]) -> Float {
    (get_dispatch().dot_product)(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_initialization() {
        let dispatch1 = get_dispatch();
        let dispatch2 = get_dispatch();
        assert!(
            core::ptr::eq(dispatch1, dispatch2),
            "Dispatch table should be initialized only once"
        );
    }

    #[test]
    fn test_active_level_matches_table() {
        assert_eq!(active_level(), get_dispatch().level);
        #[cfg(not(feature = "simd"))]
        assert_eq!(active_level(), SimdLevel::Scalar);
    }

    #[test]
    fn test_sum_dispatch() {
        let data: Vec<Float> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((sum(&data) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_sum_single() {
        assert_eq!(sum(&[42.0]), 42.0);
    }

    #[test]
    fn test_dot_product_dispatch() {
        let a: Vec<Float> = vec![1.0, 2.0, 3.0];
        let b: Vec<Float> = vec![4.0, 5.0, 6.0];
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-10);
    }

    #[test]
    fn test_scalar_and_vector_tables_agree() {
        let data: Vec<Float> = (0..1000).map(|i| (i as Float * 0.37).sin()).collect();
        let s = DispatchTable::scalar();
        let v = DispatchTable::vector(SimdLevel::Avx2);
        assert!(((s.sum)(&data) - (v.sum)(&data)).abs() < 1e-9);
        assert!(((s.dot_product)(&data, &data) - (v.dot_product)(&data, &data)).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let data: Vec<Float> = (0..1000).map(|i| (i as Float).sin()).collect();
        let r1 = sum(&data);
        let r2 = sum(&data);
        assert_eq!(r1.to_bits(), r2.to_bits());
    }
}
