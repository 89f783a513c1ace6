//! Numeric kernels
//!
//! Tight element-wise loops shared by the indicator families. Every kernel
//! writes into a caller-provided output slice of the input length, fills the
//! warm-up prefix with NaN and never allocates beyond small scratch buffers.
//! Kernels assume validated arguments (`period >= 1`, equal lengths) and never
//! fail.

mod adaptive;
mod directional;
mod rolling;
mod smoothing;
mod volume;

pub use adaptive::kama_into;
pub use directional::{directional_movement_into, dx_into, true_range_into};
pub use rolling::{
    rolling_max_index_into, rolling_max_into, rolling_min_index_into, rolling_min_into,
    rolling_std_into, rolling_sum_into, rolling_var_into,
};
pub use smoothing::{ema_into, per_to_k, wilder_into};
pub use volume::{ad_into, mfi_into, obv_into};

use aligned_vec::{AVec, CACHELINE_ALIGN};

use crate::types::Float;
use crate::validation::leading_nans;

/// Tolerance under which the reference library treats a denominator as zero.
pub const ZERO_EPSILON: Float = 1e-8;

/// True when `v` is within [`ZERO_EPSILON`] of zero.
#[inline(always)]
pub fn is_zero(v: Float) -> bool {
    -ZERO_EPSILON < v && v < ZERO_EPSILON
}

/// Cache-line aligned scratch buffer filled with `fill`.
#[inline]
pub(crate) fn scratch(len: usize, fill: Float) -> AVec<Float> {
    AVec::from_iter(CACHELINE_ALIGN, core::iter::repeat(fill).take(len))
}

/// Run `kernel` on the part of `x` after its leading NaN run.
///
/// Chained indicators feed NaN-prefixed intermediates back into recursive
/// kernels; the recursion starts on the first defined value instead of
/// seeding on NaN.
#[inline]
pub(crate) fn after_leading_nans(
    x: &[Float],
    out: &mut [Float],
    kernel: impl FnOnce(&[Float], &mut [Float]),
) {
    let start = leading_nans(x);
    out[..start].fill(Float::NAN);
    kernel(&x[start..], &mut out[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(5e-9));
        assert!(!is_zero(1e-7));
        assert!(!is_zero(Float::NAN));
    }

    #[test]
    fn test_scratch_is_aligned_and_filled() {
        let buf = scratch(10, Float::NAN);
        assert_eq!(buf.len(), 10);
        assert!(buf.iter().all(|v| v.is_nan()));
        assert_eq!(buf.as_ptr() as usize % CACHELINE_ALIGN, 0);
    }

    #[test]
    fn test_after_leading_nans_offsets_kernel() {
        let x = [Float::NAN, Float::NAN, 1.0, 2.0, 3.0];
        let mut out = [0.0; 5];
        after_leading_nans(&x, &mut out, |x, out| ema_into(x, 2, per_to_k(2), out));
        assert!(out[..3].iter().all(|v| v.is_nan()));
        assert_eq!(out[3], 1.5);
    }
}
