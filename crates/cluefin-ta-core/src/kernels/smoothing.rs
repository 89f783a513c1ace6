//! Exponential and Wilder smoothing recurrences.

use crate::simd;
use crate::types::Float;

/// Smoothing factor `2 / (period + 1)`.
#[inline(always)]
pub fn per_to_k(period: usize) -> Float {
    2.0 / (period as Float + 1.0)
}

/// SMA-seeded exponential moving average.
///
/// The seed is the mean of the first `period` inputs placed at `period - 1`;
/// afterwards `y[i] = y[i-1] + k * (x[i] - y[i-1])`.
pub fn ema_into(x: &[Float], period: usize, k: Float, out: &mut [Float]) {
    let n = x.len();
    out.fill(Float::NAN);
    if period == 0 || n < period {
        return;
    }

    let mut prev = simd::sum(&x[..period]) / period as Float;
    out[period - 1] = prev;
    for i in period..n {
        prev = (x[i] - prev) * k + prev;
        out[i] = prev;
    }
}

/// Wilder smoothing `y[i] = (y[i-1] * (p-1) + x[i]) / p` from a seed at `seed_index`.
pub fn wilder_into(x: &[Float], period: usize, seed_index: usize, seed: Float, out: &mut [Float]) {
    let n = x.len();
    out.fill(Float::NAN);
    if seed_index >= n {
        return;
    }

    let p = period as Float;
    let mut prev = seed;
    out[seed_index] = prev;
    for i in seed_index + 1..n {
        prev = (prev * (p - 1.0) + x[i]) / p;
        out[i] = prev;
    }
}
