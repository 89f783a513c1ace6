//! Rolling window kernels.
//!
//! Sums track the number of NaN values inside the window so a NaN only poisons
//! the windows that contain it.

use crate::simd;
use crate::types::Float;

/// Sliding sums of `x` and `x^2` with a NaN counter.
struct Window {
    sum: Float,
    sum_sq: Float,
    nans: usize,
}

impl Window {
    fn seed(x: &[Float]) -> Self {
        let fast = simd::sum(x);
        if fast.is_finite() {
            return Self {
                sum: fast,
                sum_sq: simd::dot_product(x, x),
                nans: 0,
            };
        }
        let mut w = Self {
            sum: 0.0,
            sum_sq: 0.0,
            nans: 0,
        };
        for &v in x {
            w.push(v);
        }
        w
    }

    #[inline(always)]
    fn push(&mut self, v: Float) {
        if v.is_nan() {
            self.nans += 1;
        } else {
            self.sum += v;
            self.sum_sq += v * v;
        }
    }

    #[inline(always)]
    fn pop(&mut self, v: Float) {
        if v.is_nan() {
            self.nans -= 1;
        } else {
            self.sum -= v;
            self.sum_sq -= v * v;
        }
    }

    #[inline(always)]
    fn variance(&self, p: Float) -> Float {
        let mean = self.sum / p;
        let var = self.sum_sq / p - mean * mean;
        if var > 0.0 {
            var
        } else {
            0.0
        }
    }
}

fn slide(x: &[Float], period: usize, out: &mut [Float], emit: impl Fn(&Window) -> Float) {
    let n = x.len();
    out.fill(Float::NAN);
    if period == 0 || n < period {
        return;
    }

    let mut w = Window::seed(&x[..period]);
    out[period - 1] = if w.nans == 0 { emit(&w) } else { Float::NAN };
    for i in period..n {
        w.pop(x[i - period]);
        w.push(x[i]);
        out[i] = if w.nans == 0 { emit(&w) } else { Float::NAN };
    }
}

/// Rolling sum over the inclusive window `[i - period + 1, i]`.
pub fn rolling_sum_into(x: &[Float], period: usize, out: &mut [Float]) {
    slide(x, period, out, |w| w.sum);
}

/// Rolling population variance (ddof = 0).
pub fn rolling_var_into(x: &[Float], period: usize, out: &mut [Float]) {
    let p = period as Float;
    slide(x, period, out, |w| w.variance(p));
}

/// Rolling population standard deviation (ddof = 0).
pub fn rolling_std_into(x: &[Float], period: usize, out: &mut [Float]) {
    let p = period as Float;
    slide(x, period, out, |w| w.variance(p).sqrt());
}

/// Index of the window extreme; ties resolve to the most recent bar.
fn rolling_extreme_index(
    x: &[Float],
    period: usize,
    out: &mut [Float],
    better: fn(Float, Float) -> bool,
) {
    let n = x.len();
    out.fill(Float::NAN);
    if period == 0 || n < period {
        return;
    }

    for i in period - 1..n {
        let start = i + 1 - period;
        let mut best = start;
        let mut poisoned = false;
        for j in start..=i {
            if x[j].is_nan() {
                poisoned = true;
                break;
            }
            if !better(x[best], x[j]) {
                best = j;
            }
        }
        out[i] = if poisoned { Float::NAN } else { best as Float };
    }
}

/// Rolling index of the maximum; the index is absolute and stored as a float.
pub fn rolling_max_index_into(x: &[Float], period: usize, out: &mut [Float]) {
    rolling_extreme_index(x, period, out, |best, v| best > v);
}

/// Rolling index of the minimum; the index is absolute and stored as a float.
pub fn rolling_min_index_into(x: &[Float], period: usize, out: &mut [Float]) {
    rolling_extreme_index(x, period, out, |best, v| best < v);
}

/// Rolling maximum of `x`.
pub fn rolling_max_into(x: &[Float], period: usize, out: &mut [Float]) {
    rolling_max_index_into(x, period, out);
    for v in out.iter_mut() {
        if !v.is_nan() {
            *v = x[*v as usize];
        }
    }
}

/// Rolling minimum of `x`.
pub fn rolling_min_into(x: &[Float], period: usize, out: &mut [Float]) {
    rolling_min_index_into(x, period, out);
    for v in out.iter_mut() {
        if !v.is_nan() {
            *v = x[*v as usize];
        }
    }
}
