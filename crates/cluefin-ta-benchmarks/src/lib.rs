//! Shared input generators for the benchmarks
//!
//! Every series comes from a seeded random walk so runs are comparable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Input sizes shared by the benchmark groups
pub const SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

/// Synthetic OHLCV bars
pub struct Bars {
    /// Opening prices
    pub open: Vec<f64>,
    /// High prices
    pub high: Vec<f64>,
    /// Low prices
    pub low: Vec<f64>,
    /// Closing prices
    pub close: Vec<f64>,
    /// Traded volume
    pub volume: Vec<f64>,
}

/// Random walk of closing prices starting at 100.
pub fn random_walk(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    (0..n)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-0.02..0.02);
            price
        })
        .collect()
}

/// Bars built around a random walk; `low <= open, close <= high`.
pub fn bars(n: usize, seed: u64) -> Bars {
    let close = random_walk(n, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let open: Vec<f64> = std::iter::once(100.0)
        .chain(close.iter().copied())
        .take(n)
        .collect();
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);
    let mut volume = Vec::with_capacity(n);
    for (o, c) in open.iter().zip(&close) {
        let spread = o.max(*c) * rng.gen_range(0.0..0.01);
        high.push(o.max(*c) + spread);
        low.push(o.min(*c) - spread);
        volume.push(rng.gen_range(1_000.0..5_000.0));
    }
    Bars {
        open,
        high,
        low,
        close,
        volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_are_consistent() {
        let b = bars(500, 7);
        assert_eq!(b.close.len(), 500);
        assert_eq!(b.open.len(), 500);
        for i in 0..500 {
            assert!(b.low[i] <= b.open[i].min(b.close[i]));
            assert!(b.high[i] >= b.open[i].max(b.close[i]));
        }
        assert_eq!(random_walk(50, 3), random_walk(50, 3));
    }
}
