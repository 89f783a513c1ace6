//! Moving Average Convergence/Divergence: MACD, MACDEXT, MACDFIX.

use crate::error::Result;
use crate::kernels::{per_to_k, scratch};
use crate::overlap::{ema_k_into, ema_lookback, ma_into, ma_lookback, MaType};
use crate::types::Float;
use crate::validation::check_period;

/// `(macd, signal, hist)`
pub type MacdOutput = (Vec<Float>, Vec<Float>, Vec<Float>);

/// Parameters of [`macdext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdExtParams {
    /// Fast average period
    pub fast_period: usize,
    /// Fast average type
    pub fast_ma: MaType,
    /// Slow average period
    pub slow_period: usize,
    /// Slow average type
    pub slow_ma: MaType,
    /// Signal average period
    pub signal_period: usize,
    /// Signal average type
    pub signal_ma: MaType,
}

impl Default for MacdExtParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            fast_ma: MaType::Sma,
            slow_period: 26,
            slow_ma: MaType::Sma,
            signal_period: 9,
            signal_ma: MaType::Sma,
        }
    }
}

/// Fast/slow line, signal average over it, masked to a common start.
fn assemble(
    fast: &[Float],
    slow: &[Float],
    signal_of: impl FnOnce(&[Float], &mut [Float]),
    lookback: usize,
) -> MacdOutput {
    let n = fast.len();
    let mut line: Vec<Float> = fast.iter().zip(slow).map(|(f, s)| f - s).collect();
    let mut signal = vec![Float::NAN; n];
    signal_of(&line, &mut signal);
    let start = lookback.min(n);
    line[..start].fill(Float::NAN);
    signal[..start].fill(Float::NAN);
    let hist = line.iter().zip(&signal).map(|(m, s)| m - s).collect();
    (line, signal, hist)
}

/// Order a period pair so the first is the shorter one.
fn ordered(fast: usize, slow: usize) -> (usize, usize) {
    if slow < fast {
        (slow, fast)
    } else {
        (fast, slow)
    }
}

/// First valid index of [`macd`].
pub fn macd_lookback(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    let (_, slow) = ordered(fast_period, slow_period);
    ema_lookback(slow) + ema_lookback(signal_period)
}

/// MACD with standard SMA-seeded EMAs,
/// TA-Lib `MACD(real, fastperiod=12, slowperiod=26, signalperiod=9)`.
///
/// Each average is seeded on its own window so `macd == EMA(fast) - EMA(slow)`
/// wherever `macd` is defined. All three outputs start at
/// `slow + signal - 2`. Swapped fast/slow periods are reordered.
pub fn macd(
    real: &[Float],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput> {
    check_period("fastperiod", fast_period, 1)?;
    check_period("slowperiod", slow_period, 1)?;
    check_period("signalperiod", signal_period, 1)?;
    let (fast_period, slow_period) = ordered(fast_period, slow_period);

    let n = real.len();
    let mut fast = scratch(n, Float::NAN);
    let mut slow = scratch(n, Float::NAN);
    ema_k_into(real, fast_period, per_to_k(fast_period), &mut fast);
    ema_k_into(real, slow_period, per_to_k(slow_period), &mut slow);
    let lookback = macd_lookback(fast_period, slow_period, signal_period);
    Ok(assemble(
        &fast,
        &slow,
        |line, out| ema_k_into(line, signal_period, per_to_k(signal_period), out),
        lookback,
    ))
}

/// First valid index of [`macdext`].
pub fn macdext_lookback(params: &MacdExtParams) -> usize {
    let fast = ma_lookback(params.fast_period, params.fast_ma);
    let slow = ma_lookback(params.slow_period, params.slow_ma);
    fast.max(slow) + ma_lookback(params.signal_period, params.signal_ma)
}

/// MACD with selectable averages, TA-Lib `MACDEXT`.
pub fn macdext(real: &[Float], params: &MacdExtParams) -> Result<MacdOutput> {
    check_period("fastperiod", params.fast_period, 1)?;
    check_period("slowperiod", params.slow_period, 1)?;
    check_period("signalperiod", params.signal_period, 1)?;
    let mut p = *params;
    if p.slow_period < p.fast_period {
        core::mem::swap(&mut p.fast_period, &mut p.slow_period);
        core::mem::swap(&mut p.fast_ma, &mut p.slow_ma);
    }

    let n = real.len();
    let mut fast = scratch(n, Float::NAN);
    let mut slow = scratch(n, Float::NAN);
    ma_into(real, p.fast_period, p.fast_ma, &mut fast);
    ma_into(real, p.slow_period, p.slow_ma, &mut slow);
    Ok(assemble(
        &fast,
        &slow,
        |line, out| ma_into(line, p.signal_period, p.signal_ma, out),
        macdext_lookback(&p),
    ))
}

/// Fixed 12/26 MACD with smoothing factors 0.15 and 0.075,
/// TA-Lib `MACDFIX(real, signalperiod=9)`.
pub fn macdfix(real: &[Float], signal_period: usize) -> Result<MacdOutput> {
    check_period("signalperiod", signal_period, 1)?;
    let n = real.len();
    let mut fast = scratch(n, Float::NAN);
    let mut slow = scratch(n, Float::NAN);
    ema_k_into(real, 12, 0.15, &mut fast);
    ema_k_into(real, 26, 0.075, &mut slow);
    Ok(assemble(
        &fast,
        &slow,
        |line, out| ema_k_into(line, signal_period, per_to_k(signal_period), out),
        macd_lookback(12, 26, signal_period),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::ema;

    fn series(n: usize) -> Vec<Float> {
        (0..n)
            .map(|i| 100.0 + 5.0 * (i as Float * 0.15).sin() + i as Float * 0.1)
            .collect()
    }

    #[test]
    fn test_macd_warmup() {
        let x = series(60);
        let (m, s, h) = macd(&x, 12, 26, 9).unwrap();
        assert!(m[32].is_nan() && s[32].is_nan() && h[32].is_nan());
        assert!(m[33].is_finite() && s[33].is_finite() && h[33].is_finite());
    }

    #[test]
    fn test_macd_is_ema_difference() {
        let x = series(100);
        let (m, s, h) = macd(&x, 12, 26, 9).unwrap();
        let fast = ema(&x, 12).unwrap();
        let slow = ema(&x, 26).unwrap();
        for i in 33..100 {
            assert!((m[i] - (fast[i] - slow[i])).abs() < 1e-9);
            assert!((h[i] - (m[i] - s[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_swaps_periods() {
        let x = series(80);
        let a = macd(&x, 12, 26, 9).unwrap();
        let b = macd(&x, 26, 12, 9).unwrap();
        assert_eq!(a.0[50].to_bits(), b.0[50].to_bits());
    }

    #[test]
    fn test_macdext_default_lookback() {
        let x = series(80);
        let p = MacdExtParams::default();
        let (m, _, _) = macdext(&x, &p).unwrap();
        assert_eq!(macdext_lookback(&p), 33);
        assert!(m[32].is_nan() && m[33].is_finite());
    }

    #[test]
    fn test_macdfix_warmup() {
        let x = series(60);
        let (m, s, _) = macdfix(&x, 9).unwrap();
        assert!(m[32].is_nan());
        assert!(m[33].is_finite() && s[33].is_finite());
    }
}
