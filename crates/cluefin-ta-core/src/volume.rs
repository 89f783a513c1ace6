//! Volume indicators: OBV, A/D line, Chaikin oscillator.

use crate::error::Result;
use crate::kernels::{ad_into, obv_into, per_to_k};
use crate::types::Float;
use crate::validation::{check_period, check_same_len};

/// On-balance volume, TA-Lib `OBV(close, volume)`.
///
/// `OBV[0] = volume[0]`; afterwards volume is added on up closes and
/// subtracted on down closes.
pub fn obv(close: &[Float], volume: &[Float]) -> Result<Vec<Float>> {
    let n = check_same_len(&[("close", close), ("volume", volume)])?;
    let mut out = vec![Float::NAN; n];
    obv_into(close, volume, &mut out);
    Ok(out)
}

fn check_hlcv(high: &[Float], low: &[Float], close: &[Float], volume: &[Float]) -> Result<usize> {
    check_same_len(&[
        ("high", high),
        ("low", low),
        ("close", close),
        ("volume", volume),
    ])
}

/// Chaikin A/D line, TA-Lib `AD(high, low, close, volume)`.
pub fn ad(high: &[Float], low: &[Float], close: &[Float], volume: &[Float]) -> Result<Vec<Float>> {
    let n = check_hlcv(high, low, close, volume)?;
    let mut out = vec![Float::NAN; n];
    ad_into(high, low, close, volume, &mut out);
    Ok(out)
}

/// First valid index of [`adosc`].
pub fn adosc_lookback(fast_period: usize, slow_period: usize) -> usize {
    fast_period.max(slow_period).saturating_sub(1)
}

/// Chaikin A/D oscillator `EMA(AD, fast) - EMA(AD, slow)`,
/// TA-Lib `ADOSC(high, low, close, volume, fastperiod=3, slowperiod=10)`.
///
/// Both averages start from the first A/D value and run over every bar; the
/// output begins once the slower one has seen `slow_period` bars.
pub fn adosc(
    high: &[Float],
    low: &[Float],
    close: &[Float],
    volume: &[Float],
    fast_period: usize,
    slow_period: usize,
) -> Result<Vec<Float>> {
    let n = check_hlcv(high, low, close, volume)?;
    check_period("fastperiod", fast_period, 1)?;
    check_period("slowperiod", slow_period, 1)?;

    let mut out = vec![Float::NAN; n];
    if n == 0 {
        return Ok(out);
    }
    let mut line = vec![Float::NAN; n];
    ad_into(high, low, close, volume, &mut line);

    let lookback = adosc_lookback(fast_period, slow_period);
    let fk = per_to_k(fast_period);
    let sk = per_to_k(slow_period);
    let mut fast = line[0];
    let mut slow = line[0];
    if lookback == 0 {
        out[0] = 0.0;
    }
    for i in 1..n {
        fast = (line[i] - fast) * fk + fast;
        slow = (line[i] - slow) * sk + slow;
        if i >= lookback {
            out[i] = fast - slow;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obv_public() {
        let out = obv(&[1.0, 2.0, 1.5], &[10.0, 20.0, 5.0]).unwrap();
        assert_eq!(out, vec![10.0, 30.0, 25.0]);
        assert!(obv(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_ad_public() {
        let out = ad(&[2.0], &[0.0], &[2.0], &[10.0]).unwrap();
        assert_eq!(out, vec![10.0]);
    }

    #[test]
    fn test_adosc_warmup_and_flat_line() {
        // close at the midpoint leaves A/D at zero
        let n = 20;
        let high = vec![11.0; n];
        let low = vec![9.0; n];
        let close = vec![10.0; n];
        let volume = vec![1000.0; n];
        let out = adosc(&high, &low, &close, &volume, 3, 10).unwrap();
        assert!(out[..9].iter().all(|v| v.is_nan()));
        assert!(out[9..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_adosc_positive_on_accumulation() {
        let n = 30;
        let high = vec![11.0; n];
        let low = vec![9.0; n];
        let close = vec![11.0; n];
        let volume = vec![100.0; n];
        let out = adosc(&high, &low, &close, &volume, 3, 10).unwrap();
        // rising A/D: the fast average leads the slow one
        assert!(out[15] > 0.0);
    }
}
