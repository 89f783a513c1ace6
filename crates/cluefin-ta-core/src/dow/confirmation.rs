//! Volume confirmation and index agreement.

use crate::overlap::sma_into;
use crate::types::Float;

/// Upgrades `±1` to `±2` on bars whose volume is above its SMA.
///
/// Bars where the volume average is undefined keep their base label.
pub(crate) fn confirm_with_volume(trend: &mut [Float], volume: &[Float], period: usize) {
    let mut average = vec![Float::NAN; volume.len()];
    sma_into(volume, period, &mut average);
    for ((t, &v), &avg) in trend.iter_mut().zip(volume).zip(&average) {
        if v > avg && (*t == 1.0 || *t == -1.0) {
            *t *= 2.0;
        }
    }
}

/// `+1` when both base trends share a non-zero sign, `-1` when they
/// oppose, `0` when either is sideways and NaN when either is undefined.
pub(crate) fn index_agreement(stock: &[Float], index: &[Float]) -> Vec<Float> {
    stock
        .iter()
        .zip(index)
        .map(|(&s, &x)| {
            if s.is_nan() || x.is_nan() {
                Float::NAN
            } else if s == 0.0 || x == 0.0 {
                0.0
            } else if s.signum() == x.signum() {
                1.0
            } else {
                -1.0
            }
        })
        .collect()
}
