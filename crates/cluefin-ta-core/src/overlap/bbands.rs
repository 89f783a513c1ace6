//! Bollinger Bands.

use super::ma::{ma_into, ma_lookback, MaType};
use crate::error::Result;
use crate::kernels::rolling_std_into;
use crate::types::Float;
use crate::validation::{check_finite, check_period};

/// Parameters of [`bbands`]; defaults are `(5, 2.0, 2.0, SMA)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BbandsParams {
    /// Window of the middle band and of the deviation
    pub period: usize,
    /// Deviation multiplier of the upper band
    pub nbdev_up: Float,
    /// Deviation multiplier of the lower band
    pub nbdev_dn: Float,
    /// Middle-band average
    pub ma_type: MaType,
}

impl Default for BbandsParams {
    fn default() -> Self {
        Self {
            period: 5,
            nbdev_up: 2.0,
            nbdev_dn: 2.0,
            ma_type: MaType::Sma,
        }
    }
}

/// `(upper, middle, lower)` bands
pub type Bands = (Vec<Float>, Vec<Float>, Vec<Float>);

/// First valid index of [`bbands`].
pub fn bbands_lookback(params: &BbandsParams) -> usize {
    ma_lookback(params.period, params.ma_type).max(params.period.saturating_sub(1))
}

/// Bollinger Bands, TA-Lib `BBANDS(real, timeperiod=5, nbdevup=2, nbdevdn=2, matype=0)`.
///
/// The deviation is the population standard deviation over `period`.
pub fn bbands(real: &[Float], params: &BbandsParams) -> Result<Bands> {
    check_period("timeperiod", params.period, 1)?;
    check_finite("nbdevup", params.nbdev_up)?;
    check_finite("nbdevdn", params.nbdev_dn)?;

    let n = real.len();
    let mut middle = vec![Float::NAN; n];
    let mut upper = vec![Float::NAN; n];
    let mut lower = vec![Float::NAN; n];
    ma_into(real, params.period, params.ma_type, &mut middle);
    // upper doubles as the deviation buffer
    rolling_std_into(real, params.period, &mut upper);
    for i in 0..n {
        let sd = upper[i];
        upper[i] = middle[i] + params.nbdev_up * sd;
        lower[i] = middle[i] - params.nbdev_dn * sd;
    }
    Ok((upper, middle, lower))
}
