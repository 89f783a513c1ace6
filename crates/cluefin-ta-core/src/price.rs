//! Price transforms.

use crate::error::Result;
use crate::types::Float;
use crate::validation::check_same_len;

fn combine<const N: usize>(
    names: [&str; N],
    series: [&[Float]; N],
    f: impl Fn([Float; N]) -> Float,
) -> Result<Vec<Float>> {
    let pairs: Vec<(&str, &[Float])> = names.into_iter().zip(series).collect();
    let n = check_same_len(&pairs)?;
    Ok((0..n).map(|i| f(series.map(|s| s[i]))).collect())
}

/// `(open + high + low + close) / 4`, TA-Lib `AVGPRICE`.
pub fn avgprice(
    open: &[Float],
    high: &[Float],
    low: &[Float],
    close: &[Float],
) -> Result<Vec<Float>> {
    combine(
        ["open", "high", "low", "close"],
        [open, high, low, close],
        |[o, h, l, c]| (o + h + l + c) / 4.0,
    )
}

/// `(high + low) / 2`, TA-Lib `MEDPRICE`.
pub fn medprice(high: &[Float], low: &[Float]) -> Result<Vec<Float>> {
    combine(["high", "low"], [high, low], |[h, l]| (h + l) / 2.0)
}

/// `(high + low + close) / 3`, TA-Lib `TYPPRICE`.
pub fn typprice(high: &[Float], low: &[Float], close: &[Float]) -> Result<Vec<Float>> {
    combine(["high", "low", "close"], [high, low, close], |[h, l, c]| {
        (h + l + c) / 3.0
    })
}

/// `(high + low + 2 * close) / 4`, TA-Lib `WCLPRICE`.
pub fn wclprice(high: &[Float], low: &[Float], close: &[Float]) -> Result<Vec<Float>> {
    combine(["high", "low", "close"], [high, low, close], |[h, l, c]| {
        (h + l + 2.0 * c) / 4.0
    })
}
