//! cluefin-ta-py: Python bindings for the cluefin technical analysis engine
//!
//! Functions keep the reference library's uppercase names and defaults so
//! `cluefin_ta.RSI(close)` reads like `talib.RSI(close)`. Inputs are
//! contiguous 1-D `float64` arrays; outputs are fresh numpy arrays.
//!
//! Validation failures raise `ValueError`. `REGIME_HMM` raises
//! `NotImplementedError` when the extension was built without the `hmm`
//! feature; `HMM_AVAILABLE` reports which build is loaded.
//!
//! Note: This crate requires a Python 3.x interpreter to build.

use cluefin_ta_core::dow::{dow_theory, index_bars, DowMethod, DowTheoryParams};
use cluefin_ta_core::overlap::{BbandsParams, MaType};
use cluefin_ta_core::pattern::{CupHandleParams, PivotMethod};
use cluefin_ta_core::regime::{CovarianceType, HmmParams, RegimeParams};
use cluefin_ta_core::{
    cycle, math, momentum, overlap, pattern, price, regime, statistic, volatility, volume, Ohlcv,
    TalibError,
};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::{PyNotImplementedError, PyValueError};
use pyo3::prelude::*;

type Real<'py> = PyReadonlyArray1<'py, f64>;
type Out<'py> = Bound<'py, PyArray1<f64>>;
type Signal<'py> = Bound<'py, PyArray1<i32>>;

fn py_err(err: TalibError) -> PyErr {
    match err {
        TalibError::NotImplemented { .. } => PyNotImplementedError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn ma_type(code: i32) -> PyResult<MaType> {
    MaType::from_code(code).map_err(py_err)
}

fn parse<T: std::str::FromStr<Err = TalibError>>(s: &str) -> PyResult<T> {
    s.parse().map_err(py_err)
}

fn optional<'a>(array: &'a Option<Real<'_>>) -> PyResult<Option<&'a [f64]>> {
    Ok(array.as_ref().map(|a| a.as_slice()).transpose()?)
}

// ============================================================================
// Families sharing an argument shape
// ============================================================================

macro_rules! real_period {
    ($($name:ident, $py:tt, $f:path, $default:tt;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py, signature = (real, timeperiod = $default))]
        fn $name<'py>(py: Python<'py>, real: Real<'py>, timeperiod: usize) -> PyResult<Out<'py>> {
            let out = $f(real.as_slice()?, timeperiod).map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! hlc_period {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py, signature = (high, low, close, timeperiod = 14))]
        fn $name<'py>(
            py: Python<'py>,
            high: Real<'py>,
            low: Real<'py>,
            close: Real<'py>,
            timeperiod: usize,
        ) -> PyResult<Out<'py>> {
            let out = $f(high.as_slice()?, low.as_slice()?, close.as_slice()?, timeperiod)
                .map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! hl_period {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py, signature = (high, low, timeperiod = 14))]
        fn $name<'py>(
            py: Python<'py>,
            high: Real<'py>,
            low: Real<'py>,
            timeperiod: usize,
        ) -> PyResult<Out<'py>> {
            let out = $f(high.as_slice()?, low.as_slice()?, timeperiod).map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! pair_period {
    ($($name:ident, $py:tt, $f:path, $default:tt;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py, signature = (real0, real1, timeperiod = $default))]
        fn $name<'py>(
            py: Python<'py>,
            real0: Real<'py>,
            real1: Real<'py>,
            timeperiod: usize,
        ) -> PyResult<Out<'py>> {
            let out = $f(real0.as_slice()?, real1.as_slice()?, timeperiod).map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! pair {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py)]
        fn $name<'py>(py: Python<'py>, real0: Real<'py>, real1: Real<'py>) -> PyResult<Out<'py>> {
            let out = $f(real0.as_slice()?, real1.as_slice()?).map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! real_only {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py)]
        fn $name<'py>(py: Python<'py>, real: Real<'py>) -> PyResult<Out<'py>> {
            let out = $f(real.as_slice()?).map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! transform {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py)]
        fn $name<'py>(py: Python<'py>, real: Real<'py>) -> PyResult<Out<'py>> {
            Ok($f(real.as_slice()?).into_pyarray_bound(py))
        }
    )*};
}

macro_rules! candle {
    ($($name:ident, $py:tt, $f:path;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py)]
        fn $name<'py>(
            py: Python<'py>,
            open: Real<'py>,
            high: Real<'py>,
            low: Real<'py>,
            close: Real<'py>,
        ) -> PyResult<Signal<'py>> {
            let out = $f(
                open.as_slice()?,
                high.as_slice()?,
                low.as_slice()?,
                close.as_slice()?,
            )
            .map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

macro_rules! candle_penetration {
    ($($name:ident, $py:tt, $f:path, $default:tt;)*) => {$(
        #[pyfunction]
        #[pyo3(name = $py, signature = (open, high, low, close, penetration = $default))]
        fn $name<'py>(
            py: Python<'py>,
            open: Real<'py>,
            high: Real<'py>,
            low: Real<'py>,
            close: Real<'py>,
            penetration: f64,
        ) -> PyResult<Signal<'py>> {
            let out = $f(
                open.as_slice()?,
                high.as_slice()?,
                low.as_slice()?,
                close.as_slice()?,
                penetration,
            )
            .map_err(py_err)?;
            Ok(out.into_pyarray_bound(py))
        }
    )*};
}

real_period! {
    sma, "SMA", overlap::sma, 30;
    ema, "EMA", overlap::ema, 30;
    wma, "WMA", overlap::wma, 30;
    dema, "DEMA", overlap::dema, 30;
    tema, "TEMA", overlap::tema, 30;
    trima, "TRIMA", overlap::trima, 30;
    kama, "KAMA", overlap::kama, 30;
    midpoint, "MIDPOINT", overlap::midpoint, 14;
    rsi, "RSI", momentum::rsi, 14;
    cmo, "CMO", momentum::cmo, 14;
    mom, "MOM", momentum::mom, 10;
    roc, "ROC", momentum::roc, 10;
    rocp, "ROCP", momentum::rocp, 10;
    rocr, "ROCR", momentum::rocr, 10;
    rocr100, "ROCR100", momentum::rocr100, 10;
    trix, "TRIX", momentum::trix, 30;
    var, "VAR", statistic::var, 5;
    linearreg, "LINEARREG", statistic::linearreg, 14;
    linearreg_slope, "LINEARREG_SLOPE", statistic::linearreg_slope, 14;
    linearreg_intercept, "LINEARREG_INTERCEPT", statistic::linearreg_intercept, 14;
    linearreg_angle, "LINEARREG_ANGLE", statistic::linearreg_angle, 14;
    tsf, "TSF", statistic::tsf, 14;
    max, "MAX", math::max, 30;
    min, "MIN", math::min, 30;
    sum, "SUM", math::sum, 30;
    maxindex, "MAXINDEX", math::maxindex, 30;
    minindex, "MININDEX", math::minindex, 30;
}

hlc_period! {
    adx, "ADX", momentum::adx;
    adxr, "ADXR", momentum::adxr;
    dx, "DX", momentum::dx;
    plus_di, "PLUS_DI", momentum::plus_di;
    minus_di, "MINUS_DI", momentum::minus_di;
    cci, "CCI", momentum::cci;
    willr, "WILLR", momentum::willr;
    atr, "ATR", volatility::atr;
    natr, "NATR", volatility::natr;
}

hl_period! {
    plus_dm, "PLUS_DM", momentum::plus_dm;
    minus_dm, "MINUS_DM", momentum::minus_dm;
    aroonosc, "AROONOSC", momentum::aroonosc;
    midprice, "MIDPRICE", overlap::midprice;
}

pair_period! {
    correl, "CORREL", statistic::correl, 30;
    beta, "BETA", statistic::beta, 5;
}

pair! {
    add, "ADD", math::add;
    sub, "SUB", math::sub;
    mult, "MULT", math::mult;
    div, "DIV", math::div;
    medprice, "MEDPRICE", price::medprice;
}

real_only! {
    ht_dcperiod, "HT_DCPERIOD", cycle::ht_dcperiod;
    ht_dcphase, "HT_DCPHASE", cycle::ht_dcphase;
    ht_trendline, "HT_TRENDLINE", cycle::ht_trendline;
    ht_trendmode, "HT_TRENDMODE", cycle::ht_trendmode;
}

transform! {
    acos, "ACOS", math::acos;
    asin, "ASIN", math::asin;
    atan, "ATAN", math::atan;
    ceil, "CEIL", math::ceil;
    cos, "COS", math::cos;
    cosh, "COSH", math::cosh;
    exp, "EXP", math::exp;
    floor, "FLOOR", math::floor;
    ln, "LN", math::ln;
    log10, "LOG10", math::log10;
    sin, "SIN", math::sin;
    sinh, "SINH", math::sinh;
    sqrt, "SQRT", math::sqrt;
    tan, "TAN", math::tan;
    tanh, "TANH", math::tanh;
}

candle! {
    cdldoji, "CDLDOJI", pattern::cdldoji;
    cdlhammer, "CDLHAMMER", pattern::cdlhammer;
    cdlhangingman, "CDLHANGINGMAN", pattern::cdlhangingman;
    cdlshootingstar, "CDLSHOOTINGSTAR", pattern::cdlshootingstar;
    cdlengulfing, "CDLENGULFING", pattern::cdlengulfing;
    cdlharami, "CDLHARAMI", pattern::cdlharami;
    cdlpiercing, "CDLPIERCING", pattern::cdlpiercing;
}

candle_penetration! {
    cdldarkcloudcover, "CDLDARKCLOUDCOVER", pattern::cdldarkcloudcover, 0.5;
    cdlmorningstar, "CDLMORNINGSTAR", pattern::cdlmorningstar, 0.3;
    cdleveningstar, "CDLEVENINGSTAR", pattern::cdleveningstar, 0.3;
}

// ============================================================================
// Indicators with their own argument lists
// ============================================================================

#[pyfunction]
#[pyo3(name = "MA", signature = (real, timeperiod = 30, matype = 0))]
fn ma<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
    matype: i32,
) -> PyResult<Out<'py>> {
    let out = overlap::ma(real.as_slice()?, timeperiod, ma_type(matype)?).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "T3", signature = (real, timeperiod = 5, vfactor = 0.7))]
fn t3<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
    vfactor: f64,
) -> PyResult<Out<'py>> {
    let out = overlap::t3(real.as_slice()?, timeperiod, vfactor).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(
    name = "BBANDS",
    signature = (real, timeperiod = 5, nbdevup = 2.0, nbdevdn = 2.0, matype = 0)
)]
fn bbands<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
    nbdevup: f64,
    nbdevdn: f64,
    matype: i32,
) -> PyResult<(Out<'py>, Out<'py>, Out<'py>)> {
    let params = BbandsParams {
        period: timeperiod,
        nbdev_up: nbdevup,
        nbdev_dn: nbdevdn,
        ma_type: ma_type(matype)?,
    };
    let (upper, middle, lower) = overlap::bbands(real.as_slice()?, &params).map_err(py_err)?;
    Ok((
        upper.into_pyarray_bound(py),
        middle.into_pyarray_bound(py),
        lower.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[pyo3(name = "SAR", signature = (high, low, acceleration = 0.02, maximum = 0.2))]
fn sar<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    acceleration: f64,
    maximum: f64,
) -> PyResult<Out<'py>> {
    let out = overlap::sar(high.as_slice()?, low.as_slice()?, acceleration, maximum)
        .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "MACD", signature = (real, fastperiod = 12, slowperiod = 26, signalperiod = 9))]
fn macd<'py>(
    py: Python<'py>,
    real: Real<'py>,
    fastperiod: usize,
    slowperiod: usize,
    signalperiod: usize,
) -> PyResult<(Out<'py>, Out<'py>, Out<'py>)> {
    let (line, signal, hist) =
        momentum::macd(real.as_slice()?, fastperiod, slowperiod, signalperiod).map_err(py_err)?;
    Ok((
        line.into_pyarray_bound(py),
        signal.into_pyarray_bound(py),
        hist.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[pyo3(name = "MACDFIX", signature = (real, signalperiod = 9))]
fn macdfix<'py>(
    py: Python<'py>,
    real: Real<'py>,
    signalperiod: usize,
) -> PyResult<(Out<'py>, Out<'py>, Out<'py>)> {
    let (line, signal, hist) = momentum::macdfix(real.as_slice()?, signalperiod).map_err(py_err)?;
    Ok((
        line.into_pyarray_bound(py),
        signal.into_pyarray_bound(py),
        hist.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[pyo3(name = "APO", signature = (real, fastperiod = 12, slowperiod = 26, matype = 0))]
fn apo<'py>(
    py: Python<'py>,
    real: Real<'py>,
    fastperiod: usize,
    slowperiod: usize,
    matype: i32,
) -> PyResult<Out<'py>> {
    let out = momentum::apo(real.as_slice()?, fastperiod, slowperiod, ma_type(matype)?)
        .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "PPO", signature = (real, fastperiod = 12, slowperiod = 26, matype = 0))]
fn ppo<'py>(
    py: Python<'py>,
    real: Real<'py>,
    fastperiod: usize,
    slowperiod: usize,
    matype: i32,
) -> PyResult<Out<'py>> {
    let out = momentum::ppo(real.as_slice()?, fastperiod, slowperiod, ma_type(matype)?)
        .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    name = "STOCH",
    signature = (
        high, low, close, fastk_period = 5, slowk_period = 3, slowk_matype = 0,
        slowd_period = 3, slowd_matype = 0
    )
)]
fn stoch<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    fastk_period: usize,
    slowk_period: usize,
    slowk_matype: i32,
    slowd_period: usize,
    slowd_matype: i32,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let params = momentum::StochParams {
        fastk_period,
        slowk_period,
        slowk_ma: ma_type(slowk_matype)?,
        slowd_period,
        slowd_ma: ma_type(slowd_matype)?,
    };
    let (k, d) = momentum::stoch(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        &params,
    )
    .map_err(py_err)?;
    Ok((k.into_pyarray_bound(py), d.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(
    name = "STOCHF",
    signature = (high, low, close, fastk_period = 5, fastd_period = 3, fastd_matype = 0)
)]
fn stochf<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    fastk_period: usize,
    fastd_period: usize,
    fastd_matype: i32,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let (k, d) = momentum::stochf(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        fastk_period,
        fastd_period,
        ma_type(fastd_matype)?,
    )
    .map_err(py_err)?;
    Ok((k.into_pyarray_bound(py), d.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(
    name = "STOCHRSI",
    signature = (real, timeperiod = 14, fastk_period = 5, fastd_period = 3, fastd_matype = 0)
)]
fn stochrsi<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_matype: i32,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let (k, d) = momentum::stochrsi(
        real.as_slice()?,
        timeperiod,
        fastk_period,
        fastd_period,
        ma_type(fastd_matype)?,
    )
    .map_err(py_err)?;
    Ok((k.into_pyarray_bound(py), d.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(name = "AROON", signature = (high, low, timeperiod = 14))]
fn aroon<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    timeperiod: usize,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let (down, up) =
        momentum::aroon(high.as_slice()?, low.as_slice()?, timeperiod).map_err(py_err)?;
    Ok((down.into_pyarray_bound(py), up.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(name = "BOP")]
fn bop<'py>(
    py: Python<'py>,
    open: Real<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
) -> PyResult<Out<'py>> {
    let out = momentum::bop(
        open.as_slice()?,
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(
    name = "ULTOSC",
    signature = (high, low, close, timeperiod1 = 7, timeperiod2 = 14, timeperiod3 = 28)
)]
fn ultosc<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    timeperiod1: usize,
    timeperiod2: usize,
    timeperiod3: usize,
) -> PyResult<Out<'py>> {
    let out = momentum::ultosc(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        timeperiod1,
        timeperiod2,
        timeperiod3,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "MFI", signature = (high, low, close, volume, timeperiod = 14))]
fn mfi<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    volume: Real<'py>,
    timeperiod: usize,
) -> PyResult<Out<'py>> {
    let out = momentum::mfi(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        volume.as_slice()?,
        timeperiod,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "TRANGE")]
fn trange<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
) -> PyResult<Out<'py>> {
    let out =
        volatility::trange(high.as_slice()?, low.as_slice()?, close.as_slice()?).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "OBV")]
fn obv<'py>(py: Python<'py>, close: Real<'py>, volume: Real<'py>) -> PyResult<Out<'py>> {
    let out = volume::obv(close.as_slice()?, volume.as_slice()?).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "AD")]
fn ad<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    volume: Real<'py>,
) -> PyResult<Out<'py>> {
    let out = volume::ad(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        volume.as_slice()?,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "ADOSC", signature = (high, low, close, volume, fastperiod = 3, slowperiod = 10))]
fn adosc<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    volume: Real<'py>,
    fastperiod: usize,
    slowperiod: usize,
) -> PyResult<Out<'py>> {
    let out = volume::adosc(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        volume.as_slice()?,
        fastperiod,
        slowperiod,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "AVGPRICE")]
fn avgprice<'py>(
    py: Python<'py>,
    open: Real<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
) -> PyResult<Out<'py>> {
    let out = price::avgprice(
        open.as_slice()?,
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "TYPPRICE")]
fn typprice<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
) -> PyResult<Out<'py>> {
    let out =
        price::typprice(high.as_slice()?, low.as_slice()?, close.as_slice()?).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "WCLPRICE")]
fn wclprice<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
) -> PyResult<Out<'py>> {
    let out =
        price::wclprice(high.as_slice()?, low.as_slice()?, close.as_slice()?).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "STDDEV", signature = (real, timeperiod = 5, nbdev = 1.0))]
fn stddev<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
    nbdev: f64,
) -> PyResult<Out<'py>> {
    let out = statistic::stddev(real.as_slice()?, timeperiod, nbdev).map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "MINMAX", signature = (real, timeperiod = 30))]
fn minmax<'py>(
    py: Python<'py>,
    real: Real<'py>,
    timeperiod: usize,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let (lo, hi) = math::minmax(real.as_slice()?, timeperiod).map_err(py_err)?;
    Ok((lo.into_pyarray_bound(py), hi.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(name = "HT_PHASOR")]
fn ht_phasor<'py>(py: Python<'py>, real: Real<'py>) -> PyResult<(Out<'py>, Out<'py>)> {
    let (inphase, quadrature) = cycle::ht_phasor(real.as_slice()?).map_err(py_err)?;
    Ok((inphase.into_pyarray_bound(py), quadrature.into_pyarray_bound(py)))
}

#[pyfunction]
#[pyo3(name = "HT_SINE")]
fn ht_sine<'py>(py: Python<'py>, real: Real<'py>) -> PyResult<(Out<'py>, Out<'py>)> {
    let (sine, leadsine) = cycle::ht_sine(real.as_slice()?).map_err(py_err)?;
    Ok((sine.into_pyarray_bound(py), leadsine.into_pyarray_bound(py)))
}

// ============================================================================
// Regime, Dow theory and Cup-&-Handle
// ============================================================================

#[pyfunction]
#[pyo3(
    name = "REGIME_MA",
    signature = (close, fast_period = 20, slow_period = 50, sideways_threshold = 0.02)
)]
fn regime_ma<'py>(
    py: Python<'py>,
    close: Real<'py>,
    fast_period: usize,
    slow_period: usize,
    sideways_threshold: f64,
) -> PyResult<Out<'py>> {
    let out = regime::regime_ma(close.as_slice()?, fast_period, slow_period, sideways_threshold)
        .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(name = "REGIME_MA_DURATION")]
fn regime_ma_duration<'py>(py: Python<'py>, states: Real<'py>) -> PyResult<Out<'py>> {
    Ok(regime::regime_ma_duration(states.as_slice()?).into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(
    name = "REGIME_VOLATILITY",
    signature = (high, low, close, atr_period = 14, threshold_percentile = 66.0)
)]
fn regime_volatility<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    atr_period: usize,
    threshold_percentile: f64,
) -> PyResult<Out<'py>> {
    let out = regime::regime_volatility(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        atr_period,
        threshold_percentile,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    name = "REGIME_COMBINED",
    signature = (
        high, low, close, fast_period = 20, slow_period = 50, sideways_threshold = 0.02,
        atr_period = 14, threshold_percentile = 66.0
    )
)]
fn regime_combined<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    fast_period: usize,
    slow_period: usize,
    sideways_threshold: f64,
    atr_period: usize,
    threshold_percentile: f64,
) -> PyResult<(Out<'py>, Out<'py>, Out<'py>)> {
    let params = RegimeParams {
        fast_period,
        slow_period,
        sideways_threshold,
        atr_period,
        threshold_percentile,
    };
    let out = regime::regime_combined(
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        &params,
    )
    .map_err(py_err)?;
    Ok((
        out.trend.into_pyarray_bound(py),
        out.volatility.into_pyarray_bound(py),
        out.combined.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[pyo3(name = "REGIME_HMM_RETURNS")]
fn regime_hmm_returns<'py>(py: Python<'py>, close: Real<'py>) -> PyResult<Out<'py>> {
    Ok(regime::regime_hmm_returns(close.as_slice()?).into_pyarray_bound(py))
}

#[pyfunction]
#[pyo3(
    name = "REGIME_HMM",
    signature = (returns, n_states = 3, covariance_type = "full", n_iter = 100, random_state = 42)
)]
fn regime_hmm<'py>(
    py: Python<'py>,
    returns: Real<'py>,
    n_states: usize,
    covariance_type: &str,
    n_iter: usize,
    random_state: u64,
) -> PyResult<(Out<'py>, Bound<'py, PyArray2<f64>>, Out<'py>)> {
    let params = HmmParams {
        n_states,
        covariance_type: parse::<CovarianceType>(covariance_type)?,
        n_iter,
        random_state,
    };
    let out = regime::regime_hmm(returns.as_slice()?, &params).map_err(py_err)?;
    Ok((
        out.states.into_pyarray_bound(py),
        out.transition_matrix.into_pyarray_bound(py),
        out.means.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    name = "DOW_THEORY",
    signature = (
        high, low, close, volume = None, index_high = None, index_low = None, index_close = None,
        swing_window = 5, minor_period = 20, secondary_period = 60, primary_period = 200,
        volume_ma_period = 20, method = "swing"
    )
)]
fn dow<'py>(
    py: Python<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    volume: Option<Real<'py>>,
    index_high: Option<Real<'py>>,
    index_low: Option<Real<'py>>,
    index_close: Option<Real<'py>>,
    swing_window: usize,
    minor_period: usize,
    secondary_period: usize,
    primary_period: usize,
    volume_ma_period: usize,
    method: &str,
) -> PyResult<(Out<'py>, Out<'py>)> {
    let params = DowTheoryParams {
        swing_window,
        minor_period,
        secondary_period,
        primary_period,
        volume_ma_period,
        method: parse::<DowMethod>(method)?,
        ..Default::default()
    };
    let mut bars = Ohlcv::from_hlc(high.as_slice()?, low.as_slice()?, close.as_slice()?);
    if let Some(v) = optional(&volume)? {
        bars = bars.with_volume(v);
    }
    let index = index_bars(
        optional(&index_high)?,
        optional(&index_low)?,
        optional(&index_close)?,
    )
    .map_err(py_err)?;
    let out = dow_theory(bars, index, &params).map_err(py_err)?;
    Ok((
        out.trend.into_pyarray_bound(py),
        out.correlation.into_pyarray_bound(py),
    ))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    name = "CUP_HANDLE",
    signature = (
        open, high, low, close, volume = None, pivot_method = "fractal", pivot_left = 3,
        pivot_right = 3, pivot_pct = 0.05, cup_lookback = 150, cup_min_len = 30,
        rim_tolerance = 0.05, cup_depth_min = 0.12, cup_depth_max = 0.35, cup_slope_max = 0.08,
        handle_len = 15, handle_depth_max = 0.12, confirm_bars = 1, use_volume = true,
        vol_ma_period = 20, vol_cup_start_mult = 1.0, vol_handle_max_mult = 1.0,
        vol_breakout_mult = 1.2
    )
)]
fn cup_handle<'py>(
    py: Python<'py>,
    open: Real<'py>,
    high: Real<'py>,
    low: Real<'py>,
    close: Real<'py>,
    volume: Option<Real<'py>>,
    pivot_method: &str,
    pivot_left: usize,
    pivot_right: usize,
    pivot_pct: f64,
    cup_lookback: usize,
    cup_min_len: usize,
    rim_tolerance: f64,
    cup_depth_min: f64,
    cup_depth_max: f64,
    cup_slope_max: f64,
    handle_len: usize,
    handle_depth_max: f64,
    confirm_bars: usize,
    use_volume: bool,
    vol_ma_period: usize,
    vol_cup_start_mult: f64,
    vol_handle_max_mult: f64,
    vol_breakout_mult: f64,
) -> PyResult<Signal<'py>> {
    let params = CupHandleParams {
        pivot_method: parse::<PivotMethod>(pivot_method)?,
        pivot_left,
        pivot_right,
        pivot_pct,
        cup_lookback,
        cup_min_len,
        rim_tolerance,
        cup_depth_min,
        cup_depth_max,
        cup_slope_max,
        handle_len,
        handle_depth_max,
        confirm_bars,
        use_volume,
        vol_ma_period,
        vol_cup_start_mult,
        vol_handle_max_mult,
        vol_breakout_mult,
    };
    let out = pattern::cup_handle(
        open.as_slice()?,
        high.as_slice()?,
        low.as_slice()?,
        close.as_slice()?,
        optional(&volume)?,
        &params,
    )
    .map_err(py_err)?;
    Ok(out.into_pyarray_bound(py))
}

/// Python module `cluefin_ta`
#[pymodule]
fn cluefin_ta(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("HMM_AVAILABLE", regime::hmm_available())?;

    macro_rules! register {
        ($($f:ident),* $(,)?) => {
            $(m.add_function(wrap_pyfunction!($f, m)?)?;)*
        };
    }

    register! {
        // overlap
        sma, ema, wma, dema, tema, trima, kama, t3, ma, bbands, sar, midpoint, midprice,
        ht_trendline,
        // momentum
        rsi, cmo, mom, roc, rocp, rocr, rocr100, trix, macd, macdfix, apo, ppo, stoch, stochf,
        stochrsi, adx, adxr, dx, plus_di, minus_di, plus_dm, minus_dm, cci, willr, aroon, aroonosc,
        bop, ultosc, mfi,
        // volatility, volume, price
        trange, atr, natr, obv, ad, adosc, avgprice, medprice, typprice, wclprice,
        // statistic, cycle, math
        stddev, var, linearreg, linearreg_slope, linearreg_intercept, linearreg_angle, tsf, correl,
        beta, ht_dcperiod, ht_dcphase, ht_phasor, ht_sine, ht_trendmode,
        acos, asin, atan, ceil, cos, cosh, exp, floor, ln, log10, sin, sinh, sqrt, tan, tanh, add,
        sub, mult, div, max, min, sum, maxindex, minindex, minmax,
        // patterns
        cdldoji, cdlhammer, cdlhangingman, cdlshootingstar, cdlengulfing, cdlharami, cdlpiercing,
        cdldarkcloudcover, cdlmorningstar, cdleveningstar, cup_handle,
        // regime and Dow theory
        regime_ma, regime_ma_duration, regime_volatility, regime_combined, regime_hmm_returns,
        regime_hmm, dow,
    }
    Ok(())
}
