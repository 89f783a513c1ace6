//! Hilbert transform cycle indicators.
//!
//! All six functions share one pipeline: a 4-bar weighted price smoother, a
//! detrender and in-phase/quadrature components built from a 3-tap Hilbert
//! filter run separately on odd and even bars, and a homodyne discriminator
//! that measures the dominant cycle period.
//!
//! The pipeline starts from the first bar and carries state across the whole
//! series, so the first outputs depend on a long warm-up: 32 bars for the
//! period and phasor, 63 bars for everything built on the cycle phase.

use core::f64::consts::TAU;

use crate::error::Result;
use crate::kernels::after_leading_nans;
use crate::types::Float;

const A: Float = 0.0962;
const B: Float = 0.5769;
const SMOOTH_PRICE_SIZE: usize = 50;

/// Smoother warm-up bars after the 3-bar seed.
const SHORT_WARMUP: usize = 9;
const LONG_WARMUP: usize = 34;

const SHORT_LOOKBACK: usize = 32;
const LONG_LOOKBACK: usize = 63;

/// 4-3-2-1 weighted average of price, updated incrementally.
struct PriceSmoother {
    sub: Float,
    sum: Float,
    trailing: Float,
    trailing_idx: usize,
}

impl PriceSmoother {
    fn seed(x: &[Float]) -> Self {
        Self {
            sub: x[0] + x[1] + x[2],
            sum: x[0] + 2.0 * x[1] + 3.0 * x[2],
            trailing: 0.0,
            trailing_idx: 0,
        }
    }

    #[inline]
    fn push(&mut self, x: &[Float], price: Float) -> Float {
        self.sub += price;
        self.sub -= self.trailing;
        self.sum += price * 4.0;
        self.trailing = x[self.trailing_idx];
        self.trailing_idx += 1;
        let smoothed = self.sum * 0.1;
        self.sum -= self.sub;
        smoothed
    }
}

/// One Hilbert filter with separate odd/even delay lines.
#[derive(Default)]
struct HilbertFilter {
    odd: [Float; 3],
    even: [Float; 3],
    prev_odd: Float,
    prev_even: Float,
    prev_input_odd: Float,
    prev_input_even: Float,
}

impl HilbertFilter {
    #[inline]
    fn step(&mut self, input: Float, idx: usize, even: bool, adjusted: Float) -> Float {
        let (line, prev, prev_input) = if even {
            (&mut self.even, &mut self.prev_even, &mut self.prev_input_even)
        } else {
            (&mut self.odd, &mut self.prev_odd, &mut self.prev_input_odd)
        };
        let scaled = A * input;
        let mut v = scaled - line[idx];
        line[idx] = scaled;
        v -= *prev;
        *prev = B * *prev_input;
        v += *prev;
        *prev_input = input;
        v * adjusted
    }
}

/// State exposed to each consumer per bar.
struct CycleBar {
    index: usize,
    smoothed: Float,
    in_phase: Float,
    quadrature: Float,
    smooth_period: Float,
}

/// Run the shared pipeline and call `visit` for every bar after the warm-up.
fn hilbert_pass(x: &[Float], warmup: usize, mut visit: impl FnMut(&CycleBar)) {
    let n = x.len();
    if n < 3 + warmup {
        return;
    }

    let mut smoother = PriceSmoother::seed(x);
    let mut today = 3;
    for _ in 0..warmup {
        smoother.push(x, x[today]);
        today += 1;
    }

    let mut detrender = HilbertFilter::default();
    let mut q1_filter = HilbertFilter::default();
    let mut ji_filter = HilbertFilter::default();
    let mut jq_filter = HilbertFilter::default();
    let mut hilbert_idx = 0;

    let mut period: Float = 0.0;
    let mut smooth_period: Float = 0.0;
    let (mut prev_i2, mut prev_q2, mut re, mut im): (Float, Float, Float, Float) =
        (0.0, 0.0, 0.0, 0.0);
    let (mut i1_odd_prev2, mut i1_odd_prev3): (Float, Float) = (0.0, 0.0);
    let (mut i1_even_prev2, mut i1_even_prev3): (Float, Float) = (0.0, 0.0);

    while today < n {
        let adjusted = 0.075 * period + 0.54;
        let smoothed = smoother.push(x, x[today]);

        let even = today % 2 == 0;
        let i1 = if even { i1_even_prev3 } else { i1_odd_prev3 };
        let det = detrender.step(smoothed, hilbert_idx, even, adjusted);
        let q1 = q1_filter.step(det, hilbert_idx, even, adjusted);
        let ji = ji_filter.step(i1, hilbert_idx, even, adjusted);
        let jq = jq_filter.step(q1, hilbert_idx, even, adjusted);
        let q2 = 0.2 * (q1 + ji) + 0.8 * prev_q2;
        let i2 = 0.2 * (i1 - jq) + 0.8 * prev_i2;
        if even {
            hilbert_idx = (hilbert_idx + 1) % 3;
            i1_odd_prev3 = i1_odd_prev2;
            i1_odd_prev2 = det;
        } else {
            i1_even_prev3 = i1_even_prev2;
            i1_even_prev2 = det;
        }

        re = 0.2 * (i2 * prev_i2 + q2 * prev_q2) + 0.8 * re;
        im = 0.2 * (i2 * prev_q2 - q2 * prev_i2) + 0.8 * im;
        prev_q2 = q2;
        prev_i2 = i2;

        let prev_period = period;
        if im != 0.0 && re != 0.0 {
            period = 360.0 / (im / re).atan().to_degrees();
        }
        // comparisons keep a NaN period NaN
        if period > 1.5 * prev_period {
            period = 1.5 * prev_period;
        }
        if period < 0.67 * prev_period {
            period = 0.67 * prev_period;
        }
        if period < 6.0 {
            period = 6.0;
        } else if period > 50.0 {
            period = 50.0;
        }
        period = 0.2 * period + 0.8 * prev_period;
        smooth_period = 0.33 * period + 0.67 * smooth_period;

        visit(&CycleBar {
            index: today,
            smoothed,
            in_phase: i1,
            quadrature: q1,
            smooth_period,
        });
        today += 1;
    }
}

/// Dominant cycle phase from a DFT over the smoothed-price history.
struct PhaseTracker {
    history: [Float; SMOOTH_PRICE_SIZE],
    idx: usize,
    phase: Float,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            history: [0.0; SMOOTH_PRICE_SIZE],
            idx: 0,
            phase: 0.0,
        }
    }

    fn update(&mut self, smoothed: Float, smooth_period: Float) -> Float {
        self.history[self.idx] = smoothed;
        let dc_period = (smooth_period + 0.5) as usize;
        let (mut real, mut imag): (Float, Float) = (0.0, 0.0);
        let mut j = self.idx;
        for i in 0..dc_period.min(SMOOTH_PRICE_SIZE) {
            let angle = i as Float * TAU / dc_period as Float;
            real += angle.sin() * self.history[j];
            imag += angle.cos() * self.history[j];
            j = if j == 0 { SMOOTH_PRICE_SIZE - 1 } else { j - 1 };
        }

        let magnitude = imag.abs();
        if magnitude > 0.0 {
            self.phase = (real / imag).atan().to_degrees();
        } else if magnitude <= 0.01 {
            if real < 0.0 {
                self.phase -= 90.0;
            } else if real > 0.0 {
                self.phase += 90.0;
            }
        }
        self.phase += 90.0;
        // one-bar lag of the price smoother
        self.phase += 360.0 / smooth_period;
        if imag < 0.0 {
            self.phase += 180.0;
        }
        if self.phase > 315.0 {
            self.phase -= 360.0;
        }

        self.idx = (self.idx + 1) % SMOOTH_PRICE_SIZE;
        self.phase
    }
}

/// Instantaneous trendline: a 4-3-2-1 smoothing of the raw price averaged
/// over the current dominant cycle.
#[derive(Default)]
struct TrendTracker {
    prev: [Float; 3],
}

impl TrendTracker {
    fn update(&mut self, x: &[Float], today: usize, smooth_period: Float) -> Float {
        if smooth_period.is_nan() {
            return Float::NAN;
        }
        let dc_period = ((smooth_period + 0.5) as usize).min(today + 1);
        let mut avg: Float = x[today + 1 - dc_period..=today].iter().sum();
        if dc_period > 0 {
            avg /= dc_period as Float;
        }
        let [t1, t2, t3] = self.prev;
        let value = (4.0 * avg + 3.0 * t1 + 2.0 * t2 + t3) / 10.0;
        self.prev = [avg, t1, t2];
        value
    }
}

fn single(real: &[Float], compute: impl FnOnce(&[Float], &mut [Float])) -> Vec<Float> {
    let mut out = vec![Float::NAN; real.len()];
    after_leading_nans(real, &mut out, compute);
    out
}

/// First valid index of [`ht_dcperiod`] and [`ht_phasor`].
pub fn ht_dcperiod_lookback() -> usize {
    SHORT_LOOKBACK
}

/// First valid index of [`ht_dcphase`], [`ht_sine`], [`ht_trendmode`] and [`ht_trendline`].
pub fn ht_trendline_lookback() -> usize {
    LONG_LOOKBACK
}

/// Dominant cycle period in bars, TA-Lib `HT_DCPERIOD(real)`.
pub fn ht_dcperiod(real: &[Float]) -> Result<Vec<Float>> {
    Ok(single(real, |x, out| {
        hilbert_pass(x, SHORT_WARMUP, |bar| {
            if bar.index >= SHORT_LOOKBACK {
                out[bar.index] = bar.smooth_period;
            }
        })
    }))
}

/// Dominant cycle phase in degrees, TA-Lib `HT_DCPHASE(real)`.
pub fn ht_dcphase(real: &[Float]) -> Result<Vec<Float>> {
    Ok(single(real, |x, out| {
        let mut phase = PhaseTracker::new();
        hilbert_pass(x, LONG_WARMUP, |bar| {
            let p = phase.update(bar.smoothed, bar.smooth_period);
            if bar.index >= LONG_LOOKBACK {
                out[bar.index] = p;
            }
        })
    }))
}

/// `(inphase, quadrature)` components, TA-Lib `HT_PHASOR(real)`.
pub fn ht_phasor(real: &[Float]) -> Result<(Vec<Float>, Vec<Float>)> {
    let mut quadrature = vec![Float::NAN; real.len()];
    let in_phase = single(real, |x, out| {
        let start = real.len() - x.len();
        hilbert_pass(x, SHORT_WARMUP, |bar| {
            if bar.index >= SHORT_LOOKBACK {
                out[bar.index] = bar.in_phase;
                quadrature[start + bar.index] = bar.quadrature;
            }
        })
    });
    Ok((in_phase, quadrature))
}

/// `(sine, leadsine)` of the cycle phase, TA-Lib `HT_SINE(real)`.
///
/// The lead line is advanced by 45 degrees.
pub fn ht_sine(real: &[Float]) -> Result<(Vec<Float>, Vec<Float>)> {
    let mut lead = vec![Float::NAN; real.len()];
    let sine = single(real, |x, out| {
        let start = real.len() - x.len();
        let mut phase = PhaseTracker::new();
        hilbert_pass(x, LONG_WARMUP, |bar| {
            let p = phase.update(bar.smoothed, bar.smooth_period);
            if bar.index >= LONG_LOOKBACK {
                out[bar.index] = p.to_radians().sin();
                lead[start + bar.index] = (p + 45.0).to_radians().sin();
            }
        })
    });
    Ok((sine, lead))
}

/// Instantaneous trendline, TA-Lib `HT_TRENDLINE(real)`.
pub fn ht_trendline(real: &[Float]) -> Result<Vec<Float>> {
    Ok(single(real, |x, out| {
        let mut trend = TrendTracker::default();
        hilbert_pass(x, LONG_WARMUP, |bar| {
            let v = trend.update(x, bar.index, bar.smooth_period);
            if bar.index >= LONG_LOOKBACK {
                out[bar.index] = v;
            }
        })
    }))
}

/// Trend (1) versus cycle (0) mode, TA-Lib `HT_TRENDMODE(real)`.
///
/// Values are `0.0`/`1.0` with NaN during warm-up.
pub fn ht_trendmode(real: &[Float]) -> Result<Vec<Float>> {
    Ok(single(real, |x, out| {
        let mut phase = PhaseTracker::new();
        let mut trend = TrendTracker::default();
        let (mut sine, mut lead): (Float, Float) = (0.0, 0.0);
        let mut prev_phase: Float = 0.0;
        let mut days_in_trend: Float = 0.0;

        hilbert_pass(x, LONG_WARMUP, |bar| {
            let sp = bar.smooth_period;
            let p = phase.update(bar.smoothed, sp);
            let (prev_sine, prev_lead) = (sine, lead);
            sine = p.to_radians().sin();
            lead = (p + 45.0).to_radians().sin();
            let trendline = trend.update(x, bar.index, sp);

            let mut mode = 1.0;
            let crossed =
                (sine > lead && prev_sine <= prev_lead) || (sine < lead && prev_sine >= prev_lead);
            if crossed {
                days_in_trend = 0.0;
                mode = 0.0;
            }
            days_in_trend += 1.0;
            if days_in_trend < 0.5 * sp {
                mode = 0.0;
            }
            let delta = p - prev_phase;
            if sp != 0.0 && delta > 0.67 * 360.0 / sp && delta < 1.5 * 360.0 / sp {
                mode = 0.0;
            }
            if trendline != 0.0 && ((bar.smoothed - trendline) / trendline).abs() >= 0.015 {
                mode = 1.0;
            }
            prev_phase = p;

            if bar.index >= LONG_LOOKBACK {
                out[bar.index] = if sp.is_nan() { Float::NAN } else { mode };
            }
        })
    }))
}
