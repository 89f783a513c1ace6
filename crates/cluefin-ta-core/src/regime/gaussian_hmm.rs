//! Univariate Gaussian HMM: scaled Baum-Welch fit and Viterbi decoding.

use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hmm::{CovarianceType, HmmParams};
use super::volatility::percentile;
use crate::error::{Result, TalibError};
use crate::types::Float;

/// Variance floor of every state
const MIN_VARIANCE: Float = 1e-8;

/// Log-likelihood change that ends the fit
const TOLERANCE: Float = 1e-2;

/// Probability floor in the forward pass and log space
const TINY: Float = 1e-300;

const LN_2PI: Float = 1.837_877_066_409_345_5;

pub(crate) struct GaussianHmm {
    start: Array1<Float>,
    pub transition: Array2<Float>,
    pub means: Array1<Float>,
    variances: Array1<Float>,
}

fn normalize(mut row: ArrayViewMut1<'_, Float>) {
    let total = row.sum();
    if total > 0.0 {
        row /= total;
    }
}

impl GaussianHmm {
    /// Quantile-spread means with seeded jitter, pooled variance and a
    /// diagonal-heavy transition matrix.
    fn init(x: &[Float], params: &HmmParams) -> Self {
        let k = params.n_states;
        let mut rng = StdRng::seed_from_u64(params.random_state);

        let xs = ArrayView1::from(x);
        let mean = xs.mean().unwrap_or(0.0);
        let variance = xs.mapv(|v| (v - mean) * (v - mean)).mean().unwrap_or(0.0);
        let variance = variance.max(MIN_VARIANCE);
        let sd = variance.sqrt();

        let mut sorted = x.to_vec();
        let means = Array1::from_shape_fn(k, |j| {
            let q = (j as Float + 0.5) / k as Float * 100.0;
            percentile(&mut sorted, q) + (rng.gen::<Float>() - 0.5) * 0.1 * sd
        });

        let mut transition = Array2::from_shape_fn((k, k), |(i, j)| {
            if i == j {
                0.8 + 0.15 * rng.gen::<Float>()
            } else {
                0.1 * rng.gen::<Float>()
            }
        });
        for row in transition.rows_mut() {
            normalize(row);
        }

        Self {
            start: Array1::from_elem(k, 1.0 / k as Float),
            transition,
            means,
            variances: Array1::from_elem(k, variance),
        }
    }

    fn log_pdf(&self, j: usize, x: Float) -> Float {
        let var = self.variances[j];
        let d = x - self.means[j];
        -0.5 * (LN_2PI + var.ln() + d * d / var)
    }

    /// Baum-Welch fit starting from the seeded initialisation.
    pub fn fit(x: &[Float], params: &HmmParams) -> Result<Self> {
        if x.len() < 2 {
            return Err(TalibError::insufficient_data(2, x.len()));
        }
        let mut model = Self::init(x, params);
        let mut prev = Float::NEG_INFINITY;
        for iteration in 1..=params.n_iter {
            let log_likelihood = model.em_step(x, params.covariance_type)?;
            if (log_likelihood - prev).abs() < TOLERANCE {
                tracing::debug!(iterations = iteration, log_likelihood, "HMM fit converged");
                break;
            }
            prev = log_likelihood;
        }
        Ok(model)
    }

    /// One expectation-maximisation pass; returns the log-likelihood of the
    /// parameters before the update.
    fn em_step(&mut self, x: &[Float], covariance: CovarianceType) -> Result<Float> {
        let k = self.means.len();
        let t_len = x.len();

        let emission =
            Array2::from_shape_fn((t_len, k), |(t, j)| self.log_pdf(j, x[t]).exp().max(TINY));

        // forward pass with per-step scaling
        let mut alpha = Array2::<Float>::zeros((t_len, k));
        let mut scale = Array1::<Float>::zeros(t_len);
        for t in 0..t_len {
            for j in 0..k {
                let prior = if t == 0 {
                    self.start[j]
                } else {
                    alpha.row(t - 1).dot(&self.transition.column(j))
                };
                alpha[[t, j]] = prior * emission[[t, j]];
            }
            let c = alpha.row(t).sum();
            if !(c > 0.0) || !c.is_finite() {
                return Err(TalibError::computation_error(format!(
                    "forward pass degenerated at sample {t}"
                )));
            }
            alpha.row_mut(t).mapv_inplace(|a| a / c);
            scale[t] = c;
        }
        let log_likelihood = scale.mapv(Float::ln).sum();
        if !log_likelihood.is_finite() {
            return Err(TalibError::computation_error("log-likelihood is not finite"));
        }

        let mut beta = Array2::<Float>::ones((t_len, k));
        for t in (0..t_len - 1).rev() {
            let ahead = &emission.row(t + 1) * &beta.row(t + 1) / scale[t + 1];
            for i in 0..k {
                beta[[t, i]] = self.transition.row(i).dot(&ahead);
            }
        }

        let mut gamma = &alpha * &beta;
        for row in gamma.rows_mut() {
            normalize(row);
        }

        let mut xi = Array2::<Float>::zeros((k, k));
        for t in 0..t_len - 1 {
            let ahead = &emission.row(t + 1) * &beta.row(t + 1) / scale[t + 1];
            for i in 0..k {
                for j in 0..k {
                    xi[[i, j]] += alpha[[t, i]] * self.transition[[i, j]] * ahead[j];
                }
            }
        }

        // maximisation
        self.start.assign(&gamma.row(0));
        normalize(self.start.view_mut());
        for (mut row, counts) in self.transition.rows_mut().into_iter().zip(xi.rows()) {
            if counts.sum() > 0.0 {
                row.assign(&counts);
                normalize(row);
            }
        }

        let xs = ArrayView1::from(x);
        let mut pooled: Float = 0.0;
        for (j, weights) in gamma.columns().into_iter().enumerate() {
            let weight = weights.sum();
            if weight <= TINY {
                continue;
            }
            let mean = weights.dot(&xs) / weight;
            let spread: Float = weights
                .iter()
                .zip(xs.iter())
                .map(|(g, v)| g * (v - mean) * (v - mean))
                .sum();
            self.means[j] = mean;
            self.variances[j] = (spread / weight).max(MIN_VARIANCE);
            pooled += spread;
        }
        if covariance == CovarianceType::Tied {
            let tied = (pooled / t_len as Float).max(MIN_VARIANCE);
            self.variances.fill(tied);
        }

        Ok(log_likelihood)
    }

    /// Most likely state path.
    pub fn viterbi(&self, x: &[Float]) -> Vec<usize> {
        let k = self.means.len();
        let t_len = x.len();
        if t_len == 0 {
            return Vec::new();
        }
        let log_trans = self.transition.mapv(|p| p.max(TINY).ln());

        let mut delta = Array2::<Float>::zeros((t_len, k));
        let mut back = Array2::<usize>::zeros((t_len, k));
        for j in 0..k {
            delta[[0, j]] = self.start[j].max(TINY).ln() + self.log_pdf(j, x[0]);
        }
        for t in 1..t_len {
            for j in 0..k {
                let mut best = 0;
                let mut best_val = Float::NEG_INFINITY;
                for i in 0..k {
                    let val = delta[[t - 1, i]] + log_trans[[i, j]];
                    if val > best_val {
                        best_val = val;
                        best = i;
                    }
                }
                back[[t, j]] = best;
                delta[[t, j]] = best_val + self.log_pdf(j, x[t]);
            }
        }

        let last = delta.row(t_len - 1);
        let mut state = 0;
        for j in 1..k {
            if last[j] > last[state] {
                state = j;
            }
        }
        let mut path = vec![0; t_len];
        path[t_len - 1] = state;
        for t in (1..t_len).rev() {
            state = back[[t, state]];
            path[t - 1] = state;
        }
        path
    }
}
