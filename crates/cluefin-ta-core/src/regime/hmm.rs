//! Hidden Markov model regime detection
//!
//! A Gaussian HMM is fitted to a return series with Baum-Welch and decoded
//! with Viterbi. States are relabelled by ascending mean return, so state 0
//! is always the lowest-mean ("bear") state.
//!
//! The fit needs the `hmm` feature. A fit that cannot run (too few samples,
//! numerical failure) logs a warning and yields NaN output instead of an
//! error.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::error::{Result, TalibError};
use crate::types::Float;
use crate::validation::check_period;

/// Covariance parameterisation of the Gaussian emissions
///
/// Returns are one-dimensional, so `Full`, `Diag` and `Spherical` all fit
/// one variance per state; `Tied` shares a single variance across states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CovarianceType {
    /// Full covariance per state
    #[default]
    Full,
    /// Diagonal covariance per state
    Diag,
    /// Single variance per state
    Spherical,
    /// One covariance shared by all states
    Tied,
}

impl CovarianceType {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CovarianceType::Full => "full",
            CovarianceType::Diag => "diag",
            CovarianceType::Spherical => "spherical",
            CovarianceType::Tied => "tied",
        }
    }
}

impl fmt::Display for CovarianceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CovarianceType {
    type Err = TalibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(CovarianceType::Full),
            "diag" => Ok(CovarianceType::Diag),
            "spherical" => Ok(CovarianceType::Spherical),
            "tied" => Ok(CovarianceType::Tied),
            _ => Err(TalibError::invalid_parameter(
                "covariance_type",
                s,
                "one of full, diag, spherical, tied",
            )),
        }
    }
}

/// Parameters of [`regime_hmm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HmmParams {
    /// Number of hidden states
    pub n_states: usize,
    /// Emission covariance parameterisation
    pub covariance_type: CovarianceType,
    /// Maximum Baum-Welch iterations
    pub n_iter: usize,
    /// Seed of the parameter initialisation
    pub random_state: u64,
}

impl Default for HmmParams {
    fn default() -> Self {
        Self {
            n_states: 3,
            covariance_type: CovarianceType::Full,
            n_iter: 100,
            random_state: 42,
        }
    }
}

/// Output of [`regime_hmm`]
#[derive(Debug, Clone, PartialEq)]
pub struct HmmRegime {
    /// Decoded state per bar, NaN where the return is NaN or the fit failed
    pub states: Vec<Float>,
    /// Row-stochastic `n_states × n_states` transition matrix in relabelled order
    pub transition_matrix: Array2<Float>,
    /// State means in ascending order
    pub means: Vec<Float>,
}

impl HmmRegime {
    fn nan(n: usize, n_states: usize) -> Self {
        Self {
            states: vec![Float::NAN; n],
            transition_matrix: Array2::from_elem((n_states, n_states), Float::NAN),
            means: vec![Float::NAN; n_states],
        }
    }
}

/// Whether this build can fit HMMs.
pub fn hmm_available() -> bool {
    cfg!(feature = "hmm")
}

/// One-bar fractional returns; index 0 is NaN, as is any bar after a zero close.
pub fn regime_hmm_returns(close: &[Float]) -> Vec<Float> {
    let mut out = vec![Float::NAN; close.len()];
    for i in 1..close.len() {
        let prev = close[i - 1];
        if prev != 0.0 {
            out[i] = (close[i] - prev) / prev;
        }
    }
    out
}

/// Fit a Gaussian HMM on the defined returns and decode the state path.
///
/// Fewer than `2 * n_states` defined samples or a failed fit produce NaN
/// output of the right shapes and a `tracing` warning. Without the `hmm`
/// feature this returns [`TalibError::NotImplemented`].
pub fn regime_hmm(returns: &[Float], params: &HmmParams) -> Result<HmmRegime> {
    check_period("n_states", params.n_states, 1)?;
    check_period("n_iter", params.n_iter, 1)?;
    fit_and_decode(returns, params)
}

#[cfg(not(feature = "hmm"))]
fn fit_and_decode(_returns: &[Float], _params: &HmmParams) -> Result<HmmRegime> {
    Err(TalibError::not_implemented(
        "regime_hmm requires the `hmm` feature",
    ))
}

#[cfg(feature = "hmm")]
fn fit_and_decode(returns: &[Float], params: &HmmParams) -> Result<HmmRegime> {
    use super::gaussian_hmm::GaussianHmm;

    let k = params.n_states;
    let positions: Vec<usize> = (0..returns.len())
        .filter(|&i| !returns[i].is_nan())
        .collect();
    let samples: Vec<Float> = positions.iter().map(|&i| returns[i]).collect();
    let required = 2 * k;
    if samples.len() < required {
        tracing::warn!(
            valid = samples.len(),
            required,
            n_states = k,
            "too few returns for HMM regime, emitting NaN"
        );
        return Ok(HmmRegime::nan(returns.len(), k));
    }

    let model = match GaussianHmm::fit(&samples, params) {
        Ok(model) => model,
        Err(error) => {
            tracing::warn!(
                valid = samples.len(),
                required,
                n_states = k,
                %error,
                "HMM regime fit failed, emitting NaN"
            );
            return Ok(HmmRegime::nan(returns.len(), k));
        }
    };

    // rank[old] = position of the state in ascending-mean order
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| model.means[a].total_cmp(&model.means[b]));
    let mut rank = vec![0; k];
    for (new, &old) in order.iter().enumerate() {
        rank[old] = new;
    }

    let path = model.viterbi(&samples);
    let mut states = vec![Float::NAN; returns.len()];
    for (&pos, &s) in positions.iter().zip(&path) {
        states[pos] = rank[s] as Float;
    }
    let transition_matrix =
        Array2::from_shape_fn((k, k), |(from, to)| model.transition[[order[from], order[to]]]);
    let means = order.iter().map(|&s| model.means[s]).collect();

    Ok(HmmRegime {
        states,
        transition_matrix,
        means,
    })
}
