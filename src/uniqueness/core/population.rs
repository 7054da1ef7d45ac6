//! Population model: the size `p` of the population the sample was drawn
//! from.
//!
//! A population is described either by its absolute size or by the sampling
//! fraction `f = n / p`. Validation against the sample size happens in
//! [`PopulationModel::population_size`], because the sampling fraction only
//! determines `p` once `n` is known.
use crate::uniqueness::errors::{RiskError, RiskResult};

/// How the population size is specified.
///
/// Variants
/// --------
/// - `Size(p)`: absolute population size; must be finite and ≥ `n`.
/// - `SamplingFraction(f)`: fraction of the population that was sampled,
///   `f ∈ (0, 1]`; `p = n / f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopulationModel {
    Size(f64),
    SamplingFraction(f64),
}

impl PopulationModel {
    /// Model with an absolute population size.
    ///
    /// # Errors
    /// `RiskError::InvalidPopulationSize` if `p` is not finite or not > 0.
    pub fn from_population_size(p: f64) -> RiskResult<Self> {
        if !p.is_finite() || p <= 0.0 {
            return Err(RiskError::InvalidPopulationSize { value: p });
        }
        Ok(PopulationModel::Size(p))
    }

    /// Model with a sampling fraction.
    ///
    /// # Errors
    /// `RiskError::InvalidSamplingFraction` unless `f` is finite and in
    /// `(0, 1]`.
    pub fn from_sampling_fraction(f: f64) -> RiskResult<Self> {
        if !f.is_finite() || f <= 0.0 || f > 1.0 {
            return Err(RiskError::InvalidSamplingFraction { value: f });
        }
        Ok(PopulationModel::SamplingFraction(f))
    }

    /// Population size `p` for a sample of `n` records.
    ///
    /// # Errors
    /// - `RiskError::InvalidPopulationSize` / `InvalidSamplingFraction` for
    ///   values that bypassed the constructors.
    /// - `RiskError::PopulationTooSmall` if `p < n`.
    pub fn population_size(&self, n: usize) -> RiskResult<f64> {
        let p = match *self {
            PopulationModel::Size(p) => {
                Self::from_population_size(p)?;
                p
            }
            PopulationModel::SamplingFraction(f) => {
                Self::from_sampling_fraction(f)?;
                n as f64 / f
            }
        };
        if p < n as f64 {
            return Err(RiskError::PopulationTooSmall { population: p, sample: n });
        }
        Ok(p)
    }
}
