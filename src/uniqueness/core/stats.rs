//! Sample statistics derived from a histogram and a population model.
//!
//! Purpose
//! -------
//! Collect the scalars every Pitman computation needs (`c1`, `c2`, `u`, `n`,
//! `p`) in one validated, read-only struct. Construction is the single
//! place where the input contract is enforced, so that invalid input fails
//! before any iteration begins.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n = Σ size·count` equals the declared sample size.
//! - `n ≥ 2`: with a single record the initializer's `n·u` denominator
//!   pattern degenerates.
//! - `p ≥ n` and `p` is finite.
//! - Scalars are stored as `f64` because every consumer uses them in
//!   floating-point formulas.
use crate::uniqueness::{
    core::{histogram::EquivalenceClassHistogram, population::PopulationModel},
    errors::{RiskError, RiskResult},
};

/// Derived scalars of a sampled dataset.
///
/// Fields
/// ------
/// - `c1`: number of classes of size 1 (sample uniques).
/// - `c2`: number of classes of size 2 (sample pairs).
/// - `u`: total number of classes.
/// - `n`: sample size.
/// - `p`: population size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStatistics {
    pub c1: f64,
    pub c2: f64,
    pub u: f64,
    pub n: f64,
    pub p: f64,
}

impl SampleStatistics {
    /// Derive and validate the statistics.
    ///
    /// Parameters
    /// ----------
    /// - `histogram`: validated class-size histogram.
    /// - `sample_size`: declared number of sampled records.
    /// - `population`: population model resolving `p`.
    ///
    /// Errors
    /// ------
    /// - `RiskError::SampleSizeMismatch` if `sample_size ≠ Σ size·count`.
    /// - `RiskError::SampleTooSmall` if `sample_size < 2`.
    /// - Population errors from [`PopulationModel::population_size`].
    pub fn new(
        histogram: &EquivalenceClassHistogram, sample_size: usize, population: &PopulationModel,
    ) -> RiskResult<Self> {
        let actual = histogram.num_records();
        if sample_size != actual {
            return Err(RiskError::SampleSizeMismatch { declared: sample_size, actual });
        }
        if sample_size < 2 {
            return Err(RiskError::SampleTooSmall { n: sample_size });
        }
        let p = population.population_size(sample_size)?;
        Ok(Self {
            c1: histogram.num_classes_of_size(1) as f64,
            c2: histogram.num_classes_of_size(2) as f64,
            u: histogram.num_classes() as f64,
            n: sample_size as f64,
            p,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the derived scalars for a mixed histogram.
    fn new_derives_scalars() {
        // Arrange
        let hist = EquivalenceClassHistogram::new([(1, 50), (2, 20), (3, 5)]).unwrap();
        let pop = PopulationModel::from_population_size(10_000.0).unwrap();

        // Act
        let stats = SampleStatistics::new(&hist, 105, &pop).unwrap();

        // Assert
        assert_eq!(stats, SampleStatistics { c1: 50.0, c2: 20.0, u: 75.0, n: 105.0, p: 10_000.0 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure the input contract fails fast.
    //
    // Given
    // -----
    // - A declared size that disagrees with the histogram.
    // - The degenerate single-record sample (n = 1, u = 1).
    // - A population smaller than the sample.
    fn new_rejects_invalid_input() {
        let hist = EquivalenceClassHistogram::new([(1, 50), (2, 20), (3, 5)]).unwrap();
        let pop = PopulationModel::from_population_size(10_000.0).unwrap();
        assert_eq!(
            SampleStatistics::new(&hist, 100, &pop),
            Err(RiskError::SampleSizeMismatch { declared: 100, actual: 105 })
        );

        let single = EquivalenceClassHistogram::new([(1, 1)]).unwrap();
        assert_eq!(SampleStatistics::new(&single, 1, &pop), Err(RiskError::SampleTooSmall { n: 1 }));

        let small = PopulationModel::from_population_size(100.0).unwrap();
        assert!(matches!(
            SampleStatistics::new(&hist, 105, &small),
            Err(RiskError::PopulationTooSmall { .. })
        ));
    }
}
