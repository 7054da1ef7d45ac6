//! Closed-form starting values for the Pitman score equations.
//!
//! The seed `(θ₀, α₀)` comes from a moment-style heuristic in the sample
//! uniques `c1`, sample pairs `c2`, class count `u` and sample size `n`:
//!
//! ```text
//! c2' = c2 != 0 ? c2 : 1
//! c   = c1 (c1 − 1) / c2'
//! θ₀  = (n u c − c1 (n − 1)(2u + c)) / (2 c1 u + c1 c − n c)
//! α₀  = (θ₀ (c1 − n) + (n − 1) c1) / (n u)
//! ```
//!
//! When the sample has no pairs, `c2' = 1` deliberately overestimates `c`.
//! The seed is not validated here: it may be extreme or `NaN` (for example
//! when `c1 = 0`), and the root solver's own checks are the only gate.
use ndarray::array;

use crate::{optimization::newton_raphson::Theta, uniqueness::core::stats::SampleStatistics};

/// Seed `(θ₀, α₀)` for the Newton-Raphson solve.
pub fn initial_guess(stats: &SampleStatistics) -> Theta {
    let SampleStatistics { c1, c2, u, n, .. } = *stats;
    let c2 = if c2 != 0.0 { c2 } else { 1.0 };
    let c = (c1 * (c1 - 1.0)) / c2;
    let theta = ((n * u * c) - (c1 * (n - 1.0) * ((2.0 * u) + c)))
        / (((2.0 * c1 * u) + (c1 * c)) - (n * c));
    let alpha = ((theta * (c1 - n)) + ((n - 1.0) * c1)) / (n * u);
    array![theta, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats(c1: f64, c2: f64, u: f64, n: f64) -> SampleStatistics {
        SampleStatistics { c1, c2, u, n, p: 10_000.0 }
    }

    #[test]
    // Purpose
    // -------
    // Pin the seed for the mixed histogram {(1,50),(2,20),(3,5)}.
    //
    // Expect
    // ------
    // - c = 50·49/20 = 122.5, θ₀ = −452 312.5 / 762.5, α₀ from θ₀.
    fn initial_guess_matches_closed_form() {
        // Arrange
        let s = stats(50.0, 20.0, 75.0, 105.0);
        let theta = (105.0 * 75.0 * 122.5 - 50.0 * 104.0 * (150.0 + 122.5))
            / (2.0 * 50.0 * 75.0 + 50.0 * 122.5 - 105.0 * 122.5);
        let alpha = (theta * (50.0 - 105.0) + 104.0 * 50.0) / (105.0 * 75.0);

        // Act
        let seed = initial_guess(&s);

        // Assert
        assert_relative_eq!(seed[0], theta, max_relative = 1e-15);
        assert_relative_eq!(seed[1], alpha, max_relative = 1e-15);
        assert_relative_eq!(seed[0], -593.196_7, max_relative = 1e-6);
        assert_relative_eq!(seed[1], 4.803_28, max_relative = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a sample without pairs substitutes c2' = 1 and still yields a
    // finite seed.
    //
    // Given
    // -----
    // - {(1,10),(3,5)}: c1 = 10, c2 = 0, u = 15, n = 25.
    //
    // Expect
    // ------
    // - c = 90, θ₀ = (33 750 − 28 800) / (−1 050), both components finite.
    fn initial_guess_substitutes_missing_pairs() {
        let seed = initial_guess(&stats(10.0, 0.0, 15.0, 25.0));
        assert!(seed.iter().all(|v| v.is_finite()));
        assert_relative_eq!(seed[0], 4_950.0 / -1_050.0, max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Document that a sample without uniques produces a NaN seed instead of
    // an error.
    fn initial_guess_without_uniques_is_nan() {
        let seed = initial_guess(&stats(0.0, 5.0, 5.0, 10.0));
        assert!(seed[0].is_nan());
    }
}
