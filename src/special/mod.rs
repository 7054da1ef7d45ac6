//! special — gamma-family primitives used by the Pitman estimator.
//!
//! Purpose
//! -------
//! Collect the special functions required by the closed-form score equations
//! and by the result compiler in one place: `ln Γ`, `Γ`, the digamma function
//! `ψ` and the trigamma function `ψ₁`.
//!
//! Key behaviors
//! -------------
//! - [`ln_gamma`], [`gamma`] and [`digamma`] delegate to
//!   `statrs::function::gamma`.
//! - [`ln_gamma`] reports `NaN` for non-positive arguments instead of the
//!   reflected `ln |Γ(x)|`, so that callers treating `NaN` as "formula
//!   invalid" see the same domain as the usual log-gamma definition.
//! - [`trigamma`] is implemented locally (statrs does not ship one) using the
//!   upward recurrence `ψ₁(x) = ψ₁(x + 1) + 1/x²`, the asymptotic expansion
//!   for large arguments and the reflection formula for negative arguments.
//!
//! Invariants & assumptions
//! ------------------------
//! - All functions are pure and reentrant; they never panic.
//! - Poles (`x ∈ {0, −1, −2, …}`) yield `+∞` for [`trigamma`] and `−∞` for
//!   [`digamma`]; `NaN` inputs propagate.
//!
//! Testing notes
//! -------------
//! - Unit tests pin known values (`ψ₁(1) = π²/6`, `ψ₁(1/2) = π²/2`), check the
//!   recurrence and reflection identities and compare against direct sums.
use statrs::function::gamma as sgamma;
use std::f64::consts::PI;

/// Argument above which the trigamma asymptotic series is used directly.
const TRIGAMMA_ASYMPTOTIC: f64 = 20.0;

/// Natural logarithm of the gamma function for `x > 0`.
///
/// Returns `NaN` for `x ≤ 0` and for `NaN` input.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    sgamma::ln_gamma(x)
}

/// Gamma function `Γ(x)`.
///
/// Overflows to `+∞` for large arguments (roughly `x > 171.6`).
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    sgamma::gamma(x)
}

/// Digamma function `ψ(x) = d/dx ln Γ(x)`.
pub fn digamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    sgamma::digamma(x)
}

/// Trigamma function `ψ₁(x) = d²/dx² ln Γ(x)`.
///
/// Parameters
/// ----------
/// - `x`: `f64`
///   Any real argument. Negative non-integers are handled through the
///   reflection formula `ψ₁(1 − x) + ψ₁(x) = π² / sin²(πx)`.
///
/// Returns
/// -------
/// `f64`
///   `ψ₁(x)`; `+∞` at the poles `0, −1, −2, …`; `NaN` for `NaN`;
///   `0` for `+∞`.
///
/// Notes
/// -----
/// - For `x ≥ 20` the asymptotic series
///   `1/x + 1/(2x²) + 1/(6x³) − 1/(30x⁵) + 1/(42x⁷) − 1/(30x⁹)` is accurate to
///   well below one ulp of the result; smaller arguments are shifted upward
///   with the recurrence.
pub fn trigamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if x <= 0.0 {
        if x == x.floor() {
            return f64::INFINITY;
        }
        let s = (PI * x).sin();
        return PI * PI / (s * s) - trigamma_positive(1.0 - x);
    }
    trigamma_positive(x)
}

fn trigamma_positive(x: f64) -> f64 {
    let mut z = x;
    let mut acc = 0.0;
    while z < TRIGAMMA_ASYMPTOTIC {
        acc += 1.0 / (z * z);
        z += 1.0;
    }
    let inv = 1.0 / z;
    let inv2 = inv * inv;
    let series = inv
        + inv2 / 2.0
        + inv * inv2 * (1.0 / 6.0 - inv2 * (1.0 / 30.0 - inv2 * (1.0 / 42.0 - inv2 / 30.0)));
    acc + series
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Known closed-form values of ψ₁ and ψ.
    // - The recurrence and reflection identities used by `trigamma`.
    // - Agreement of ψ/ψ₁ differences with the finite sums they replace in
    //   the score equations.
    // - The domain convention of `ln_gamma` for non-positive arguments.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin `trigamma` to its exact values at 1 and 1/2.
    //
    // Given
    // -----
    // - ψ₁(1) = π²/6 and ψ₁(1/2) = π²/2.
    //
    // Expect
    // ------
    // - Agreement to ~1e-14 relative error.
    fn trigamma_matches_known_values() {
        assert_relative_eq!(trigamma(1.0), PI * PI / 6.0, max_relative = 1e-14);
        assert_relative_eq!(trigamma(0.5), PI * PI / 2.0, max_relative = 1e-14);
        assert_relative_eq!(trigamma(2.0), PI * PI / 6.0 - 1.0, max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Check the recurrence ψ₁(x) = ψ₁(x + 1) + 1/x² on both sides of the
    // asymptotic switch and for negative non-integer arguments.
    //
    // Expect
    // ------
    // - The identity holds to ~1e-12 relative error.
    fn trigamma_satisfies_recurrence() {
        for &x in &[0.3, 1.7, 19.5, 20.0, 57.25, -0.4, -2.6] {
            assert_relative_eq!(
                trigamma(x),
                trigamma(x + 1.0) + 1.0 / (x * x),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that poles and non-finite inputs follow the documented
    // conventions.
    fn trigamma_handles_poles_and_non_finite_inputs() {
        assert_eq!(trigamma(0.0), f64::INFINITY);
        assert_eq!(trigamma(-3.0), f64::INFINITY);
        assert!(trigamma(f64::NAN).is_nan());
        assert_eq!(trigamma(f64::INFINITY), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure ψ and ψ₁ differences reproduce the harmonic-type sums that the
    // closed-form evaluator substitutes for loops.
    //
    // Given
    // -----
    // - k = 7, a = 0.35: Σ_{j=1}^{k−1} 1/(j − a) and Σ 1/(j − a)².
    //
    // Expect
    // ------
    // - ψ(k − a) − ψ(1 − a) and ψ₁(1 − a) − ψ₁(k − a) match the sums.
    fn digamma_and_trigamma_differences_match_finite_sums() {
        // Arrange
        let k = 7.0;
        let a = 0.35;
        let mut s1 = 0.0;
        let mut s2 = 0.0;
        for j in 1..7 {
            let v = j as f64 - a;
            s1 += 1.0 / v;
            s2 += 1.0 / (v * v);
        }

        // Act
        let d = digamma(k - a) - digamma(1.0 - a);
        let t = trigamma(1.0 - a) - trigamma(k - a);

        // Assert
        assert_relative_eq!(d, s1, max_relative = 1e-12);
        assert_relative_eq!(t, s2, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check that `ln_gamma` reports NaN outside its domain and agrees with
    // `ln(gamma(x))` inside it.
    fn ln_gamma_is_nan_for_non_positive_arguments() {
        assert!(ln_gamma(0.0).is_nan());
        assert!(ln_gamma(-1.5).is_nan());
        assert!(ln_gamma(f64::NAN).is_nan());
        assert_relative_eq!(ln_gamma(5.5), gamma(5.5).ln(), max_relative = 1e-12);
        assert!(gamma(200.0).is_infinite());
    }
}
