//! Public API surface for the 2D Newton-Raphson root solver.
//!
//! - [`ScoreEquations`]: trait users implement for their system `r(x) = 0`.
//! - [`Tolerances`], [`StepDamping`] and [`NewtonOptions`]: solver
//!   configuration.
//! - [`NewtonOutcome`]: normalized result returned by [`solve`](super::solve).
//!
//! Convention: the system is evaluated as a pair `(r(x), J(x))` in a single
//! call because both share the same expensive intermediate sums.
use crate::optimization::{
    errors::{OptError, OptResult},
    newton_raphson::{
        types::{DIM, Evaluation, Theta},
        validation::{verify_accuracy, verify_budget, verify_max_iter},
    },
};
use std::str::FromStr;

/// User-implemented system of equations `r(x) = 0` with Jacobian.
///
/// Required:
/// - `evaluate(&Theta) -> OptResult<Evaluation>`: return `(r(x), J(x))`
///   with `r` of length 2 and `J` of shape 2×2.
///   - Errors: return [`OptError::Cancelled`] to abort the whole solve;
///     any other error only ends the current try.
pub trait ScoreEquations {
    fn evaluate(&self, theta: &Theta) -> OptResult<Evaluation>;
}

/// Step-damping policy applied to each Newton step.
///
/// Variants:
/// - `Full`: take the full Newton step `x ← x − J⁻¹ r`.
/// - `Backtracking { max_halvings }`: halve the step while `‖r‖` does not
///   decrease, at most `max_halvings` times; the last candidate is accepted
///   when the budget is spent.
///
/// Parsing:
/// `FromStr` accepts case-insensitive `"Full"` and `"Backtracking"` (the
/// latter with [`StepDamping::DEFAULT_HALVINGS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDamping {
    Full,
    Backtracking { max_halvings: usize },
}

impl StepDamping {
    /// Halvings used when `"Backtracking"` is parsed from a string.
    pub const DEFAULT_HALVINGS: usize = 20;

    /// Build a validated backtracking policy.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidDamping`] if `max_halvings == 0`.
    pub fn backtracking(max_halvings: usize) -> OptResult<Self> {
        if max_halvings == 0 {
            return Err(OptError::InvalidDamping {
                max_halvings,
                reason: "Backtracking needs at least one halving.",
            });
        }
        Ok(StepDamping::Backtracking { max_halvings })
    }
}

impl FromStr for StepDamping {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(StepDamping::Full),
            "backtracking" => StepDamping::backtracking(StepDamping::DEFAULT_HALVINGS),
            _ => Err(OptError::InvalidDampingName {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Full' or 'Backtracking'.",
            }),
        }
    }
}

/// Convergence tolerance and iteration budgets.
///
/// - `accuracy`: a try converges once `‖r(x)‖₂ ≤ accuracy`.
/// - `max_iter_per_try`: iteration cap for a single start value.
/// - `max_iter_total`: iteration cap across the first try and all restarts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub accuracy: f64,
    pub max_iter_per_try: usize,
    pub max_iter_total: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - `accuracy` must be **finite and strictly positive**.
    /// - Both iteration caps must be `> 0`.
    /// - `max_iter_per_try ≤ max_iter_total`.
    ///
    /// # Errors
    /// - [`OptError::InvalidAccuracy`], [`OptError::InvalidMaxIter`] or
    ///   [`OptError::IterationBudgetMismatch`].
    pub fn new(accuracy: f64, max_iter_per_try: usize, max_iter_total: usize) -> OptResult<Self> {
        verify_accuracy(accuracy)?;
        verify_max_iter(max_iter_per_try)?;
        verify_max_iter(max_iter_total)?;
        verify_budget(max_iter_per_try, max_iter_total)?;
        Ok(Self { accuracy, max_iter_per_try, max_iter_total })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { accuracy: 1e-6, max_iter_per_try: 1_000, max_iter_total: 100_000 }
    }
}

/// Solver-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — accuracy and iteration budgets.
/// - `damping: StepDamping` — step policy.
/// - `restarts: usize` — number of deterministic alternative start values
///   tried after the first try fails.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: `accuracy = 1e-6`, `max_iter_per_try = 1000`,
///   `max_iter_total = 100000`
/// - `damping`: `Full`
/// - `restarts`: `8`
/// - `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonOptions {
    pub tols: Tolerances,
    pub damping: StepDamping,
    pub restarts: usize,
    pub verbose: bool,
}

impl NewtonOptions {
    /// Create a new set of solver options; numeric validation happens in
    /// [`Tolerances::new`] and [`StepDamping::backtracking`].
    pub fn new(tols: Tolerances, damping: StepDamping, restarts: usize, verbose: bool) -> Self {
        Self { tols, damping, restarts, verbose }
    }
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self { tols: Tolerances::default(), damping: StepDamping::Full, restarts: 8, verbose: false }
    }
}

/// Canonical result returned by `solve`.
///
/// - `theta_hat`: converged `(θ, α)`, or `[NaN, NaN]` when no try converged.
/// - `converged`: whether any try met the accuracy.
/// - `status`: human-readable status of the last try.
/// - `iterations`: Newton iterations spent across all tries.
/// - `evaluations`: calls to [`ScoreEquations::evaluate`] across all tries.
/// - `residual_norm`: `‖r(θ̂)‖₂` for a converged solve, `NaN` otherwise.
/// - `tries`: number of start values attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonOutcome {
    pub theta_hat: Theta,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub evaluations: usize,
    pub residual_norm: f64,
    pub tries: usize,
}

impl NewtonOutcome {
    /// Outcome of a solve where every try failed.
    pub fn no_solution(status: String, iterations: usize, evaluations: usize, tries: usize) -> Self {
        Self {
            theta_hat: Theta::from_elem(DIM, f64::NAN),
            converged: false,
            status,
            iterations,
            evaluations,
            residual_norm: f64::NAN,
            tries,
        }
    }

    /// `true` when any component of `theta_hat` is `NaN`.
    pub fn has_nan(&self) -> bool {
        self.theta_hat.iter().any(|v| v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults and that `Tolerances::new` enforces
    // its rules.
    fn tolerances_defaults_and_validation() {
        let tols = Tolerances::default();
        assert_eq!(tols.accuracy, 1e-6);
        assert_eq!(tols.max_iter_per_try, 1_000);
        assert_eq!(tols.max_iter_total, 100_000);
        assert!(Tolerances::new(1e-8, 50, 500).is_ok());
        assert!(Tolerances::new(-1.0, 50, 500).is_err());
        assert!(Tolerances::new(1e-8, 0, 500).is_err());
        assert!(Tolerances::new(1e-8, 600, 500).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing of the damping policy.
    fn step_damping_parses_case_insensitively() {
        assert_eq!("FULL".parse::<StepDamping>(), Ok(StepDamping::Full));
        assert_eq!(
            "backTracking".parse::<StepDamping>(),
            Ok(StepDamping::Backtracking { max_halvings: StepDamping::DEFAULT_HALVINGS })
        );
        assert!(matches!(
            "linesearch".parse::<StepDamping>(),
            Err(OptError::InvalidDampingName { .. })
        ));
        assert!(StepDamping::backtracking(0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the no-solution outcome carries NaN components.
    fn no_solution_outcome_is_nan() {
        let out = NewtonOutcome::no_solution("MaxItersReached".to_string(), 10, 11, 1);
        assert!(out.has_nan());
        assert!(!out.converged);
        assert!(out.residual_norm.is_nan());
    }
}
