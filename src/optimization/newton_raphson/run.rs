//! Execution helper that runs a single Newton-Raphson try through `argmin`
//! and returns a [`TryOutcome`].
use std::cell::Cell;

use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    errors::{OptError, OptResult},
    newton_raphson::{
        adapter::ArgMinAdapter,
        solver::NewtonRaphson2D,
        traits::{NewtonOptions, ScoreEquations},
        types::Theta,
    },
};

/// Result of one start value.
///
/// - `theta`: final iterate (only meaningful when `converged`).
/// - `converged`: the solver reported `SolverConverged`.
/// - `status`: `argmin` termination status rendered as text.
/// - `iterations`: Newton iterations spent in this try.
/// - `residual_norm`: `‖r(θ)‖₂` at the final iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct TryOutcome {
    pub theta: Theta,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub residual_norm: f64,
}

/// Run one Newton-Raphson try from `theta0`.
///
/// Wires up the user system via [`ArgMinAdapter`], a fresh
/// [`NewtonRaphson2D`], the start value and the iteration cap `max_iters`,
/// then executes the solver.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time
/// pre-iteration line logs `‖r(θ₀)‖`. That line evaluates the system
/// directly, so it is not counted in `evaluations`.
///
/// # Errors
/// Any error raised inside the executor, converted through
/// `From<argmin::core::Error>`. An [`OptError`] raised by the system (for
/// example [`OptError::Cancelled`]) comes back out unchanged.
pub fn run_newton<S: ScoreEquations>(
    theta0: Theta, max_iters: usize, opts: &NewtonOptions, system: &S,
    evaluations: &Cell<usize>,
) -> OptResult<TryOutcome> {
    let problem = ArgMinAdapter::new(system, evaluations);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let solver = NewtonRaphson2D::new(opts.tols.accuracy, opts.damping);
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.param(theta0).max_iters(max_iters as u64));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = executor.run().map_err(OptError::from)?.state().clone();
    let iterations = result.get_iter() as usize;
    let residual_norm = result.get_cost();
    let termination = result.get_termination_status().clone();
    let converged =
        termination == TerminationStatus::Terminated(TerminationReason::SolverConverged);
    let status = match termination {
        TerminationStatus::NotTerminated => "Not terminated".to_string(),
        _ => format!("{termination:?}"),
    };
    let theta = result.take_param().ok_or(OptError::MissingTheta)?;
    Ok(TryOutcome { theta, converged, status, iterations, residual_norm })
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<S: ScoreEquations>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, S>,
) -> OptResult<()> {
    let (residual, _) = problem.system.evaluate(theta0)?;
    eprintln!(
        "init: theta0 = ({:.6}, {:.6}), ||r(theta0)|| = {:.6e}",
        theta0[0],
        theta0[1],
        residual.l2_norm()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::newton_raphson::types::Evaluation;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the accounting of a single try: iterations and
    // evaluations must not depend on the verbosity setting.
    // -------------------------------------------------------------------------

    /// r(x) = (x₀² − 4, x₁ − 1), root at (2, 1).
    struct Quadratic;

    impl ScoreEquations for Quadratic {
        fn evaluate(&self, theta: &Theta) -> OptResult<Evaluation> {
            let r = array![theta[0] * theta[0] - 4.0, theta[1] - 1.0];
            let j = array![[2.0 * theta[0], 0.0], [0.0, 1.0]];
            Ok((r, j))
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure verbose output does not change the evaluation count or the
    // iterate of a try.
    //
    // Given
    // -----
    // - r(x) = (x₀² − 4, x₁ − 1) started at (3, 0).
    //
    // Expect
    // ------
    // - Both runs converge with identical iterations, evaluations and θ.
    // - Evaluations equal `1 + iterations` with full steps.
    fn run_newton_counts_are_independent_of_verbosity() {
        // Arrange
        let quiet = NewtonOptions::default();
        let verbose = NewtonOptions { verbose: true, ..NewtonOptions::default() };
        let (quiet_evals, verbose_evals) = (Cell::new(0), Cell::new(0));

        // Act
        let a = run_newton(array![3.0, 0.0], 100, &quiet, &Quadratic, &quiet_evals).unwrap();
        let b = run_newton(array![3.0, 0.0], 100, &verbose, &Quadratic, &verbose_evals).unwrap();

        // Assert
        assert!(a.converged && b.converged);
        assert_eq!(a, b);
        assert_eq!(quiet_evals.get(), verbose_evals.get());
        assert_eq!(quiet_evals.get(), 1 + a.iterations);
    }
}
