//! High-level entry point for finding a root of a user-provided
//! [`ScoreEquations`] system.
//!
//! The first try starts at the supplied seed. When it fails (iteration cap,
//! singular Jacobian, non-finite evaluation, divergence) the solver restarts
//! from deterministic alternative seeds until one converges, the restart
//! count is spent, or the global iteration budget runs out. Failure of every
//! try is not an error: the outcome carries `[NaN, NaN]`.
use std::cell::Cell;

use ndarray::array;

use crate::optimization::{
    errors::OptResult,
    newton_raphson::{
        run::run_newton,
        traits::{NewtonOptions, NewtonOutcome, ScoreEquations},
        types::{RESTART_SCALES, Theta},
        validation::{validate_theta_dim, verify_accuracy, verify_budget, verify_max_iter},
    },
};

/// Solve `r(x) = 0` starting from `seed`.
///
/// # Behavior
/// - Validates the seed dimension and the tolerances in `opts`.
/// - Runs up to `1 + opts.restarts` tries; try `k ≥ 1` starts at
///   [`restart_seed`]`(seed, k)`.
/// - Each try is capped at `min(max_iter_per_try, remaining budget)`. A try
///   that errors is charged the evaluations it consumed.
/// - Returns the first converged try.
///
/// # Errors
/// Only fatal errors leave this function (see
/// [`OptError::is_fatal`](crate::optimization::errors::OptError::is_fatal)):
/// cancellation requested by the system, invalid configuration, a seed of
/// the wrong dimension and model-layer failures. Non-convergence is reported
/// through [`NewtonOutcome::converged`] and a `NaN` `theta_hat`.
pub fn solve<S: ScoreEquations>(
    seed: Theta, system: &S, opts: &NewtonOptions,
) -> OptResult<NewtonOutcome> {
    validate_theta_dim(&seed)?;
    verify_accuracy(opts.tols.accuracy)?;
    verify_max_iter(opts.tols.max_iter_per_try)?;
    verify_max_iter(opts.tols.max_iter_total)?;
    verify_budget(opts.tols.max_iter_per_try, opts.tols.max_iter_total)?;

    let evaluations = Cell::new(0usize);
    let mut iterations = 0usize;
    let mut tries = 0usize;
    let mut status = "Not started".to_string();

    for k in 0..=opts.restarts {
        let remaining = opts.tols.max_iter_total.saturating_sub(iterations);
        if remaining == 0 {
            break;
        }
        let max_iters = opts.tols.max_iter_per_try.min(remaining);
        let start = if k == 0 { seed.clone() } else { restart_seed(&seed, k) };
        tries += 1;

        let used_before = evaluations.get();
        match run_newton(start, max_iters, opts, system, &evaluations) {
            Ok(out) if out.converged && out.theta.iter().all(|v| v.is_finite()) => {
                iterations += out.iterations;
                return Ok(NewtonOutcome {
                    theta_hat: out.theta,
                    converged: true,
                    status: out.status,
                    iterations,
                    evaluations: evaluations.get(),
                    residual_norm: out.residual_norm,
                    tries,
                });
            }
            Ok(out) => {
                iterations += out.iterations;
                status = out.status;
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                iterations += (evaluations.get() - used_before).min(max_iters);
                status = err.to_string();
            }
        }
        #[cfg(feature = "obs_slog")]
        if opts.verbose {
            eprintln!("try {tries} failed after {iterations} total iterations: {status}");
        }
    }

    Ok(NewtonOutcome::no_solution(status, iterations, evaluations.get(), tries))
}

/// Start value of restart `k ≥ 1`: `(θ₀·s, α₀)` where `s` cycles through
/// [`RESTART_SCALES`] and is raised to the power `1 + (k − 1) / len` on
/// each pass.
pub fn restart_seed(seed: &Theta, k: usize) -> Theta {
    let idx = k.saturating_sub(1);
    let len = RESTART_SCALES.len();
    let scale = RESTART_SCALES[idx % len].powi(1 + (idx / len) as i32);
    array![seed[0] * scale, seed[1]]
}
