//! newton_raphson — argmin-powered 2D root solver with deterministic restarts.
//!
//! Purpose
//! -------
//! Find a root of a two-dimensional system `r(x) = 0` given its Jacobian,
//! the way score equations of a two-parameter likelihood are solved. Callers
//! implement a single trait, [`ScoreEquations`], and invoke [`solve`].
//!
//! Key behaviors
//! -------------
//! - Bridge user systems into `argmin` via [`adapter::ArgMinAdapter`], which
//!   implements `Operator` with `Output = (Residual, Jacobian)` and counts
//!   evaluations.
//! - Iterate with the custom [`solver::NewtonRaphson2D`] (`argmin::Solver`),
//!   optionally damped by step halving ([`StepDamping`]).
//! - Run single tries through [`run::run_newton`] and orchestrate restarts
//!   and the global iteration budget in [`solve`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Non-convergence is **never** an error: [`NewtonOutcome::theta_hat`] is
//!   `[NaN, NaN]` instead.
//! - [`OptError::Cancelled`](crate::optimization::errors::OptError::Cancelled)
//!   raised by a system aborts the whole solve and is returned unchanged.
//! - Configuration types are validated on construction and re-checked at the
//!   top of [`solve`].
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>` of length 2), residuals
//!   [`Residual`], Jacobians [`Jacobian`] (`Array2<f64>`, 2×2).
//! - The solver state stores `‖r(x)‖₂` as its cost.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover validation, the linear step,
//!   termination, restarts, damping and cancellation on toy systems.
//! - The Pitman score equations exercise the solver end to end in
//!   `uniqueness::models`.

pub mod adapter;
pub mod api;
pub mod run;
pub mod solver;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{restart_seed, solve};
pub use self::run::{TryOutcome, run_newton};
pub use self::solver::NewtonRaphson2D;
pub use self::traits::{NewtonOptions, NewtonOutcome, ScoreEquations, StepDamping, Tolerances};
pub use self::types::{DIM, Evaluation, Jacobian, Residual, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_uniqueness::optimization::newton_raphson::prelude::*;
//
// to import the main solver surface in a single line.

pub mod prelude {
    pub use super::api::solve;
    pub use super::traits::{NewtonOptions, NewtonOutcome, ScoreEquations, StepDamping, Tolerances};
    pub use super::types::{Evaluation, Theta};
}
