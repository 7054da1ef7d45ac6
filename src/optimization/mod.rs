//! optimization — 2D root solving and its unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical engine behind the estimators: an Argmin-backed
//! Newton-Raphson root solver for two-parameter score equations and a single
//! error/result surface. Callers implement a residual/Jacobian system, choose
//! tolerances, and obtain a root (or a `NaN` vector) plus diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **solving score equations** `r(θ, α) = 0`
//!   (`newton_raphson`), including tolerances, step damping and
//!   deterministic restarts.
//! - Normalize configuration issues, numerical failures, cancellation and
//!   backend solver errors into a single enum (`errors::OptError`) with a
//!   common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Non-convergence is an expected outcome reported as `NaN` components,
//!   not an error.
//! - Cancellation raised by a system is returned to the caller as
//!   `OptError::Cancelled` and is never folded into a number.
//!
//! Conventions
//! -----------
//! - Parameters, residuals and Jacobians are represented using `ndarray`
//!   aliases (`Theta`, `Residual`, `Jacobian`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - This module and its submodules avoid I/O unless the `obs_slog` feature
//!   is enabled and verbosity is requested.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `ScoreEquations` for its evaluator and calls
//!   `solve` with a seed and `NewtonOptions` to obtain a `NewtonOutcome`.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - `newton_raphson`: linear step, termination, restarts, damping and
//!   budget accounting on toy systems.
//! - `errors`: conversions from backend/model errors into `OptError` and
//!   the fatal/non-fatal split.

pub mod errors;
pub mod newton_raphson;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_uniqueness::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::newton_raphson::prelude::*;
}
