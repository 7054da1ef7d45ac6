//! models — uniqueness estimators built on the Pitman score equations.
//!
//! Purpose
//! -------
//! Collect the user-facing Pitman estimator and the pieces it is assembled
//! from: the score-equation evaluators and the result compiler. This layer
//! sits on top of `uniqueness::core` and the generic Newton-Raphson solver.
//!
//! Key behaviors
//! -------------
//! - [`PitmanModel::new`] runs validation, seeding, the root solve and the
//!   result compilation in one call and keeps solver diagnostics in
//!   [`PitmanFit`].
//! - [`evaluator`] provides the iterative and closed-form evaluators plus
//!   [`PitmanScore`], the [`ScoreEquations`] implementation handed to the
//!   solver.
//! - [`result`] converts `(θ̂, α̂)` into the estimate with the dual-formula
//!   check.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are immutable for the duration of an estimation; independent
//!   estimations can run concurrently with independent gates.
//! - A `NaN` estimate means "no defensible estimate"; cancellation and
//!   invalid input are errors.
//!
//! Testing notes
//! -------------
//! - [`evaluator`]: strategy cross-checks, pinned values, Jacobian against
//!   central differences, cancellation granularity.
//! - [`result`]: every selection branch and monotonicity in `p`.
//! - [`pitman`]: end-to-end estimation, reproducibility, error paths.
//!
//! [`ScoreEquations`]: crate::optimization::newton_raphson::ScoreEquations

pub mod evaluator;
pub mod pitman;
pub mod result;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::evaluator::{PitmanScore, ScoreEval, evaluate_closed_form, evaluate_iterative};
pub use self::pitman::{PitmanFit, PitmanModel};
pub use self::result::{
    compile_result, direct_space_estimate, log_space_estimate, select_estimate,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::pitman::{PitmanFit, PitmanModel};
}
