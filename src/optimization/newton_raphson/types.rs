//! newton_raphson::types — shared numeric aliases for the 2D root solver.
//!
//! The solver works on a parameter vector `x = (θ, α)` and an evaluation
//! `(r(x), J(x))` made of the residual of the score equations and their
//! Jacobian. Keeping the aliases here lets the rest of the solver stay
//! agnostic to `ndarray` and Argmin generics.
use argmin::core::IterState;
use ndarray::{Array1, Array2};

/// Dimension of the root-finding problem.
pub const DIM: usize = 2;

/// Parameter vector `x = (θ, α)`.
pub type Theta = Array1<f64>;

/// Residual vector `r(x)` of the score equations.
pub type Residual = Array1<f64>;

/// Dense `DIM × DIM` Jacobian `J(x) = ∂r/∂x`.
pub type Jacobian = Array2<f64>;

/// One evaluation of the system: residual and Jacobian at the same point.
pub type Evaluation = (Residual, Jacobian);

/// Argmin iteration state used by [`NewtonRaphson2D`](super::solver::NewtonRaphson2D).
///
/// The cost slot carries the Euclidean norm of the residual.
pub type NewtonState = IterState<Theta, (), (), (), (), f64>;

/// Scale factors applied to `θ₀` for deterministic restarts, cycled and
/// raised to increasing powers when more restarts are requested.
pub const RESTART_SCALES: [f64; 6] = [0.5, 2.0, 0.25, 4.0, 0.1, 10.0];
