//! Validation helpers for the Newton-Raphson solver.
//!
//! - **Configuration checks**: [`verify_accuracy`], [`verify_max_iter`] and
//!   [`verify_budget`] guard [`Tolerances`](super::traits::Tolerances).
//! - **Evaluation checks**: [`validate_shapes`] enforces the 2-vector /
//!   2×2-matrix contract and [`validate_evaluation`] additionally rejects
//!   non-finite entries before a Newton step is attempted.
use crate::optimization::{
    errors::{OptError, OptResult},
    newton_raphson::types::{DIM, Jacobian, Residual, Theta},
};

/// Validate the residual-norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidAccuracy`] if the value is non-finite or ≤ 0.0.
pub fn verify_accuracy(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidAccuracy { tol, reason: "Accuracy must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidAccuracy { tol, reason: "Accuracy must be positive." });
    }
    Ok(())
}

/// Validate an iteration limit.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate that a single try fits in the global budget.
///
/// # Errors
/// Returns [`OptError::IterationBudgetMismatch`] if `per_try > total`.
pub fn verify_budget(per_try: usize, total: usize) -> OptResult<()> {
    if per_try > total {
        return Err(OptError::IterationBudgetMismatch { per_try, total });
    }
    Ok(())
}

/// Validate the dimension of a parameter vector.
///
/// # Errors
/// Returns [`OptError::ThetaDimMismatch`] if `theta.len() != DIM`.
pub fn validate_theta_dim(theta: &Theta) -> OptResult<()> {
    if theta.len() != DIM {
        return Err(OptError::ThetaDimMismatch { expected: DIM, found: theta.len() });
    }
    Ok(())
}

/// Validate residual length and Jacobian shape.
///
/// # Errors
/// - [`OptError::ResidualDimMismatch`] if `residual.len() != DIM`.
/// - [`OptError::JacobianDimMismatch`] if the Jacobian is not `DIM × DIM`.
pub fn validate_shapes(residual: &Residual, jacobian: &Jacobian) -> OptResult<()> {
    if residual.len() != DIM {
        return Err(OptError::ResidualDimMismatch { expected: DIM, found: residual.len() });
    }
    if jacobian.dim() != (DIM, DIM) {
        return Err(OptError::JacobianDimMismatch { expected: DIM, found: jacobian.dim() });
    }
    Ok(())
}

/// Validate shapes and finiteness of an evaluation.
///
/// # Errors
/// - Shape errors from [`validate_shapes`].
/// - [`OptError::NonFiniteResidual`] / [`OptError::NonFiniteJacobian`] for the
///   first offending entry.
pub fn validate_evaluation(residual: &Residual, jacobian: &Jacobian) -> OptResult<()> {
    validate_shapes(residual, jacobian)?;
    for (index, &value) in residual.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteResidual { index, value });
        }
    }
    for ((row, col), &value) in jacobian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteJacobian { row, col, value });
        }
    }
    Ok(())
}
