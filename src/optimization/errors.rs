//! optimization::errors — unified error surface for the root-solver layer.
//!
//! Every failure the Newton-Raphson engine can observe is normalized into
//! [`OptError`]: configuration mistakes, numerical breakdown of a single try,
//! cooperative cancellation requested by the evaluator, and backend errors
//! raised by `argmin`. Only configuration errors and cancellation ever leave
//! [`solve`](crate::optimization::newton_raphson::solve); numerical breakdown
//! is folded into a `NaN` parameter vector there.
use argmin::core::{ArgminError, Error};

use crate::uniqueness::errors::RiskError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Tolerances / NewtonOptions ----
    /// Convergence accuracy needs to be positive and finite.
    InvalidAccuracy {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Per-try budget must not exceed the total budget.
    IterationBudgetMismatch {
        per_try: usize,
        total: usize,
    },
    /// Backtracking needs at least one halving.
    InvalidDamping {
        max_halvings: usize,
        reason: &'static str,
    },
    /// Invalid step-damping policy name.
    InvalidDampingName {
        name: String,
        reason: &'static str,
    },

    // ---- Evaluation ----
    /// Residual vector has the wrong length.
    ResidualDimMismatch {
        expected: usize,
        found: usize,
    },
    /// Jacobian has the wrong shape.
    JacobianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },
    /// Residual entries need to be finite.
    NonFiniteResidual {
        index: usize,
        value: f64,
    },
    /// Jacobian entries need to be finite.
    NonFiniteJacobian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Newton step ----
    /// The Jacobian could not be inverted.
    SingularJacobian {
        det: f64,
    },
    /// The Newton step left the finite domain.
    Diverged {
        iteration: u64,
    },
    /// Parameter vector missing from the solver state.
    MissingTheta,
    /// Parameter vector has the wrong length.
    ThetaDimMismatch {
        expected: usize,
        found: usize,
    },

    // ---- Cancellation ----
    /// The evaluator observed a cancellation request.
    Cancelled,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Model errors ----
    /// Non-cancellation failure raised by the model layer.
    ModelError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// `true` for errors that abort the whole solve instead of a single try.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OptError::Cancelled
                | OptError::InvalidAccuracy { .. }
                | OptError::InvalidMaxIter { .. }
                | OptError::IterationBudgetMismatch { .. }
                | OptError::InvalidDamping { .. }
                | OptError::InvalidDampingName { .. }
                | OptError::ThetaDimMismatch { .. }
                | OptError::ModelError { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Tolerances / NewtonOptions ----
            OptError::InvalidAccuracy { tol, reason } => {
                write!(f, "Invalid convergence accuracy {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::IterationBudgetMismatch { per_try, total } => {
                write!(
                    f,
                    "Iterations per try ({per_try}) exceed the total iteration budget ({total})"
                )
            }
            OptError::InvalidDamping { max_halvings, reason } => {
                write!(f, "Invalid step damping with {max_halvings} halvings: {reason}")
            }
            OptError::InvalidDampingName { name, reason } => {
                write!(f, "Invalid step damping '{name}': {reason}")
            }

            // ---- Evaluation ----
            OptError::ResidualDimMismatch { expected, found } => {
                write!(f, "Residual dimension mismatch: expected {expected}, found {found}")
            }
            OptError::JacobianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Jacobian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::NonFiniteResidual { index, value } => {
                write!(f, "Non-finite residual at index {index}: {value}")
            }
            OptError::NonFiniteJacobian { row, col, value } => {
                write!(f, "Non-finite Jacobian at ({row}, {col}): {value}")
            }

            // ---- Newton step ----
            OptError::SingularJacobian { det } => {
                write!(f, "Singular Jacobian (determinant {det})")
            }
            OptError::Diverged { iteration } => {
                write!(f, "Newton iteration diverged at iteration {iteration}")
            }
            OptError::MissingTheta => {
                write!(f, "Missing parameter vector in solver state")
            }
            OptError::ThetaDimMismatch { expected, found } => {
                write!(f, "Parameter dimension mismatch: expected {expected}, found {found}")
            }

            // ---- Cancellation ----
            OptError::Cancelled => {
                write!(f, "Computation cancelled")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Model errors ----
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<RiskError> for OptError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Cancelled => OptError::Cancelled,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
