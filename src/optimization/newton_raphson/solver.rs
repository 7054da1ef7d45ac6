//! NewtonRaphson2D — an `argmin` solver for two-dimensional root finding.
//!
//! Purpose
//! -------
//! Drive a 2×2 system `r(x) = 0` to a root with Newton's method,
//! `x ← x − λ J(x)⁻¹ r(x)`, inside `argmin`'s `Executor` so that iteration
//! caps, observers and evaluation counters come from the backend.
//!
//! Key behaviors
//! -------------
//! - The residual norm `‖r(x)‖₂` is stored in the state's cost slot; the
//!   solver reports `SolverConverged` once it drops to `accuracy`.
//! - The evaluation at the current point is cached between iterations, so
//!   a full-step iteration costs exactly one call to the system.
//! - The linear solve uses an LU factorization of the 2×2 Jacobian
//!   (`nalgebra::Matrix2`); a singular or non-finite Jacobian ends the try
//!   with [`OptError::SingularJacobian`] / [`OptError::NonFiniteJacobian`].
//! - A step that leaves the finite domain ends the try with
//!   [`OptError::Diverged`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters, residuals and Jacobians follow the aliases in
//!   [`types`](super::types); shapes are validated by the adapter.
//! - Errors raised here end only the current try; the caller decides
//!   whether to restart (see [`solve`](super::solve)).
use argmin::core::{
    Error, KV, Operator, Problem, Solver, State, TerminationReason, TerminationStatus,
};
use argmin_math::ArgminL2Norm;
use nalgebra::{Matrix2, Vector2};
use ndarray::array;

use crate::optimization::{
    errors::{OptError, OptResult},
    newton_raphson::{
        traits::StepDamping,
        types::{Evaluation, Jacobian, NewtonState, Residual, Theta},
        validation::validate_evaluation,
    },
};

/// Damped 2D Newton-Raphson solver.
#[derive(Debug, Clone)]
pub struct NewtonRaphson2D {
    accuracy: f64,
    damping: StepDamping,
    current: Option<Evaluation>,
}

impl NewtonRaphson2D {
    /// Build a solver with the given residual-norm accuracy and damping.
    pub fn new(accuracy: f64, damping: StepDamping) -> Self {
        Self { accuracy, damping, current: None }
    }
}

impl<O> Solver<O, NewtonState> for NewtonRaphson2D
where
    O: Operator<Param = Theta, Output = Evaluation>,
{
    const NAME: &'static str = "Newton-Raphson 2D";

    fn init(
        &mut self, problem: &mut Problem<O>, mut state: NewtonState,
    ) -> Result<(NewtonState, Option<KV>), Error> {
        let theta = state.take_param().ok_or(OptError::MissingTheta)?;
        let (residual, jacobian) = problem.apply(&theta)?;
        validate_evaluation(&residual, &jacobian)?;
        let norm = residual.l2_norm();
        self.current = Some((residual, jacobian));
        Ok((state.param(theta).cost(norm), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, mut state: NewtonState,
    ) -> Result<(NewtonState, Option<KV>), Error> {
        let theta = state.take_param().ok_or(OptError::MissingTheta)?;
        let (residual, jacobian) = match self.current.take() {
            Some(evaluation) => evaluation,
            None => problem.apply(&theta)?,
        };
        let step = newton_step(&residual, &jacobian)?;
        let norm = state.get_cost();

        let mut lambda = 1.0;
        let mut halvings = 0;
        loop {
            let candidate = &theta - &(&step * lambda);
            if candidate.iter().any(|v| !v.is_finite()) {
                return Err(OptError::Diverged { iteration: state.get_iter() }.into());
            }
            let evaluation = problem.apply(&candidate)?;
            let candidate_norm = evaluation.0.l2_norm();
            let accept = match self.damping {
                StepDamping::Full => true,
                StepDamping::Backtracking { max_halvings } => {
                    candidate_norm < norm || halvings >= max_halvings
                }
            };
            if accept {
                self.current = Some(evaluation);
                return Ok((state.param(candidate).cost(candidate_norm), None));
            }
            lambda *= 0.5;
            halvings += 1;
        }
    }

    fn terminate(&mut self, state: &NewtonState) -> TerminationStatus {
        if state.get_cost() <= self.accuracy {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}

/// Solve `J · s = r` for the Newton step `s`.
///
/// # Errors
/// - Finiteness/shape errors from [`validate_evaluation`].
/// - [`OptError::SingularJacobian`] when the LU solve fails or yields a
///   non-finite step.
pub fn newton_step(residual: &Residual, jacobian: &Jacobian) -> OptResult<Theta> {
    validate_evaluation(residual, jacobian)?;
    let j = Matrix2::new(jacobian[(0, 0)], jacobian[(0, 1)], jacobian[(1, 0)], jacobian[(1, 1)]);
    let r = Vector2::new(residual[0], residual[1]);
    match j.lu().solve(&r) {
        Some(step) if step.iter().all(|v| v.is_finite()) => Ok(array![step[0], step[1]]),
        _ => Err(OptError::SingularJacobian { det: j.determinant() }),
    }
}
