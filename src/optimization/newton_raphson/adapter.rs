//! Adapter that exposes a user [`ScoreEquations`] system as an `argmin`
//! operator.
//!
//! The system is evaluated once per point and returns the residual together
//! with the Jacobian, so the adapter implements `argmin`'s generic
//! [`Operator`] with `Output = (Residual, Jacobian)` rather than the separate
//! `Gradient`/`Hessian` traits.
use std::cell::Cell;

use crate::optimization::newton_raphson::{
    traits::ScoreEquations,
    types::{Evaluation, Theta},
    validation::validate_shapes,
};
use argmin::core::{Error, Operator};

/// Bridges a user [`ScoreEquations`] system to `argmin`'s [`Operator`].
///
/// - `Operator::apply` returns `(r(x), J(x))` after a shape check.
/// - Every call is counted in `evaluations`, including calls that fail, so
///   the caller can charge failed tries against the iteration budget.
#[derive(Debug)]
pub struct ArgMinAdapter<'a, S: ScoreEquations> {
    pub system: &'a S,
    pub evaluations: &'a Cell<usize>,
}

impl<'a, S: ScoreEquations> Operator for ArgMinAdapter<'a, S> {
    type Param = Theta;
    type Output = Evaluation;

    /// Evaluate the residual and Jacobian at `θ`.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user's `evaluate` (including
    /// cancellation) and shape violations.
    fn apply(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        self.evaluations.set(self.evaluations.get() + 1);
        let (residual, jacobian) = self.system.evaluate(theta)?;
        validate_shapes(&residual, &jacobian)?;
        Ok((residual, jacobian))
    }
}

impl<'a, S: ScoreEquations> ArgMinAdapter<'a, S> {
    /// Construct a new adapter over a user system and an evaluation counter.
    pub fn new(system: &'a S, evaluations: &'a Cell<usize>) -> Self {
        Self { system, evaluations }
    }
}
