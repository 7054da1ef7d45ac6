//! Pitman options — evaluator strategy and solver configuration.
//!
//! Purpose
//! -------
//! Collect the knobs of a Pitman estimation in one place: which evaluator
//! formulation computes the score equations and how the Newton-Raphson
//! solver is configured.
//!
//! Key behaviors
//! -------------
//! - [`Strategy`] selects between the iterative summation and the
//!   closed-form special-function evaluator. Both produce the same residual
//!   and Jacobian up to rounding; the closed form is the default because it
//!   costs O(classes) per evaluation instead of O(u + n + Σ size).
//! - [`PitmanOptions`] bundles the strategy with [`NewtonOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `NewtonOptions` is validated by its own constructors and again at the
//!   top of the solve; this module adds no cross-field checks.
use std::str::FromStr;

use crate::{
    optimization::newton_raphson::NewtonOptions,
    uniqueness::errors::{RiskError, RiskResult},
};

/// Evaluator formulation for the Pitman score equations.
///
/// Parsing:
/// `FromStr` accepts case-insensitive `"Iterative"` and `"ClosedForm"`
/// (also `"closed_form"` and `"closed"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Iterative,
    #[default]
    ClosedForm,
}

impl FromStr for Strategy {
    type Err = RiskError;

    fn from_str(s: &str) -> RiskResult<Self> {
        match s.to_lowercase().as_str() {
            "iterative" => Ok(Strategy::Iterative),
            "closedform" | "closed_form" | "closed" => Ok(Strategy::ClosedForm),
            _ => Err(RiskError::InvalidStrategyName { name: s.to_string() }),
        }
    }
}

/// Estimation options for [`PitmanModel`](crate::uniqueness::models::PitmanModel).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitmanOptions {
    pub strategy: Strategy,
    pub newton: NewtonOptions,
}

impl PitmanOptions {
    pub fn new(strategy: Strategy, newton: NewtonOptions) -> PitmanOptions {
        PitmanOptions { strategy, newton }
    }
}
