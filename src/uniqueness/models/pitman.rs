//! Pitman model: population uniqueness from a sampled class-size histogram.
//!
//! The generalized Pitman species-sampling model with parameters `(θ, α)`
//! is fitted by maximum likelihood to the sample's equivalence-class
//! histogram, then extrapolated to a population of size `p`:
//!
//! 1. derive [`SampleStatistics`] and fail fast on invalid input;
//! 2. seed the solve with [`initial_guess`];
//! 3. find a root of the score equations with the Newton-Raphson solver,
//!    using the evaluator selected by [`PitmanOptions::strategy`];
//! 4. turn `(θ̂, α̂)` into a count with [`compile_result`].
//!
//! A solve that finds no root is not an error: the estimate is `NaN`.
//! Cancellation is an error ([`RiskError::Cancelled`]) and never yields an
//! estimate.
use crate::{
    optimization::newton_raphson::{Theta, solve},
    uniqueness::{
        core::{
            cancel::CancellationGate, histogram::EquivalenceClassHistogram, init::initial_guess,
            options::PitmanOptions, population::PopulationModel, stats::SampleStatistics,
        },
        errors::{RiskError, RiskResult},
        models::{evaluator::PitmanScore, result::compile_result},
    },
};

/// Solver diagnostics kept next to the estimate.
///
/// - `seed`: closed-form start value `(θ₀, α₀)`.
/// - `theta_hat`: solved `(θ̂, α̂)`; `[NaN, NaN]` if no try converged.
/// - `converged`, `status`, `iterations`, `evaluations`, `tries`: see
///   [`NewtonOutcome`](crate::optimization::newton_raphson::NewtonOutcome).
#[derive(Debug, Clone, PartialEq)]
pub struct PitmanFit {
    pub seed: Theta,
    pub theta_hat: Theta,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub evaluations: usize,
    pub tries: usize,
}

/// Fitted Pitman model.
#[derive(Debug, Clone, PartialEq)]
pub struct PitmanModel {
    num_uniques: f64,
    stats: SampleStatistics,
    fit: PitmanFit,
}

impl PitmanModel {
    /// Estimate the number of population uniques.
    ///
    /// # Arguments
    /// - `histogram`: sampled class sizes and counts.
    /// - `sample_size`: declared number of sampled records.
    /// - `population`: population size or sampling fraction.
    /// - `options`: evaluator strategy and solver configuration.
    /// - `gate`: polled for cancellation inside every evaluation.
    ///
    /// # Errors
    /// - Input validation errors from [`SampleStatistics::new`].
    /// - [`RiskError::Cancelled`] when the gate reports a request.
    /// - [`RiskError::Optimization`] for invalid solver configuration.
    pub fn new<G: CancellationGate + ?Sized>(
        histogram: &EquivalenceClassHistogram, sample_size: usize, population: &PopulationModel,
        options: &PitmanOptions, gate: &G,
    ) -> RiskResult<PitmanModel> {
        let stats = SampleStatistics::new(histogram, sample_size, population)?;
        gate.checkpoint()?;

        let seed = initial_guess(&stats);
        let score = PitmanScore::new(histogram, stats, options.strategy, gate);
        let outcome = solve(seed.clone(), &score, &options.newton).map_err(RiskError::from)?;
        let num_uniques = compile_result(&outcome.theta_hat, stats.p);

        let fit = PitmanFit {
            seed,
            theta_hat: outcome.theta_hat,
            converged: outcome.converged,
            status: outcome.status,
            iterations: outcome.iterations,
            evaluations: outcome.evaluations,
            tries: outcome.tries,
        };
        Ok(PitmanModel { num_uniques, stats, fit })
    }

    /// Estimated number of population uniques; `NaN` when no defensible
    /// estimate exists.
    pub fn num_uniques(&self) -> f64 {
        self.num_uniques
    }

    /// Fitted `θ̂`.
    pub fn theta(&self) -> f64 {
        self.fit.theta_hat[0]
    }

    /// Fitted `α̂`.
    pub fn alpha(&self) -> f64 {
        self.fit.theta_hat[1]
    }

    pub fn stats(&self) -> &SampleStatistics {
        &self.stats
    }

    pub fn fit(&self) -> &PitmanFit {
        &self.fit
    }
}
