//! Score equations of the Pitman model and their Jacobian.
//!
//! Purpose
//! -------
//! Evaluate, at a point `(θ, α)`, the two first-order conditions of the
//! Pitman log-likelihood and their second derivatives. The result feeds the
//! Newton-Raphson solver through [`PitmanScore`].
//!
//! Key behaviors
//! -------------
//! - [`evaluate_iterative`] accumulates the defining finite sums directly:
//!   O(u + n + Σ size) per call.
//! - [`evaluate_closed_form`] replaces the sums with digamma/trigamma
//!   differences: O(classes) per call.
//! - Both produce the same structure
//!   `object = (o1 − o2, o3 − o4)` and
//!   `derivatives = [[d2 − d1, −d5], [−d5, −d3 − d4]]`, where
//!   - `o1 = Σ_{i<u} 1/(θ + iα)`, `o3 = Σ_{i<u} i/(θ + iα)`,
//!   - `o2 = Σ_{i<n} 1/(θ + i)`,
//!   - `o4 = Σ_k c_k Σ_{j<k} 1/(j − α)`,
//!   - `d1, d5, d3` are the sums of `1, i, i²` over `(θ + iα)⁻²`,
//!   - `d2 = Σ_{i<n} (θ + i)⁻²`, `d4 = Σ_k c_k Σ_{j<k} (j − α)⁻²`.
//! - Every loop iteration (and every histogram entry) polls the
//!   [`CancellationGate`]; a request aborts with [`RiskError::Cancelled`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Evaluations are pure functions of `(θ, α)` and the read-only inputs.
//! - Non-finite outputs are returned as-is; the solver rejects them.
use ndarray::array;

use crate::{
    optimization::{
        errors::{OptError, OptResult},
        newton_raphson::{Evaluation, ScoreEquations, Theta},
    },
    special::{digamma, trigamma},
    uniqueness::{
        core::{
            cancel::CancellationGate, histogram::EquivalenceClassHistogram, options::Strategy,
            stats::SampleStatistics,
        },
        errors::RiskResult,
    },
};

/// Residual (`object`) and Jacobian (`derivatives`) at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEval {
    pub object: [f64; 2],
    pub derivatives: [[f64; 2]; 2],
}

impl ScoreEval {
    fn from_sums(o: [f64; 4], d: [f64; 5]) -> Self {
        let [o1, o2, o3, o4] = o;
        let [d1, d2, d3, d4, d5] = d;
        ScoreEval {
            object: [o1 - o2, o3 - o4],
            derivatives: [[d2 - d1, -d5], [-d5, -d3 - d4]],
        }
    }

    /// Convert into the solver's `(residual, Jacobian)` pair.
    pub fn into_evaluation(self) -> Evaluation {
        let [[j00, j01], [j10, j11]] = self.derivatives;
        (array![self.object[0], self.object[1]], array![[j00, j01], [j10, j11]])
    }
}

/// Evaluate by direct summation.
///
/// # Errors
/// `RiskError::Cancelled` as soon as the gate reports a request.
pub fn evaluate_iterative<G: CancellationGate + ?Sized>(
    histogram: &EquivalenceClassHistogram, theta: f64, alpha: f64, gate: &G,
) -> RiskResult<ScoreEval> {
    let (t, a) = (theta, alpha);
    let (mut o1, mut o2, mut o3, mut o4) = (0.0, 0.0, 0.0, 0.0);
    let (mut d1, mut d2, mut d3, mut d4, mut d5) = (0.0, 0.0, 0.0, 0.0, 0.0);

    for i in 1..histogram.num_classes() {
        gate.checkpoint()?;
        let i = i as f64;
        let val0 = t + i * a;
        let inv = 1.0 / val0;
        let inv2 = 1.0 / (val0 * val0);
        d1 += inv2;
        d5 += i * inv2;
        d3 += i * i * inv2;
        o1 += inv;
        o3 += i * inv;
    }

    for (size, count) in histogram.iter() {
        gate.checkpoint()?;
        if size == 1 {
            continue;
        }
        let (mut s2, mut s1) = (0.0, 0.0);
        for j in 1..size {
            let val3 = j as f64 - a;
            s2 += 1.0 / (val3 * val3);
            s1 += 1.0 / val3;
        }
        d4 += count as f64 * s2;
        o4 += count as f64 * s1;
    }

    for i in 1..histogram.num_records() {
        gate.checkpoint()?;
        let val0 = t + i as f64;
        d2 += 1.0 / (val0 * val0);
        o2 += 1.0 / val0;
    }

    Ok(ScoreEval::from_sums([o1, o2, o3, o4], [d1, d2, d3, d4, d5]))
}

/// Evaluate with digamma/trigamma closed forms.
///
/// The sums over `i < u` telescope through `ψ(u − 1 + θ/α + 1) − ψ(θ/α + 1)`
/// and the matching trigamma difference; the sums over `i < n` become
/// `ψ(n + θ) − ψ(θ + 1)` and `ψ₁(θ + 1) − ψ₁(n + θ)`. Only the loop over
/// histogram entries remains.
///
/// # Errors
/// `RiskError::Cancelled` as soon as the gate reports a request.
pub fn evaluate_closed_form<G: CancellationGate + ?Sized>(
    histogram: &EquivalenceClassHistogram, stats: &SampleStatistics, theta: f64, alpha: f64,
    gate: &G,
) -> RiskResult<ScoreEval> {
    let (t, a) = (theta, alpha);
    let (u, n) = (stats.u, stats.n);
    gate.checkpoint()?;

    let val0 = u - 1.0;
    let val1 = digamma(val0 + (t / a) + 1.0);
    let val2 = trigamma((a + t + (a * val0)) / a);
    let val3 = trigamma((t / a) + 1.0);
    let val4 = digamma((t / a) + 1.0);
    let val5 = a * a;

    let d1 = (val3 - val2) / val5;
    let d5 = (((a * val1) + (t * val2)) - (a * val4) - (t * val3)) / (val5 * a);
    let d3 = (((((val5 * val0) - (t * t * val2)) + (t * t * val3)) - (2.0 * a * t * val1))
        + (2.0 * a * t * val4))
        / (val5 * val5);
    let o1 = (val1 - val4) / a;
    let o3 = ((-t * val1) + (a * val0) + (t * val4)) / val5;
    let o2 = digamma(n + t) - digamma(t + 1.0);
    gate.checkpoint()?;

    let d2 = trigamma(t + 1.0) - trigamma(n + t);

    let (mut d4, mut o4) = (0.0, 0.0);
    let val6 = digamma(1.0 - a);
    let val7 = trigamma(1.0 - a);
    for (size, count) in histogram.iter() {
        gate.checkpoint()?;
        if size == 1 {
            continue;
        }
        let k = size as f64;
        let c = count as f64;
        d4 += c * (val7 - trigamma(k - a));
        o4 += c * (digamma(k - a) - val6);
    }

    Ok(ScoreEval::from_sums([o1, o2, o3, o4], [d1, d2, d3, d4, d5]))
}

/// Pitman score equations bound to one sample, strategy and gate.
///
/// Implements [`ScoreEquations`] so the solver can call it directly;
/// cancellation crosses into the solver as `OptError::Cancelled`.
#[derive(Debug)]
pub struct PitmanScore<'a, G: CancellationGate + ?Sized> {
    pub histogram: &'a EquivalenceClassHistogram,
    pub stats: SampleStatistics,
    pub strategy: Strategy,
    pub gate: &'a G,
}

impl<'a, G: CancellationGate + ?Sized> PitmanScore<'a, G> {
    pub fn new(
        histogram: &'a EquivalenceClassHistogram, stats: SampleStatistics, strategy: Strategy,
        gate: &'a G,
    ) -> Self {
        Self { histogram, stats, strategy, gate }
    }

    /// Evaluate at `(θ, α)` with the configured strategy.
    ///
    /// # Errors
    /// `RiskError::Cancelled` when the gate reports a request.
    pub fn score(&self, theta: f64, alpha: f64) -> RiskResult<ScoreEval> {
        match self.strategy {
            Strategy::Iterative => evaluate_iterative(self.histogram, theta, alpha, self.gate),
            Strategy::ClosedForm => {
                evaluate_closed_form(self.histogram, &self.stats, theta, alpha, self.gate)
            }
        }
    }
}

impl<G: CancellationGate + ?Sized> ScoreEquations for PitmanScore<'_, G> {
    fn evaluate(&self, theta: &Theta) -> OptResult<Evaluation> {
        if theta.len() != 2 {
            return Err(OptError::ThetaDimMismatch { expected: 2, found: theta.len() });
        }
        let eval = self.score(theta[0], theta[1])?;
        Ok(eval.into_evaluation())
    }
}
