//! Result compiler: turn a solved `(θ, α)` into a population-uniques count.
//!
//! The Pitman model estimates the number of population uniques as
//! `Γ(θ + 1) / Γ(θ + α) · p^α`. The quantity is evaluated twice:
//!
//! - [`log_space_estimate`]: `exp(ln Γ(θ + 1) − ln Γ(θ + α)) · p^α`, which
//!   survives arguments where `Γ` itself overflows;
//! - [`direct_space_estimate`]: `Γ(θ + 1) / Γ(θ + α) · p^α`, which is defined
//!   for negative arguments where `ln Γ` is not.
//!
//! Each value is kept only if it lies in `[0, p]`. Any arithmetic fault
//! (domain error, overflow, `∞/∞`) shows up as `NaN` or an out-of-range value
//! and demotes that formula alone. When both survive, the larger one wins.
use crate::{
    optimization::newton_raphson::Theta,
    special::{gamma, ln_gamma},
};

/// `exp(ln Γ(θ + 1) − ln Γ(θ + α)) · p^α`, or `NaN` outside `[0, p]`.
pub fn log_space_estimate(theta: f64, alpha: f64, p: f64) -> f64 {
    let value = (ln_gamma(theta + 1.0) - ln_gamma(theta + alpha)).exp() * p.powf(alpha);
    within_population(value, p)
}

/// `Γ(θ + 1) / Γ(θ + α) · p^α`, or `NaN` outside `[0, p]`.
pub fn direct_space_estimate(theta: f64, alpha: f64, p: f64) -> f64 {
    let value = (gamma(theta + 1.0) / gamma(theta + alpha)) * p.powf(alpha);
    within_population(value, p)
}

/// Combine the two estimates: the larger when both are valid, the valid one
/// when only one is, `NaN` otherwise.
pub fn select_estimate(log_space: f64, direct_space: f64) -> f64 {
    match (log_space.is_nan(), direct_space.is_nan()) {
        (true, true) => f64::NAN,
        (false, false) => log_space.max(direct_space),
        (true, false) => direct_space,
        (false, true) => log_space,
    }
}

/// Estimated number of population uniques for a solved `(θ, α)`.
///
/// Returns `NaN` immediately when the solver found no solution (both
/// components `NaN`, or `α == 0` with a `NaN` `θ`).
pub fn compile_result(theta_hat: &Theta, p: f64) -> f64 {
    let (t, a) = (theta_hat[0], theta_hat[1]);
    if (t.is_nan() && a.is_nan()) || (a == 0.0 && t.is_nan()) {
        return f64::NAN;
    }
    select_estimate(log_space_estimate(t, a, p), direct_space_estimate(t, a, p))
}

fn within_population(value: f64, p: f64) -> f64 {
    if value >= 0.0 && value <= p { value } else { f64::NAN }
}
