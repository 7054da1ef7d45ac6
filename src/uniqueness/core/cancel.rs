//! Cooperative cancellation for long-running estimations.
//!
//! Purpose
//! -------
//! Let the host abort an estimation from another thread (user abort,
//! deadline) without preemption. Evaluators poll the gate at every unit of
//! work and unwind with [`RiskError::Cancelled`] once a request is seen.
//!
//! Key behaviors
//! -------------
//! - [`CancellationGate`] is the seam evaluators are written against, so a
//!   test or host can supply its own polling policy.
//! - [`CancellationFlag`] is the standard gate: a cloneable handle around a
//!   shared atomic boolean. Clones observe the same flag; independent
//!   estimations should use independent flags.
//! - [`NeverCancel`] is the zero-cost gate for callers that never abort.
//!
//! Invariants & assumptions
//! ------------------------
//! - A gate only ever reports a request; it never resets itself.
//! - Cancellation is a distinct outcome. It must never be folded into a
//!   numeric result or a `NaN`.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::uniqueness::errors::{RiskError, RiskResult};

/// Polled cancellation source.
pub trait CancellationGate {
    /// `true` once cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Return `Err(RiskError::Cancelled)` if cancellation has been requested.
    fn checkpoint(&self) -> RiskResult<()> {
        if self.is_cancelled() {
            return Err(RiskError::Cancelled);
        }
        Ok(())
    }
}

/// Shared cancellation flag.
///
/// `cancel` uses `Release` and `is_cancelled` uses `Acquire`, so work done by
/// the cancelling thread before the request is visible to the estimator
/// once it observes the flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    inner: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Fresh, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Release);
    }

    /// Clear a previous request so the flag can be reused for a new
    /// estimation.
    pub fn reset(&self) {
        self.inner.store(false, Ordering::Release);
    }
}

impl CancellationGate for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }
}

/// Gate that never reports cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationGate for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<G: CancellationGate + ?Sized> CancellationGate for &G {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
