//! rust_uniqueness — population-uniqueness risk estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the re-identification risk estimators to Python via the `_rust_uniqueness`
//! extension module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing classes and submodules used by the
//! `rust_uniqueness` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`uniqueness`, `optimization`, `special`)
//!   as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_uniqueness` Python extension.
//! - Create and register the `risk_models` Python submodule under
//!   `rust_uniqueness` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Estimations run with the GIL released, so a Python thread holding a
//!   [`CancelToken`] can abort a running estimation.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_uniqueness.risk_models` and are
//!   wrapped by thin pure-Python facades in the top-level `rust_uniqueness`
//!   package.
//! - Errors from core Rust code are propagated as [`RiskError`] internally and
//!   converted to `PyErr` values at the PyO3 boundary; cancellation maps to
//!   `InterruptedError`, everything else to `ValueError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`uniqueness`] and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the Rust integration tests under `tests/`.
//!
//! [`RiskError`]: crate::uniqueness::errors::RiskError

pub mod optimization;
pub mod special;
pub mod uniqueness;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    uniqueness::{core::cancel::CancellationFlag, models::pitman::PitmanModel},
    utils::{extract_histogram, extract_pitman_options, extract_population},
};

/// CancelToken — Python-facing handle for cooperative cancellation.
///
/// Purpose
/// -------
/// Let Python code abort an estimation running on another thread. The token
/// wraps a [`CancellationFlag`]; every clone handed to an estimation observes
/// the same request.
///
/// Notes
/// -----
/// - A token stays cancelled until `reset()` is called; reusing a cancelled
///   token makes every subsequent estimation fail immediately.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_uniqueness.risk_models")]
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: CancellationFlag,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CancelToken {
    #[new]
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Request cancellation of every estimation observing this token.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Clear a previous request.
    pub fn reset(&self) {
        self.inner.reset();
    }

    #[getter]
    pub fn cancelled(&self) -> bool {
        use crate::uniqueness::core::cancel::CancellationGate;
        self.inner.is_cancelled()
    }
}

/// Pitman — Python-facing wrapper for the Pitman uniqueness estimator.
///
/// Purpose
/// -------
/// Run a [`PitmanModel`] estimation from Python arguments and expose the
/// estimate and solver diagnostics as read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Pitman(sizes, counts, sample_size, population_size=None,
/// sampling_fraction=None, strategy=None, accuracy=None, max_iter=None,
/// max_iter_total=None, restarts=None, damping=None, cancel=None)`:
/// - `sizes`, `counts`: array-like of non-negative ints
///   Parallel arrays: `counts[i]` classes of size `sizes[i]` in the sample.
/// - `sample_size`: `usize`
///   Declared number of sampled records; must equal `Σ sizes[i]·counts[i]`.
/// - `population_size` / `sampling_fraction`: `Option<f64>`
///   Exactly one must be given.
/// - `strategy`: `"ClosedForm"` (default) or `"Iterative"`.
/// - `accuracy`, `max_iter`, `max_iter_total`, `restarts`, `damping`
///   Solver configuration used to build [`NewtonOptions`].
/// - `cancel`: optional [`CancelToken`].
///
/// Invariants
/// ----------
/// - `inner` is always a completed estimation; a cancelled or invalid
///   estimation raises instead of constructing the object.
///
/// [`NewtonOptions`]: crate::optimization::newton_raphson::NewtonOptions
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_uniqueness.risk_models")]
pub struct Pitman {
    inner: PitmanModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Pitman {
    #[new]
    #[pyo3(
        text_signature = "(sizes, counts, sample_size, /, population_size=None, sampling_fraction=None, strategy=None, accuracy=None, max_iter=None, max_iter_total=None, restarts=None, damping=None, cancel=None)",
        signature = (
            sizes, counts, sample_size, population_size = None, sampling_fraction = None,
            strategy = None, accuracy = None, max_iter = None, max_iter_total = None,
            restarts = None, damping = None, cancel = None
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, sizes: &Bound<'py, PyAny>, counts: &Bound<'py, PyAny>,
        sample_size: usize, population_size: Option<f64>, sampling_fraction: Option<f64>,
        strategy: Option<&str>, accuracy: Option<f64>, max_iter: Option<usize>,
        max_iter_total: Option<usize>, restarts: Option<usize>, damping: Option<&str>,
        cancel: Option<CancelToken>,
    ) -> PyResult<Pitman> {
        let histogram = extract_histogram(sizes, counts)?;
        let population = extract_population(population_size, sampling_fraction)?;
        let options = extract_pitman_options(
            strategy,
            accuracy,
            max_iter,
            max_iter_total,
            restarts,
            damping,
        )?;
        let flag = cancel.map(|t| t.inner).unwrap_or_default();

        let inner = py.allow_threads(|| {
            PitmanModel::new(&histogram, sample_size, &population, &options, &flag)
        })?;
        Ok(Pitman { inner })
    }

    /// Estimated number of population uniques; `nan` when no defensible
    /// estimate exists.
    #[getter]
    pub fn num_uniques(&self) -> f64 {
        self.inner.num_uniques()
    }

    #[getter]
    pub fn theta(&self) -> f64 {
        self.inner.theta()
    }

    #[getter]
    pub fn alpha(&self) -> f64 {
        self.inner.alpha()
    }

    #[getter]
    pub fn population_size(&self) -> f64 {
        self.inner.stats().p
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.fit().converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.fit().status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.fit().iterations
    }

    #[getter]
    pub fn evaluations(&self) -> usize {
        self.inner.fit().evaluations
    }

    #[getter]
    pub fn tries(&self) -> usize {
        self.inner.fit().tries
    }

    /// Closed-form start value `(θ₀, α₀)`.
    #[getter]
    pub fn seed(&self) -> (f64, f64) {
        let seed = &self.inner.fit().seed;
        (seed[0], seed[1])
    }
}

/// _rust_uniqueness — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_uniqueness` Python module and register the
/// `risk_models` submodule used by the public `rust_uniqueness` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_uniqueness<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let risk_models_mod = PyModule::new(_py, "risk_models")?;
    risk_models(_py, m, &risk_models_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_uniqueness.risk_models", risk_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn risk_models<'py>(
    _py: Python, rust_uniqueness: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Pitman>()?;
    m.add_class::<CancelToken>()?;
    rust_uniqueness.add_submodule(m)?;
    Ok(())
}
