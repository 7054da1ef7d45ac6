//! Errors for the uniqueness estimators (input validation, population model
//! checks, cancellation, and solver failures).
//!
//! This module defines [`RiskError`], used across the Python-facing API and
//! the internal Rust core. It implements `Display`/`Error` and, with the
//! `python-bindings` feature, converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - Class sizes and class counts are **strictly positive integers**.
//! - The population size must be finite and at least the sample size.
//! - Numerical non-convergence is **not** an error: estimators report it as
//!   a `NaN` estimate. Only invalid input, cancellation and configuration
//!   mistakes in the solver surface as [`RiskError`].
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyInterruptedError, PyValueError},
};

use crate::optimization::errors::OptError;

/// Result alias for uniqueness-estimation operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Unified error type for uniqueness estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    // ---- Histogram validation ----
    /// Histogram has no entries.
    EmptyHistogram,

    /// Equivalence-class sizes must be ≥ 1.
    InvalidClassSize { size: usize },

    /// Every listed class size needs at least one class.
    InvalidClassCount { size: usize, count: usize },

    /// A class size was listed twice.
    DuplicateClassSize { size: usize },

    /// Declared sample size disagrees with Σ size·count.
    SampleSizeMismatch { declared: usize, actual: usize },

    /// At least two records are needed for the Pitman statistics.
    SampleTooSmall { n: usize },

    /// Size and count arrays have different lengths.
    LengthMismatch { sizes: usize, counts: usize },

    /// Record or class totals do not fit in `usize`.
    HistogramOverflow { size: usize, count: usize },

    // ---- Population model ----
    /// Population size must be finite.
    InvalidPopulationSize { value: f64 },

    /// Population size must be at least the sample size.
    PopulationTooSmall { population: f64, sample: usize },

    /// Sampling fraction must be finite and in (0, 1].
    InvalidSamplingFraction { value: f64 },

    // ---- Options ----
    /// Unknown evaluator strategy name.
    InvalidStrategyName { name: String },

    // ---- Cancellation ----
    /// A cancellation request was observed during estimation.
    Cancelled,

    // ---- Estimation / optimizer ----
    /// Solver configuration or backend failure.
    Optimization { text: String },
}

impl std::error::Error for RiskError {}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Histogram validation ----
            RiskError::EmptyHistogram => {
                write!(f, "Equivalence-class histogram is empty.")
            }
            RiskError::InvalidClassSize { size } => {
                write!(f, "Equivalence-class size must be >= 1; got: {size}")
            }
            RiskError::InvalidClassCount { size, count } => {
                write!(f, "Class count for size {size} must be >= 1; got: {count}")
            }
            RiskError::DuplicateClassSize { size } => {
                write!(f, "Class size {size} appears more than once in the histogram.")
            }
            RiskError::SampleSizeMismatch { declared, actual } => {
                write!(
                    f,
                    "Sample size {declared} does not match the histogram's record count {actual}."
                )
            }
            RiskError::SampleTooSmall { n } => {
                write!(f, "At least two sampled records are required; got: {n}")
            }
            RiskError::LengthMismatch { sizes, counts } => {
                write!(f, "Got {sizes} class sizes but {counts} class counts.")
            }
            RiskError::HistogramOverflow { size, count } => {
                write!(f, "Histogram totals overflow at {count} classes of size {size}.")
            }
            // ---- Population model ----
            RiskError::InvalidPopulationSize { value } => {
                write!(f, "Population size must be finite; got: {value}")
            }
            RiskError::PopulationTooSmall { population, sample } => {
                write!(f, "Population size {population} is smaller than the sample size {sample}.")
            }
            RiskError::InvalidSamplingFraction { value } => {
                write!(f, "Sampling fraction must be finite and in (0, 1]; got: {value}")
            }
            // ---- Options ----
            RiskError::InvalidStrategyName { name } => {
                write!(
                    f,
                    "Invalid evaluator strategy '{name}'. Valid options are case insensitive 'Iterative' or 'ClosedForm'."
                )
            }
            // ---- Cancellation ----
            RiskError::Cancelled => {
                write!(f, "Estimation was cancelled.")
            }
            // ---- Estimation / optimizer ----
            RiskError::Optimization { text } => {
                write!(f, "Optimizer failed: {text}")
            }
        }
    }
}

/// Convert a [`RiskError`] into a Python exception.
///
/// Cancellation maps to `InterruptedError`; everything else to `ValueError`.
#[cfg(feature = "python-bindings")]
impl std::convert::From<RiskError> for PyErr {
    fn from(err: RiskError) -> PyErr {
        match err {
            RiskError::Cancelled => PyInterruptedError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

impl From<OptError> for RiskError {
    fn from(err: OptError) -> RiskError {
        match err {
            OptError::Cancelled => RiskError::Cancelled,
            other => RiskError::Optimization { text: other.to_string() },
        }
    }
}
