//! uniqueness::core — validated inputs and building blocks of the estimators.
//!
//! Purpose
//! -------
//! Hold everything an estimator needs before the numerics start: the
//! equivalence-class histogram, the population model, the derived sample
//! statistics, the cancellation gate, the closed-form seed and the options.
//!
//! Key behaviors
//! -------------
//! - Enforce the input contract (non-empty histogram, positive sizes and
//!   counts, consistent sample size, `p ≥ n`) at construction time.
//! - Keep all types immutable after construction so that independent
//!   estimations can share inputs across threads.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each type; end-to-end behavior is covered in
//!   `uniqueness::models` and the integration tests.

pub mod cancel;
pub mod histogram;
pub mod init;
pub mod options;
pub mod population;
pub mod stats;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cancel::{CancellationFlag, CancellationGate, NeverCancel};
pub use self::histogram::EquivalenceClassHistogram;
pub use self::init::initial_guess;
pub use self::options::{PitmanOptions, Strategy};
pub use self::population::PopulationModel;
pub use self::stats::SampleStatistics;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::cancel::{CancellationFlag, CancellationGate, NeverCancel};
    pub use super::histogram::EquivalenceClassHistogram;
    pub use super::options::{PitmanOptions, Strategy};
    pub use super::population::PopulationModel;
    pub use super::stats::SampleStatistics;
}
