//! uniqueness — population-uniqueness estimation from sampled equivalence
//! classes.
//!
//! Purpose
//! -------
//! Estimate how many records of a population are unique on their
//! quasi-identifiers, given only the equivalence-class histogram of a sample
//! and the population size. The estimate comes from the generalized Pitman
//! species-sampling model fitted by maximum likelihood.
//!
//! Key behaviors
//! -------------
//! - `core`: validated inputs (histogram, population model, sample
//!   statistics), cooperative cancellation, seeding and options.
//! - `models`: score-equation evaluators, the result compiler and the
//!   [`PitmanModel`] entry point.
//! - `errors`: [`RiskError`] / [`RiskResult`], including the dedicated
//!   cancellation variant.
//!
//! Conventions
//! -----------
//! - Three outcomes are possible: a finite estimate in `[0, p]`, `NaN`
//!   ("no defensible estimate"), or `Err(RiskError::Cancelled)`.
//! - Invalid input is rejected before any iteration starts.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_uniqueness::uniqueness::prelude::*;
//!
//! let hist = EquivalenceClassHistogram::new([(1, 50), (2, 10), (3, 5)])?;
//! let pop = PopulationModel::from_population_size(10_000.0)?;
//! let flag = CancellationFlag::new();
//! let model = PitmanModel::new(&hist, 85, &pop, &PitmanOptions::default(), &flag)?;
//! println!("estimated population uniques: {}", model.num_uniques());
//! # Ok::<(), rust_uniqueness::uniqueness::RiskError>(())
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    CancellationFlag, CancellationGate, EquivalenceClassHistogram, NeverCancel, PitmanOptions,
    PopulationModel, SampleStatistics, Strategy,
};
pub use self::errors::{RiskError, RiskResult};
pub use self::models::{PitmanFit, PitmanModel};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_uniqueness::uniqueness::prelude::*;
//
// to import the main estimation surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{RiskError, RiskResult};
    pub use super::models::prelude::*;
}
