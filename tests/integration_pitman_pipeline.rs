//! Integration tests for the Pitman uniqueness pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end estimation: from raw class sizes or a
//!   histogram, through sample statistics, seeding and the Newton-Raphson
//!   root solve, to the compiled population-uniques estimate.
//! - Check the three-way outcome contract: a finite estimate in `[0, p]`,
//!   `NaN`, or a cancellation error.
//!
//! Coverage
//! --------
//! - `uniqueness::core`:
//!   - `EquivalenceClassHistogram` from pairs and from raw class sizes.
//!   - `PopulationModel` by size and by sampling fraction.
//!   - `CancellationFlag` shared across threads.
//! - `uniqueness::models::PitmanModel`:
//!   - Both evaluator strategies, reproducibility, fail-fast validation.
//!
//! Exclusions
//! ----------
//! - Evaluator formulas, Jacobian accuracy and result-compiler branches;
//!   these are covered by unit tests.
//! - Python bindings.
use std::{cell::Cell, thread};

use approx::assert_relative_eq;
use rust_uniqueness::{
    optimization::newton_raphson::{NewtonOptions, StepDamping, Tolerances},
    uniqueness::{
        core::{
            cancel::{CancellationFlag, CancellationGate, NeverCancel},
            histogram::EquivalenceClassHistogram,
            init::initial_guess,
            options::{PitmanOptions, Strategy},
            population::PopulationModel,
            stats::SampleStatistics,
        },
        errors::RiskError,
        models::pitman::PitmanModel,
    },
};

/// Class sizes of a heavy-tailed sample: 50 singletons, 10 pairs, 5 triples,
/// 3 classes of 5, 2 of 10 and 1 of 30 (n = 150, u = 71).
fn heavy_tailed_class_sizes() -> Vec<usize> {
    let mut sizes = Vec::new();
    for (size, count) in [(1, 50), (2, 10), (3, 5), (5, 3), (10, 2), (30, 1)] {
        sizes.extend(std::iter::repeat(size).take(count));
    }
    sizes
}

fn assert_defensible(value: f64, p: f64) {
    assert!(value.is_nan() || (value >= 0.0 && value <= p), "estimate {value} outside [0, {p}]");
}

#[test]
// Purpose
// -------
// Run the small reference histogram through both strategies.
//
// Given
// -----
// - Histogram {(1,50),(2,20),(3,5)}, n = 105, p = 10 000.
//
// Expect
// ------
// - A finite seed.
// - Each strategy returns NaN or a value in [0, p].
// - Repeated runs are bit-identical.
fn pitman_reference_histogram_yields_defensible_estimate() {
    // Arrange
    let hist = EquivalenceClassHistogram::new([(1, 50), (2, 20), (3, 5)]).unwrap();
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let stats = SampleStatistics::new(&hist, 105, &pop).unwrap();
    let seed = initial_guess(&stats);
    assert!(seed.iter().all(|v| v.is_finite()));

    for strategy in [Strategy::ClosedForm, Strategy::Iterative] {
        let opts = PitmanOptions { strategy, ..PitmanOptions::default() };

        // Act
        let first = PitmanModel::new(&hist, 105, &pop, &opts, &NeverCancel).unwrap();
        let second = PitmanModel::new(&hist, 105, &pop, &opts, &NeverCancel).unwrap();

        // Assert
        assert_defensible(first.num_uniques(), 10_000.0);
        assert_eq!(first.num_uniques().to_bits(), second.num_uniques().to_bits());
        assert_eq!(first.fit(), second.fit());
        assert_eq!(first.fit().seed, seed);
    }
}

#[test]
// Purpose
// -------
// Drive the pipeline from raw class sizes and a sampling fraction.
//
// Expect
// ------
// - The histogram matches the generating pairs.
// - p = n / f and the estimate agrees with the unit-level reference.
fn pitman_pipeline_from_class_sizes_and_sampling_fraction() {
    // Arrange
    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let pop = PopulationModel::from_sampling_fraction(0.015).unwrap();

    // Act
    let model = PitmanModel::new(&hist, 150, &pop, &PitmanOptions::default(), &NeverCancel)
        .unwrap();

    // Assert
    assert_eq!(hist.num_records(), 150);
    assert_eq!(hist.num_classes(), 71);
    assert_eq!(hist.num_classes_of_size(30), 1);
    assert_relative_eq!(model.stats().p, 10_000.0, max_relative = 1e-12);
    assert!(model.fit().converged);
    assert_relative_eq!(model.num_uniques(), 761.184_996_325_66, max_relative = 1e-6);
    assert_defensible(model.num_uniques(), model.stats().p);
}

#[test]
// Purpose
// -------
// Check that damped steps reach the same root as full steps.
fn pitman_backtracking_agrees_with_full_steps() {
    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let damped = PitmanOptions::new(
        Strategy::ClosedForm,
        NewtonOptions::new(Tolerances::default(), StepDamping::backtracking(30).unwrap(), 8, false),
    );

    let full = PitmanModel::new(&hist, 150, &pop, &PitmanOptions::default(), &NeverCancel)
        .unwrap();
    let backtracked = PitmanModel::new(&hist, 150, &pop, &damped, &NeverCancel).unwrap();

    assert!(backtracked.fit().converged);
    assert_relative_eq!(backtracked.theta(), full.theta(), max_relative = 1e-5);
    assert_relative_eq!(backtracked.alpha(), full.alpha(), max_relative = 1e-5);
    assert_relative_eq!(backtracked.num_uniques(), full.num_uniques(), max_relative = 1e-5);
}

#[test]
// Purpose
// -------
// Ensure invalid input is rejected before any iteration.
fn pitman_rejects_degenerate_inputs() {
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let opts = PitmanOptions::default();

    let single = EquivalenceClassHistogram::new([(1, 1)]).unwrap();
    assert_eq!(
        PitmanModel::new(&single, 1, &pop, &opts, &NeverCancel),
        Err(RiskError::SampleTooSmall { n: 1 })
    );

    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let tiny = PopulationModel::from_population_size(100.0).unwrap();
    assert!(matches!(
        PitmanModel::new(&hist, 150, &tiny, &opts, &NeverCancel),
        Err(RiskError::PopulationTooSmall { sample: 150, .. })
    ));

    assert_eq!(EquivalenceClassHistogram::new(Vec::new()), Err(RiskError::EmptyHistogram));
    assert_eq!(
        EquivalenceClassHistogram::new([(2, 3), (2, 1)]),
        Err(RiskError::DuplicateClassSize { size: 2 })
    );
}

#[test]
// Purpose
// -------
// Verify a cancellation request from another thread is honoured and that
// a reset flag can be reused.
//
// Expect
// ------
// - Err(Cancelled) while the flag is set, never a number.
// - A normal estimate after `reset`.
fn pitman_honours_cross_thread_cancellation() {
    // Arrange
    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let flag = CancellationFlag::new();
    let remote = flag.clone();
    thread::spawn(move || remote.cancel()).join().unwrap();

    for strategy in [Strategy::ClosedForm, Strategy::Iterative] {
        let opts = PitmanOptions { strategy, ..PitmanOptions::default() };

        // Act / Assert
        assert_eq!(PitmanModel::new(&hist, 150, &pop, &opts, &flag), Err(RiskError::Cancelled));
    }

    flag.reset();
    let model = PitmanModel::new(&hist, 150, &pop, &PitmanOptions::default(), &flag).unwrap();
    assert!(model.num_uniques().is_finite());
}

#[test]
// Purpose
// -------
// Run independent estimations concurrently on shared inputs.
fn pitman_concurrent_estimations_match_sequential() {
    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let opts = PitmanOptions::default();
    let sequential = PitmanModel::new(&hist, 150, &pop, &opts, &NeverCancel).unwrap();

    let results: Vec<f64> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    let flag = CancellationFlag::new();
                    PitmanModel::new(&hist, 150, &pop, &opts, &flag).unwrap().num_uniques()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for value in results {
        assert_eq!(value.to_bits(), sequential.num_uniques().to_bits());
    }
}

/// Host-defined gate that allows a fixed number of polls, then cancels.
struct PollBudget {
    remaining: Cell<usize>,
}

impl CancellationGate for PollBudget {
    fn is_cancelled(&self) -> bool {
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }
}

#[test]
// Purpose
// -------
// Verify a custom gate that cancels once the solver is already iterating
// aborts the estimation with an error, never a number.
//
// Given
// -----
// - 30 polls allowed: enough for the up-front checkpoint and several
//   closed-form evaluations, far short of a converged solve.
fn pitman_custom_gate_cancels_mid_solve() {
    let hist = EquivalenceClassHistogram::from_class_sizes(heavy_tailed_class_sizes()).unwrap();
    let pop = PopulationModel::from_population_size(10_000.0).unwrap();
    let gate = PollBudget { remaining: Cell::new(30) };

    let out = PitmanModel::new(&hist, 150, &pop, &PitmanOptions::default(), &gate);

    assert_eq!(out, Err(RiskError::Cancelled));
    assert_eq!(gate.remaining.get(), 0);
}
