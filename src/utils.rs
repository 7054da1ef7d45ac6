//! utils — conversion helpers for the PyO3 boundary.
//!
//! Everything here turns loosely typed Python arguments into validated Rust
//! inputs. Validation errors are routed through [`RiskError`] so Python sees
//! the same messages as Rust callers.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::newton_raphson::{NewtonOptions, StepDamping, Tolerances},
    uniqueness::{
        core::{
            histogram::EquivalenceClassHistogram,
            options::{PitmanOptions, Strategy},
            population::PopulationModel,
        },
        errors::RiskError,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

/// Read a 1-D array of non-negative integers from a numpy array, a pandas
/// Series or any Python sequence of ints.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_count_array<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<usize>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<i64>>() {
        return to_counts(arr_ro.as_array().iter().copied());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<i64>>() {
            return to_counts(series_ro.as_array().iter().copied());
        }
    }

    let vec: Vec<i64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of int64",
        )
    })?;
    to_counts(vec)
}

#[cfg(feature = "python-bindings")]
fn to_counts<I: IntoIterator<Item = i64>>(values: I) -> PyResult<Vec<usize>> {
    values
        .into_iter()
        .map(|v| {
            usize::try_from(v)
                .map_err(|_| PyValueError::new_err(format!("expected a non-negative integer, got {v}")))
        })
        .collect()
}

/// Build a histogram from parallel `sizes` / `counts` arrays.
#[cfg(feature = "python-bindings")]
pub fn extract_histogram<'py>(
    sizes: &Bound<'py, PyAny>, counts: &Bound<'py, PyAny>,
) -> PyResult<EquivalenceClassHistogram> {
    let sizes = extract_count_array(sizes)?;
    let counts = extract_count_array(counts)?;
    if sizes.len() != counts.len() {
        return Err(RiskError::LengthMismatch { sizes: sizes.len(), counts: counts.len() }.into());
    }
    Ok(EquivalenceClassHistogram::new(sizes.into_iter().zip(counts))?)
}

/// Exactly one of `population_size` and `sampling_fraction` must be given.
#[cfg(feature = "python-bindings")]
pub fn extract_population(
    population_size: Option<f64>, sampling_fraction: Option<f64>,
) -> PyResult<PopulationModel> {
    match (population_size, sampling_fraction) {
        (Some(p), None) => Ok(PopulationModel::from_population_size(p)?),
        (None, Some(f)) => Ok(PopulationModel::from_sampling_fraction(f)?),
        _ => Err(PyValueError::new_err(
            "exactly one of population_size and sampling_fraction must be given",
        )),
    }
}

/// Assemble [`PitmanOptions`] from optional keyword arguments, falling back
/// to the defaults for anything left unset.
#[cfg(feature = "python-bindings")]
pub fn extract_pitman_options(
    strategy: Option<&str>, accuracy: Option<f64>, max_iter: Option<usize>,
    max_iter_total: Option<usize>, restarts: Option<usize>, damping: Option<&str>,
) -> PyResult<PitmanOptions> {
    use std::str::FromStr;

    let defaults = NewtonOptions::default();

    let strategy = match strategy {
        Some(name) => Strategy::from_str(name)?,
        None => Strategy::default(),
    };

    // Tolerances::new -> OptResult<Tolerances> -> RiskError -> PyErr
    let tols = Tolerances::new(
        accuracy.unwrap_or(defaults.tols.accuracy),
        max_iter.unwrap_or(defaults.tols.max_iter_per_try),
        max_iter_total.unwrap_or(defaults.tols.max_iter_total),
    )
    .map_err(RiskError::from)?;

    let damping = match damping {
        Some(name) => StepDamping::from_str(name).map_err(RiskError::from)?,
        None => defaults.damping,
    };

    let newton =
        NewtonOptions::new(tols, damping, restarts.unwrap_or(defaults.restarts), defaults.verbose);
    Ok(PitmanOptions::new(strategy, newton))
}
