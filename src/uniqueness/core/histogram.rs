//! Equivalence-class histogram: how many classes of each size were sampled.
//!
//! Purpose
//! -------
//! Provide the validated input container for the uniqueness estimators. A
//! sampled dataset partitioned into equivalence classes is summarized by the
//! mapping `class size → number of classes of that size`; estimators never
//! see individual records.
//!
//! Key behaviors
//! -------------
//! - [`EquivalenceClassHistogram::new`] validates `(size, count)` pairs and
//!   stores them sorted by size.
//! - [`EquivalenceClassHistogram::from_class_sizes`] builds the histogram from
//!   raw per-class sizes.
//! - `num_records()` (`n`) and `num_classes()` (`u`) are computed once at
//!   construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Non-empty; every size ≥ 1 and every count ≥ 1; sizes are unique.
//! - Iteration order is ascending by size, so every sum over the histogram
//!   is computed in the same order and results are bit-for-bit reproducible.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, each rejection rule, and construction
//!   from raw class sizes.
use std::collections::BTreeMap;

use crate::uniqueness::errors::{RiskError, RiskResult};

/// Validated `class size → class count` histogram.
///
/// Fields
/// ------
/// - `entries`: `(size, count)` pairs sorted ascending by size.
/// - `num_records`: `n = Σ size · count`.
/// - `num_classes`: `u = Σ count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClassHistogram {
    entries: Vec<(usize, usize)>,
    num_records: usize,
    num_classes: usize,
}

impl EquivalenceClassHistogram {
    /// Construct a histogram from `(size, count)` pairs in any order.
    ///
    /// Errors
    /// ------
    /// - `RiskError::EmptyHistogram` when no pairs are given.
    /// - `RiskError::InvalidClassSize { size }` when a size is 0.
    /// - `RiskError::InvalidClassCount { size, count }` when a count is 0.
    /// - `RiskError::DuplicateClassSize { size }` when a size repeats.
    /// - `RiskError::HistogramOverflow { size, count }` when `n` or `u` does
    ///   not fit in `usize`.
    pub fn new<I>(pairs: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut entries: Vec<(usize, usize)> = pairs.into_iter().collect();
        if entries.is_empty() {
            return Err(RiskError::EmptyHistogram);
        }
        for &(size, count) in &entries {
            if size == 0 {
                return Err(RiskError::InvalidClassSize { size });
            }
            if count == 0 {
                return Err(RiskError::InvalidClassCount { size, count });
            }
        }
        entries.sort_unstable_by_key(|&(size, _)| size);
        if let Some(w) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(RiskError::DuplicateClassSize { size: w[0].0 });
        }

        let (mut num_records, mut num_classes) = (0usize, 0usize);
        for &(size, count) in &entries {
            let overflow = RiskError::HistogramOverflow { size, count };
            num_records = size
                .checked_mul(count)
                .and_then(|records| num_records.checked_add(records))
                .ok_or_else(|| overflow.clone())?;
            num_classes = num_classes.checked_add(count).ok_or(overflow)?;
        }
        Ok(Self { entries, num_records, num_classes })
    }

    /// Build a histogram from one size per equivalence class.
    ///
    /// Errors
    /// ------
    /// Same as [`EquivalenceClassHistogram::new`]; a class of size 0 is
    /// rejected with `RiskError::InvalidClassSize`.
    pub fn from_class_sizes<I>(sizes: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for size in sizes {
            *counts.entry(size).or_insert(0) += 1;
        }
        Self::new(counts)
    }

    /// Number of classes of exactly `size` records (0 when absent).
    pub fn num_classes_of_size(&self, size: usize) -> usize {
        self.entries
            .binary_search_by_key(&size, |&(s, _)| s)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0)
    }

    /// Total number of classes `u`.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Total number of sampled records `n`.
    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// `(size, count)` pairs in ascending size order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct class sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed histogram.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
