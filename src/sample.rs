//! Ordered sample of observations with lazily cached statistics.
//!
//! A [`Sample`] owns its values and computes each derived statistic on
//! first read. The result is memoized until the next mutation, at which
//! point every cached field is dropped at once. Several statistics are
//! built from others (standard deviation from variance, variance from
//! the mean), so the cache is invalidated as a whole rather than per
//! field.
//!
//! # Undefined results
//!
//! | Statistic | Requires |
//! |---|---|
//! | `sum`, `mean`, `median`, `min`, `max` | n ≥ 1 |
//! | `population_variance`, `population_std_dev` | n ≥ 1 |
//! | `sample_variance`, `sample_std_dev` | n ≥ 2 |
//!
//! Below the threshold the accessor returns `None`, never a default
//! such as `0.0`.
//!
//! # Concurrency
//!
//! The cache uses [`OnceCell`], so a `Sample` is `Send` but not `Sync`.
//! Share it across threads only behind the caller's own lock.

use std::cell::OnceCell;

use log::{debug, trace};

use crate::stats::kahan_sum;

#[derive(Debug, Clone, Default)]
struct Cache {
    sum: OnceCell<Option<f64>>,
    mean: OnceCell<Option<f64>>,
    median: OnceCell<Option<f64>>,
    squared_deviations: OnceCell<Option<f64>>,
    sample_variance: OnceCell<Option<f64>>,
    sample_std_dev: OnceCell<Option<f64>>,
    population_variance: OnceCell<Option<f64>>,
    population_std_dev: OnceCell<Option<f64>>,
    extremes: OnceCell<Option<(f64, f64)>>,
    sorted: OnceCell<bool>,
}

/// Mutable, ordered collection of real numbers with memoized statistics.
///
/// # Examples
/// ```
/// use u_statkit::Sample;
///
/// let mut s = Sample::from(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(s.mean(), Some(5.0));
/// assert_eq!(s.population_variance(), Some(4.0));
///
/// s.append(11.0);
/// assert_eq!(s.len(), 9);
/// assert_eq!(s.max(), Some(11.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sample {
    values: Vec<f64>,
    cache: Cache,
}

impl Sample {
    /// Creates an empty sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrows the observations in their current order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns an independent copy of the observations.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Appends one observation.
    pub fn append(&mut self, value: f64) {
        self.values.push(value);
        self.invalidate();
    }

    /// Appends every value in `values`, in order. An empty slice leaves
    /// the sample (and its cache) untouched.
    pub fn concat(&mut self, values: &[f64]) {
        if values.is_empty() {
            return;
        }
        self.values.extend_from_slice(values);
        self.invalidate();
    }

    /// Returns the observation at `index`, or `None` if out of range.
    pub fn get_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Overwrites the observation at `index`. Out-of-range writes are
    /// ignored.
    pub fn set_at(&mut self, index: usize, value: f64) {
        let Some(slot) = self.values.get_mut(index) else {
            debug!(
                "ignoring write at index {index}: sample has {} values",
                self.values.len()
            );
            return;
        };
        *slot = value;
        self.invalidate();
    }

    /// Sorts the observations in place, ascending.
    ///
    /// Uses IEEE 754 total ordering, so NaN values do not poison the
    /// sort. Afterwards [`is_sorted`](Self::is_sorted) is known to be
    /// true and [`median`](Self::median) reads the middle directly.
    pub fn sort(&mut self) {
        self.values.sort_by(f64::total_cmp);
        self.invalidate();
        self.mark_sorted();
    }

    /// Whether the observations are in non-decreasing order.
    ///
    /// Scanned once per mutation and cached.
    pub fn is_sorted(&self) -> bool {
        *self
            .cache
            .sorted
            .get_or_init(|| self.values.windows(2).all(|w| w[0] <= w[1]))
    }

    /// Sum of the observations (Neumaier-compensated).
    pub fn sum(&self) -> Option<f64> {
        *self.cache.sum.get_or_init(|| {
            if self.values.is_empty() {
                None
            } else {
                Some(kahan_sum(&self.values))
            }
        })
    }

    /// Arithmetic mean, `sum / n`.
    pub fn mean(&self) -> Option<f64> {
        *self
            .cache
            .mean
            .get_or_init(|| Some(self.sum()? / self.values.len() as f64))
    }

    /// Median: the middle value, or the average of the two central
    /// values for an even count.
    ///
    /// When the data is not already sorted the median is taken from a
    /// sorted copy; the caller's ordering is never changed.
    pub fn median(&self) -> Option<f64> {
        *self.cache.median.get_or_init(|| {
            if self.values.is_empty() {
                return None;
            }
            if self.is_sorted() {
                return Some(middle_of_sorted(&self.values));
            }
            trace!("median: sorting a copy of {} values", self.values.len());
            let mut sorted = self.values.clone();
            sorted.sort_by(f64::total_cmp);
            Some(middle_of_sorted(&sorted))
        })
    }

    /// Σ(v − mean)², shared by both variance flavours.
    pub(crate) fn squared_deviations(&self) -> Option<f64> {
        *self.cache.squared_deviations.get_or_init(|| {
            let m = self.mean()?;
            trace!("computing squared deviations over {} values", self.values.len());
            Some(self.values.iter().map(|&v| (v - m) * (v - m)).sum())
        })
    }

    /// Sample variance with Bessel's correction (denominator `n − 1`).
    ///
    /// `None` for fewer than two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        *self.cache.sample_variance.get_or_init(|| {
            let n = self.values.len();
            if n < 2 {
                return None;
            }
            Some(self.squared_deviations()? / (n - 1) as f64)
        })
    }

    /// Sample standard deviation, `√sample_variance`.
    pub fn sample_std_dev(&self) -> Option<f64> {
        *self
            .cache
            .sample_std_dev
            .get_or_init(|| self.sample_variance().map(f64::sqrt))
    }

    /// Population variance (denominator `n`).
    pub fn population_variance(&self) -> Option<f64> {
        *self.cache.population_variance.get_or_init(|| {
            Some(self.squared_deviations()? / self.values.len() as f64)
        })
    }

    /// Population standard deviation, `√population_variance`.
    pub fn population_std_dev(&self) -> Option<f64> {
        *self
            .cache
            .population_std_dev
            .get_or_init(|| self.population_variance().map(f64::sqrt))
    }

    pub fn min(&self) -> Option<f64> {
        self.extremes().map(|(lo, _)| lo)
    }

    pub fn max(&self) -> Option<f64> {
        self.extremes().map(|(_, hi)| hi)
    }

    /// Minimum and maximum, found together in one pass.
    fn extremes(&self) -> Option<(f64, f64)> {
        *self.cache.extremes.get_or_init(|| {
            let (&first, rest) = self.values.split_first()?;
            Some(rest.iter().fold((first, first), |(lo, hi), &v| {
                (if v < lo { v } else { lo }, if v > hi { v } else { hi })
            }))
        })
    }

    /// Reorders the observations so that position `i` receives the value
    /// previously at `order[i]`.
    ///
    /// `order` must be a permutation of `0..self.len()`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.values.len());
        self.values = order.iter().map(|&i| self.values[i]).collect();
        self.invalidate();
    }

    pub(crate) fn mark_sorted(&mut self) {
        // The cell was just reset, so this cannot collide with a prior value.
        let _ = self.cache.sorted.set(true);
    }

    fn invalidate(&mut self) {
        self.cache = Cache::default();
    }
}

/// Middle element (odd n) or mean of the two central elements (even n).
/// `sorted` must be non-empty.
fn middle_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Stable ascending ordering of `keys`, as a permutation of indices.
///
/// Applying the result with [`Sample::permute`] to several parallel
/// samples moves every row as a unit.
pub(crate) fn sort_order(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self {
            values,
            cache: Cache::default(),
        }
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Self::from(values.to_vec())
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<f64> for Sample {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        let values: Vec<f64> = iter.into_iter().collect();
        self.concat(&values);
    }
}

// ============================================================================
// Tests
// ============================================================================
