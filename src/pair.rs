//! Bivariate samples: two index-aligned axes and their joint statistics.
//!
//! A [`CorrelatedPair`] owns an x [`Sample`] and a y [`Sample`] of equal
//! length. The only mutation entry points act on whole points, so the
//! axes can never drift out of alignment. Per-axis statistics are read
//! through [`CorrelatedPair::x`] and [`CorrelatedPair::y`]; joint
//! statistics are memoized here and dropped on every mutation.
//!
//! # Formulas
//!
//! With co-moment `Sxy = Σ(xᵢ − x̄)(yᵢ − ȳ)` and `Sxx = Σ(xᵢ − x̄)²`:
//!
//! | Statistic | Definition |
//! |---|---|
//! | sample covariance | Sxy / (n − 1) |
//! | population covariance | Sxy / n |
//! | correlation | covariance / (σx · σy), same flavour throughout |
//! | slope | Sxy / Sxx |
//! | intercept | ȳ − slope · x̄ |

use std::cell::OnceCell;

use log::debug;

use crate::error::{StatsError, StatsResult};
use crate::sample::{sort_order, Sample};

/// Which coordinate drives a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Ordinary least-squares line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, Default)]
struct JointCache {
    co_moment: OnceCell<Option<f64>>,
    sample_covariance: OnceCell<Option<f64>>,
    population_covariance: OnceCell<Option<f64>>,
    sample_correlation: OnceCell<Option<f64>>,
    population_correlation: OnceCell<Option<f64>>,
    fit: OnceCell<StatsResult<LinearFit>>,
}

/// Two index-synchronized samples with cached joint statistics.
///
/// # Examples
/// ```
/// use u_statkit::CorrelatedPair;
///
/// let pair = CorrelatedPair::new(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((pair.sample_covariance().unwrap() - 2.0).abs() < 1e-12);
/// assert!((pair.sample_correlation().unwrap() - 1.0).abs() < 1e-12);
///
/// let fit = pair.line_of_best_fit().unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!(fit.intercept.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CorrelatedPair {
    x: Sample,
    y: Sample,
    cache: JointCache,
}

impl CorrelatedPair {
    /// Builds a pair from two coordinate slices, truncating the longer
    /// one so every x has a matching y.
    pub fn new(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len().min(ys.len());
        if xs.len() != ys.len() {
            debug!(
                "truncating pair input to {n} points (x: {}, y: {})",
                xs.len(),
                ys.len()
            );
        }
        Self {
            x: Sample::from(&xs[..n]),
            y: Sample::from(&ys[..n]),
            cache: JointCache::default(),
        }
    }

    /// Builds a pair from `(x, y)` points.
    pub fn from_points<I: IntoIterator<Item = (f64, f64)>>(points: I) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Self {
            x: Sample::from(xs),
            y: Sample::from(ys),
            cache: JointCache::default(),
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The x axis, read-only.
    pub fn x(&self) -> &Sample {
        &self.x
    }

    /// The y axis, read-only.
    pub fn y(&self) -> &Sample {
        &self.y
    }

    pub fn x_at(&self, index: usize) -> Option<f64> {
        self.x.get_at(index)
    }

    pub fn y_at(&self, index: usize) -> Option<f64> {
        self.y.get_at(index)
    }

    /// The `(x, y)` point at `index`, or `None` if out of range.
    pub fn point_at(&self, index: usize) -> Option<(f64, f64)> {
        Some((self.x.get_at(index)?, self.y.get_at(index)?))
    }

    /// Copies every point out, in current order.
    pub fn to_points(&self) -> Vec<(f64, f64)> {
        self.x
            .values()
            .iter()
            .copied()
            .zip(self.y.values().iter().copied())
            .collect()
    }

    /// Appends one point.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.x.append(x);
        self.y.append(y);
        self.invalidate();
    }

    /// Appends points from two coordinate slices. Values in the longer
    /// slice with no partner are dropped.
    pub fn concat(&mut self, xs: &[f64], ys: &[f64]) {
        let n = xs.len().min(ys.len());
        if xs.len() != ys.len() {
            debug!(
                "dropping {} unmatched values from pair concat",
                xs.len().max(ys.len()) - n
            );
        }
        if n == 0 {
            return;
        }
        self.x.concat(&xs[..n]);
        self.y.concat(&ys[..n]);
        self.invalidate();
    }

    /// Overwrites both coordinates of the point at `index`. Out-of-range
    /// writes are ignored.
    pub fn set_point(&mut self, index: usize, x: f64, y: f64) {
        if !self.check_index(index) {
            return;
        }
        self.x.set_at(index, x);
        self.y.set_at(index, y);
        self.invalidate();
    }

    /// Overwrites the x coordinate of the point at `index`.
    pub fn set_x(&mut self, index: usize, x: f64) {
        if !self.check_index(index) {
            return;
        }
        self.x.set_at(index, x);
        self.invalidate();
    }

    /// Overwrites the y coordinate of the point at `index`.
    pub fn set_y(&mut self, index: usize, y: f64) {
        if !self.check_index(index) {
            return;
        }
        self.y.set_at(index, y);
        self.invalidate();
    }

    /// Sorts the points ascending by one coordinate.
    ///
    /// Both axes receive the same permutation, so every point stays
    /// intact. The sort is stable: points with equal keys keep their
    /// relative order.
    pub fn sort(&mut self, by: Axis) {
        let order = match by {
            Axis::X => sort_order(self.x.values()),
            Axis::Y => sort_order(self.y.values()),
        };
        self.x.permute(&order);
        self.y.permute(&order);
        match by {
            Axis::X => self.x.mark_sorted(),
            Axis::Y => self.y.mark_sorted(),
        }
        self.invalidate();
    }

    /// Sxy = Σ(xᵢ − x̄)(yᵢ − ȳ).
    fn co_moment(&self) -> Option<f64> {
        *self.cache.co_moment.get_or_init(|| {
            let mx = self.x.mean()?;
            let my = self.y.mean()?;
            Some(
                self.x
                    .values()
                    .iter()
                    .zip(self.y.values())
                    .map(|(&x, &y)| (x - mx) * (y - my))
                    .sum(),
            )
        })
    }

    /// Sample covariance (denominator `n − 1`). `None` for fewer than
    /// two points.
    pub fn sample_covariance(&self) -> Option<f64> {
        *self.cache.sample_covariance.get_or_init(|| {
            let n = self.len();
            if n < 2 {
                return None;
            }
            Some(self.co_moment()? / (n - 1) as f64)
        })
    }

    /// Population covariance (denominator `n`). `None` when empty.
    pub fn population_covariance(&self) -> Option<f64> {
        *self
            .cache
            .population_covariance
            .get_or_init(|| Some(self.co_moment()? / self.len() as f64))
    }

    /// Pearson correlation from the sample covariance and the sample
    /// standard deviations.
    ///
    /// `None` for fewer than two points or when either axis is constant.
    pub fn sample_correlation(&self) -> Option<f64> {
        *self.cache.sample_correlation.get_or_init(|| {
            if self.has_constant_axis() {
                return None;
            }
            normalize(
                self.sample_covariance()?,
                self.x.sample_std_dev()?,
                self.y.sample_std_dev()?,
            )
        })
    }

    /// Pearson correlation from the population covariance and the
    /// population standard deviations.
    pub fn population_correlation(&self) -> Option<f64> {
        *self.cache.population_correlation.get_or_init(|| {
            if self.has_constant_axis() {
                return None;
            }
            normalize(
                self.population_covariance()?,
                self.x.population_std_dev()?,
                self.y.population_std_dev()?,
            )
        })
    }

    /// Ordinary least-squares regression of y on x.
    ///
    /// # Errors
    /// - [`StatsError::EmptySample`] if there are no points.
    /// - [`StatsError::DegenerateRegression`] if every x is equal, so
    ///   the slope would divide by zero.
    pub fn line_of_best_fit(&self) -> StatsResult<LinearFit> {
        self.cache.fit.get_or_init(|| self.fit()).clone()
    }

    fn fit(&self) -> StatsResult<LinearFit> {
        let (Some(mx), Some(my)) = (self.x.mean(), self.y.mean()) else {
            return Err(StatsError::EmptySample);
        };
        let sxy = self.co_moment().ok_or(StatsError::EmptySample)?;
        let sxx = self.x.squared_deviations().ok_or(StatsError::EmptySample)?;
        if self.x.min() == self.x.max() || sxx == 0.0 {
            debug!("least-squares fit rejected: {} points share x = {mx}", self.len());
            return Err(StatsError::DegenerateRegression);
        }
        let slope = sxy / sxx;
        Ok(LinearFit {
            slope,
            intercept: my - slope * mx,
        })
    }

    /// Equal extremes mean every value on that axis is identical, even when
    /// rounding in the mean leaves a non-zero squared deviation.
    fn has_constant_axis(&self) -> bool {
        self.x.min() == self.x.max() || self.y.min() == self.y.max()
    }

    fn check_index(&self, index: usize) -> bool {
        if index < self.len() {
            return true;
        }
        debug!(
            "ignoring write at point {index}: pair has {} points",
            self.len()
        );
        false
    }

    fn invalidate(&mut self) {
        self.cache = JointCache::default();
    }
}

fn normalize(covariance: f64, sd_x: f64, sd_y: f64) -> Option<f64> {
    let denom = sd_x * sd_y;
    if denom == 0.0 {
        None
    } else {
        Some(covariance / denom)
    }
}

// ============================================================================
// Tests
// ============================================================================
