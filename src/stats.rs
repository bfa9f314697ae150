//! One-shot descriptive statistics over plain slices.
//!
//! Each function builds a throwaway [`Sample`] or [`CorrelatedPair`] and
//! reads back a single property. Use the containers directly when
//! several statistics are needed from the same data, since they cache
//! intermediate results.
//!
//! # Algorithms
//!
//! - **Sum/Mean**: Neumaier compensated summation for O(ε) error
//!   independent of n.
//! - **Variance/StdDev**: two-pass, Σ(x − x̄)² over the cached mean.
//! - **Regression**: ordinary least squares of y on x.

use crate::error::StatsResult;
use crate::pair::{CorrelatedPair, LinearFit};
use crate::sample::Sample;

/// Arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use u_statkit::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    Sample::from(data).mean()
}

/// Median, without mutating the input.
///
/// # Examples
/// ```
/// use u_statkit::stats::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(data: &[f64]) -> Option<f64> {
    Sample::from(data).median()
}

/// Compensated sum. `None` for empty input.
pub fn sum(data: &[f64]) -> Option<f64> {
    Sample::from(data).sum()
}

/// Sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2`.
///
/// # Examples
/// ```
/// use u_statkit::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    Sample::from(data).sample_variance()
}

/// Population variance (denominator `n`).
///
/// # Examples
/// ```
/// use u_statkit::stats::variance_population;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance_population(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn variance_population(data: &[f64]) -> Option<f64> {
    Sample::from(data).population_variance()
}

/// Sample standard deviation. `None` if `data.len() < 2`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    Sample::from(data).sample_std_dev()
}

/// Population standard deviation. `None` if `data` is empty.
pub fn std_dev_population(data: &[f64]) -> Option<f64> {
    Sample::from(data).population_std_dev()
}

/// Smallest value.
///
/// # Examples
/// ```
/// use u_statkit::stats::min;
/// assert_eq!(min(&[3.0, 1.0, 4.0, 1.0, 5.0]), Some(1.0));
/// ```
pub fn min(data: &[f64]) -> Option<f64> {
    Sample::from(data).min()
}

/// Largest value.
///
/// # Examples
/// ```
/// use u_statkit::stats::max;
/// assert_eq!(max(&[3.0, 1.0, 4.0, 1.0, 5.0]), Some(5.0));
/// ```
pub fn max(data: &[f64]) -> Option<f64> {
    Sample::from(data).max()
}

/// Sample covariance of paired data, truncated to the shorter input.
///
/// # Examples
/// ```
/// use u_statkit::stats::covariance;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((covariance(&x, &y).unwrap() - 5.0).abs() < 1e-14);
/// ```
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    CorrelatedPair::new(x, y).sample_covariance()
}

/// Population covariance of paired data.
pub fn covariance_population(x: &[f64], y: &[f64]) -> Option<f64> {
    CorrelatedPair::new(x, y).population_covariance()
}

/// Pearson correlation using sample covariance and sample deviations.
///
/// # Examples
/// ```
/// use u_statkit::stats::correlation;
/// let r = correlation(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    CorrelatedPair::new(x, y).sample_correlation()
}

/// Pearson correlation using population covariance and deviations.
pub fn correlation_population(x: &[f64], y: &[f64]) -> Option<f64> {
    CorrelatedPair::new(x, y).population_correlation()
}

/// Least-squares line of y on x.
///
/// # Errors
/// - [`StatsError::EmptySample`](crate::StatsError::EmptySample) if
///   either input is empty.
/// - [`StatsError::DegenerateRegression`](crate::StatsError::DegenerateRegression)
///   if every x is equal.
///
/// # Examples
/// ```
/// use u_statkit::stats::line_of_best_fit;
/// let fit = line_of_best_fit(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!(fit.intercept.abs() < 1e-12);
/// assert!(line_of_best_fit(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_err());
/// ```
pub fn line_of_best_fit(x: &[f64], y: &[f64]) -> StatsResult<LinearFit> {
    CorrelatedPair::new(x, y).line_of_best_fit()
}

/// Returns an ascending copy of `data`.
///
/// # Examples
/// ```
/// use u_statkit::stats::sort;
/// assert_eq!(sort(&[3.0, 1.0, 2.0]), vec![1.0, 2.0, 3.0]);
/// ```
pub fn sort(data: &[f64]) -> Vec<f64> {
    let mut sample = Sample::from(data);
    sample.sort();
    sample.to_vec()
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *Zeitschrift für Angewandte
/// Mathematik und Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(
            prop::num::f64::NORMAL.prop_filter("finite", |x| x.is_finite() && x.abs() < 1e12),
            min_len..=max_len,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn std_dev_is_sqrt_of_variance(data in finite_vec(2, 100)) {
            let var = variance(&data).unwrap();
            let sd = std_dev(&data).unwrap();
            let diff = (sd * sd - var).abs();
            prop_assert!(diff < 1e-10 * var.max(1.0), "sd² should equal variance");
        }

        #[test]
        fn covariance_self_is_variance(data in finite_vec(2, 100)) {
            let cov = covariance(&data, &data).unwrap();
            let var = variance(&data).unwrap();
            let tol = 1e-10 * var.max(1.0);
            prop_assert!(
                (cov - var).abs() < tol,
                "Cov(x,x)={} != Var(x)={}", cov, var
            );
        }

        #[test]
        fn sorted_copy_is_permutation(data in finite_vec(0, 100)) {
            let sorted = sort(&data);
            prop_assert_eq!(sorted.len(), data.len());
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
            let mut expected = data.clone();
            expected.sort_by(f64::total_cmp);
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn mean_linearity(
            data in finite_vec(1, 100),
            a in -100.0_f64..100.0,
            b in -100.0_f64..100.0,
        ) {
            let m = mean(&data).unwrap();
            let transformed: Vec<f64> = data.iter().map(|&x| a * x + b).collect();
            let mt = mean(&transformed).unwrap();
            let expected = a * m + b;
            let tol = 1e-8 * expected.abs().max(1.0) + 1e-8 * (a * m).abs();
            prop_assert!(
                (mt - expected).abs() < tol,
                "mean(a*x+b)={} != a*mean(x)+b={}",
                mt, expected
            );
        }
    }
}
