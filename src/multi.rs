//! N-dimensional samples: one [`Sample`] per dimension, moved as rows.
//!
//! Every dimension always holds the same number of values. Construction
//! truncates to the shortest column, and every mutation must supply
//! exactly one value per dimension; anything else is ignored.

use log::debug;

use crate::pair::CorrelatedPair;
use crate::sample::{sort_order, Sample};

/// Fixed-arity collection of points, stored column-wise.
///
/// # Examples
/// ```
/// use u_statkit::MultiSample;
///
/// let mut m = MultiSample::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.mean_of(0), Some(2.0));
/// assert_eq!(m.mean_of(1), Some(5.0));
/// assert_eq!(m.mean_of(2), None);
///
/// m.append_point(&[4.0, 7.0]);
/// assert_eq!(m.point_at(3), Some(vec![4.0, 7.0]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiSample {
    dimensions: Vec<Sample>,
}

impl MultiSample {
    /// Builds from one column per dimension. Columns longer than the
    /// shortest are truncated.
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[f64]>,
    {
        let columns: Vec<C> = columns.into_iter().collect();
        let n = columns
            .iter()
            .map(|c| c.as_ref().len())
            .min()
            .unwrap_or(0);
        Self {
            dimensions: columns
                .iter()
                .map(|c| Sample::from(&c.as_ref()[..n]))
                .collect(),
        }
    }

    /// Creates an empty collection of `n` dimensions.
    pub fn with_dimensions(n: usize) -> Self {
        Self {
            dimensions: vec![Sample::new(); n],
        }
    }

    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of points; zero when there are no dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.first().map_or(0, Sample::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows one dimension's sample.
    pub fn dimension(&self, d: usize) -> Option<&Sample> {
        self.dimensions.get(d)
    }

    /// The point at `index`, one value per dimension.
    pub fn point_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.len() {
            return None;
        }
        self.dimensions.iter().map(|s| s.get_at(index)).collect()
    }

    /// Appends one point. Ignored unless `point` has one value per
    /// dimension.
    pub fn append_point(&mut self, point: &[f64]) {
        if !self.check_arity(point.len()) {
            return;
        }
        for (sample, &v) in self.dimensions.iter_mut().zip(point) {
            sample.append(v);
        }
    }

    /// Appends a batch of points. The batch is rejected as a whole if
    /// any point has the wrong arity.
    pub fn concat_points<P: AsRef<[f64]>>(&mut self, points: &[P]) {
        if points.is_empty() || !points.iter().all(|p| self.check_arity(p.as_ref().len())) {
            return;
        }
        for (d, sample) in self.dimensions.iter_mut().enumerate() {
            let column: Vec<f64> = points.iter().map(|p| p.as_ref()[d]).collect();
            sample.concat(&column);
        }
    }

    /// Appends one column per dimension, truncated to the shortest.
    /// Ignored unless there is exactly one column per dimension.
    pub fn concat_columns<C: AsRef<[f64]>>(&mut self, columns: &[C]) {
        if !self.check_arity(columns.len()) {
            return;
        }
        let n = columns
            .iter()
            .map(|c| c.as_ref().len())
            .min()
            .unwrap_or(0);
        for (sample, column) in self.dimensions.iter_mut().zip(columns) {
            sample.concat(&column.as_ref()[..n]);
        }
    }

    /// Overwrites the point at `index`. Ignored if the index is out of
    /// range or the arity is wrong.
    pub fn set_point(&mut self, index: usize, point: &[f64]) {
        if index >= self.len() {
            debug!(
                "ignoring write at point {index}: collection has {} points",
                self.len()
            );
            return;
        }
        if !self.check_arity(point.len()) {
            return;
        }
        for (sample, &v) in self.dimensions.iter_mut().zip(point) {
            sample.set_at(index, v);
        }
    }

    /// Sorts the points ascending by dimension `d`, carrying every other
    /// coordinate along. Stable; unknown dimensions are ignored.
    pub fn sort_by_dimension(&mut self, d: usize) {
        let Some(key) = self.dimensions.get(d) else {
            debug!(
                "ignoring sort by dimension {d}: collection has {} dimensions",
                self.dimensions.len()
            );
            return;
        };
        let order = sort_order(key.values());
        for sample in &mut self.dimensions {
            sample.permute(&order);
        }
        self.dimensions[d].mark_sorted();
    }

    /// Joint view of two dimensions as x and y.
    pub fn pair(&self, dx: usize, dy: usize) -> Option<CorrelatedPair> {
        let x = self.dimensions.get(dx)?;
        let y = self.dimensions.get(dy)?;
        Some(CorrelatedPair::new(x.values(), y.values()))
    }

    fn of(&self, d: usize, stat: impl FnOnce(&Sample) -> Option<f64>) -> Option<f64> {
        self.dimensions.get(d).and_then(stat)
    }

    fn each(&self, stat: impl Fn(&Sample) -> Option<f64>) -> Vec<Option<f64>> {
        self.dimensions.iter().map(stat).collect()
    }

    pub fn sum_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::sum)
    }

    pub fn mean_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::mean)
    }

    pub fn median_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::median)
    }

    pub fn min_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::min)
    }

    pub fn max_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::max)
    }

    pub fn variance_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::sample_variance)
    }

    pub fn std_dev_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::sample_std_dev)
    }

    pub fn population_variance_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::population_variance)
    }

    pub fn population_std_dev_of(&self, d: usize) -> Option<f64> {
        self.of(d, Sample::population_std_dev)
    }

    /// Per-dimension sums.
    pub fn sums(&self) -> Vec<Option<f64>> {
        self.each(Sample::sum)
    }

    /// Per-dimension means.
    pub fn means(&self) -> Vec<Option<f64>> {
        self.each(Sample::mean)
    }

    pub fn mins(&self) -> Vec<Option<f64>> {
        self.each(Sample::min)
    }

    pub fn maxs(&self) -> Vec<Option<f64>> {
        self.each(Sample::max)
    }

    pub fn variances(&self) -> Vec<Option<f64>> {
        self.each(Sample::sample_variance)
    }

    pub fn std_devs(&self) -> Vec<Option<f64>> {
        self.each(Sample::sample_std_dev)
    }

    pub fn population_variances(&self) -> Vec<Option<f64>> {
        self.each(Sample::population_variance)
    }

    pub fn population_std_devs(&self) -> Vec<Option<f64>> {
        self.each(Sample::population_std_dev)
    }

    fn check_arity(&self, arity: usize) -> bool {
        if arity == self.dimensions.len() {
            return true;
        }
        debug!(
            "ignoring {arity}-value input: collection has {} dimensions",
            self.dimensions.len()
        );
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_dims() -> MultiSample {
        MultiSample::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
    }

    #[test]
    fn test_known_columns() {
        let m = two_dims();
        assert_eq!(m.num_dimensions(), 2);
        assert_eq!(m.len(), 3);
        assert_eq!(m.mean_of(0), Some(2.0));
        assert_eq!(m.mean_of(1), Some(5.0));
        assert_eq!(m.means(), vec![Some(2.0), Some(5.0)]);
        assert_eq!(m.sums(), vec![Some(6.0), Some(15.0)]);
        assert_eq!(m.mins(), vec![Some(1.0), Some(4.0)]);
        assert_eq!(m.maxs(), vec![Some(3.0), Some(6.0)]);
        assert_eq!(m.median_of(1), Some(5.0));
        assert!((m.variance_of(0).unwrap() - 1.0).abs() < 1e-15);
        assert!((m.std_dev_of(1).unwrap() - 1.0).abs() < 1e-15);
        assert!((m.population_variance_of(0).unwrap() - 2.0 / 3.0).abs() < 1e-15);
        assert!((m.population_std_dev_of(0).unwrap() - (2.0_f64 / 3.0).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_truncates_to_shortest_column() {
        let m = MultiSample::new(vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![7.0, 8.0]]);
        assert_eq!(m.len(), 1);
        assert_eq!(m.point_at(0), Some(vec![1.0, 4.0, 7.0]));
        assert_eq!(m.point_at(1), None);
    }

    #[test]
    fn test_no_dimensions() {
        let m = MultiSample::new(Vec::<Vec<f64>>::new());
        assert_eq!(m.num_dimensions(), 0);
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
        assert_eq!(m.mean_of(0), None);
        assert!(m.means().is_empty());
    }

    #[test]
    fn test_out_of_range_dimension() {
        let m = two_dims();
        assert_eq!(m.mean_of(2), None);
        assert_eq!(m.variance_of(5), None);
        assert!(m.dimension(2).is_none());
        assert!(m.pair(0, 2).is_none());
    }

    #[test]
    fn test_append_point_requires_arity() {
        let mut m = two_dims();
        m.append_point(&[1.0]);
        m.append_point(&[1.0, 2.0, 3.0]);
        assert_eq!(m.len(), 3);
        m.append_point(&[10.0, 20.0]);
        assert_eq!(m.len(), 4);
        assert_eq!(m.mean_of(0), Some(4.0));
        assert_eq!(m.dimension(1).map(Sample::len), Some(4));
    }

    #[test]
    fn test_concat_points_is_all_or_nothing() {
        let mut m = MultiSample::with_dimensions(2);
        m.concat_points(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(m.is_empty());
        m.concat_points(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.point_at(1), Some(vec![3.0, 4.0]));
    }

    #[test]
    fn test_concat_columns() {
        let mut m = two_dims();
        m.concat_columns(&[vec![7.0, 8.0, 9.0], vec![10.0]]);
        assert_eq!(m.len(), 4);
        assert_eq!(m.point_at(3), Some(vec![7.0, 10.0]));
        m.concat_columns(&[vec![1.0]]);
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn test_set_point() {
        let mut m = two_dims();
        let _ = m.means();
        m.set_point(1, &[20.0, 50.0]);
        assert_eq!(m.point_at(1), Some(vec![20.0, 50.0]));
        assert_eq!(m.max_of(0), Some(20.0));
        m.set_point(1, &[0.0]);
        m.set_point(3, &[0.0, 0.0]);
        assert_eq!(m.point_at(1), Some(vec![20.0, 50.0]));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_sort_by_dimension_moves_rows() {
        let mut m = MultiSample::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![9.0, 7.0, 8.0],
            vec![-1.0, -2.0, -3.0],
        ]);
        m.sort_by_dimension(1);
        assert_eq!(m.point_at(0), Some(vec![2.0, 7.0, -2.0]));
        assert_eq!(m.point_at(1), Some(vec![3.0, 8.0, -3.0]));
        assert_eq!(m.point_at(2), Some(vec![1.0, 9.0, -1.0]));
        assert!(m.dimension(1).unwrap().is_sorted());
    }

    #[test]
    fn test_sort_by_first_dimension() {
        let mut m = MultiSample::new(vec![vec![3.0, 1.0, 2.0], vec![30.0, 10.0, 20.0]]);
        m.sort_by_dimension(0);
        assert_eq!(m.dimension(0).unwrap().values(), &[1.0, 2.0, 3.0]);
        assert_eq!(m.dimension(1).unwrap().values(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_sort_unknown_dimension_is_noop() {
        let mut m = MultiSample::new(vec![vec![3.0, 1.0], vec![1.0, 3.0]]);
        m.sort_by_dimension(2);
        assert_eq!(m.point_at(0), Some(vec![3.0, 1.0]));
    }

    #[test]
    fn test_pair_joint_statistics() {
        let m = MultiSample::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0, 1.0],
            vec![2.0, 4.0, 6.0],
        ]);
        let pair = m.pair(0, 2).unwrap();
        assert!((pair.sample_correlation().unwrap() - 1.0).abs() < 1e-12);
        let fit = pair.line_of_best_fit().unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
    }
}
