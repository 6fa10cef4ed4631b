//! Row filters applied to the people matrix before clustering.
//!
//! A [`RowFilter`] is a conjunction of per-column [`Bound`]s. Every bound is
//! inclusive on each end it specifies, and filtering keeps the original row
//! order.

use crate::cluster::kmeans;
use crate::error::{ClusterError, Result};
use crate::{AGE, FREQUENCY, INCOME, Labels, Matrix, PURCHASE_HISTORY};
use ndarray::{ArrayView1, Axis};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound {
    pub column: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bound {
    pub fn range(column: usize, min: f64, max: f64) -> Self {
        Self {
            column,
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(column: usize, min: f64) -> Self {
        Self {
            column,
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(column: usize, max: f64) -> Self {
        Self {
            column,
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowFilter {
    bounds: Vec<Bound>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, bound: Bound) -> Self {
        self.bounds.push(bound);
        self
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// True when `row` satisfies every bound. Bounds on missing columns never match.
    pub fn matches(&self, row: &ArrayView1<f64>) -> bool {
        self.bounds
            .iter()
            .all(|b| row.get(b.column).is_some_and(|&v| b.contains(v)))
    }

    /// Rows of `x` satisfying the filter, in their original order.
    pub fn apply(&self, x: &Matrix) -> Result<Matrix> {
        self.check_columns(x)?;

        let indices: Vec<usize> = x
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(i, _)| i)
            .collect();

        debug!(kept = indices.len(), total = x.nrows(), "applied row filter");
        Ok(x.select(Axis(0), &indices))
    }

    pub fn count(&self, x: &Matrix) -> Result<usize> {
        self.check_columns(x)?;
        Ok(x.axis_iter(Axis(0)).filter(|row| self.matches(row)).count())
    }

    fn check_columns(&self, x: &Matrix) -> Result<()> {
        match self.bounds.iter().find(|b| b.column >= x.ncols()) {
            Some(b) => Err(ClusterError::ColumnOutOfRange {
                column: b.column,
                n_columns: x.ncols(),
            }),
            None => Ok(()),
        }
    }
}

/// People within `age_range` whose income and purchase frequency reach the given minimums.
pub fn high_value_filter(age_range: (f64, f64), min_income: f64, min_frequency: f64) -> RowFilter {
    RowFilter::new()
        .with(Bound::range(AGE, age_range.0, age_range.1))
        .with(Bound::at_least(INCOME, min_income))
        .with(Bound::at_least(FREQUENCY, min_frequency))
}

pub fn filter_people(
    x: &Matrix,
    age_range: (f64, f64),
    min_income: f64,
    min_frequency: f64,
) -> Result<Matrix> {
    high_value_filter(age_range, min_income, min_frequency).apply(x)
}

/// Thresholds of the three named customer segments.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentThresholds {
    pub young_age_min: f64,
    pub young_age_max: f64,
    pub young_income_min: f64,
    pub young_freq_min: f64,
    pub budget_income_max: f64,
    pub budget_freq_min: f64,
    pub loyal_freq_min: f64,
    pub loyal_purchase_min: f64,
}

impl Default for SegmentThresholds {
    fn default() -> Self {
        Self {
            young_age_min: 25.0,
            young_age_max: 35.0,
            young_income_min: 90_000.0,
            young_freq_min: 50.0,
            budget_income_max: 40_000.0,
            budget_freq_min: 30.0,
            loyal_freq_min: 80.0,
            loyal_purchase_min: 20_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub name: &'static str,
    pub filter: RowFilter,
}

impl SegmentThresholds {
    pub fn segments(&self) -> Vec<Segment> {
        vec![
            Segment {
                name: "Young Professionals",
                filter: RowFilter::new()
                    .with(Bound::range(AGE, self.young_age_min, self.young_age_max))
                    .with(Bound::at_least(INCOME, self.young_income_min))
                    .with(Bound::at_least(FREQUENCY, self.young_freq_min)),
            },
            Segment {
                name: "Budget Conscious",
                filter: RowFilter::new()
                    .with(Bound::at_most(INCOME, self.budget_income_max))
                    .with(Bound::at_least(FREQUENCY, self.budget_freq_min)),
            },
            Segment {
                name: "Loyal Customers",
                filter: RowFilter::new()
                    .with(Bound::at_least(FREQUENCY, self.loyal_freq_min))
                    .with(Bound::at_least(PURCHASE_HISTORY, self.loyal_purchase_min)),
            },
        ]
    }
}

/// Filter `x`, then cluster what is left.
///
/// Returns the filtered rows alongside the labels and centers. A filter that
/// keeps nothing yields [`ClusterError::EmptyInput`], never
/// [`ClusterError::InsufficientData`].
pub fn cluster_filtered(
    x: &Matrix,
    filter: &RowFilter,
    k: usize,
    max_iters: usize,
    seed: u64,
) -> Result<(Matrix, Labels, Matrix)> {
    let filtered = filter.apply(x)?;
    if filtered.nrows() == 0 {
        info!("filter matched no rows, skipping clustering");
        return Err(ClusterError::EmptyInput);
    }

    let (labels, centers) = kmeans(&filtered, k, max_iters, seed)?;
    Ok((filtered, labels, centers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn people() -> Matrix {
        array![
            [25.0, 100_000.0, 5_000.0, 80.0],
            [40.0, 150_000.0, 30_000.0, 95.0],
            [30.0, 99_999.0, 1_000.0, 90.0],
            [35.0, 120_000.0, 25_000.0, 81.0],
            [24.0, 110_000.0, 400.0, 99.0],
            [33.0, 35_000.0, 21_000.0, 45.0]
        ]
    }

    #[test]
    fn test_bound_inclusive() {
        let bound = Bound::range(0, 25.0, 35.0);
        assert!(bound.contains(25.0));
        assert!(bound.contains(35.0));
        assert!(!bound.contains(24.9));
        assert!(!bound.contains(35.1));

        assert!(Bound::at_least(0, 80.0).contains(80.0));
        assert!(Bound::at_most(0, 40_000.0).contains(40_000.0));
    }

    #[test]
    fn test_filter_people_keeps_order() {
        let filtered = filter_people(&people(), (25.0, 35.0), 100_000.0, 80.0).unwrap();
        assert_eq!(filtered.nrows(), 2);
        assert_eq!(filtered.row(0)[AGE], 25.0);
        assert_eq!(filtered.row(1)[AGE], 35.0);
    }

    #[test]
    fn test_filter_may_be_empty() {
        let filtered = filter_people(&people(), (60.0, 70.0), 0.0, 0.0).unwrap();
        assert_eq!(filtered.shape(), &[0, 4]);
    }

    #[test]
    fn test_filter_column_out_of_range() {
        let x = array![[1.0, 2.0]];
        let filter = RowFilter::new().with(Bound::at_least(FREQUENCY, 1.0));
        assert_eq!(
            filter.apply(&x).unwrap_err(),
            ClusterError::ColumnOutOfRange { column: 3, n_columns: 2 }
        );
    }

    #[test]
    fn test_segments_counts() {
        let x = people();
        let counts: Vec<usize> = SegmentThresholds::default()
            .segments()
            .iter()
            .map(|s| s.filter.count(&x).unwrap())
            .collect();

        // Young professionals: rows 0, 2, 3. Budget: row 5. Loyal: rows 1, 3.
        assert_eq!(counts, vec![3, 1, 2]);
    }

    #[test]
    fn test_cluster_filtered_empty_is_distinct() {
        let filter = high_value_filter((60.0, 70.0), 0.0, 0.0);
        let err = cluster_filtered(&people(), &filter, 2, 10, 42).unwrap_err();
        assert_eq!(err, ClusterError::EmptyInput);
    }

    #[test]
    fn test_cluster_filtered_insufficient() {
        let filter = high_value_filter((25.0, 35.0), 100_000.0, 80.0);
        let err = cluster_filtered(&people(), &filter, 3, 10, 42).unwrap_err();
        assert_eq!(err, ClusterError::InsufficientData { requested: 3, available: 2 });
    }

    #[test]
    fn test_cluster_filtered() {
        let filter = high_value_filter((25.0, 35.0), 90_000.0, 50.0);
        let (filtered, labels, centers) = cluster_filtered(&people(), &filter, 2, 100, 42).unwrap();
        assert_eq!(filtered.nrows(), 3);
        assert_eq!(labels.len(), 3);
        assert_eq!(centers.shape(), &[2, 4]);
    }
}
