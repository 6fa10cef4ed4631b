//! Customer segmentation with Lloyd's k-means.
//!
//! The numeric core lives in [`distance`] and [`cluster`]. The remaining
//! modules source the point matrix ([`dataset`], [`filter`]) and describe the
//! result ([`metrics`], [`report`]).

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod report;

pub use cluster::{KMeans, kmeans};
pub use dataset::{Dataset, PeopleConfig, generate_people, select_columns};
pub use distance::{distance_matrix, euclidean_distance, euclidean_distance_rows};
pub use error::{ClusterError, Result};
pub use filter::{Bound, RowFilter, SegmentThresholds, cluster_filtered, filter_people};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
pub type Labels = Array1<usize>;

/// Column positions of the people data matrix.
pub const AGE: usize = 0;
pub const INCOME: usize = 1;
pub const PURCHASE_HISTORY: usize = 2;
pub const FREQUENCY: usize = 3;

pub const COLUMN_NAMES: [&str; 4] = ["Age", "Income", "Purchase History", "Frequency of Purchase"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let labels = Labels::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(labels.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
        assert_eq!(COLUMN_NAMES[FREQUENCY], "Frequency of Purchase");
    }
}
