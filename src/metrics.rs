use crate::distance::point_distance;
use crate::error::{ClusterError, Result};
use crate::{Labels, Matrix};

/// Within-cluster sum of squared distances to the assigned center.
pub fn inertia(x: &Matrix, labels: &Labels, centers: &Matrix) -> Result<f64> {
    if x.nrows() != labels.len() {
        return Err(ClusterError::LengthMismatch {
            expected: x.nrows(),
            found: labels.len(),
        });
    }
    if x.ncols() != centers.ncols() {
        return Err(ClusterError::ShapeMismatch {
            expected: centers.ncols(),
            found: x.ncols(),
        });
    }

    let mut total = 0.0;
    for (row, &label) in x.rows().into_iter().zip(labels.iter()) {
        if label >= centers.nrows() {
            return Err(ClusterError::InvalidParameter {
                name: "labels",
                message: "label refers to a missing center",
            });
        }
        let distance = point_distance(&row, &centers.row(label));
        total += distance * distance;
    }

    Ok(total)
}

/// Number of points carrying each label in `0..k`.
pub fn cluster_sizes(labels: &Labels, k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &label in labels.iter().filter(|&&label| label < k) {
        sizes[label] += 1;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_inertia() {
        let x = array![[0.0, 0.0], [2.0, 0.0], [10.0, 10.0]];
        let labels = array![0, 0, 1];
        let centers = array![[1.0, 0.0], [10.0, 10.0]];

        let value = inertia(&x, &labels, &centers).unwrap();
        assert!((value - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_inertia_length_mismatch() {
        let x = array![[0.0, 0.0], [2.0, 0.0]];
        let labels = array![0];
        let centers = array![[1.0, 0.0]];

        assert!(inertia(&x, &labels, &centers).is_err());
    }

    #[test]
    fn test_cluster_sizes() {
        let labels = array![2, 0, 2, 2];
        assert_eq!(cluster_sizes(&labels, 4), vec![1, 0, 3, 0]);
    }
}
