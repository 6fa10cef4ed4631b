//! Euclidean distances between rows of a point matrix and reference points.

use crate::error::{ClusterError, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Distance from every row of `a` to the single point `b`.
///
/// Element `i` of the result is `sqrt(sum_d (a[i][d] - b[d])^2)`.
pub fn euclidean_distance(a: &ArrayView2<f64>, b: &ArrayView1<f64>) -> Result<Vector> {
    if a.ncols() != b.len() {
        return Err(ClusterError::ShapeMismatch {
            expected: b.len(),
            found: a.ncols(),
        });
    }

    Ok(a.axis_iter(Axis(0)).map(|row| point_distance(&row, b)).collect())
}

/// Row-wise distance with broadcasting.
///
/// `b` either holds a single row, compared against every row of `a`, or
/// exactly as many rows as `a`, in which case row `i` pairs with row `i`.
/// Any other row count is a shape mismatch on the row axis.
pub fn euclidean_distance_rows(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Vector> {
    if a.ncols() != b.ncols() {
        return Err(ClusterError::ShapeMismatch {
            expected: b.ncols(),
            found: a.ncols(),
        });
    }

    match b.nrows() {
        1 => euclidean_distance(a, &b.row(0)),
        n if n == a.nrows() => Ok(a
            .axis_iter(Axis(0))
            .zip(b.axis_iter(Axis(0)))
            .map(|(x, y)| point_distance(&x, &y))
            .collect()),
        n => Err(ClusterError::ShapeMismatch {
            expected: a.nrows(),
            found: n,
        }),
    }
}

/// N×K matrix holding the distance of every point to every center.
pub fn distance_matrix(x: &ArrayView2<f64>, centers: &ArrayView2<f64>) -> Result<Matrix> {
    if x.ncols() != centers.ncols() {
        return Err(ClusterError::ShapeMismatch {
            expected: centers.ncols(),
            found: x.ncols(),
        });
    }

    let mut distances = Matrix::zeros((x.nrows(), centers.nrows()));
    for (k, center) in centers.axis_iter(Axis(0)).enumerate() {
        let column = euclidean_distance(x, &center)?;
        distances.column_mut(k).assign(&column);
    }

    Ok(distances)
}

pub(crate) fn point_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
