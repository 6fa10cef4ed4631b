//! Plain-text rendering of clustering results.

use std::fmt;

use crate::error::{ClusterError, Result};
use crate::metrics::cluster_sizes;
use crate::{COLUMN_NAMES, Labels, Matrix, Vector};
use ndarray::ArrayView1;

/// Tooltip-style description of one person, e.g. `Age: 30, Income: 95000, Purchase: 1200, Freq: 55`.
pub fn hover_text(row: &ArrayView1<f64>) -> Result<String> {
    if row.len() != 4 {
        return Err(ClusterError::ShapeMismatch {
            expected: 4,
            found: row.len(),
        });
    }
    Ok(format!(
        "Age: {}, Income: {}, Purchase: {}, Freq: {}",
        row[0], row[1], row[2], row[3]
    ))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub size: usize,
    pub center: Vector,
}

/// Per-cluster sizes and centers, ready for printing.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringReport {
    pub clusters: Vec<ClusterSummary>,
    column_names: Vec<String>,
}

pub fn summarize(x: &Matrix, labels: &Labels, centers: &Matrix) -> Result<ClusteringReport> {
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

    let sizes = cluster_sizes(labels, centers.nrows());
    let clusters = centers
        .rows()
        .into_iter()
        .zip(sizes)
        .enumerate()
        .map(|(cluster, (center, size))| ClusterSummary {
            cluster,
            size,
            center: center.to_owned(),
        })
        .collect();

    Ok(ClusteringReport {
        clusters,
        column_names: default_column_names(x.ncols()),
    })
}

fn default_column_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match COLUMN_NAMES.get(i) {
            Some(name) => name.to_string(),
            None => format!("x{}", i),
        })
        .collect()
}

impl fmt::Display for ClusteringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.clusters {
            write!(f, "  Cluster {}: {} points, center [", summary.cluster, summary.size)?;
            for (i, value) in summary.center.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match self.column_names.get(i) {
                    Some(name) => write!(f, "{}={:.2}", name, value)?,
                    None => write!(f, "{:.2}", value)?,
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
