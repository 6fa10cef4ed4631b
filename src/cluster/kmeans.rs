use crate::distance::distance_matrix;
use crate::error::{ClusterError, Result};
use crate::metrics;
use crate::{Labels, Matrix};
use ndarray::{ArrayView2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::{debug, info};

const DEFAULT_MAX_ITER: usize = 100;
const DEFAULT_RANDOM_STATE: u64 = 42;

// Element-wise closeness used for the convergence test: |a - b| <= ATOL + RTOL * |b|.
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

/// Lloyd's k-means with uniform random initialization.
///
/// The struct only carries configuration and the output of the last `fit`;
/// all working state of a run lives on the stack of that call.
#[derive(Clone, Debug)]
pub struct KMeans {
    pub cluster_centers: Option<Matrix>,
    pub labels: Option<Labels>,
    pub inertia: Option<f64>,
    pub n_iter: Option<usize>,
    pub converged: Option<bool>,
    n_clusters: usize,
    max_iter: usize,
    random_state: u64,
}

/// Output of a single Lloyd run.
#[derive(Clone, Debug)]
pub(crate) struct LloydRun {
    pub labels: Labels,
    pub centers: Matrix,
    pub n_iter: usize,
    pub converged: bool,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            cluster_centers: None,
            labels: None,
            inertia: None,
            n_iter: None,
            converged: None,
            n_clusters,
            max_iter: DEFAULT_MAX_ITER,
            random_state: DEFAULT_RANDOM_STATE,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        let run = lloyd(&x.view(), self.n_clusters, self.max_iter, self.random_state)?;
        let inertia = metrics::inertia(x, &run.labels, &run.centers)?;

        self.cluster_centers = Some(run.centers);
        self.labels = Some(run.labels);
        self.inertia = Some(inertia);
        self.n_iter = Some(run.n_iter);
        self.converged = Some(run.converged);

        Ok(())
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Labels> {
        self.fit(x)?;
        self.labels.clone().ok_or(ClusterError::NotFitted)
    }

    /// Nearest fitted center for every row of `x`.
    pub fn predict(&self, x: &Matrix) -> Result<Labels> {
        let centroids = self.cluster_centers.as_ref().ok_or(ClusterError::NotFitted)?;
        assign(&x.view(), &centroids.view())
    }

    /// Distance of every row of `x` to every fitted center.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let centroids = self.cluster_centers.as_ref().ok_or(ClusterError::NotFitted)?;
        distance_matrix(&x.view(), &centroids.view())
    }
}

/// Cluster `x` into `k` groups and return `(labels, centers)`.
///
/// When `max_iters` runs out before convergence the labels come from the
/// last assignment step and the centers from the update that followed it,
/// so the pair may not be exactly consistent.
pub fn kmeans(x: &Matrix, k: usize, max_iters: usize, seed: u64) -> Result<(Labels, Matrix)> {
    let run = lloyd(&x.view(), k, max_iters, seed)?;
    Ok((run.labels, run.centers))
}

pub(crate) fn lloyd(
    x: &ArrayView2<f64>,
    n_clusters: usize,
    max_iter: usize,
    seed: u64,
) -> Result<LloydRun> {
    validate(x, n_clusters, max_iter)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let centers = initialize_centers(x, n_clusters, &mut rng);
    lloyd_from(x, centers, max_iter)
}

/// Assign/update rounds starting from `centers`, until convergence or `max_iter`.
pub(crate) fn lloyd_from(
    x: &ArrayView2<f64>,
    mut centers: Matrix,
    max_iter: usize,
) -> Result<LloydRun> {
    let n_clusters = centers.nrows();
    let mut labels = Labels::zeros(x.nrows());

    for iteration in 0..max_iter {
        labels = assign(x, &centers.view())?;
        let new_centers = update_centers(x, &labels, &centers);

        debug!(
            iteration,
            shift = max_abs_shift(&centers, &new_centers),
            "kmeans iteration"
        );

        if all_close(&centers, &new_centers) {
            info!(n_iter = iteration + 1, n_clusters, "kmeans converged");
            return Ok(LloydRun {
                labels,
                centers: new_centers,
                n_iter: iteration + 1,
                converged: true,
            });
        }

        centers = new_centers;
    }

    info!(max_iter, n_clusters, "kmeans stopped at iteration cap");
    Ok(LloydRun {
        labels,
        centers,
        n_iter: max_iter,
        converged: false,
    })
}

fn validate(x: &ArrayView2<f64>, n_clusters: usize, max_iter: usize) -> Result<()> {
    if max_iter == 0 {
        return Err(ClusterError::InvalidParameter {
            name: "max_iter",
            message: "must be at least 1",
        });
    }
    if x.nrows() == 0 {
        return Err(ClusterError::EmptyInput);
    }
    if x.ncols() == 0 {
        return Err(ClusterError::InvalidParameter {
            name: "x",
            message: "points must have at least one feature",
        });
    }
    if n_clusters == 0 {
        return Err(ClusterError::InvalidParameter {
            name: "n_clusters",
            message: "must be at least 1",
        });
    }
    if x.nrows() < n_clusters {
        return Err(ClusterError::InsufficientData {
            requested: n_clusters,
            available: x.nrows(),
        });
    }
    Ok(())
}

/// Rows of `x` at `n_clusters` distinct indices, in the order they were drawn.
pub(crate) fn initialize_centers(
    x: &ArrayView2<f64>,
    n_clusters: usize,
    rng: &mut StdRng,
) -> Matrix {
    let indices = index::sample(rng, x.nrows(), n_clusters).into_vec();
    x.select(Axis(0), &indices)
}

/// Index of the nearest center per point; the lowest index wins ties.
pub(crate) fn assign(x: &ArrayView2<f64>, centers: &ArrayView2<f64>) -> Result<Labels> {
    let distances = distance_matrix(x, centers)?;

    Ok(distances
        .axis_iter(Axis(0))
        .map(|row| {
            let mut closest_cluster = 0;
            let mut min_distance = f64::INFINITY;
            for (k, &distance) in row.iter().enumerate() {
                if distance < min_distance {
                    min_distance = distance;
                    closest_cluster = k;
                }
            }
            closest_cluster
        })
        .collect())
}

/// Per-cluster means. A cluster with no points keeps its previous center.
pub(crate) fn update_centers(x: &ArrayView2<f64>, labels: &Labels, centers: &Matrix) -> Matrix {
    let mut sums = Matrix::zeros(centers.raw_dim());
    let mut counts = vec![0usize; centers.nrows()];

    for (row, &label) in x.axis_iter(Axis(0)).zip(labels.iter()) {
        let mut sum = sums.row_mut(label);
        sum += &row;
        counts[label] += 1;
    }

    let mut new_centers = centers.clone();
    for (k, &count) in counts.iter().enumerate() {
        if count == 0 {
            debug!(cluster = k, "empty cluster keeps its previous center");
            continue;
        }
        let mean = sums.row(k).mapv(|s| s / count as f64);
        new_centers.row_mut(k).assign(&mean);
    }

    new_centers
}

fn all_close(old_centers: &Matrix, new_centers: &Matrix) -> bool {
    old_centers
        .iter()
        .zip(new_centers.iter())
        .all(|(a, b)| (a - b).abs() <= ATOL + RTOL * b.abs())
}

fn max_abs_shift(old_centers: &Matrix, new_centers: &Matrix) -> f64 {
    old_centers
        .iter()
        .zip(new_centers.iter())
        .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()))
}
