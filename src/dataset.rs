use crate::error::{ClusterError, Result};
use crate::{AGE, FREQUENCY, INCOME, Matrix, PURCHASE_HISTORY};
use ndarray::{Array1, ArrayView2, Axis, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Parameters of the synthetic people generator.
#[derive(Clone, Debug, PartialEq)]
pub struct PeopleConfig {
    pub num_samples: usize,
    /// Inclusive age bounds.
    pub age_range: (i64, i64),
    /// Inclusive income bounds.
    pub income_range: (i64, i64),
    pub seed: u64,
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            num_samples: 100,
            age_range: (18, 70),
            income_range: (20_000, 120_000),
            seed: 0,
        }
    }
}

impl PeopleConfig {
    pub fn num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generate `num_samples` people as rows of (age, income, purchase history, frequency).
///
/// Every value is a whole number. Purchase history is drawn from `[100, 50000)`
/// and frequency from `[1, 100)`.
pub fn generate_people(config: &PeopleConfig) -> Result<Matrix> {
    let (age_lo, age_hi) = config.age_range;
    let (income_lo, income_hi) = config.income_range;
    if age_lo > age_hi {
        return Err(ClusterError::InvalidParameter {
            name: "age_range",
            message: "lower bound exceeds upper bound",
        });
    }
    if income_lo > income_hi {
        return Err(ClusterError::InvalidParameter {
            name: "income_range",
            message: "lower bound exceeds upper bound",
        });
    }

    let n = config.num_samples;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let ages = Array1::random_using(n, Uniform::new_inclusive(age_lo, age_hi), &mut rng);
    let incomes = Array1::random_using(n, Uniform::new_inclusive(income_lo, income_hi), &mut rng);
    let purchase_history = Array1::random_using(n, Uniform::new(100i64, 50_000), &mut rng);
    let frequency = Array1::random_using(n, Uniform::new(1i64, 100), &mut rng);

    let mut data = Matrix::zeros((n, 4));
    data.column_mut(AGE).assign(&ages.mapv(|v| v as f64));
    data.column_mut(INCOME).assign(&incomes.mapv(|v| v as f64));
    data.column_mut(PURCHASE_HISTORY)
        .assign(&purchase_history.mapv(|v| v as f64));
    data.column_mut(FREQUENCY).assign(&frequency.mapv(|v| v as f64));

    debug!(num_samples = n, seed = config.seed, "generated people data");
    Ok(data)
}

/// Keep only `columns` of `x`, in the given order.
pub fn select_columns(x: &Matrix, columns: &[usize]) -> Result<Matrix> {
    if let Some(&column) = columns.iter().find(|&&c| c >= x.ncols()) {
        return Err(ClusterError::ColumnOutOfRange {
            column,
            n_columns: x.ncols(),
        });
    }
    Ok(x.select(Axis(1), columns))
}

/// First `n` rows of `x`, or all of them when there are fewer.
pub fn head(x: &Matrix, n: usize) -> ArrayView2<'_, f64> {
    let n = n.min(x.nrows());
    x.slice(s![..n, ..])
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
}

impl Dataset {
    pub fn new(features: Matrix) -> Self {
        Self { features }
    }

    pub fn generate(config: &PeopleConfig) -> Result<Self> {
        Ok(Self::new(generate_people(config)?))
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn head(&self, n: usize) -> ArrayView2<'_, f64> {
        head(&self.features, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_generate_people_ranges() {
        let config = PeopleConfig::default().num_samples(500).seed(9);
        let data = generate_people(&config).unwrap();
        assert_eq!(data.shape(), &[500, 4]);

        for row in data.rows() {
            assert!((18.0..=70.0).contains(&row[AGE]));
            assert!((20_000.0..=120_000.0).contains(&row[INCOME]));
            assert!((100.0..50_000.0).contains(&row[PURCHASE_HISTORY]));
            assert!((1.0..100.0).contains(&row[FREQUENCY]));
            assert!(row.iter().all(|v| v.fract() == 0.0));
        }
    }

    #[test]
    fn test_generate_people_seeded() {
        let config = PeopleConfig::default().num_samples(50).seed(1);
        assert_eq!(generate_people(&config).unwrap(), generate_people(&config).unwrap());

        let other = PeopleConfig::default().num_samples(50).seed(2);
        assert_ne!(generate_people(&config).unwrap(), generate_people(&other).unwrap());
    }

    #[test]
    fn test_generate_people_rejects_inverted_range() {
        let config = PeopleConfig {
            age_range: (70, 18),
            ..PeopleConfig::default()
        };
        assert!(generate_people(&config).is_err());
    }

    #[test]
    fn test_select_columns() {
        let x = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];

        let projected = select_columns(&x, &[AGE, INCOME]).unwrap();
        assert_eq!(projected, array![[1.0f64, 2.0], [5.0, 6.0]]);

        let err = select_columns(&x, &[4]).unwrap_err();
        assert_eq!(err, ClusterError::ColumnOutOfRange { column: 4, n_columns: 4 });
    }

    #[test]
    fn test_head_borrows_leading_rows() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];

        assert_eq!(head(&x, 2), array![[1.0f64, 2.0], [3.0, 4.0]]);
        assert_eq!(head(&x, 10).nrows(), 3);
        assert_eq!(head(&Matrix::zeros((0, 4)), 5).shape(), &[0, 4]);
    }

    #[test]
    fn test_dataset_head() {
        let dataset = Dataset::generate(&PeopleConfig::default().num_samples(3)).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 4);
        assert_eq!(dataset.head(5).nrows(), 3);
        assert_eq!(dataset.head(2).nrows(), 2);
    }
}
