//! Partitional clustering.
//!
//! `KMeans` runs Lloyd's algorithm from a uniformly sampled set of initial
//! centers. The same data, `k` and seed always produce identical labels and
//! centers.
//!
//! # Examples
//!
//! ```rust
//! use custseg::{KMeans, kmeans};
//! use ndarray::array;
//!
//! let x = array![
//!     [0.0, 0.0],
//!     [0.0, 1.0],
//!     [1.0, 0.0],
//!     [10.0, 10.0],
//!     [10.0, 11.0],
//!     [11.0, 10.0]
//! ];
//!
//! let (labels, centers) = kmeans(&x, 2, 100, 42).unwrap();
//! assert_eq!(labels.len(), 6);
//! assert_eq!(centers.shape(), &[2, 2]);
//!
//! let mut model = KMeans::new(2).max_iter(100).random_state(42);
//! model.fit(&x).unwrap();
//! println!("Inertia: {:.4}", model.inertia.unwrap());
//! ```

mod kmeans;

pub use kmeans::{KMeans, kmeans};
