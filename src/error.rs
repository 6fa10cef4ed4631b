use thiserror::Error;

/// Errors returned by the clustering engine and its collaborators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    /// Point widths disagree, or a row-wise pairing has the wrong row count.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// More clusters were requested than there are points to seed them.
    #[error("insufficient data: requested {requested} clusters, but only {available} points available")]
    InsufficientData { requested: usize, available: usize },

    /// No points at all, typically because a filter rejected every row.
    #[error("empty input: no points to cluster")]
    EmptyInput,

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },

    #[error("KMeans not fitted. Call fit() first.")]
    NotFitted,

    #[error("column {column} out of range for matrix with {n_columns} columns")]
    ColumnOutOfRange { column: usize, n_columns: usize },

    /// Two parallel sequences (points and labels) differ in length.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ClusterError>;
