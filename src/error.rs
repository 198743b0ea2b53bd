//! Error types in linfa-competitors
//!

use thiserror::Error;

use linfa_clustering::{DbscanParamsError, GmmError, KMeansError};
use linfa_linalg::LinalgError;

pub type Result<T> = std::result::Result<T, ClusteringError>;

/// An error when configuring or running a competitor estimator
///
/// Failures raised by the bound clustering implementations are wrapped unchanged.
#[derive(Error, Debug)]
pub enum ClusteringError {
    /// The algorithm identifier matches none of the supported profiles
    #[error("Undefined clustering model: {0:?}")]
    UnknownAlgorithm(String),
    /// When any of the hyperparameters are set the wrong value
    #[error("invalid value encountered: {0}")]
    InvalidValue(String),
    #[error("label vector has {found} entries but the matrix has {expected} samples")]
    LabelMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Linfa(#[from] linfa::Error),
    #[error(transparent)]
    KMeans(#[from] KMeansError),
    #[error(transparent)]
    Gmm(#[from] GmmError),
    #[error(transparent)]
    Dbscan(#[from] DbscanParamsError),
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
