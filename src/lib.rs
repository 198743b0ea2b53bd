//! `linfa-competitors` runs the classical clustering algorithms of the `linfa` ecosystem
//! as competitors against a common baseline.
//!
//! A competitor is selected by a short identifier together with a cluster count and an
//! initialisation-repeat count:
//!
//! | identifier | algorithm                                          |
//! |------------|----------------------------------------------------|
//! | `km_clu`   | K-Means, random initialisation                     |
//! | `gm_clu`   | Gaussian mixture, full covariances                 |
//! | `s_clu`    | Spectral clustering on an RBF affinity             |
//! | `a_clu`    | Agglomerative clustering, average linkage          |
//! | `dbs_clu`  | DBSCAN, `eps = 0.5` and `min_samples = 5`          |
//!
//! Each algorithm is bound to a fixed hyperparameter profile. A run fits the estimator,
//! assigns every sample to a cluster and scores the assignment with its inertia, the
//! scatter of the data and, when ground truth labels are available, the adjusted Rand
//! index.
//!
//! ```
//! use linfa::traits::Fit;
//! use linfa_competitors::ClusteringParams;
//!
//! let dataset = linfa_datasets::iris();
//! let run = ClusteringParams::new("km_clu", 3, 10).fit(&dataset).unwrap();
//!
//! assert_eq!(run.memberships().len(), 150);
//! println!("{}", run);
//! ```
//!
//! Identifiers are matched case-insensitively. An unknown identifier is accepted at
//! construction and reported as [`ClusteringError::UnknownAlgorithm`] when the
//! parameters are checked.

pub mod benchmarks;
pub mod error;
pub mod estimators;
mod hyperparams;
pub mod metrics;
mod run;

pub use error::{ClusteringError, Result};
pub use estimators::{
    Affinity, AgglomerativeProfile, DbscanProfile, Estimator, FitPredict, GmmProfile,
    KMeansProfile, SpectralProfile, NOISE,
};
pub use hyperparams::{Algorithm, ClusteringParams, ClusteringValidParams, DEFAULT_SEED};
pub use run::ClusteringRun;
