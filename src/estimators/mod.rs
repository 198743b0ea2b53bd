//! Fixed hyperparameter profiles bound to their clustering implementations
//!
//! Every profile only selects hyperparameters. The clustering itself is done by
//! `linfa-clustering`, `linfa-kernel` with `linfa-linalg`, and `kodama`.

mod dbscan;
mod gaussian_mixture;
mod hierarchical;
mod k_means;
mod spectral;

pub use dbscan::DbscanProfile;
pub use gaussian_mixture::GmmProfile;
pub use hierarchical::AgglomerativeProfile;
pub use k_means::KMeansProfile;
pub use spectral::SpectralProfile;

use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::info;

use crate::error::{ClusteringError, Result};
use crate::hyperparams::{Algorithm, ClusteringValidParams};

/// Cluster index given to samples that belong to no cluster
pub const NOISE: isize = -1;

/// Pairwise affinity an estimator builds its graph or tree from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Affinity {
    /// Euclidean distance
    L2,
    /// Gaussian kernel `exp(-gamma * |x - y|^2)`
    Rbf,
}

/// The capability shared by all competitor estimators: fit to a matrix and
/// assign every sample to a cluster in the same call.
pub trait FitPredict {
    /// Returns one cluster index per row of `records`, [`NOISE`](constant.NOISE.html)
    /// for samples left unassigned. None of the bound algorithms use `targets`.
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>>;
}

/// Count-based estimators need at least as many samples as clusters
fn check_n_samples(records: &ArrayView2<'_, f64>, n_clusters: usize) -> Result<()> {
    if records.nrows() < n_clusters {
        return Err(ClusteringError::InvalidValue(format!(
            "{} samples cannot form {} clusters",
            records.nrows(),
            n_clusters
        )));
    }
    Ok(())
}

/// An instantiated estimator, carrying the fixed profile of its family
#[derive(Clone, Debug)]
pub enum Estimator {
    KMeans(KMeansProfile),
    GaussianMixture(GmmProfile),
    Spectral(SpectralProfile),
    Agglomerative(AgglomerativeProfile),
    Dbscan(DbscanProfile),
}

impl Estimator {
    /// Instantiate the estimator selected by `params`
    pub fn new(params: &ClusteringValidParams) -> Self {
        let (n_clusters, n_init, seed) = (params.n_clusters(), params.n_init(), params.seed());
        let estimator = match params.algorithm() {
            Algorithm::KMeans => Estimator::KMeans(KMeansProfile::new(n_clusters, n_init, seed)),
            Algorithm::GaussianMixture => {
                Estimator::GaussianMixture(GmmProfile::new(n_clusters, seed))
            }
            Algorithm::Spectral => {
                Estimator::Spectral(SpectralProfile::new(n_clusters, n_init, seed))
            }
            Algorithm::Agglomerative => {
                Estimator::Agglomerative(AgglomerativeProfile::new(n_clusters))
            }
            Algorithm::Dbscan => Estimator::Dbscan(DbscanProfile::new()),
        };
        info!("Instantiate {} Clustering.", estimator.algorithm().name());

        estimator
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Estimator::KMeans(_) => Algorithm::KMeans,
            Estimator::GaussianMixture(_) => Algorithm::GaussianMixture,
            Estimator::Spectral(_) => Algorithm::Spectral,
            Estimator::Agglomerative(_) => Algorithm::Agglomerative,
            Estimator::Dbscan(_) => Algorithm::Dbscan,
        }
    }
}

impl FitPredict for Estimator {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        match self {
            Estimator::KMeans(profile) => profile.fit_predict(records, targets),
            Estimator::GaussianMixture(profile) => profile.fit_predict(records, targets),
            Estimator::Spectral(profile) => profile.fit_predict(records, targets),
            Estimator::Agglomerative(profile) => profile.fit_predict(records, targets),
            Estimator::Dbscan(profile) => profile.fit_predict(records, targets),
        }
    }
}

impl ClusteringValidParams {
    /// Instantiate the underlying estimator with its fixed profile
    pub fn estimator(&self) -> Estimator {
        Estimator::new(self)
    }
}
