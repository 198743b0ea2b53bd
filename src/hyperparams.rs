use std::fmt;
use std::str::FromStr;

use linfa::ParamGuard;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{ClusteringError, Result};

/// Seed used for every estimator that consumes randomness, unless overridden
pub const DEFAULT_SEED: u64 = 42;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The closed set of competitor algorithms, one variant per fixed hyperparameter profile.
pub enum Algorithm {
    /// `km_clu`: K-Means with random initialisation
    KMeans,
    /// `gm_clu`: Gaussian mixture with full covariances
    GaussianMixture,
    /// `s_clu`: spectral partitioning of an RBF affinity graph
    Spectral,
    /// `a_clu`: agglomerative clustering with average linkage
    Agglomerative,
    /// `dbs_clu`: DBSCAN, discovers the number of clusters on its own
    Dbscan,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::KMeans,
        Algorithm::GaussianMixture,
        Algorithm::Spectral,
        Algorithm::Agglomerative,
        Algorithm::Dbscan,
    ];

    /// The short identifier this algorithm is selected by
    pub fn identifier(&self) -> &'static str {
        match self {
            Algorithm::KMeans => "km_clu",
            Algorithm::GaussianMixture => "gm_clu",
            Algorithm::Spectral => "s_clu",
            Algorithm::Agglomerative => "a_clu",
            Algorithm::Dbscan => "dbs_clu",
        }
    }

    /// Human readable family name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::KMeans => "K-Means",
            Algorithm::GaussianMixture => "Gaussian Mixture",
            Algorithm::Spectral => "Spectral",
            Algorithm::Agglomerative => "Agglomerative",
            Algorithm::Dbscan => "DBSCAN",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Algorithm {
    type Err = ClusteringError;

    /// Parses an identifier case-insensitively
    fn from_str(identifier: &str) -> Result<Self> {
        match identifier.to_lowercase().as_str() {
            "km_clu" => Ok(Algorithm::KMeans),
            "gm_clu" => Ok(Algorithm::GaussianMixture),
            "s_clu" => Ok(Algorithm::Spectral),
            "a_clu" => Ok(Algorithm::Agglomerative),
            "dbs_clu" => Ok(Algorithm::Dbscan),
            _ => Err(ClusteringError::UnknownAlgorithm(identifier.to_string())),
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// The checked configuration of a competitor run.
///
/// Obtained by calling `check()` on [`ClusteringParams`](struct.ClusteringParams.html).
pub struct ClusteringValidParams {
    algorithm: Algorithm,
    n_clusters: usize,
    n_init: usize,
    seed: u64,
}

impl ClusteringValidParams {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The target number of clusters. It also bounds the centroid computation,
    /// even for algorithms which discover their own number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// The number of random restarts for algorithms that support them
    pub fn n_init(&self) -> usize {
        self.n_init
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for a competitor run.
///
/// Values are stored verbatim, nothing is validated until the parameters are checked,
/// either explicitly or implicitly by calling `fit`.
///
/// ```
/// use linfa::ParamGuard;
/// use linfa_competitors::{Algorithm, ClusteringParams};
///
/// let params = ClusteringParams::new("KM_CLU", 3, 10).check().unwrap();
/// assert_eq!(params.algorithm(), Algorithm::KMeans);
///
/// assert!(ClusteringParams::new("k_medoids", 3, 10).check().is_err());
/// ```
pub struct ClusteringParams {
    identifier: String,
    n_clusters: usize,
    n_init: usize,
    seed: u64,
    resolved: Option<ClusteringValidParams>,
}

impl ClusteringParams {
    pub fn new<S: Into<String>>(identifier: S, n_clusters: usize, n_init: usize) -> Self {
        let mut params = ClusteringParams {
            identifier: identifier.into(),
            n_clusters,
            n_init,
            seed: DEFAULT_SEED,
            resolved: None,
        };
        params.resolve();
        params
    }

    /// Set the seed of the random generator handed to stochastic estimators.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.resolve();
        self
    }

    /// The algorithm identifier, exactly as it was given
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    fn resolve(&mut self) {
        self.resolved = self
            .identifier
            .parse()
            .ok()
            .map(|algorithm| ClusteringValidParams {
                algorithm,
                n_clusters: self.n_clusters,
                n_init: self.n_init,
                seed: self.seed,
            });
    }
}

impl ParamGuard for ClusteringParams {
    type Checked = ClusteringValidParams;
    type Error = ClusteringError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = self
            .resolved
            .as_ref()
            .ok_or_else(|| ClusteringError::UnknownAlgorithm(self.identifier.clone()))?;

        if params.n_clusters == 0 {
            return Err(ClusteringError::InvalidValue(
                "`n_clusters` cannot be 0!".to_string(),
            ));
        }
        if params.n_init == 0 {
            return Err(ClusteringError::InvalidValue(
                "`n_init` cannot be 0!".to_string(),
            ));
        }
        Ok(params)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        self.resolved
            .ok_or(ClusteringError::UnknownAlgorithm(self.identifier))
    }
}
