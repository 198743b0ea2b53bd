use std::fmt;

use linfa::traits::Fit;
use linfa::DatasetBase;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};
use tracing::info;

use crate::error::{ClusteringError, Result};
use crate::estimators::{FitPredict, NOISE};
use crate::hyperparams::{Algorithm, ClusteringValidParams};
use crate::metrics::{adjusted_rand_score, compute_centroids, data_scatter, inertia};

#[derive(Clone, Debug, PartialEq)]
/// The outcome of fitting and scoring one competitor estimator.
///
/// Produced once by [`fit_score`](struct.ClusteringValidParams.html#method.fit_score)
/// and never mutated afterwards.
pub struct ClusteringRun {
    algorithm: Algorithm,
    memberships: Array1<isize>,
    centroids: Array2<f64>,
    inertia: f64,
    data_scatter: f64,
    ari: Option<f64>,
}

impl ClusteringRun {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// One cluster index per sample, `-1` for noise
    pub fn memberships(&self) -> &Array1<isize> {
        &self.memberships
    }

    /// One row per configured cluster. Rows of clusters without samples are `NaN`.
    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn data_scatter(&self) -> f64 {
        self.data_scatter
    }

    /// Adjusted Rand index against the ground truth, if one was given
    pub fn ari(&self) -> Option<f64> {
        self.ari
    }

    /// Number of distinct clusters in the assignment, noise excluded
    pub fn n_clusters_found(&self) -> usize {
        let mut clusters: Vec<isize> = self
            .memberships
            .iter()
            .copied()
            .filter(|&c| c != NOISE)
            .collect();
        clusters.sort_unstable();
        clusters.dedup();
        clusters.len()
    }

    pub fn n_noise(&self) -> usize {
        self.memberships.iter().filter(|&&c| c == NOISE).count()
    }
}

impl fmt::Display for ClusteringRun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.ari {
            Some(ari) => write!(f, "ARI = {:.3}", ari)?,
            None => write!(f, "ARI = n/a")?,
        }
        write!(f, " Inertia = {:.3}", self.inertia)
    }
}

impl ClusteringValidParams {
    /// Fits the selected estimator to `records` and scores the assignment.
    ///
    /// Centroids and inertia are computed for the configured cluster indices
    /// `0..n_clusters`, whatever number of clusters the estimator found. The adjusted
    /// Rand index is only computed when `labels` are given.
    pub fn fit_score(
        &self,
        records: ArrayView2<'_, f64>,
        labels: Option<ArrayView1<'_, usize>>,
    ) -> Result<ClusteringRun> {
        if records.nrows() == 0 {
            return Err(linfa::Error::NotEnoughSamples.into());
        }
        if let Some(labels) = labels {
            if labels.len() != records.nrows() {
                return Err(ClusteringError::LabelMismatch {
                    expected: records.nrows(),
                    found: labels.len(),
                });
            }
        }

        let estimator = self.estimator();
        info!("Fitting and testing of {}", self.algorithm());
        let memberships = estimator.fit_predict(records, labels)?;

        let centroids = compute_centroids(self.n_clusters(), &records, &memberships);
        let inertia = inertia(&records, &memberships, &centroids);
        let data_scatter = data_scatter(&records);
        let ari = labels
            .map(|labels| adjusted_rand_score(labels, memberships.view()))
            .transpose()?;

        let run = ClusteringRun {
            algorithm: self.algorithm(),
            memberships,
            centroids,
            inertia,
            data_scatter,
            ari,
        };
        info!("{}", run);

        Ok(run)
    }
}

/// Fits on the records of a dataset, its targets act as ground truth
impl<D: Data<Elem = f64>> Fit<ArrayBase<D, Ix2>, Array1<usize>, ClusteringError>
    for ClusteringValidParams
{
    type Object = ClusteringRun;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, Array1<usize>>) -> Result<ClusteringRun> {
        self.fit_score(dataset.records().view(), Some(dataset.targets().view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClusteringParams;
    use approx::assert_abs_diff_eq;
    use linfa::ParamGuard;
    use ndarray::array;

    fn params(identifier: &str, n_clusters: usize) -> ClusteringValidParams {
        ClusteringParams::new(identifier, n_clusters, 5)
            .check()
            .unwrap()
    }

    #[test]
    fn summary_has_three_decimals() {
        let run = ClusteringRun {
            algorithm: Algorithm::KMeans,
            memberships: array![0, 1],
            centroids: array![[0.], [1.]],
            inertia: 78.85144,
            data_scatter: 1.,
            ari: Some(0.73023),
        };
        assert_eq!(run.to_string(), "ARI = 0.730 Inertia = 78.851");

        let run = ClusteringRun { ari: None, ..run };
        assert_eq!(run.to_string(), "ARI = n/a Inertia = 78.851");
    }

    #[test]
    fn noise_and_found_clusters() {
        let run = ClusteringRun {
            algorithm: Algorithm::Dbscan,
            memberships: array![0, -1, 2, 2, -1, 0],
            centroids: Array2::zeros((3, 1)),
            inertia: 0.,
            data_scatter: 0.,
            ari: None,
        };
        assert_eq!(run.n_noise(), 2);
        assert_eq!(run.n_clusters_found(), 2);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let records = Array2::<f64>::zeros((0, 2));
        let err = params("km_clu", 2)
            .fit_score(records.view(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ClusteringError::Linfa(linfa::Error::NotEnoughSamples)
        ));
    }

    #[test]
    fn label_length_must_match() {
        let records = array![[0., 0.], [1., 1.], [5., 5.]];
        let labels = array![0usize, 1];
        let err = params("a_clu", 2)
            .fit_score(records.view(), Some(labels.view()))
            .unwrap_err();
        assert!(matches!(
            err,
            ClusteringError::LabelMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn agglomerative_run_is_scored() {
        let records = array![[0., 0.], [0., 2.], [10., 0.], [10., 2.]];
        let labels = array![1usize, 1, 0, 0];
        let run = params("a_clu", 2)
            .fit_score(records.view(), Some(labels.view()))
            .unwrap();

        assert_eq!(run.algorithm(), Algorithm::Agglomerative);
        assert_eq!(run.memberships(), &array![0isize, 0, 1, 1]);
        assert_abs_diff_eq!(*run.centroids(), array![[0., 1.], [10., 1.]]);
        assert_abs_diff_eq!(run.inertia(), 4.);
        assert_abs_diff_eq!(run.data_scatter(), 208.);
        assert_abs_diff_eq!(run.ari().unwrap(), 1.);
    }

    #[test]
    fn no_labels_leave_ari_unset() {
        let records = array![[0., 0.], [0., 2.], [10., 0.], [10., 2.]];
        let run = params("a_clu", 2).fit_score(records.view(), None).unwrap();
        assert_eq!(run.ari(), None);
    }
}
