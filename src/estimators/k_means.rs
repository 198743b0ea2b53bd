use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{KMeans, KMeansInit};
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use super::{check_n_samples, FitPredict};
use crate::error::Result;

/// Lloyd iterations are capped at this count for every restart.
pub const MAX_N_ITERATIONS: u64 = 100;

#[derive(Clone, Debug)]
/// `km_clu`: K-Means with centroids drawn at random from the observations.
///
/// The training is restarted `n_runs` times and the run with the lowest inertia is kept.
pub struct KMeansProfile {
    n_clusters: usize,
    n_runs: usize,
    max_n_iterations: u64,
    init_method: KMeansInit<f64>,
    seed: u64,
}

impl KMeansProfile {
    pub(crate) fn new(n_clusters: usize, n_runs: usize, seed: u64) -> Self {
        KMeansProfile {
            n_clusters,
            n_runs,
            max_n_iterations: MAX_N_ITERATIONS,
            init_method: KMeansInit::Random,
            seed,
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    pub fn init_method(&self) -> &KMeansInit<f64> {
        &self.init_method
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FitPredict for KMeansProfile {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        _targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        check_n_samples(&records, self.n_clusters)?;

        let rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let dataset = DatasetBase::from(records);

        let model = KMeans::params_with_rng(self.n_clusters, rng)
            .init_method(self.init_method.clone())
            .max_n_iterations(self.max_n_iterations)
            .n_runs(self.n_runs)
            .fit(&dataset)?;

        let memberships: Array1<usize> = model.predict(&records);
        Ok(memberships.mapv(|cluster| cluster as isize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separates_two_groups() {
        let records = array![
            [0., 0.],
            [0.1, 0.2],
            [0.2, 0.1],
            [10., 10.],
            [10.1, 9.9],
            [9.8, 10.2]
        ];
        let memberships = KMeansProfile::new(2, 5, 42)
            .fit_predict(records.view(), None)
            .unwrap();

        assert_eq!(memberships.len(), 6);
        assert_eq!(memberships[0], memberships[1]);
        assert_eq!(memberships[0], memberships[2]);
        assert_eq!(memberships[3], memberships[4]);
        assert_eq!(memberships[3], memberships[5]);
        assert_ne!(memberships[0], memberships[3]);
    }

    #[test]
    fn more_clusters_than_samples_fails() {
        let records = array![[0., 0.], [1., 1.]];
        assert!(KMeansProfile::new(3, 1, 42)
            .fit_predict(records.view(), None)
            .is_err());
    }
}
