use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{GaussianMixtureModel, GmmCovarType, GmmInitMethod};
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use super::{check_n_samples, FitPredict};
use crate::error::Result;

#[derive(Clone, Debug)]
/// `gm_clu`: Gaussian mixture with one full covariance matrix per component,
/// EM started from random responsibilities. Each sample is assigned to its most
/// probable component.
pub struct GmmProfile {
    n_clusters: usize,
    covariance_type: GmmCovarType,
    init_method: GmmInitMethod,
    n_runs: u64,
    seed: u64,
}

impl GmmProfile {
    pub(crate) fn new(n_clusters: usize, seed: u64) -> Self {
        GmmProfile {
            n_clusters,
            covariance_type: GmmCovarType::Full,
            init_method: GmmInitMethod::Random,
            n_runs: 1,
            seed,
        }
    }

    /// The number of mixture components
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn covariance_type(&self) -> &GmmCovarType {
        &self.covariance_type
    }

    pub fn init_method(&self) -> &GmmInitMethod {
        &self.init_method
    }

    pub fn n_runs(&self) -> u64 {
        self.n_runs
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FitPredict for GmmProfile {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        _targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        check_n_samples(&records, self.n_clusters)?;

        let rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let dataset = DatasetBase::from(records);

        let model = GaussianMixtureModel::params(self.n_clusters)
            .covariance_type(self.covariance_type.clone())
            .init_method(self.init_method.clone())
            .n_runs(self.n_runs)
            .with_rng(rng)
            .fit(&dataset)?;

        let memberships: Array1<usize> = model.predict(&records);
        Ok(memberships.mapv(|cluster| cluster as isize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linfa_datasets::generate;
    use ndarray::array;

    #[test]
    fn assigns_every_sample_a_component() {
        let mut rng = Xoshiro256Plus::seed_from_u64(7);
        let centroids = array![[0., 0.], [25., 25.]];
        let records = generate::blobs(40, &centroids, &mut rng);

        let memberships = GmmProfile::new(2, 42)
            .fit_predict(records.view(), None)
            .unwrap();

        assert_eq!(memberships.len(), 80);
        assert!(memberships.iter().all(|&c| c == 0 || c == 1));
    }
}
