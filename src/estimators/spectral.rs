use linfa::traits::{Fit, Predict, Transformer};
use linfa::DatasetBase;
use linfa_clustering::{KMeans, KMeansInit};
use linfa_kernel::{Kernel, KernelInner, KernelMethod, KernelType};
use linfa_linalg::eigh::{EigSort, Eigh};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use super::{check_n_samples, Affinity, FitPredict};
use crate::error::Result;

/// Scale of the RBF affinity `exp(-gamma * |x - y|^2)`
pub const GAMMA: f64 = 1.0;

#[derive(Clone, Debug)]
/// `s_clu`: spectral clustering.
///
/// A dense RBF affinity matrix `A` without self loops is built over all samples and
/// normalized to `D^-1/2 A D^-1/2`, with `D` the diagonal of the affinity degrees. The samples are
/// embedded along its `n_clusters` leading eigenvectors, rescaled by `D^-1/2`, and the
/// embedding is partitioned with K-Means++, restarted `n_runs` times.
///
/// Connected components of the affinity graph map to a single point each in the
/// embedding, so disjoint groups are always told apart.
pub struct SpectralProfile {
    n_clusters: usize,
    n_runs: usize,
    gamma: f64,
    affinity: Affinity,
    init_method: KMeansInit<f64>,
    seed: u64,
}

impl SpectralProfile {
    pub(crate) fn new(n_clusters: usize, n_runs: usize, seed: u64) -> Self {
        SpectralProfile {
            n_clusters,
            n_runs,
            gamma: GAMMA,
            affinity: Affinity::Rbf,
            init_method: KMeansInit::KMeansPlusPlus,
            seed,
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    /// Initialisation of the K-Means run on the embedding
    pub fn init_method(&self) -> &KMeansInit<f64> {
        &self.init_method
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rows of the leading eigenvectors of the normalized affinity, one per sample
    fn embedding(&self, records: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        // linfa's gaussian kernel is exp(-|x - y|^2 / eps)
        let kernel = Kernel::params()
            .kind(KernelType::Dense)
            .method(KernelMethod::Gaussian(self.gamma.recip()))
            .transform(records);
        let mut affinity = match kernel.inner {
            KernelInner::Dense(matrix) => matrix,
            KernelInner::Sparse(matrix) => matrix.to_dense(),
        };

        // no self loops, an isolated sample keeps a unit degree
        affinity.diag_mut().fill(0.);
        let inv_sqrt_degrees = affinity
            .sum_axis(Axis(1))
            .mapv(|d| if d > 0. { d.sqrt().recip() } else { 1. });
        for ((i, j), a) in affinity.indexed_iter_mut() {
            *a *= inv_sqrt_degrees[i] * inv_sqrt_degrees[j];
        }

        let (_, eigenvectors) = affinity.eigh()?.sort_eig_desc();
        let mut embedding = eigenvectors.slice_move(s![.., ..self.n_clusters]);
        for (mut row, &scale) in embedding
            .rows_mut()
            .into_iter()
            .zip(inv_sqrt_degrees.iter())
        {
            row *= scale;
        }
        Ok(embedding)
    }
}

impl FitPredict for SpectralProfile {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        _targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        check_n_samples(&records, self.n_clusters)?;

        let embedding = self.embedding(records)?;

        let rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let model = KMeans::params_with_rng(self.n_clusters, rng)
            .init_method(self.init_method.clone())
            .n_runs(self.n_runs)
            .fit(&DatasetBase::from(embedding.view()))?;

        let memberships: Array1<usize> = model.predict(&embedding);
        Ok(memberships.mapv(|cluster| cluster as isize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClusteringError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn three_groups() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [0.3, 0.2],
            [0.2, 0.2],
            [30.0, 0.0],
            [30.2, 0.1],
            [30.1, 0.3],
            [30.3, 0.2],
            [30.2, 0.2],
            [0.0, 30.0],
            [0.2, 30.1],
            [0.1, 30.3],
            [0.3, 30.2],
            [0.2, 30.2]
        ]
    }

    #[test]
    fn disjoint_groups_collapse_in_embedding() {
        let embedding = SpectralProfile::new(3, 1, 42)
            .embedding(three_groups().view())
            .unwrap();
        assert_eq!(embedding.dim(), (15, 3));

        for group in 0..3 {
            let first = embedding.row(5 * group);
            for i in 1..5 {
                assert_abs_diff_eq!(embedding.row(5 * group + i), first, epsilon = 1e-8);
            }
        }
        let (a, b) = (embedding.row(0), embedding.row(5));
        assert!((&a - &b).mapv(|x| x * x).sum() > 1e-4);
    }

    #[test]
    fn disjoint_groups_are_recovered() {
        let memberships = SpectralProfile::new(3, 10, 42)
            .fit_predict(three_groups().view(), None)
            .unwrap();

        assert_eq!(memberships.len(), 15);
        for group in memberships.exact_chunks(5) {
            assert!(group.iter().all(|&c| c == group[0]));
        }
        assert_ne!(memberships[0], memberships[5]);
        assert_ne!(memberships[0], memberships[10]);
        assert_ne!(memberships[5], memberships[10]);
    }

    #[test]
    fn too_few_samples_fail() {
        let records = array![[0., 0.], [1., 1.]];
        let err = SpectralProfile::new(3, 1, 42)
            .fit_predict(records.view(), None)
            .unwrap_err();
        assert!(matches!(err, ClusteringError::InvalidValue(_)));
    }
}
