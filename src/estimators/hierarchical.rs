use std::collections::HashMap;

use kodama::{linkage, Method, Step};
use linfa_nn::distance::{Distance, L2Dist};
use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{check_n_samples, Affinity, FitPredict};
use crate::error::Result;

#[derive(Clone, Debug)]
/// `a_clu`: bottom-up agglomeration of samples by Euclidean distance,
/// merging the two groups with the smallest average pairwise distance until
/// `n_clusters` groups remain.
pub struct AgglomerativeProfile {
    n_clusters: usize,
    affinity: Affinity,
    linkage: Method,
}

impl AgglomerativeProfile {
    pub(crate) fn new(n_clusters: usize) -> Self {
        AgglomerativeProfile {
            n_clusters,
            affinity: Affinity::L2,
            linkage: Method::Average,
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    pub fn linkage(&self) -> Method {
        self.linkage
    }
}

impl FitPredict for AgglomerativeProfile {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        _targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        check_n_samples(&records, self.n_clusters)?;

        let n_observations = records.nrows();
        if n_observations == self.n_clusters {
            return Ok(Array1::from_iter(0..n_observations as isize));
        }

        let mut condensed = condensed_distances(&records);
        let dendrogram = linkage(&mut condensed, n_observations, self.linkage);

        Ok(cut_dendrogram(
            dendrogram.steps(),
            n_observations,
            self.n_clusters,
        ))
    }
}

/// Upper triangle of the pairwise distance matrix, row by row
fn condensed_distances(records: &ArrayView2<'_, f64>) -> Vec<f64> {
    let n = records.nrows();
    let mut condensed = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            condensed.push(L2Dist.distance(records.row(i), records.row(j)));
        }
    }
    condensed
}

/// Replays the first `n_observations - n_clusters` merges and labels the resulting groups
/// in order of their first member.
fn cut_dendrogram(
    steps: &[Step<f64>],
    n_observations: usize,
    n_clusters: usize,
) -> Array1<isize> {
    // kodama labels the cluster created at step `i` as `n_observations + i`
    let mut clusters: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, step) in steps
        .iter()
        .take(n_observations - n_clusters)
        .enumerate()
    {
        let mut ids = Vec::with_capacity(step.size);
        for &cluster in [step.cluster1, step.cluster2].iter() {
            if cluster < n_observations {
                ids.push(cluster);
            } else if let Some(mut members) = clusters.remove(&cluster) {
                ids.append(&mut members);
            }
        }
        clusters.insert(n_observations + i, ids);
    }

    let mut owner: Vec<usize> = (0..n_observations).collect();
    for (&cluster, members) in &clusters {
        for &member in members {
            owner[member] = cluster;
        }
    }

    let mut labels = HashMap::new();
    owner
        .iter()
        .map(|cluster| {
            let next = labels.len() as isize;
            *labels.entry(*cluster).or_insert(next)
        })
        .collect()
}
