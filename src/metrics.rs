//! Common metrics for competitor runs
use std::collections::HashMap;
use std::hash::Hash;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix2};
use tracing::warn;

use crate::error::{ClusteringError, Result};

/// Sum of the squared magnitudes of all samples, independent of any clustering.
pub fn data_scatter<D: Data<Elem = f64>>(records: &ArrayBase<D, Ix2>) -> f64 {
    records.iter().map(|x| x * x).sum()
}

/// Computes the mean of the samples assigned to each of the clusters `0..n_clusters`.
///
/// The loop is bounded by `n_clusters`, not by the clusters present in `memberships`:
/// noise and labels beyond the bound are skipped, and a cluster without samples gets a
/// centroid made of `NaN`.
pub fn compute_centroids<D: Data<Elem = f64>>(
    n_clusters: usize,
    // (n_observations, n_features)
    records: &ArrayBase<D, Ix2>,
    // (n_observations,)
    memberships: &Array1<isize>,
) -> Array2<f64> {
    let mut centroids = Array2::zeros((n_clusters, records.ncols()));
    let mut counts = vec![0usize; n_clusters];

    for (observation, &cluster) in records.rows().into_iter().zip(memberships.iter()) {
        if let Some(k) = in_bounds(cluster, n_clusters) {
            let mut centroid = centroids.row_mut(k);
            centroid += &observation;
            counts[k] += 1;
        }
    }

    for (k, (mut centroid, &count)) in centroids
        .rows_mut()
        .into_iter()
        .zip(counts.iter())
        .enumerate()
    {
        if count == 0 {
            warn!("cluster {} received no samples, its centroid is undefined", k);
            centroid.fill(f64::NAN);
        } else {
            centroid /= count as f64;
        }
    }
    centroids
}

/// Sum of squared euclidean distances of the samples to the centroid of their cluster.
///
/// Only clusters `0..centroids.nrows()` contribute; an empty cluster adds nothing.
pub fn inertia<D: Data<Elem = f64>>(
    records: &ArrayBase<D, Ix2>,
    memberships: &Array1<isize>,
    centroids: &Array2<f64>,
) -> f64 {
    records
        .rows()
        .into_iter()
        .zip(memberships.iter())
        .filter_map(|(observation, &cluster)| {
            in_bounds(cluster, centroids.nrows()).map(|k| {
                (&observation - &centroids.row(k))
                    .mapv(|x| x * x)
                    .sum()
            })
        })
        .sum()
}

fn in_bounds(cluster: isize, n_clusters: usize) -> Option<usize> {
    if cluster >= 0 && (cluster as usize) < n_clusters {
        Some(cluster as usize)
    } else {
        None
    }
}

/// Evaluates the agreement of two partitions of the same samples, corrected for chance.
///
/// The adjusted Rand index counts the pairs of samples put together or apart by both
/// partitions, relative to what random partitions with the same cluster sizes would
/// achieve. It is `1` for identical partitions (up to a relabeling), close to `0` for
/// independent ones and can become negative.
///
/// Every distinct value is a cluster, noise labels included. Two empty partitions agree
/// perfectly.
pub fn adjusted_rand_score<T: Eq + Hash, P: Eq + Hash>(
    truth: ArrayView1<'_, T>,
    prediction: ArrayView1<'_, P>,
) -> Result<f64> {
    if truth.len() != prediction.len() {
        return Err(ClusteringError::LabelMismatch {
            expected: prediction.len(),
            found: truth.len(),
        });
    }

    let mut contingency: HashMap<(&T, &P), usize> = HashMap::new();
    let mut truth_sizes: HashMap<&T, usize> = HashMap::new();
    let mut prediction_sizes: HashMap<&P, usize> = HashMap::new();
    for (t, p) in truth.iter().zip(prediction.iter()) {
        *contingency.entry((t, p)).or_insert(0) += 1;
        *truth_sizes.entry(t).or_insert(0) += 1;
        *prediction_sizes.entry(p).or_insert(0) += 1;
    }

    let n_samples = truth.len() as f64;
    let joint = sum_of_squares(contingency.values());

    // pair confusion matrix, every ordered pair of distinct samples counted once
    let together_both = joint - n_samples;
    let apart_in_truth = sum_of_squares(prediction_sizes.values()) - joint;
    let apart_in_prediction = sum_of_squares(truth_sizes.values()) - joint;
    let apart_both = n_samples * n_samples - apart_in_truth - apart_in_prediction - joint;

    if apart_in_truth == 0. && apart_in_prediction == 0. {
        return Ok(1.);
    }

    Ok(
        2. * (together_both * apart_both - apart_in_prediction * apart_in_truth)
            / ((together_both + apart_in_prediction) * (apart_in_prediction + apart_both)
                + (together_both + apart_in_truth) * (apart_in_truth + apart_both)),
    )
}

fn sum_of_squares<'a, I: Iterator<Item = &'a usize>>(sizes: I) -> f64 {
    sizes.map(|&n| (n * n) as f64).sum()
}
