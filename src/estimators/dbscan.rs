use linfa::traits::Transformer;
use linfa_clustering::Dbscan;
use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{FitPredict, NOISE};
use crate::error::Result;

/// Neighbourhood radius
pub const TOLERANCE: f64 = 0.5;
/// Minimum neighbourhood size of a core point, the point itself included
pub const MIN_POINTS: usize = 5;
/// Order of the Minkowski metric, i.e. euclidean distance
pub const MINKOWSKI_P: u32 = 2;

#[derive(Clone, Debug)]
/// `dbs_clu`: density based clustering. Neither the cluster count nor the
/// initialisation-repeat count reach this estimator.
pub struct DbscanProfile {
    tolerance: f64,
    min_points: usize,
    minkowski_p: u32,
}

impl DbscanProfile {
    pub(crate) fn new() -> Self {
        DbscanProfile {
            tolerance: TOLERANCE,
            min_points: MIN_POINTS,
            minkowski_p: MINKOWSKI_P,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    pub fn minkowski_p(&self) -> u32 {
        self.minkowski_p
    }
}

impl FitPredict for DbscanProfile {
    fn fit_predict(
        &self,
        records: ArrayView2<'_, f64>,
        _targets: Option<ArrayView1<'_, usize>>,
    ) -> Result<Array1<isize>> {
        // `Dbscan::params` measures neighbourhoods with `L2Dist`, Minkowski of order 2
        let memberships = Dbscan::params(self.min_points)
            .tolerance(self.tolerance)
            .transform(&records)?;

        Ok(memberships.mapv(|cluster| cluster.map_or(NOISE, |id| id as isize)))
    }
}
