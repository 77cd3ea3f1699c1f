use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input point.
    ///
    /// Points that could not be placed in any cluster carry [`NOISE`](super::NOISE).
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// Density peaks discovers the number of clusters from the data, so this
    /// returns 0.
    fn n_clusters(&self) -> usize;
}
