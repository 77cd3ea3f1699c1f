//! Center selection and cluster propagation.
//!
//! A candidate is a center when both its density and its delta clear the
//! configured thresholds. Every other record joins the cluster of its nearest
//! higher-density neighbor. Walking the candidates in descending-density order
//! guarantees that neighbor has already been resolved, so one pass suffices.

use super::density::CandidateList;
use crate::error::{Error, Result};

/// Center selection thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum density for a center (inclusive).
    pub min_density: usize,
    /// Minimum delta for a center (inclusive).
    pub min_delta: f64,
}

impl Thresholds {
    /// Create thresholds.
    pub fn new(min_density: usize, min_delta: f64) -> Self {
        Self {
            min_density,
            min_delta,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.min_delta.is_finite() || self.min_delta < 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_delta",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(1, 0.38)
    }
}

/// Centers and the cluster each record belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    /// Center record ids, in candidate order.
    pub centers: Vec<usize>,
    /// Center id per record; `None` when no center is reachable.
    pub labels: Vec<Option<usize>>,
}

impl ClusterAssignment {
    /// Number of clusters found.
    pub fn n_clusters(&self) -> usize {
        self.centers.len()
    }

    /// Whether `id` was selected as a center.
    pub fn is_center(&self, id: usize) -> bool {
        self.labels.get(id).copied().flatten() == Some(id) && self.centers.contains(&id)
    }

    /// Number of records without a cluster.
    pub fn n_unassigned(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }

    /// Map center ids to compact cluster indices `0..n_clusters` (center order).
    ///
    /// Labels that do not name a listed center map to `None`.
    pub fn compact_labels(&self) -> Vec<Option<usize>> {
        let mut index = vec![None; self.labels.len()];
        for (k, &c) in self.centers.iter().enumerate() {
            if let Some(slot) = index.get_mut(c) {
                *slot = Some(k);
            }
        }
        self.labels
            .iter()
            .map(|l| l.and_then(|c| index.get(c).copied().flatten()))
            .collect()
    }
}

/// Select centers and propagate membership along the nearest-higher chain.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `min_delta` is negative or not finite.
pub fn assign(candidates: &CandidateList, thresholds: &Thresholds) -> Result<ClusterAssignment> {
    thresholds.validate()?;

    let n = candidates.len();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut resolved = vec![false; n];
    let mut centers = Vec::new();

    for c in candidates {
        if c.density >= thresholds.min_density && c.delta >= thresholds.min_delta {
            centers.push(c.id);
            labels[c.id] = Some(c.id);
        } else {
            labels[c.id] = match c.nearest_higher {
                Some(nh) if resolved[nh] => labels[nh],
                // Only reachable for a list whose pointers reference later ranks.
                Some(nh) => {
                    log::debug!("record {} points to unresolved record {}", c.id, nh);
                    None
                }
                None => None,
            };
        }
        resolved[c.id] = true;
    }

    log::info!(
        "selected {} centers, {} of {} records unassigned",
        centers.len(),
        labels.iter().filter(|l| l.is_none()).count(),
        n
    );

    Ok(ClusterAssignment { centers, labels })
}
