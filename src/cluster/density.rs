//! Local density (rho) and distance to the nearest denser record (delta).
//!
//! # The Algorithm (Rodriguez & Laio, 2014)
//!
//! Cluster centers are records surrounded by lower-density neighbors and
//! relatively far from any record of higher density. For each record `i`:
//!
//! ```text
//! rho_i   = |{ j : d(i, j) < dc }|
//! delta_i = min { d(i, j) : j ranked before i }
//! ```
//!
//! Records are ranked by density descending. Equal densities are ordered by
//! ascending id, so "ranked before" is a strict total order and the
//! nearest-higher-density neighbor of every record is well defined. The top
//! record has no denser neighbor; it receives `delta = max_dis` so that it is
//! always eligible as a center.
//!
//! ## Complexity
//!
//! - **Time**: O(N²) for the density pass and O(N²) for the prefix scan.
//! - **Space**: O(N).
//!
//! ## References
//!
//! Rodriguez, A., Laio, A. (2014). "Clustering by fast search and find of
//! density peaks." Science 344(6191).

use super::pairwise::PairwiseDistances;
use crate::error::{Error, Result};

/// Density-peak statistics for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Record index.
    pub id: usize,
    /// Number of records strictly within `dc`.
    pub density: usize,
    /// Distance to the nearest record ranked before this one.
    pub delta: f64,
    /// That record, or `None` for the top-ranked record.
    pub nearest_higher: Option<usize>,
}

/// Candidates in descending-density order.
///
/// The order is an invariant of the type: densities never increase along the
/// list and the ids form a permutation of `0..len`. Center selection depends
/// on it, so a list can only be built through [`analyze`] or
/// [`CandidateList::from_ordered`].
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateList {
    items: Vec<Candidate>,
}

impl CandidateList {
    /// Wrap an already ordered list (e.g. one reloaded from a candidate file).
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for an empty list.
    /// - [`Error::InvalidCandidates`] if densities increase somewhere, an id is
    ///   out of range or repeated, or `nearest_higher` references an unknown id.
    pub fn from_ordered(items: Vec<Candidate>) -> Result<Self> {
        let n = items.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut seen = vec![false; n];
        for (rank, c) in items.iter().enumerate() {
            if c.id >= n {
                return Err(Error::InvalidCandidates(format!(
                    "id {} out of range for {} records",
                    c.id, n
                )));
            }
            if std::mem::replace(&mut seen[c.id], true) {
                return Err(Error::InvalidCandidates(format!("duplicate id {}", c.id)));
            }
            if let Some(nh) = c.nearest_higher {
                if nh >= n || nh == c.id {
                    return Err(Error::InvalidCandidates(format!(
                        "record {} points to invalid neighbor {}",
                        c.id, nh
                    )));
                }
            }
            if rank > 0 && items[rank - 1].density < c.density {
                return Err(Error::InvalidCandidates(format!(
                    "density increases at rank {} ({} after {})",
                    rank,
                    c.density,
                    items[rank - 1].density
                )));
            }
        }

        Ok(Self { items })
    }

    /// Candidates, highest density first.
    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }

    /// Iterate highest density first.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    /// Number of candidates (one per record).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The top-ranked record.
    pub fn peak(&self) -> &Candidate {
        &self.items[0]
    }

    /// Unwrap into the ordered vector.
    pub fn into_inner(self) -> Vec<Candidate> {
        self.items
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Per-record density: number of other records strictly within `dc`.
///
/// Every record gets an entry, isolated ones a zero.
pub fn local_density(table: &PairwiseDistances, dc: f64) -> Vec<usize> {
    let mut density = vec![0usize; table.n_records()];
    for (key, dis) in table.iter() {
        if dis < dc {
            density[key.lo()] += 1;
            density[key.hi()] += 1;
        }
    }
    density
}

/// Compute density and delta for every record and rank them.
pub fn analyze(table: &PairwiseDistances, dc: f64) -> CandidateList {
    let density = local_density(table, dc);

    let mut order: Vec<usize> = (0..density.len()).collect();
    // Stable sort keeps ascending id among equal densities.
    order.sort_by(|&a, &b| density[b].cmp(&density[a]));

    let mut items = Vec::with_capacity(order.len());
    items.push(Candidate {
        id: order[0],
        density: density[order[0]],
        delta: table.max_distance(),
        nearest_higher: None,
    });

    for (rank, &id) in order.iter().enumerate().skip(1) {
        let mut delta = f64::INFINITY;
        let mut nearest = order[0];
        for &other in &order[..rank] {
            let dis = table.between(id, other);
            if dis < delta {
                delta = dis;
                nearest = other;
            }
        }
        items.push(Candidate {
            id,
            density: density[id],
            delta,
            nearest_higher: Some(nearest),
        });
    }

    log::debug!(
        "density peaks: n={} dc={:.6} peak id={} density={}",
        items.len(),
        dc,
        items[0].id,
        items[0].density
    );

    CandidateList { items }
}
