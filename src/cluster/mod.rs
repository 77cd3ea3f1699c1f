//! Density-peak clustering for dense feature vectors.
//!
//! ## The Idea
//!
//! Cluster centers are local density maxima that sit far from any denser
//! point. For every record two quantities are computed:
//!
//! - **rho** (density): number of records closer than a cutoff radius `dc`
//! - **delta**: distance to the nearest record of higher density
//!
//! Records with both a large rho and an unusually large delta are centers.
//! Every other record joins the cluster of its nearest denser neighbor, which
//! is resolved in a single pass in descending-density order.
//!
//! ## Pipeline
//!
//! | Stage | Item |
//! |-------|------|
//! | distance | [`DistanceModel`] |
//! | all pairs | [`PairwiseDistances`] |
//! | cutoff | [`CutoffSelector`] |
//! | rho / delta | [`analyze`] → [`CandidateList`] |
//! | centers | [`assign`] → [`ClusterAssignment`] |
//! | confidence | [`confidence()`] |
//!
//! [`DensityPeaks`] runs all of them. The stages are public so the candidate
//! list can be inspected (or dumped with [`crate::io`]) while tuning the center
//! thresholds.
//!
//! ## Usage
//!
//! ```rust
//! use crest::cluster::{Clustering, DensityPeaks};
//!
//! let data = vec![
//!     vec![0.0],
//!     vec![0.1],
//!     vec![5.0],
//!     vec![5.1],
//! ];
//!
//! let model = DensityPeaks::new()
//!     .with_cutoff(0.5)
//!     .with_min_density(1)
//!     .with_min_delta(0.5);
//! let labels = model.fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod assign;
mod confidence;
mod cutoff;
mod density;
mod distance;
mod pairwise;
mod peaks;
mod traits;

pub use assign::{assign, ClusterAssignment, Thresholds};
pub use confidence::confidence;
pub use cutoff::{CutoffEstimate, CutoffSelector};
pub use density::{analyze, local_density, Candidate, CandidateList};
pub use distance::DistanceModel;
pub use pairwise::{PairKey, PairwiseDistances};
pub use peaks::{DensityPeaks, DensityPeaksFit};
pub use traits::Clustering;

/// Label for points that belong to no cluster.
pub const NOISE: usize = usize::MAX;
