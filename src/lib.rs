//! Density-peak clustering.
//!
//! `crest` implements clustering by fast search and find of density peaks
//! (Rodriguez & Laio, 2014) for dense feature vectors.
//!
//! The primary public API is under [`cluster`], which provides:
//! - distance models (Euclidean, Gaussian kernel) and an exact all-pairs table
//! - automatic tuning of the neighborhood cutoff `dc`
//! - per-record density / delta and the ordered candidate list
//! - center selection, chain propagation, and per-record confidence
//!
//! [`metrics`] scores an assignment against ground-truth labels and [`io`] reads
//! datasets and reads/writes the candidate and report files.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod io;
pub mod metrics;

pub use cluster::{
    Candidate, CandidateList, ClusterAssignment, Clustering, CutoffEstimate, CutoffSelector,
    DensityPeaks, DensityPeaksFit, DistanceModel, PairKey, PairwiseDistances, Thresholds, NOISE,
};
pub use error::{Error, Result};
pub use metrics::{evaluate, Evaluation, Outcome};
