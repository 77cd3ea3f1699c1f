//! End-to-end density-peak clustering.
//!
//! [`DensityPeaks`] chains the pipeline stages:
//!
//! 1. all-pairs distances under a [`DistanceModel`]
//! 2. cutoff `dc`, either fixed or searched by a [`CutoffSelector`]
//! 3. density / delta and the ordered [`CandidateList`]
//! 4. centers and propagated membership
//! 5. per-record confidence
//!
//! ## When to Use
//!
//! - The number of clusters is unknown but centers should stand out on a
//!   density-vs-delta plot.
//! - Clusters are non-convex but each has a single density maximum.
//! - N is small enough for an O(N²) distance table (a few tens of thousands).

use super::assign::{assign, ClusterAssignment, Thresholds};
use super::confidence::confidence;
use super::cutoff::{CutoffEstimate, CutoffSelector};
use super::density::{analyze, CandidateList};
use super::distance::DistanceModel;
use super::pairwise::PairwiseDistances;
use super::traits::Clustering;
use super::NOISE;
use crate::error::{Error, Result};

/// Density-peak clustering.
#[derive(Debug, Clone, Default)]
pub struct DensityPeaks {
    model: DistanceModel,
    /// Fixed cutoff; searched by `selector` when unset.
    cutoff: Option<f64>,
    selector: CutoffSelector,
    thresholds: Thresholds,
}

/// Everything a [`DensityPeaks`] run produces.
#[derive(Debug, Clone)]
pub struct DensityPeaksFit {
    /// Largest pairwise distance.
    pub max_distance: f64,
    /// Smallest pairwise distance.
    pub min_distance: f64,
    /// Cutoff actually used.
    pub cutoff: CutoffEstimate,
    /// Records in descending-density order.
    pub candidates: CandidateList,
    /// Centers and per-record membership.
    pub assignment: ClusterAssignment,
    /// Per-record confidence, `None` without neighbors within `dc`.
    pub confidence: Vec<Option<f64>>,
}

impl DensityPeaksFit {
    /// Center id per record (`None` when unassigned).
    pub fn labels(&self) -> &[Option<usize>] {
        &self.assignment.labels
    }

    /// Center record ids in candidate order.
    pub fn centers(&self) -> &[usize] {
        &self.assignment.centers
    }
}

impl DensityPeaks {
    /// Create a clusterer with the Gaussian model, searched cutoff, and
    /// thresholds `min_density = 1`, `min_delta = 0.38`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance model.
    pub fn with_model(mut self, model: DistanceModel) -> Self {
        self.model = model;
        self
    }

    /// Use a fixed cutoff instead of searching for one.
    pub fn with_cutoff(mut self, dc: f64) -> Self {
        self.cutoff = Some(dc);
        self
    }

    /// Set the cutoff search used when no fixed cutoff is given.
    pub fn with_selector(mut self, selector: CutoffSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Set the minimum density for a center.
    pub fn with_min_density(mut self, min_density: usize) -> Self {
        self.thresholds.min_density = min_density;
        self
    }

    /// Set the minimum delta for a center.
    pub fn with_min_delta(mut self, min_delta: f64) -> Self {
        self.thresholds.min_delta = min_delta;
        self
    }

    /// Set both center thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// - [`Error::TooFewRecords`] for fewer than 2 points.
    /// - [`Error::DimensionMismatch`] for ragged input.
    /// - [`Error::InvalidParameter`] for non-finite features, a non-positive
    ///   fixed cutoff, an invalid `min_delta`, or an invalid cutoff search band.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<DensityPeaksFit> {
        if let Some(dc) = self.cutoff {
            if !dc.is_finite() || dc <= 0.0 {
                return Err(Error::InvalidParameter {
                    name: "cutoff",
                    message: "must be finite and positive",
                });
            }
        }
        self.thresholds.validate()?;
        if self.cutoff.is_none() {
            self.selector.validate()?;
        }

        let table = PairwiseDistances::compute(data, self.model)?;

        let cutoff = match self.cutoff {
            Some(dc) => {
                let mean = CutoffSelector::mean_at(&table, dc);
                let (lower, upper) = self.selector.band();
                CutoffEstimate {
                    dc,
                    mean,
                    iterations: 0,
                    in_band: mean >= lower && mean <= upper,
                }
            }
            None => self.selector.select(&table),
        };
        log::info!(
            "max distance {:.4}, min distance {:.4}, dc {:.4} (mean {:.4})",
            table.max_distance(),
            table.min_distance(),
            cutoff.dc,
            cutoff.mean
        );

        let candidates = analyze(&table, cutoff.dc);
        let assignment = assign(&candidates, &self.thresholds)?;
        let confidence = confidence(&table, &assignment.labels, cutoff.dc)?;

        Ok(DensityPeaksFit {
            max_distance: table.max_distance(),
            min_distance: table.min_distance(),
            cutoff,
            candidates,
            assignment,
            confidence,
        })
    }

    /// Fit and predict, returning compact cluster indices with `None` for
    /// unassigned points.
    pub fn fit_predict_with_noise(&self, data: &[Vec<f64>]) -> Result<Vec<Option<usize>>> {
        Ok(self.fit(data)?.assignment.compact_labels())
    }
}

impl Clustering for DensityPeaks {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self
            .fit_predict_with_noise(data)?
            .into_iter()
            .map(|l| l.unwrap_or(NOISE))
            .collect())
    }

    fn n_clusters(&self) -> usize {
        0
    }
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;
    use crate::metrics::{evaluate, Outcome};

    fn pairs() -> Vec<Vec<f64>> {
        vec![vec![0.0], vec![0.1], vec![5.0], vec![5.1]]
    }

    #[test]
    fn test_two_separated_pairs() {
        let model = DensityPeaks::new()
            .with_cutoff(0.5)
            .with_min_density(1)
            .with_min_delta(0.5);
        let fit = model.fit(&pairs()).unwrap();

        assert_eq!(fit.centers(), &[0, 2]);
        assert_eq!(fit.labels(), &[Some(0), Some(0), Some(2), Some(2)]);
        assert!(fit.confidence.iter().all(|&c| c == Some(1.0)));

        let truth = ["a", "a", "b", "b"];
        let eval = evaluate(fit.labels(), &truth).unwrap();
        assert_eq!(eval.correct, 4);
        assert!(eval.outcomes.iter().all(|&o| o == Outcome::Correct));
    }

    #[test]
    fn test_fixed_cutoff_reports_mean() {
        let fit = DensityPeaks::new().with_cutoff(0.5).fit(&pairs()).unwrap();
        assert_eq!(fit.cutoff.iterations, 0);
        assert_eq!(fit.cutoff.mean, 4.0 / 16.0);
        assert!(!fit.cutoff.in_band);
    }

    #[test]
    fn test_three_blobs() {
        let mut data = Vec::new();
        for &(cx, cy) in &[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)] {
            for i in 0..5 {
                for j in 0..5 {
                    data.push(vec![cx + i as f64 * 0.1, cy + j as f64 * 0.1]);
                }
            }
        }

        let model = DensityPeaks::new()
            .with_model(DistanceModel::Euclidean)
            .with_cutoff(0.25)
            .with_min_density(4)
            .with_min_delta(1.0);
        let labels = model.fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 75);
        for blob in 0..3 {
            let first = labels[blob * 25];
            assert_ne!(first, NOISE);
            for k in 0..25 {
                assert_eq!(labels[blob * 25 + k], first);
            }
        }
        assert_ne!(labels[0], labels[25]);
        assert_ne!(labels[25], labels[50]);
        assert_ne!(labels[0], labels[50]);
    }

    #[test]
    fn test_auto_cutoff_stays_in_range() {
        let data: Vec<Vec<f64>> = (0..120)
            .map(|i| vec![(i % 12) as f64 * 0.3, (i / 12) as f64 * 0.2])
            .collect();
        let fit = DensityPeaks::new().fit(&data).unwrap();

        assert!(fit.cutoff.dc >= fit.min_distance && fit.cutoff.dc <= fit.max_distance);
        assert_eq!(fit.candidates.len(), 120);
        assert_eq!(fit.labels().len(), 120);
        assert_eq!(fit.confidence.len(), 120);
    }

    #[test]
    fn test_unreachable_threshold_yields_noise() {
        let labels = DensityPeaks::new()
            .with_cutoff(0.5)
            .with_min_density(100)
            .fit_predict(&pairs())
            .unwrap();
        assert!(labels.iter().all(|&l| l == NOISE));
    }

    #[test]
    fn test_invalid_params() {
        let data = pairs();
        assert!(DensityPeaks::new().with_cutoff(0.0).fit(&data).is_err());
        assert!(DensityPeaks::new().with_cutoff(f64::NAN).fit(&data).is_err());
        assert!(DensityPeaks::new().with_min_delta(-0.1).fit(&data).is_err());
        let inverted = CutoffSelector::new().with_band(0.2, 0.1);
        assert!(DensityPeaks::new()
            .with_selector(inverted.clone())
            .fit(&data)
            .is_err());
        // A fixed cutoff never runs the search.
        assert!(DensityPeaks::new()
            .with_selector(inverted)
            .with_cutoff(0.5)
            .fit(&data)
            .is_ok());
        assert!(DensityPeaks::new().fit(&[vec![1.0]]).is_err());
        assert!(DensityPeaks::new().fit(&[]).is_err());
    }
}
