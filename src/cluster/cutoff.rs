//! Automatic selection of the neighborhood cutoff `dc`.
//!
//! The usual rule of thumb for density peaks is to choose `dc` so that each
//! record has on average 1-2% of the dataset as neighbors. With every pair
//! counted once per endpoint, that fraction is
//!
//! ```text
//! mean(dc) = 2 · |{ pairs with distance < dc }| / N²
//! ```
//!
//! `mean` is monotone in `dc`, so a bisection between the smallest and largest
//! observed distance finds a cutoff inside the target band whenever one exists.
//! For tiny or degenerate datasets the band can be unreachable (each pair moves
//! `mean` by `2 / N²`); the search then stops at the iteration cap and reports
//! the last cutoff it tried.

use super::pairwise::PairwiseDistances;
use crate::error::{Error, Result};

/// Result of a cutoff search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffEstimate {
    /// Selected cutoff radius.
    pub dc: f64,
    /// Neighbor fraction measured at `dc`.
    pub mean: f64,
    /// Number of evaluations of `mean` performed.
    pub iterations: usize,
    /// Whether `mean` landed inside the target band.
    pub in_band: bool,
}

/// Bisection search for a cutoff radius whose neighbor fraction lies in a band.
#[derive(Debug, Clone)]
pub struct CutoffSelector {
    lower: f64,
    upper: f64,
    max_iter: usize,
}

impl CutoffSelector {
    /// Create a selector with the default band `[0.01, 0.02]` and 100 iterations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target band for the neighbor fraction.
    ///
    /// The band is checked by [`validate`](Self::validate); [`select`](Self::select)
    /// on an invalid band never reports `in_band` and stops at the iteration cap.
    pub fn with_band(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Target band as `(lower, upper)`.
    pub fn band(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Check the band and the iteration cap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `0 <= lower <= upper <= 1`
    /// (all finite) and `max_iter >= 1`.
    pub fn validate(&self) -> Result<()> {
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "band",
                message: "bounds must be finite",
            });
        }
        if self.lower < 0.0 || self.upper > 1.0 || self.lower > self.upper {
            return Err(Error::InvalidParameter {
                name: "band",
                message: "must satisfy 0 <= lower <= upper <= 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Neighbor fraction for a given cutoff.
    pub fn mean_at(table: &PairwiseDistances, dc: f64) -> f64 {
        let n = table.n_records() as f64;
        2.0 * table.count_within(dc) as f64 / (n * n)
    }

    /// Search for `dc`. Never fails; check [`CutoffEstimate::in_band`].
    pub fn select(&self, table: &PairwiseDistances) -> CutoffEstimate {
        let mut lo = table.min_distance();
        let mut hi = table.max_distance();
        let mut dc = (hi + lo) / 2.0;
        let mut mean = Self::mean_at(table, dc);
        let mut iterations = 1;

        loop {
            if self.contains(mean) || iterations >= self.max_iter {
                break;
            }

            if mean > self.upper {
                hi = dc;
                dc = (lo + dc) / 2.0;
            } else {
                lo = dc;
                dc = (hi + dc) / 2.0;
            }

            mean = Self::mean_at(table, dc);
            iterations += 1;
        }

        let in_band = self.contains(mean);
        if in_band {
            log::debug!(
                "cutoff converged: dc={:.6} mean={:.4} after {} iterations",
                dc,
                mean,
                iterations
            );
        } else {
            log::warn!(
                "cutoff search left band [{}, {}]: dc={:.6} mean={:.4} after {} iterations",
                self.lower,
                self.upper,
                dc,
                mean,
                iterations
            );
        }

        CutoffEstimate {
            dc,
            mean,
            iterations,
            in_band,
        }
    }

    #[inline]
    fn contains(&self, mean: f64) -> bool {
        mean >= self.lower && mean <= self.upper
    }
}

impl Default for CutoffSelector {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 0.02,
            max_iter: 100,
        }
    }
}
