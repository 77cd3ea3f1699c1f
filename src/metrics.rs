//! Clustering evaluation against ground-truth labels.
//!
//! A record counts as correct when the center of its cluster carries the same
//! ground-truth label as the record itself. Records without a cluster are
//! "not recalled".
//!
//! ```text
//! precision = correct / (total - unassigned)
//! recall    = (total - unassigned) / total
//! ```
//!
//! Both ratios are `None` when their denominator is zero.
//!
//! # Example
//!
//! ```rust
//! use crest::metrics::evaluate;
//!
//! let labels = [Some(0), Some(0), Some(2), None];
//! let truth = ["x", "x", "y", "y"];
//! let eval = evaluate(&labels, &truth).unwrap();
//!
//! assert_eq!(eval.correct, 3);
//! assert_eq!(eval.precision(), Some(1.0));
//! assert_eq!(eval.recall(), Some(0.75));
//! ```

use crate::error::{Error, Result};

/// Per-record evaluation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The record's center has the record's label.
    Correct,
    /// The record's center has a different label.
    Error,
    /// The record is not assigned to any cluster.
    NoRecall,
}

impl Outcome {
    /// Tag used in cluster reports.
    pub fn tag(self) -> &'static str {
        match self {
            Outcome::Correct => "CORRECT",
            Outcome::Error => "ERROR",
            Outcome::NoRecall => "NORECALL",
        }
    }
}

/// Precision / recall summary of a cluster assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Number of records evaluated.
    pub total: usize,
    /// Records whose center shares their label.
    pub correct: usize,
    /// Records without a cluster.
    pub unassigned: usize,
    /// Outcome per record.
    pub outcomes: Vec<Outcome>,
}

impl Evaluation {
    /// `correct / (total - unassigned)`, `None` if every record is unassigned.
    pub fn precision(&self) -> Option<f64> {
        let recalled = self.total - self.unassigned;
        (recalled > 0).then(|| self.correct as f64 / recalled as f64)
    }

    /// `(total - unassigned) / total`, `None` for an empty evaluation.
    pub fn recall(&self) -> Option<f64> {
        (self.total > 0).then(|| (self.total - self.unassigned) as f64 / self.total as f64)
    }

    /// Records whose center carries a different label.
    pub fn errors(&self) -> usize {
        self.outcomes.iter().filter(|&&o| o == Outcome::Error).count()
    }
}

/// Compare cluster membership (center id per record) with ground truth.
///
/// # Errors
///
/// - [`Error::EmptyInput`] when there are no records.
/// - [`Error::DimensionMismatch`] when `labels` and `truth` differ in length or
///   a center id is out of range.
pub fn evaluate<L: PartialEq>(labels: &[Option<usize>], truth: &[L]) -> Result<Evaluation> {
    if labels.is_empty() {
        return Err(Error::EmptyInput);
    }
    if labels.len() != truth.len() {
        return Err(Error::DimensionMismatch {
            expected: labels.len(),
            found: truth.len(),
        });
    }

    let mut outcomes = Vec::with_capacity(labels.len());
    let mut correct = 0;
    let mut unassigned = 0;

    for (id, label) in labels.iter().enumerate() {
        let outcome = match *label {
            None => {
                unassigned += 1;
                Outcome::NoRecall
            }
            Some(center) => {
                let center_truth = truth.get(center).ok_or(Error::DimensionMismatch {
                    expected: truth.len(),
                    found: center + 1,
                })?;
                if *center_truth == truth[id] {
                    correct += 1;
                    Outcome::Correct
                } else {
                    log::debug!("record {} assigned to center {} with a different label", id, center);
                    Outcome::Error
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(Evaluation {
        total: labels.len(),
        correct,
        unassigned,
        outcomes,
    })
}
