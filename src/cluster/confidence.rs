//! Per-record confidence: how many of a record's `dc`-neighbors share its cluster.

use super::pairwise::PairwiseDistances;
use crate::error::{Error, Result};

/// Fraction of each record's neighbors within `dc` that carry the same label.
///
/// Unassigned records never agree with anyone. A record without neighbors
/// within `dc` has no score (`None`), which is distinct from a score of zero.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `labels` does not have one entry per
/// record in `table`.
pub fn confidence(
    table: &PairwiseDistances,
    labels: &[Option<usize>],
    dc: f64,
) -> Result<Vec<Option<f64>>> {
    let n = table.n_records();
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }

    let mut neighbors = vec![0usize; n];
    let mut agreeing = vec![0usize; n];

    for (key, dis) in table.iter() {
        if dis >= dc {
            continue;
        }
        let (i, j) = (key.lo(), key.hi());
        neighbors[i] += 1;
        neighbors[j] += 1;
        if labels[i].is_some() && labels[i] == labels[j] {
            agreeing[i] += 1;
            agreeing[j] += 1;
        }
    }

    Ok(neighbors
        .iter()
        .zip(&agreeing)
        .map(|(&nb, &s)| (nb > 0).then(|| s as f64 / nb as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::DistanceModel;

    fn table(points: &[f64]) -> PairwiseDistances {
        let data: Vec<Vec<f64>> = points.iter().map(|&x| vec![x]).collect();
        PairwiseDistances::compute(&data, DistanceModel::Euclidean).unwrap()
    }

    #[test]
    fn test_fractions() {
        // Pairs within dc = 1.5: (0,1) and (1,2).
        let t = table(&[0.0, 1.0, 2.0, 10.0]);
        let labels = vec![Some(0), Some(0), Some(2), Some(3)];
        let conf = confidence(&t, &labels, 1.5).unwrap();

        assert_eq!(conf[0], Some(1.0));
        assert_eq!(conf[1], Some(0.5));
        assert_eq!(conf[2], Some(0.0));
        assert_eq!(conf[3], None);
    }

    #[test]
    fn test_unassigned_never_agree() {
        let t = table(&[0.0, 0.1]);
        let conf = confidence(&t, &[None, None], 1.0).unwrap();
        assert_eq!(conf, vec![Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_length_mismatch() {
        let t = table(&[0.0, 0.1, 0.2]);
        assert!(confidence(&t, &[Some(0)], 1.0).is_err());
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let t = table(&[0.0, 0.2, 0.3, 0.5, 0.9, 1.1, 1.2, 3.0]);
        let labels = vec![Some(0), Some(0), Some(1), Some(1), None, Some(5), Some(5), Some(7)];
        for score in confidence(&t, &labels, 0.45).unwrap().into_iter().flatten() {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
