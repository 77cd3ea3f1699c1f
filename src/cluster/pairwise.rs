//! Exact all-pairs distance table.
//!
//! Density and delta are only exact if every pairwise distance is known, so the
//! table stores all `N * (N - 1) / 2` unordered pairs in a packed upper-triangular
//! array. No pruning or indexing is applied.
//!
//! ## Complexity
//!
//! - **Time**: O(N² · d)
//! - **Space**: O(N²)

use super::distance::DistanceModel;
use crate::error::{Error, Result};

/// Canonical key for an unordered pair of distinct records.
///
/// `PairKey::new(i, j)` and `PairKey::new(j, i)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    lo: usize,
    hi: usize,
}

impl PairKey {
    /// Build the key for `{i, j}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfPair`] when `i == j`; no self-distance is stored.
    pub fn new(i: usize, j: usize) -> Result<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Ok(Self { lo: i, hi: j }),
            std::cmp::Ordering::Greater => Ok(Self { lo: j, hi: i }),
            std::cmp::Ordering::Equal => Err(Error::SelfPair { index: i }),
        }
    }

    /// Smaller record index.
    pub fn lo(&self) -> usize {
        self.lo
    }

    /// Larger record index.
    pub fn hi(&self) -> usize {
        self.hi
    }
}

/// Dissimilarity of every unordered record pair plus the observed extremes.
#[derive(Debug, Clone)]
pub struct PairwiseDistances {
    n: usize,
    /// Row-major upper triangle: (0,1), (0,2), .., (0,n-1), (1,2), ..
    values: Vec<f64>,
    max_distance: f64,
    min_distance: f64,
}

impl PairwiseDistances {
    /// Compute the distance of every pair `i < j` under `model`.
    ///
    /// # Errors
    ///
    /// - [`Error::TooFewRecords`] when fewer than 2 records are supplied.
    /// - [`Error::DimensionMismatch`] when vectors differ in length.
    /// - [`Error::InvalidParameter`] when a feature is NaN or infinite.
    pub fn compute(data: &[Vec<f64>], model: DistanceModel) -> Result<Self> {
        let n = data.len();
        if n < 2 {
            return Err(Error::TooFewRecords { found: n });
        }

        let d = data[0].len();
        for point in data {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
            if point.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidParameter {
                    name: "data",
                    message: "features must be finite",
                });
            }
        }

        let mut values = Vec::with_capacity(n * (n - 1) / 2);
        let mut max_distance = f64::NEG_INFINITY;
        let mut min_distance = f64::INFINITY;

        for i in 0..n - 1 {
            for j in (i + 1)..n {
                let dis = model.eval(&data[i], &data[j]);
                max_distance = max_distance.max(dis);
                min_distance = min_distance.min(dis);
                values.push(dis);
            }
        }

        log::debug!(
            "pairwise distances: n={} pairs={} max={:.6} min={:.6}",
            n,
            values.len(),
            max_distance,
            min_distance
        );

        Ok(Self {
            n,
            values,
            max_distance,
            min_distance,
        })
    }

    /// Number of records the table was built from.
    pub fn n_records(&self) -> usize {
        self.n
    }

    /// Number of stored pairs, always `N * (N - 1) / 2`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no pairs. Never true for a computed table.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest stored distance.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Smallest stored distance.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Distance stored under `key`, or `None` if it references an unknown record.
    pub fn distance(&self, key: PairKey) -> Option<f64> {
        if key.hi >= self.n {
            return None;
        }
        Some(self.values[self.index(key.lo, key.hi)])
    }

    /// Distance between records `i` and `j`; `None` for `i == j` or out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        PairKey::new(i, j).ok().and_then(|key| self.distance(key))
    }

    /// All pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, f64)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| PairKey { lo: i, hi: j }))
            .zip(self.values.iter().copied())
    }

    /// Number of pairs with distance strictly below `dc`.
    pub fn count_within(&self, dc: f64) -> usize {
        self.values.iter().filter(|&&v| v < dc).count()
    }

    /// Unchecked lookup for two distinct in-range records.
    #[inline]
    pub(crate) fn between(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i != j && i < self.n && j < self.n);
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.values[self.index(lo, hi)]
    }

    #[inline]
    fn index(&self, lo: usize, hi: usize) -> usize {
        // Rows 0..lo hold (n-1) + (n-2) + .. + (n-lo) entries.
        lo * (2 * self.n - lo - 1) / 2 + (hi - lo - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[f64]) -> Vec<Vec<f64>> {
        points.iter().map(|&x| vec![x]).collect()
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(PairKey::new(3, 7).unwrap(), PairKey::new(7, 3).unwrap());
        let key = PairKey::new(9, 2).unwrap();
        assert_eq!((key.lo(), key.hi()), (2, 9));
    }

    #[test]
    fn test_pair_key_rejects_self() {
        assert!(matches!(
            PairKey::new(4, 4),
            Err(Error::SelfPair { index: 4 })
        ));
    }

    #[test]
    fn test_table_size_and_extremes() {
        let data = line(&[0.0, 1.0, 3.0, 7.0]);
        let table = PairwiseDistances::compute(&data, DistanceModel::Euclidean).unwrap();

        assert_eq!(table.n_records(), 4);
        assert_eq!(table.len(), 6);
        assert_eq!(table.max_distance(), 7.0);
        assert_eq!(table.min_distance(), 1.0);
    }

    #[test]
    fn test_lookup_matches_direct_distance() {
        let data = vec![
            vec![0.0, 0.0],
            vec![1.0, 2.0],
            vec![-3.0, 0.5],
            vec![4.0, 4.0],
            vec![2.0, -1.0],
        ];
        let model = DistanceModel::Gaussian;
        let table = PairwiseDistances::compute(&data, model).unwrap();

        for i in 0..data.len() {
            for j in 0..data.len() {
                if i == j {
                    assert!(table.get(i, j).is_none());
                    continue;
                }
                let expected = model.distance(&data[i], &data[j]).unwrap();
                assert_eq!(table.get(i, j).unwrap(), expected);
                assert_eq!(table.between(i, j), expected);
            }
        }
        assert!(table.get(0, 5).is_none());
    }

    #[test]
    fn test_iter_visits_every_pair_once() {
        let data = line(&[0.0, 2.0, 5.0, 6.0, 10.0]);
        let table = PairwiseDistances::compute(&data, DistanceModel::Euclidean).unwrap();

        let pairs: Vec<(PairKey, f64)> = table.iter().collect();
        assert_eq!(pairs.len(), 10);
        for (key, dis) in pairs {
            assert!(key.lo() < key.hi());
            assert_eq!(table.distance(key), Some(dis));
        }
    }

    #[test]
    fn test_count_within_is_strict() {
        let data = line(&[0.0, 1.0, 2.0]);
        let table = PairwiseDistances::compute(&data, DistanceModel::Euclidean).unwrap();
        assert_eq!(table.count_within(1.0), 0);
        assert_eq!(table.count_within(1.5), 2);
        assert_eq!(table.count_within(2.5), 3);
    }

    #[test]
    fn test_too_few_records() {
        let data = line(&[1.0]);
        assert!(matches!(
            PairwiseDistances::compute(&data, DistanceModel::Gaussian),
            Err(Error::TooFewRecords { found: 1 })
        ));
        assert!(PairwiseDistances::compute(&[], DistanceModel::Gaussian).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            PairwiseDistances::compute(&data, DistanceModel::Euclidean),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let data = vec![vec![0.0], vec![f64::NAN]];
        assert!(PairwiseDistances::compute(&data, DistanceModel::Euclidean).is_err());
    }
}
