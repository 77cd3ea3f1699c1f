//! Dissimilarity between two feature vectors.

use crate::error::{Error, Result};

/// How two feature vectors are turned into a scalar dissimilarity.
///
/// Both models are functions of the squared Euclidean distance
/// `s = Σ (a[k] - b[k])²`:
///
/// ```text
/// Euclidean: sqrt(s)
/// Gaussian:  1 - exp(-s / 2)
/// ```
///
/// The Gaussian kernel saturates for distant pairs and stays in `[0, 1)`, which
/// keeps the cutoff search well-behaved regardless of feature scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceModel {
    /// Plain Euclidean distance.
    Euclidean,
    /// Bounded Gaussian-kernel dissimilarity.
    #[default]
    Gaussian,
}

impl DistanceModel {
    /// Dissimilarity between `a` and `b`.
    ///
    /// Symmetric, non-negative, and zero iff `a == b` component-wise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the vectors differ in length.
    ///
    /// ```rust
    /// use crest::DistanceModel;
    ///
    /// let d = DistanceModel::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
    /// assert!((d - 5.0).abs() < 1e-12);
    /// ```
    pub fn distance(self, a: &[f64], b: &[f64]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        Ok(self.eval(a, b))
    }

    /// Dissimilarity of two vectors already known to share a dimension.
    #[inline]
    pub(crate) fn eval(self, a: &[f64], b: &[f64]) -> f64 {
        let (scale, sum) = scaled_squared_euclidean(a, b);
        if scale == 0.0 {
            return 0.0;
        }
        if scale.is_infinite() {
            // The difference of two finite values overflowed.
            return match self {
                DistanceModel::Euclidean => f64::INFINITY,
                DistanceModel::Gaussian => 1.0,
            };
        }
        match self {
            DistanceModel::Euclidean => scale * sum.sqrt(),
            DistanceModel::Gaussian => {
                let s = scale * scale * sum;
                // 1 - exp(-s/2) without cancellation for small s.
                let dis = -(-s / 2.0).exp_m1();
                // Distinct vectors whose kernel value underflows round up to
                // the smallest positive f64.
                if dis > 0.0 {
                    dis
                } else {
                    f64::from_bits(1)
                }
            }
        }
    }
}

/// Squared Euclidean distance as `scale² · sum`, with `scale = max |a[k] - b[k]|`.
///
/// Dividing by the largest difference before squaring keeps tiny differences
/// from underflowing to zero. `scale == 0` iff the vectors are equal.
#[inline]
fn scaled_squared_euclidean(a: &[f64], b: &[f64]) -> (f64, f64) {
    debug_assert_eq!(a.len(), b.len());
    let scale = a
        .iter()
        .zip(b.iter())
        .fold(0.0f64, |m, (x, y)| m.max((x - y).abs()));
    if scale == 0.0 {
        return (0.0, 0.0);
    }
    let sum = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (x - y) / scale;
            d * d
        })
        .sum();
    (scale, sum)
}
