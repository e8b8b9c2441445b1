//! Min-max score normalization.

use crate::scoring::ScoreVector;

/// Normalised value of every scored document when all of them tie.
pub const MIDPOINT: f32 = 0.5;

/// Scale a score vector to `[0, 1]` with `(score - min) / (max - min)`.
///
/// Min and max are taken over scored documents only. Unscored documents
/// normalise to `0.0` and so contribute nothing to fusion. When every
/// scored document has the same value, each maps to [`MIDPOINT`].
/// Arithmetic runs in `f64`, so any range of finite `f32` scores is exact
/// enough and never overflows.
pub fn min_max_normalize(scores: &ScoreVector) -> Vec<f32> {
    let scored = scores
        .iter()
        .filter(|(_, _, scored)| *scored)
        .map(|(_, s, _)| s as f64);
    let (min, max) = scored.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), s| {
        (min.min(s), max.max(s))
    });
    let range = max - min;

    scores
        .iter()
        .map(|(_, score, scored)| {
            if !scored {
                0.0
            } else if range > 0.0 {
                ((score as f64 - min) / range).clamp(0.0, 1.0) as f32
            } else {
                MIDPOINT
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let scores = ScoreVector::new(vec![1, 2, 3], vec![0.9, 0.1, 0.0]).unwrap();
        let normalized = min_max_normalize(&scores);
        assert_eq!(normalized[0], 1.0);
        assert!((normalized[1] - 0.1111).abs() < 1e-4);
        assert_eq!(normalized[2], 0.0);
    }

    #[test]
    fn test_negative_range() {
        let scores = ScoreVector::new(vec![1, 2, 3], vec![-1.0, 0.0, 1.0]).unwrap();
        assert_eq!(min_max_normalize(&scores), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_constant_vector_maps_to_midpoint() {
        let scores = ScoreVector::zeros(vec![1, 2, 3]);
        assert_eq!(min_max_normalize(&scores), vec![MIDPOINT; 3]);

        let single = ScoreVector::new(vec![7], vec![0.42]).unwrap();
        assert_eq!(min_max_normalize(&single), vec![MIDPOINT]);
    }

    #[test]
    fn test_unscored_entries_normalize_to_zero() {
        let scores =
            ScoreVector::with_flags(vec![1, 2, 3], vec![-0.5, 0.0, 0.5], vec![true, false, true])
                .unwrap();
        assert_eq!(min_max_normalize(&scores), vec![0.0, 0.0, 1.0]);

        let none_scored =
            ScoreVector::with_flags(vec![1, 2], vec![0.0, 0.0], vec![false, false]).unwrap();
        assert_eq!(min_max_normalize(&none_scored), vec![0.0, 0.0]);
    }

    #[test]
    fn test_extreme_finite_range() {
        let scores = ScoreVector::new(vec![0, 1, 2], vec![-3.0e38, 0.0, 3.0e38]).unwrap();
        assert_eq!(min_max_normalize(&scores), vec![0.0, 0.5, 1.0]);

        let wide = ScoreVector::new(vec![0, 1], vec![f32::MAX, -f32::MAX]).unwrap();
        assert_eq!(min_max_normalize(&wide), vec![1.0, 0.0]);
    }

    #[test]
    fn test_empty() {
        assert!(min_max_normalize(&ScoreVector::zeros(Vec::new())).is_empty());
    }
}
