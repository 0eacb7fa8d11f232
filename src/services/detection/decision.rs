// Decision utilities
// The flag threshold turns a score into the caller-facing decision; it does not alter the score.

use crate::models::ReviewOutput;

pub const DEFAULT_FLAG_THRESHOLD: f64 = 0.3;

/// `true` when the score falls strictly below `threshold`.
pub fn is_potentially_fake(score: f64, threshold: f64) -> bool {
    score < threshold
}

pub fn to_review_output(score: f64, threshold: f64) -> ReviewOutput {
    ReviewOutput {
        is_potentially_fake: is_potentially_fake(score, threshold),
        confidence: score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(is_potentially_fake(0.29, DEFAULT_FLAG_THRESHOLD));
        assert!(!is_potentially_fake(0.3, DEFAULT_FLAG_THRESHOLD));
        assert!(!is_potentially_fake(0.7, DEFAULT_FLAG_THRESHOLD));
    }

    #[test]
    fn test_output_carries_score() {
        let out = to_review_output(0.05, DEFAULT_FLAG_THRESHOLD);
        assert!(out.is_potentially_fake);
        assert_eq!(out.confidence, 0.05);

        let out = to_review_output(0.85, DEFAULT_FLAG_THRESHOLD);
        assert_eq!(out, ReviewOutput { is_potentially_fake: false, confidence: 0.85 });
    }
}
