// Request Boundary
// JSON `{reviewText}` in, `{isPotentiallyFake, confidence}` out.
// Only request validation can fail here; scoring itself always produces a result.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::{HealthStatus, ReviewInput, ReviewOutput};
use crate::services::detection::{to_review_output, ReviewDetector};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Malformed request body: {0}")]
    MalformedJson(String),
    #[error("Field reviewText is required and must be a string")]
    MissingReviewText,
    #[error("Review text cannot be empty")]
    BlankText,
}

impl RequestError {
    /// HTTP status a web front end should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::BlankText => 400,
            RequestError::MalformedJson(_) | RequestError::MissingReviewText => 422,
        }
    }
}

/// Validate a raw request body.
pub fn parse_review_request(body: &str) -> Result<ReviewInput, RequestError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| RequestError::MalformedJson(e.to_string()))?;
    let review_text = value
        .get("reviewText")
        .and_then(Value::as_str)
        .ok_or(RequestError::MissingReviewText)?;
    Ok(ReviewInput {
        review_text: review_text.to_string(),
    })
}

pub async fn detect_review(
    detector: &ReviewDetector,
    input: &ReviewInput,
) -> Result<ReviewOutput, RequestError> {
    if input.review_text.trim().is_empty() {
        return Err(RequestError::BlankText);
    }
    let assessment = detector.detect(&input.review_text).await;
    Ok(to_review_output(assessment.score, detector.scorer().flag_threshold()))
}

pub async fn detect_review_json(
    detector: &ReviewDetector,
    body: &str,
) -> Result<ReviewOutput, RequestError> {
    let input = parse_review_request(body).map_err(|e| {
        warn!("[api] Rejected request: {}", e);
        e
    })?;
    detect_review(detector, &input).await
}

pub fn health_status(detector: &ReviewDetector) -> HealthStatus {
    detector.health()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config_store::{GibberishConfig, ScoringConfig};
    use crate::services::detection::ReviewScorer;
    use std::sync::Arc;

    fn detector() -> ReviewDetector {
        let scorer = ReviewScorer::new(ScoringConfig::default(), GibberishConfig::default()).unwrap();
        ReviewDetector::without_classifier(Arc::new(scorer))
    }

    #[test]
    fn test_parse_valid_request() {
        let input = parse_review_request(r#"{"reviewText": "Solid kettle."}"#).unwrap();
        assert_eq!(input.review_text, "Solid kettle.");
    }

    #[test]
    fn test_parse_rejects_invalid_requests() {
        assert!(matches!(
            parse_review_request("{not json"),
            Err(RequestError::MalformedJson(_))
        ));
        assert_eq!(
            parse_review_request(r#"{"text": "hi"}"#),
            Err(RequestError::MissingReviewText)
        );
        assert_eq!(
            parse_review_request(r#"{"reviewText": 42}"#),
            Err(RequestError::MissingReviewText)
        );
        assert_eq!(RequestError::MissingReviewText.status_code(), 422);
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let err = detect_review_json(&detector(), r#"{"reviewText": "   "}"#)
            .await
            .unwrap_err();
        assert_eq!(err, RequestError::BlankText);
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_detect_maps_threshold() {
        let d = detector();
        let out = detect_review_json(&d, r#"{"reviewText": "Love it!!!! Five stars"}"#)
            .await
            .unwrap();
        assert!(out.is_potentially_fake);
        assert!((out.confidence - 1.0 / 13.0).abs() < 1e-9);

        let out = detect_review_json(
            &d,
            r#"{"reviewText": "The product arrived and it works fine for what I need."}"#,
        )
        .await
        .unwrap();
        assert!(!out.is_potentially_fake);
        assert_eq!(out.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_configured_flag_threshold_used() {
        let scorer = ReviewScorer::new(ScoringConfig::default(), GibberishConfig::default())
            .unwrap()
            .with_flag_threshold(0.6);
        let d = ReviewDetector::without_classifier(Arc::new(scorer));
        let out = detect_review_json(
            &d,
            r#"{"reviewText": "The product arrived and it works fine for what I need."}"#,
        )
        .await
        .unwrap();
        assert_eq!(out.confidence, 0.5);
        assert!(out.is_potentially_fake);
    }

    #[test]
    fn test_health_wire_format() {
        let health = health_status(&detector());
        let json = serde_json::to_string(&health).unwrap();
        assert_eq!(json, r#"{"status":"healthy","model_loaded":false}"#);
    }
}
