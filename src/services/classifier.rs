// Classifier Service
// Sentiment / emotion oracles and the HTTP client for a hosted
// text-classification endpoint

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::models::{LabelScore, OracleSignal};
use crate::services::config_store::ClassifierConfig;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("Label {0} missing from classifier output")]
    MissingLabel(String),
    #[error("Classifier disabled in configuration")]
    Disabled,
    #[error("No classifier configured")]
    NotConfigured,
}

/// Maps text to a label-probability distribution in a stable label order.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Vec<f64>, ClassifierError>;
}

/// Maps text to emotion label probabilities.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<HashMap<String, f64>, ClassifierError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Parse a classification response, either `[[{label, score}]]` or `[{label, score}]`.
pub fn parse_label_scores(body: &str) -> Result<Vec<LabelScore>, ClassifierError> {
    let parsed: LabelResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::JsonError(e.to_string()))?;
    let labels = match parsed {
        LabelResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
        LabelResponse::Flat(labels) => labels,
    };
    if labels.is_empty() {
        return Err(ClassifierError::JsonError("empty classification result".to_string()));
    }
    Ok(labels)
}

/// Re-order sentiment labels into `order`. Generic `LABEL_<i>` names map to position `i`.
pub fn order_sentiment(labels: &[LabelScore], order: &[String]) -> Result<Vec<f64>, ClassifierError> {
    order
        .iter()
        .enumerate()
        .map(|(i, expected)| {
            let generic = format!("LABEL_{}", i);
            labels
                .iter()
                .find(|l| l.label.eq_ignore_ascii_case(expected) || l.label == generic)
                .map(|l| l.score)
                .ok_or_else(|| ClassifierError::MissingLabel(expected.clone()))
        })
        .collect()
}

/// Get classifier API key from the environment
pub fn get_api_key() -> Option<String> {
    ["REVIEWGUARD_CLASSIFIER_API_KEY", "HF_API_TOKEN"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

pub struct ClassifierClient {
    client: Client,
    config: ClassifierConfig,
    api_key: Option<String>,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::with_api_key(config, get_api_key())
    }

    pub fn with_api_key(
        config: &ClassifierConfig,
        api_key: Option<String>,
    ) -> Result<Self, ClassifierError> {
        if !config.enabled {
            return Err(ClassifierError::Disabled);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }

    async fn call_model(&self, model: &str, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let url = self.model_url(model);
        let start = Instant::now();

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(
            "[classifier] {} responded in {} ms",
            model,
            start.elapsed().as_millis()
        );
        parse_label_scores(&body)
    }

    pub async fn classify_sentiment(&self, text: &str) -> Result<Vec<f64>, ClassifierError> {
        let labels = self.call_model(&self.config.sentiment_model, text).await?;
        order_sentiment(&labels, &self.config.sentiment_labels)
    }

    pub async fn classify_emotion(&self, text: &str) -> Result<HashMap<String, f64>, ClassifierError> {
        let labels = self.call_model(&self.config.emotion_model, text).await?;
        Ok(OracleSignal::emotions_from_labels(&labels))
    }

    /// Run both classifiers concurrently. Either failing fails the whole signal.
    pub async fn fetch_signal(&self, text: &str) -> Result<OracleSignal, ClassifierError> {
        let (sentiment, emotion) =
            tokio::join!(self.classify_sentiment(text), self.classify_emotion(text));
        Ok(OracleSignal::new(sentiment?, emotion?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, f64)]) -> Vec<LabelScore> {
        pairs
            .iter()
            .map(|(label, score)| LabelScore {
                label: label.to_string(),
                score: *score,
            })
            .collect()
    }

    fn order() -> Vec<String> {
        ClassifierConfig::default().sentiment_labels
    }

    #[test]
    fn test_parse_nested_response() {
        let body = r#"[[{"label":"positive","score":0.9},{"label":"neutral","score":0.07},{"label":"negative","score":0.03}]]"#;
        let parsed = parse_label_scores(body).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].label, "positive");
    }

    #[test]
    fn test_parse_flat_response() {
        let body = r#"[{"label":"joy","score":0.8},{"label":"anger","score":0.2}]"#;
        let parsed = parse_label_scores(body).unwrap();
        assert_eq!(parsed, labels(&[("joy", 0.8), ("anger", 0.2)]));
    }

    #[test]
    fn test_parse_rejects_bad_bodies() {
        assert!(matches!(
            parse_label_scores(r#"{"error":"Model is loading"}"#),
            Err(ClassifierError::JsonError(_))
        ));
        assert!(matches!(parse_label_scores("[]"), Err(ClassifierError::JsonError(_))));
        assert!(matches!(parse_label_scores("[[]]"), Err(ClassifierError::JsonError(_))));
    }

    #[test]
    fn test_order_sentiment_by_name() {
        let raw = labels(&[("Positive", 0.9), ("neutral", 0.07), ("NEGATIVE", 0.03)]);
        assert_eq!(order_sentiment(&raw, &order()).unwrap(), vec![0.03, 0.07, 0.9]);
    }

    #[test]
    fn test_order_sentiment_generic_labels() {
        let raw = labels(&[("LABEL_2", 0.6), ("LABEL_0", 0.1), ("LABEL_1", 0.3)]);
        assert_eq!(order_sentiment(&raw, &order()).unwrap(), vec![0.1, 0.3, 0.6]);
    }

    #[test]
    fn test_order_sentiment_missing_label() {
        let raw = labels(&[("negative", 0.5), ("positive", 0.5)]);
        let err = order_sentiment(&raw, &order()).unwrap_err();
        assert!(matches!(err, ClassifierError::MissingLabel(ref l) if l == "neutral"));
    }

    #[test]
    fn test_disabled_client() {
        let config = ClassifierConfig {
            enabled: false,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            ClassifierClient::with_api_key(&config, None),
            Err(ClassifierError::Disabled)
        ));
    }

    #[test]
    fn test_model_url_joins_base() {
        let config = ClassifierConfig {
            base_url: "http://localhost:8080/models/".to_string(),
            ..ClassifierConfig::default()
        };
        let client = ClassifierClient::with_api_key(&config, None).unwrap();
        assert_eq!(
            client.model_url("org/model"),
            "http://localhost:8080/models/org/model"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let config = ClassifierConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ClassifierConfig::default()
        };
        let client = ClassifierClient::with_api_key(&config, None).unwrap();
        assert!(client.fetch_signal("some review").await.is_err());
    }
}
