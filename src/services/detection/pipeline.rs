// Review Detection Pipeline
// Two explicit paths:
// - Full: oracle signal fetched from the classifier service, multi-signal fusion
// - Fallback: phrase heuristic when no classifier is configured or the oracle call fails

use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{HealthStatus, ReviewAssessment};
use crate::services::classifier::{ClassifierClient, ClassifierError};
use crate::services::config_store::AppConfig;
use crate::services::text_processor::preprocess;

use super::scorer::{ReviewScorer, ScorerError};

pub struct ReviewDetector {
    scorer: Arc<ReviewScorer>,
    client: Option<ClassifierClient>,
}

impl ReviewDetector {
    pub fn new(scorer: Arc<ReviewScorer>, client: Option<ClassifierClient>) -> Self {
        Self { scorer, client }
    }

    /// Build the scorer and, when enabled, the classifier client. A client that cannot
    /// be built leaves the detector on the fallback path.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScorerError> {
        let scorer = Arc::new(ReviewScorer::from_config(config)?);
        let client = match ClassifierClient::new(&config.classifier) {
            Ok(client) => Some(client),
            Err(ClassifierError::Disabled) => {
                info!("[pipeline] Classifier disabled, fallback heuristic only");
                None
            }
            Err(e) => {
                warn!("[pipeline] Classifier client unavailable: {}", e);
                None
            }
        };
        Ok(Self::new(scorer, client))
    }

    pub fn without_classifier(scorer: Arc<ReviewScorer>) -> Self {
        Self::new(scorer, None)
    }

    pub fn scorer(&self) -> &ReviewScorer {
        &self.scorer
    }

    pub fn has_classifier(&self) -> bool {
        self.client.is_some()
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            model_loaded: self.has_classifier(),
        }
    }

    pub async fn detect(&self, text: &str) -> ReviewAssessment {
        let span = info_span!("review", request_id = %Uuid::new_v4());
        async move {
            info!(chars = text.chars().count(), "[pipeline] Scoring review");

            if text.is_empty() {
                return self.scorer.assess_fallback(text, "empty review");
            }

            let oracle = match &self.client {
                Some(client) => client.fetch_signal(&preprocess(text).cleaned).await,
                None => Err(ClassifierError::NotConfigured),
            };

            let assessment = self.scorer.assess(text, oracle);
            info!(
                score = assessment.score,
                flagged = assessment.is_potentially_fake,
                path = ?assessment.path,
                "[pipeline] Review scored"
            );
            assessment
        }
        .instrument(span)
        .await
    }
}
