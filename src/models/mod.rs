// ReviewGuard Data Models
// Shared types passed between the scoring stages and the service boundary

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============ Preprocessing ============

/// Raw review text split into the form used for stylistic signals (`original`)
/// and the form used for gibberish checks (`cleaned`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessedText {
    pub original: String,
    pub cleaned: String,
}

// ============ Gibberish ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GibberishVerdict {
    pub is_gibberish: bool,
    pub score: f64,
    pub reason: String,
}

impl GibberishVerdict {
    pub fn gibberish(score: f64, reason: impl Into<String>) -> Self {
        Self {
            is_gibberish: true,
            score,
            reason: reason.into(),
        }
    }

    pub fn legitimate() -> Self {
        Self {
            is_gibberish: false,
            score: 0.1,
            reason: "Text appears legitimate".to_string(),
        }
    }
}

// ============ Pattern Matching ============

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    GenericPraise,
    ExtremeLanguage,
    Superlatives,
    ServicePraise,
    VagueDescriptions,
    SuspiciousEnthusiasm,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 6] = [
        PatternCategory::GenericPraise,
        PatternCategory::ExtremeLanguage,
        PatternCategory::Superlatives,
        PatternCategory::ServicePraise,
        PatternCategory::VagueDescriptions,
        PatternCategory::SuspiciousEnthusiasm,
    ];

    pub fn weight(self) -> f64 {
        match self {
            PatternCategory::GenericPraise => 2.0,
            PatternCategory::ExtremeLanguage => 1.8,
            PatternCategory::Superlatives => 1.5,
            PatternCategory::ServicePraise => 1.3,
            PatternCategory::VagueDescriptions => 1.0,
            PatternCategory::SuspiciousEnthusiasm => 1.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternCategory::GenericPraise => "generic_praise",
            PatternCategory::ExtremeLanguage => "extreme_language",
            PatternCategory::Superlatives => "superlatives",
            PatternCategory::ServicePraise => "service_praise",
            PatternCategory::VagueDescriptions => "vague_descriptions",
            PatternCategory::SuspiciousEnthusiasm => "suspicious_enthusiasm",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub category: PatternCategory,
    pub pattern_id: String,
    pub weight: f64,
    pub occurrences: usize,
    /// Matched substrings, in order of appearance.
    #[serde(default)]
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// Sum of `weight * occurrences` over all matches. Unbounded.
    pub fake_pattern_score: f64,
    pub matches: Vec<PatternMatch>,
}

// ============ Linguistic Features ============

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinguisticFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub vocabulary_diversity: f64,
    pub stop_word_ratio: f64,
    pub punctuation_ratio: f64,
    pub exclamation_ratio: f64,
    pub capital_ratio: f64,
}

// ============ Oracle Signals ============

/// One `{label, score}` entry as returned by a text-classification model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Sentiment and emotion output of the external classifiers for one review.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OracleSignal {
    /// Label probabilities in the classifier's stable label order.
    #[serde(default)]
    pub sentiment_distribution: Option<Vec<f64>>,
    #[serde(default)]
    pub emotion_scores: Option<HashMap<String, f64>>,
}

impl OracleSignal {
    pub fn new(sentiment: Vec<f64>, emotions: HashMap<String, f64>) -> Self {
        Self {
            sentiment_distribution: Some(sentiment),
            emotion_scores: Some(emotions),
        }
    }

    /// Fold a list-shaped emotion result into a label map. Later duplicates win.
    pub fn emotions_from_labels(labels: &[LabelScore]) -> HashMap<String, f64> {
        labels
            .iter()
            .map(|l| (l.label.clone(), l.score))
            .collect()
    }

    pub fn emotion(&self, label: &str) -> Option<f64> {
        self.emotion_scores.as_ref().and_then(|m| m.get(label).copied())
    }
}

// ============ Verdicts ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityVerdict {
    pub score: f64,
    pub rationale: Vec<String>,
}

impl AuthenticityVerdict {
    /// Rationale joined for display.
    pub fn reasoning(&self) -> String {
        if self.rationale.is_empty() {
            "No significant issues detected".to_string()
        } else {
            self.rationale.join("; ")
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPath {
    /// Full multi-signal engine with oracle input.
    Full,
    /// Dependency-free phrase heuristic.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssessment {
    pub score: f64,
    pub is_potentially_fake: bool,
    pub path: ScoringPath,
    pub reasoning: String,
}

// ============ Service Boundary ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub review_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutput {
    pub is_potentially_fake: bool,
    pub confidence: f64,
}

/// Field names follow the health endpoint's snake_case wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_weights() {
        let total: f64 = PatternCategory::ALL.iter().map(|c| c.weight()).sum();
        assert!((total - 8.8).abs() < 1e-9);
        assert_eq!(PatternCategory::GenericPraise.as_str(), "generic_praise");
    }

    #[test]
    fn test_reasoning_defaults_when_empty() {
        let verdict = AuthenticityVerdict {
            score: 0.7,
            rationale: vec![],
        };
        assert_eq!(verdict.reasoning(), "No significant issues detected");
    }

    #[test]
    fn test_oracle_signal_camel_case() {
        let json = r#"{"sentimentDistribution":[0.1,0.2,0.7],"emotionScores":{"joy":0.4}}"#;
        let signal: OracleSignal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.sentiment_distribution.as_deref(), Some(&[0.1, 0.2, 0.7][..]));
        assert_eq!(signal.emotion("joy"), Some(0.4));
        assert_eq!(signal.emotion("anger"), None);
    }

    #[test]
    fn test_emotions_from_labels() {
        let labels = vec![
            LabelScore { label: "joy".to_string(), score: 0.9 },
            LabelScore { label: "sadness".to_string(), score: 0.05 },
        ];
        let map = OracleSignal::emotions_from_labels(&labels);
        assert_eq!(map.get("joy"), Some(&0.9));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_review_output_serializes_camel_case() {
        let out = ReviewOutput {
            is_potentially_fake: true,
            confidence: 0.2,
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("isPotentiallyFake"));
    }
}
