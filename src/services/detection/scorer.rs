// Review Scorer
// Runs preprocessing, the three independent stages and fusion for one review.
// Holds only immutable state; one instance is shared by every request.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    AuthenticityVerdict, GibberishVerdict, LinguisticFeatures, OracleSignal, PatternReport,
    PreprocessedText, ReviewAssessment, ScoringPath,
};
use crate::services::classifier::{ClassifierError, EmotionClassifier, SentimentClassifier};
use crate::services::config_store::{AppConfig, GibberishConfig, ScoringConfig};
use crate::services::dictionary::{Dictionary, WordListDictionary};
use crate::services::text_processor::{preprocess, Tokenizer, UnicodeTokenizer};

use super::decision::{is_potentially_fake, DEFAULT_FLAG_THRESHOLD};
use super::fallback::fallback_score;
use super::fusion::{fuse_signals, FusionInputs};
use super::gibberish::detect_gibberish;
use super::linguistic::extract_features;
use super::patterns::{CatalogError, PatternCatalog};

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Pattern catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Every intermediate signal behind one verdict.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub preprocessed: PreprocessedText,
    pub gibberish: GibberishVerdict,
    pub patterns: PatternReport,
    pub features: LinguisticFeatures,
    pub verdict: AuthenticityVerdict,
}

pub struct ReviewScorer {
    scoring: ScoringConfig,
    gibberish: GibberishConfig,
    flag_threshold: f64,
    catalog: PatternCatalog,
    dictionary: Option<Arc<dyn Dictionary>>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl ReviewScorer {
    pub fn new(scoring: ScoringConfig, gibberish: GibberishConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            scoring,
            gibberish,
            flag_threshold: DEFAULT_FLAG_THRESHOLD,
            catalog: PatternCatalog::builtin()?,
            dictionary: None,
            tokenizer: Some(Arc::new(UnicodeTokenizer)),
        })
    }

    /// Build from configuration, loading the dictionary when one is configured.
    /// An unreadable dictionary only disables the misspelling check.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScorerError> {
        let mut scorer = Self::new(config.scoring.clone(), config.gibberish.clone())?
            .with_flag_threshold(config.flag_threshold);
        if let Some(path) = &config.dictionary_path {
            match WordListDictionary::load(path) {
                Ok(dict) => scorer = scorer.with_dictionary(Arc::new(dict)),
                Err(e) => warn!("[scorer] Dictionary unavailable, misspelling check disabled: {}", e),
            }
        }
        Ok(scorer)
    }

    pub fn with_flag_threshold(mut self, threshold: f64) -> Self {
        self.flag_threshold = threshold;
        self
    }

    pub fn with_dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Replace the tokenizer. `None` forces naive segmentation.
    pub fn with_tokenizer(mut self, tokenizer: Option<Arc<dyn Tokenizer>>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn flag_threshold(&self) -> f64 {
        self.flag_threshold
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    pub fn analyze(&self, text: &str, oracle: Option<&OracleSignal>) -> ScoreBreakdown {
        let preprocessed = preprocess(text);

        let gibberish = detect_gibberish(
            &preprocessed.cleaned,
            self.dictionary.as_deref(),
            &self.gibberish,
        );
        let patterns = self.catalog.analyze(&preprocessed.original);
        let features = extract_features(&preprocessed.original, self.tokenizer.as_deref());

        debug!(
            "[scorer] gibberish={} ({:.2}, {}), pattern_score={:.1}, matches={}, words={}",
            gibberish.is_gibberish,
            gibberish.score,
            gibberish.reason,
            patterns.fake_pattern_score,
            patterns.matches.len(),
            features.word_count
        );

        let verdict = fuse_signals(
            &FusionInputs {
                text: &preprocessed.original,
                gibberish: &gibberish,
                fake_pattern_score: patterns.fake_pattern_score,
                features: &features,
                oracle,
            },
            &self.catalog,
            &self.scoring,
        );

        debug!(
            "[scorer] final score={:.2}, reasoning: {}",
            verdict.score,
            verdict.reasoning()
        );

        ScoreBreakdown {
            preprocessed,
            gibberish,
            patterns,
            features,
            verdict,
        }
    }

    /// Full multi-signal score. Never fails; a missing oracle only skips the sentiment and joy steps.
    pub fn score(&self, text: &str, oracle: Option<&OracleSignal>) -> AuthenticityVerdict {
        self.analyze(text, oracle).verdict
    }

    pub fn fallback_score(&self, text: &str) -> f64 {
        fallback_score(text)
    }

    /// Score on the fallback path, recording `cause` in the reasoning.
    pub fn assess_fallback(&self, text: &str, cause: &str) -> ReviewAssessment {
        let score = fallback_score(text);
        ReviewAssessment {
            score,
            is_potentially_fake: is_potentially_fake(score, self.flag_threshold),
            path: ScoringPath::Fallback,
            reasoning: format!("Fallback heuristic used: {}", cause),
        }
    }

    /// Score with an already-fetched oracle outcome. Any oracle error selects the fallback path.
    pub fn assess(&self, text: &str, oracle: Result<OracleSignal, ClassifierError>) -> ReviewAssessment {
        match oracle {
            Ok(signal) => {
                let verdict = self.score(text, Some(&signal));
                ReviewAssessment {
                    score: verdict.score,
                    is_potentially_fake: is_potentially_fake(verdict.score, self.flag_threshold),
                    path: ScoringPath::Full,
                    reasoning: verdict.reasoning(),
                }
            }
            Err(e) => {
                warn!("[scorer] Oracle unavailable, using fallback heuristic: {}", e);
                self.assess_fallback(text, &e.to_string())
            }
        }
    }

    /// Score with synchronous classifier collaborators. With neither configured the
    /// fallback heuristic is used; a missing emotion classifier only omits that signal.
    pub fn assess_with(
        &self,
        text: &str,
        sentiment: Option<&dyn SentimentClassifier>,
        emotion: Option<&dyn EmotionClassifier>,
    ) -> ReviewAssessment {
        if sentiment.is_none() && emotion.is_none() {
            warn!("[scorer] No classifier configured, using fallback heuristic");
            return self.assess_fallback(text, "no classifier configured");
        }

        let cleaned = preprocess(text).cleaned;
        let signal = (|| -> Result<OracleSignal, ClassifierError> {
            Ok(OracleSignal {
                sentiment_distribution: sentiment.map(|c| c.classify(&cleaned)).transpose()?,
                emotion_scores: emotion.map(|c| c.classify(&cleaned)).transpose()?,
            })
        })();
        self.assess(text, signal)
    }
}
