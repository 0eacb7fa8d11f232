// Signal Fusion
// Combines gibberish, pattern, linguistic and oracle signals into one bounded score.
//
// Order matters: gibberish vetoes everything, pattern tiers are mutually
// exclusive, the remaining deductions and the authentic bonus are additive.

use crate::models::{AuthenticityVerdict, GibberishVerdict, LinguisticFeatures, OracleSignal};
use crate::services::config_store::ScoringConfig;

use super::patterns::PatternCatalog;

/// Signals produced for one review, ready to be fused.
#[derive(Debug, Clone, Copy)]
pub struct FusionInputs<'a> {
    pub text: &'a str,
    pub gibberish: &'a GibberishVerdict,
    pub fake_pattern_score: f64,
    pub features: &'a LinguisticFeatures,
    pub oracle: Option<&'a OracleSignal>,
}

/// Deduction for the fake-pattern tier. Only the highest matching tier applies.
fn pattern_tier(score: f64, config: &ScoringConfig) -> Option<(f64, String)> {
    if score > config.high_pattern_score {
        Some((config.high_pattern_penalty, format!("High fake pattern score: {:.1}", score)))
    } else if score > config.moderate_pattern_score {
        Some((config.moderate_pattern_penalty, format!("Moderate fake pattern score: {:.1}", score)))
    } else if score > config.some_pattern_score {
        Some((config.some_pattern_penalty, format!("Some fake patterns detected: {:.1}", score)))
    } else {
        None
    }
}

fn sentiment_deduction(oracle: &OracleSignal, config: &ScoringConfig) -> Option<(f64, String)> {
    let dist = oracle.sentiment_distribution.as_ref()?;
    if dist.len() < 3 {
        return None;
    }
    let positive = *dist.get(config.sentiment_positive_index)?;
    if positive > config.extreme_positive {
        Some((config.extreme_positive_penalty, format!("Extremely positive sentiment: {:.2}", positive)))
    } else if positive > config.very_positive {
        Some((config.very_positive_penalty, format!("Very positive sentiment: {:.2}", positive)))
    } else {
        None
    }
}

fn emotion_deduction(oracle: &OracleSignal, config: &ScoringConfig) -> Option<(f64, String)> {
    let joy = oracle.emotion(&config.joy_label)?;
    (joy > config.excessive_joy).then(|| {
        (config.excessive_joy_penalty, format!("Excessive joy emotion: {:.2}", joy))
    })
}

fn linguistic_deductions(f: &LinguisticFeatures, config: &ScoringConfig) -> Vec<(f64, String)> {
    let mut out = Vec::new();
    if f.word_count < config.short_review_words {
        out.push((config.short_review_penalty, "Very short review".to_string()));
    }
    if f.vocabulary_diversity < config.low_diversity {
        out.push((
            config.low_diversity_penalty,
            format!("Low vocabulary diversity: {:.2}", f.vocabulary_diversity),
        ));
    }
    if f.exclamation_ratio > config.excessive_exclamation {
        out.push((
            config.excessive_exclamation_penalty,
            format!("Excessive exclamation marks: {:.2}", f.exclamation_ratio),
        ));
    }
    if f.capital_ratio > config.excessive_capitals {
        out.push((
            config.excessive_capitals_penalty,
            format!("Excessive capital letters: {:.2}", f.capital_ratio),
        ));
    }
    if f.avg_sentence_length < config.short_sentence_length {
        out.push((config.short_sentence_penalty, "Very short sentences".to_string()));
    } else if f.avg_sentence_length > config.long_sentence_length {
        out.push((config.long_sentence_penalty, "Very long sentences".to_string()));
    }
    out
}

/// Fuse all signals into an [`AuthenticityVerdict`].
pub fn fuse_signals(
    inputs: &FusionInputs<'_>,
    catalog: &PatternCatalog,
    config: &ScoringConfig,
) -> AuthenticityVerdict {
    if inputs.gibberish.is_gibberish {
        return AuthenticityVerdict {
            score: config.gibberish_score,
            rationale: vec![format!("Gibberish detected: {}", inputs.gibberish.reason)],
        };
    }

    let mut score = config.base_score;
    let mut rationale = Vec::new();
    let mut apply = |(penalty, reason): (f64, String)| {
        score -= penalty;
        rationale.push(reason);
    };

    if let Some(d) = pattern_tier(inputs.fake_pattern_score, config) {
        apply(d);
    }

    if let Some(oracle) = inputs.oracle {
        if let Some(d) = sentiment_deduction(oracle, config) {
            apply(d);
        }
        if let Some(d) = emotion_deduction(oracle, config) {
            apply(d);
        }
    }

    for d in linguistic_deductions(inputs.features, config) {
        apply(d);
    }

    let authentic = catalog.authentic_indicators(inputs.text).len();
    if authentic > 0 {
        let bonus = (authentic as f64 * config.authentic_bonus_step).min(config.authentic_bonus_cap);
        score += bonus;
        rationale.push(format!("Authentic indicators found: {}", authentic));
    }

    AuthenticityVerdict {
        score: score.clamp(config.min_score, config.max_score),
        rationale,
    }
}
