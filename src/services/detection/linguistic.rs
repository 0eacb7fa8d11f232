// Linguistic Features
// Statistical text features over the original (case and punctuation preserved) text

use std::collections::HashSet;
use tracing::warn;

use crate::models::LinguisticFeatures;
use crate::services::text_processor::{is_fallback_stop_word, naive_segment, Tokenizer};

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Extract features, segmenting with `tokenizer` when present. A missing or
/// failing tokenizer falls back to naive period/whitespace splitting.
pub fn extract_features(text: &str, tokenizer: Option<&dyn Tokenizer>) -> LinguisticFeatures {
    let (segmentation, stop_source) = match tokenizer {
        Some(tok) => match tok.segment(text) {
            Ok(seg) => (seg, Some(tok)),
            Err(e) => {
                warn!("[linguistic] Tokenizer failed, using naive segmentation: {}", e);
                (naive_segment(text), None)
            }
        },
        None => (naive_segment(text), None),
    };
    let is_stop = |w: &str| match stop_source {
        Some(tok) => tok.is_stop_word(w),
        None => is_fallback_stop_word(w),
    };

    let words = &segmentation.words;
    let word_count = words.len();
    let sentence_count = segmentation.sentences.len();

    let unique: HashSet<&str> = words.iter().map(|w| w.as_str()).collect();
    let stop_count = words.iter().filter(|w| is_stop(w.as_str())).count();

    let char_count = text.chars().count();
    let punctuation = text.chars().filter(|c| c.is_ascii_punctuation()).count();
    let exclamations = text.chars().filter(|c| *c == '!').count();
    let capitals = text.chars().filter(|c| c.is_uppercase()).count();

    LinguisticFeatures {
        word_count,
        sentence_count,
        avg_sentence_length: ratio(word_count, sentence_count),
        vocabulary_diversity: ratio(unique.len(), word_count),
        stop_word_ratio: ratio(stop_count, word_count),
        punctuation_ratio: ratio(punctuation, char_count),
        exclamation_ratio: ratio(exclamations, char_count),
        capital_ratio: ratio(capitals, char_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_processor::{Segmentation, TokenizeError, UnicodeTokenizer};

    struct BrokenTokenizer;

    impl Tokenizer for BrokenTokenizer {
        fn segment(&self, _text: &str) -> Result<Segmentation, TokenizeError> {
            Err(TokenizeError::Unavailable("model not loaded".to_string()))
        }

        fn is_stop_word(&self, _word: &str) -> bool {
            panic!("stop words must not be consulted after a failed segmentation")
        }
    }

    #[test]
    fn test_empty_text_yields_zero_ratios() {
        let f = extract_features("", Some(&UnicodeTokenizer));
        assert_eq!(f, LinguisticFeatures::default());

        let f = extract_features("", None);
        assert_eq!(f.word_count, 0);
        assert_eq!(f.vocabulary_diversity, 0.0);
        assert_eq!(f.capital_ratio, 0.0);
    }

    #[test]
    fn test_unicode_features() {
        let text = "The lid is LOUD! It works, though.";
        let f = extract_features(text, Some(&UnicodeTokenizer));
        // the lid is loud ! it works , though .
        assert_eq!(f.word_count, 10);
        assert_eq!(f.sentence_count, 2);
        assert!((f.avg_sentence_length - 5.0).abs() < 1e-9);
        assert!((f.vocabulary_diversity - 1.0).abs() < 1e-9);
        // the, is, it
        assert!((f.stop_word_ratio - 0.3).abs() < 1e-9);
        let len = text.chars().count() as f64;
        assert!((f.exclamation_ratio - 1.0 / len).abs() < 1e-9);
        assert!((f.punctuation_ratio - 3.0 / len).abs() < 1e-9);
        assert!((f.capital_ratio - 6.0 / len).abs() < 1e-9);
    }

    #[test]
    fn test_failed_tokenizer_falls_back() {
        let text = "Good pan. Heats evenly with the lid on";
        let f = extract_features(text, Some(&BrokenTokenizer));
        assert_eq!(f.word_count, 8);
        assert_eq!(f.sentence_count, 2);
        // with, the, on
        assert!((f.stop_word_ratio - 3.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratios_bounded() {
        let f = extract_features("WOW!!!! BEST!!!!", Some(&UnicodeTokenizer));
        for r in [
            f.vocabulary_diversity,
            f.stop_word_ratio,
            f.punctuation_ratio,
            f.exclamation_ratio,
            f.capital_ratio,
        ] {
            assert!((0.0..=1.0).contains(&r));
        }
    }
}
