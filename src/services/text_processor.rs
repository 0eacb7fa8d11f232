// Text Processing Service
// Review preprocessing and sentence/word segmentation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::PreprocessedText;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("tokenizer unavailable: {0}")]
    Unavailable(String),
    #[error("segmentation failed: {0}")]
    Failed(String),
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s.,!?-]").expect("disallowed char regex"))
}

/// Collapse runs of whitespace to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text.trim(), " ").into_owned()
}

/// Build the (original, cleaned) pair for a review.
/// `cleaned` only ever removes characters from `original`, then re-collapses spacing.
pub fn preprocess(text: &str) -> PreprocessedText {
    if text.trim().is_empty() {
        return PreprocessedText::default();
    }

    let original = collapse_whitespace(text);
    let stripped = disallowed_re().replace_all(&original, "");
    let cleaned = collapse_whitespace(&stripped);

    PreprocessedText { original, cleaned }
}

// ============ Segmentation ============

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segmentation {
    pub sentences: Vec<String>,
    /// Lower-cased word tokens (punctuation tokens included).
    pub words: Vec<String>,
}

/// Sentence/word tokenizer collaborator.
pub trait Tokenizer: Send + Sync {
    fn segment(&self, text: &str) -> Result<Segmentation, TokenizeError>;
    fn is_stop_word(&self, word: &str) -> bool;
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const FALLBACK_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

fn english_stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Unicode (UAX #29) sentence and word segmentation with the full English stop-word list.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn segment(&self, text: &str) -> Result<Segmentation, TokenizeError> {
        let sentences = text
            .unicode_sentences()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let lower = text.to_lowercase();
        let words = lower
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(|w| w.to_string())
            .collect();

        Ok(Segmentation { sentences, words })
    }

    fn is_stop_word(&self, word: &str) -> bool {
        english_stop_words().contains(word)
    }
}

/// Naive segmentation used when the tokenizer collaborator is missing or fails.
/// Splits sentences on periods and words on whitespace; never fails.
pub fn naive_segment(text: &str) -> Segmentation {
    let sentences = text.split('.').map(|s| s.to_string()).collect();
    let words = text
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();
    Segmentation { sentences, words }
}

pub fn is_fallback_stop_word(word: &str) -> bool {
    FALLBACK_STOP_WORDS.contains(&word)
}
