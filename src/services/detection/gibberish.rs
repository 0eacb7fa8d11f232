// Gibberish Detection
// Decides whether cleaned review text is meaningful language at all.
// All indicators are collected first, then combined by count.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::models::GibberishVerdict;
use crate::services::config_store::GibberishConfig;
use crate::services::dictionary::Dictionary;

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("alphabetic word regex"))
}

fn consonant_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[bcdfghjklmnpqrstvwxyz]{4,}\b").expect("consonant run regex"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum GibberishIndicator {
    HighMisspelling(f64),
    ConsonantHeavy(f64),
    RepetitiveChars(usize),
    RandomConsonants(usize),
    KeyboardMashing(String),
}

impl fmt::Display for GibberishIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighMisspelling(ratio) => write!(f, "high_misspelling({:.2})", ratio),
            Self::ConsonantHeavy(ratio) => write!(f, "consonant_heavy({:.2})", ratio),
            Self::RepetitiveChars(n) => write!(f, "repetitive_chars({})", n),
            Self::RandomConsonants(n) => write!(f, "random_consonants({})", n),
            Self::KeyboardMashing(window) => write!(f, "keyboard_mashing({})", window),
        }
    }
}

/// Number of runs where one character repeats 4 or more times in a row.
fn repetitive_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut prev: Option<char> = None;
    let mut len = 0usize;
    for ch in text.chars() {
        if Some(ch) == prev {
            len += 1;
            if len == 4 {
                runs += 1;
            }
        } else {
            prev = Some(ch);
            len = 1;
        }
    }
    runs
}

/// Four-letter windows of each keyboard row (and their reversals) present in the text.
fn keyboard_windows(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for row in KEYBOARD_ROWS {
        let chars: Vec<char> = row.chars().collect();
        for window in chars.windows(4) {
            let forward: String = window.iter().collect();
            let backward: String = window.iter().rev().collect();
            if text.contains(&forward) || text.contains(&backward) {
                found.push(forward);
            }
        }
    }
    found
}

fn is_consonant_heavy(word: &str) -> bool {
    let vowel_count = word.chars().filter(|c| VOWELS.contains(c)).count();
    let consonant_count = word.chars().count() - vowel_count;
    consonant_count > vowel_count * 3
}

/// Collect every gibberish indicator present in `words` / `lower`.
pub fn collect_indicators(
    lower: &str,
    words: &[&str],
    dictionary: Option<&dyn Dictionary>,
    config: &GibberishConfig,
) -> Vec<GibberishIndicator> {
    let mut indicators = Vec::new();
    if words.is_empty() {
        return indicators;
    }
    let total = words.len() as f64;

    if let Some(dict) = dictionary {
        let misspelled = words
            .iter()
            .filter(|w| w.len() > 2 && !dict.contains(w))
            .count();
        let ratio = misspelled as f64 / total;
        if ratio > config.misspelling_ratio {
            indicators.push(GibberishIndicator::HighMisspelling(ratio));
        }
    }

    let heavy = words
        .iter()
        .filter(|w| w.len() > 3 && is_consonant_heavy(w))
        .count();
    let heavy_ratio = heavy as f64 / total;
    if heavy_ratio > config.consonant_heavy_ratio {
        indicators.push(GibberishIndicator::ConsonantHeavy(heavy_ratio));
    }

    let runs = repetitive_runs(lower);
    if runs > 0 {
        indicators.push(GibberishIndicator::RepetitiveChars(runs));
    }

    let consonant_runs = consonant_run_re().find_iter(lower).count();
    if consonant_runs > 0 {
        indicators.push(GibberishIndicator::RandomConsonants(consonant_runs));
    }

    for window in keyboard_windows(lower) {
        indicators.push(GibberishIndicator::KeyboardMashing(window));
    }

    indicators
}

/// Decide whether the cleaned text is gibberish.
/// A missing dictionary only removes the misspelling indicator.
pub fn detect_gibberish(
    text: &str,
    dictionary: Option<&dyn Dictionary>,
    config: &GibberishConfig,
) -> GibberishVerdict {
    if text.chars().filter(|c| !c.is_whitespace()).count() < 3 {
        return GibberishVerdict::gibberish(0.9, "Text too short");
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = word_re().find_iter(&lower).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return GibberishVerdict::gibberish(0.95, "No valid words found");
    }

    let indicators = collect_indicators(&lower, &words, dictionary, config);

    match indicators.as_slice() {
        [] => GibberishVerdict::legitimate(),
        [GibberishIndicator::HighMisspelling(ratio)] if *ratio > config.decisive_misspelling_ratio => {
            GibberishVerdict::gibberish(0.85, format!("High misspelling rate: {:.2}", ratio))
        }
        [GibberishIndicator::ConsonantHeavy(ratio)] if *ratio > config.decisive_consonant_heavy_ratio => {
            GibberishVerdict::gibberish(
                0.8,
                format!("Too many consonant-heavy words: {:.2}", ratio),
            )
        }
        [_] => GibberishVerdict::legitimate(),
        many => {
            let score = (0.8 + 0.05 * many.len() as f64).min(1.0);
            let listed = many
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            GibberishVerdict::gibberish(score, format!("Multiple indicators: {}", listed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dictionary::WordListDictionary;

    fn cfg() -> GibberishConfig {
        GibberishConfig::default()
    }

    #[test]
    fn test_too_short() {
        for text in ["", "  ", "ab", "a b"] {
            let v = detect_gibberish(text, None, &cfg());
            assert!(v.is_gibberish);
            assert_eq!(v.score, 0.9);
            assert_eq!(v.reason, "Text too short");
        }
    }

    #[test]
    fn test_no_alphabetic_words() {
        let v = detect_gibberish("12345 678", None, &cfg());
        assert!(v.is_gibberish);
        assert_eq!(v.score, 0.95);
        assert_eq!(v.reason, "No valid words found");
    }

    #[test]
    fn test_keyboard_mash_is_gibberish() {
        let v = detect_gibberish("asdf qwer zxcv", None, &cfg());
        assert!(v.is_gibberish);
        assert_eq!(v.score, 1.0);
        assert!(v.reason.starts_with("Multiple indicators:"));
        assert!(v.reason.contains("keyboard_mashing(asdf)"));
    }

    #[test]
    fn test_two_indicators_score() {
        // repetitive run + one keyboard window
        let v = detect_gibberish("wooooow nice property here", None, &cfg());
        assert!(v.is_gibberish);
        assert!((v.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_single_non_decisive_indicator_is_legitimate() {
        let v = detect_gibberish("This property is lovely and well built", None, &cfg());
        assert!(!v.is_gibberish);
        assert_eq!(v.score, 0.1);
        assert_eq!(v.reason, "Text appears legitimate");
    }

    #[test]
    fn test_consonant_heavy_decisive() {
        let v = detect_gibberish("strengths twelfths ok", None, &cfg());
        assert!(v.is_gibberish);
        assert_eq!(v.score, 0.8);
        assert_eq!(v.reason, "Too many consonant-heavy words: 0.67");
    }

    #[test]
    fn test_misspelling_requires_dictionary() {
        let text = "Florin baneto quimal";
        assert!(!detect_gibberish(text, None, &cfg()).is_gibberish);

        let dict = WordListDictionary::from_words(["the", "product", "works", "well"]);
        let v = detect_gibberish(text, Some(&dict), &cfg());
        assert!(v.is_gibberish);
        assert_eq!(v.score, 0.85);
        assert_eq!(v.reason, "High misspelling rate: 1.00");
    }

    #[test]
    fn test_dictionary_known_words_pass() {
        let dict = WordListDictionary::from_words(["the", "product", "works", "well"]);
        let v = detect_gibberish("The product works well", Some(&dict), &cfg());
        assert!(!v.is_gibberish);
    }

    #[test]
    fn test_collect_indicators_individually() {
        let lower = "soooo good, brrrr";
        let words = vec!["soooo", "good", "brrrr"];
        let found = collect_indicators(lower, &words, None, &cfg());
        assert!(found.contains(&GibberishIndicator::RepetitiveChars(2)));
        assert!(found.contains(&GibberishIndicator::RandomConsonants(1)));
    }

    #[test]
    fn test_keyboard_reversal_detected() {
        assert_eq!(keyboard_windows("lkjh"), vec!["hjkl".to_string()]);
        assert!(keyboard_windows("nothing here").is_empty());
    }

    #[test]
    fn test_repetitive_runs_counts_runs_not_chars() {
        assert_eq!(repetitive_runs("aaaaaaa"), 1);
        assert_eq!(repetitive_runs("aaa bbb"), 0);
        assert_eq!(repetitive_runs("aaaa bbbb"), 2);
    }
}
