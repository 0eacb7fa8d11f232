// Fallback Heuristic
// Dependency-free scoring used when the classifiers cannot be reached.
// Phrases match as plain substrings of the lower-cased text.

const FAKE_PHRASES: &[&str] = &[
    "superb quality",
    "fits perfectly",
    "highly recommend",
    "best product ever",
    "amazing quality",
    "perfect in every way",
    "five stars",
    "5 stars",
    "must buy",
    "life changing",
    "incredible",
    "outstanding",
    "phenomenal",
    "delivered on time",
    "packaging was great",
    "fast shipping",
    "great service",
    "exactly what i wanted",
    "love it",
    "perfect product",
];

const REAL_PHRASES: &[&str] = &[
    "however",
    "but",
    "although",
    "except",
    "minor issue",
    "small problem",
    "could be better",
    "improvement",
    "compared to",
    "after using",
    "weeks",
    "months",
    "days",
    "pros and cons",
    "wish it had",
    "not perfect",
];

/// Authenticity score in [0.05, 0.95], or 0.5 when nothing fired.
/// Empty text scores 0.1; whitespace-only text goes through the rules like any other.
pub fn fallback_score(text: &str) -> f64 {
    if text.is_empty() {
        return 0.1;
    }

    let lower = text.to_lowercase();
    let mut fake = 2 * FAKE_PHRASES.iter().filter(|p| lower.contains(*p)).count();
    let mut real = REAL_PHRASES.iter().filter(|p| lower.contains(*p)).count();

    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.len() < 8 {
        fake += 3;
    } else if words.len() > 100 {
        real += 2;
    }

    let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
    if !words.is_empty() && (unique.len() as f64 / words.len() as f64) < 0.6 {
        fake += 2;
    }

    let exclamations = text.matches('!').count();
    if exclamations > 2 {
        fake += exclamations;
    }

    if fake + real == 0 {
        return 0.5;
    }

    let confidence = (real as f64 + 1.0) / ((fake + real) as f64 + 2.0);
    confidence.clamp(0.05, 0.95)
}
