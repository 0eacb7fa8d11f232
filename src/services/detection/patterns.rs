// Pattern Catalog
// Weighted fake-review phrasing templates and authentic-review indicators.
// Templates are compiled once when the catalog is built; a bad template is a
// construction error, never a per-request one.

use regex::Regex;
use thiserror::Error;

use crate::models::PatternCategory::*;
use crate::models::{PatternCategory, PatternMatch, PatternReport};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid pattern template {id}: {source}")]
    InvalidTemplate {
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("pattern catalog has no fake-pattern templates")]
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternTemplate {
    pub category: PatternCategory,
    pub id: &'static str,
    pub template: &'static str,
}

const fn tpl(category: PatternCategory, id: &'static str, template: &'static str) -> PatternTemplate {
    PatternTemplate { category, id, template }
}

pub const FAKE_TEMPLATES: &[PatternTemplate] = &[
    tpl(GenericPraise, "superlative_quality", r"\b(superb|excellent|amazing|fantastic|incredible|outstanding|phenomenal)\s+(quality|product|item)\b"),
    tpl(GenericPraise, "fits_perfectly", r"\bfits\s+perfectly?\b"),
    tpl(GenericPraise, "highly_recommend", r"\bhighly\s+recommend\b"),
    tpl(GenericPraise, "best_purchase_ever", r"\bbest\s+(product|purchase|buy)\s+(ever|i'?ve\s+made)\b"),
    tpl(GenericPraise, "love_it", r"\b(love|loved)\s+it\b"),
    tpl(GenericPraise, "exactly_what_wanted", r"\b(perfect|exactly)\s+what\s+i\s+(wanted|needed)\b"),
    tpl(GenericPraise, "great_value", r"\bgreat\s+(value|price|deal)\b"),
    tpl(GenericPraise, "fast_delivery", r"\bfast\s+(delivery|shipping)\b"),
    tpl(GenericPraise, "packaging_great", r"\bpackaging\s+was\s+(great|excellent|perfect)\b"),
    tpl(ExtremeLanguage, "absolutely_perfect", r"\b(absolutely|totally|completely|extremely)\s+(perfect|amazing|love)\b"),
    tpl(ExtremeLanguage, "nothing_wrong", r"\b(never|nothing)\s+(wrong|bad|negative)\b"),
    tpl(ExtremeLanguage, "everything_perfect", r"\b(everything|all)\s+(perfect|great|amazing)\b"),
    tpl(ExtremeLanguage, "zero_complaints", r"\b(zero|no)\s+(complaints|issues|problems)\b"),
    tpl(Superlatives, "best_greatest", r"\b(best|greatest|most\s+amazing|top\s+quality)\b"),
    tpl(Superlatives, "five_stars", r"\b(five|5)\s+stars?\b"),
    tpl(Superlatives, "ten_out_of_ten", r"\b(ten|10)\s+out\s+of\s+(ten|10)\b"),
    tpl(Superlatives, "must_buy", r"\b(must\s+buy|must\s+have|life\s+changing)\b"),
    tpl(ServicePraise, "delivered_on_time", r"\bdelivered\s+on\s+time\b"),
    tpl(ServicePraise, "fast_shipping", r"\bfast\s+(shipping|delivery)\b"),
    tpl(ServicePraise, "great_service", r"\bgreat\s+(customer\s+)?service\b"),
    tpl(ServicePraise, "no_delivery_issues", r"\bno\s+(issues|problems)\s+with\s+(delivery|shipping)\b"),
    tpl(VagueDescriptions, "good_product", r"\b(good|nice|fine|okay)\s+(product|item|quality)\b"),
    tpl(VagueDescriptions, "as_described", r"\bas\s+(described|expected|advertised)\b"),
    tpl(VagueDescriptions, "what_you_see", r"\bwhat\s+you\s+(see|expect)\b"),
    tpl(VagueDescriptions, "does_the_job", r"\bdoes\s+the\s+job\b"),
    tpl(SuspiciousEnthusiasm, "repeated_exclamation", r"!{2,}"),
    tpl(SuspiciousEnthusiasm, "repeated_wow", r"\b(wow|omg|amazing){2,}\b"),
    tpl(SuspiciousEnthusiasm, "doubled_intensifier", r"\b(so\s+so\s+|very\s+very\s+)(good|great|amazing)\b"),
];

/// Phrasing that real, balanced reviews tend to use.
pub const AUTHENTIC_TEMPLATES: &[(&str, &str)] = &[
    ("contrast", r"\b(however|but|although|though|except)\b"),
    ("balanced_criticism", r"\b(minor|small|slight)\s+(issue|problem|complaint)\b"),
    ("constructive", r"\b(could\s+be\s+better|improvement|wish)\b"),
    ("comparative", r"\b(compared\s+to|versus|vs\.?)\b"),
    ("used_over_time", r"\b(after\s+(using|trying)|been\s+using)\b"),
    ("pros_and_cons", r"\b(pros\s+and\s+cons|advantages\s+and\s+disadvantages)\b"),
];

#[derive(Debug, Clone)]
struct CompiledPattern {
    category: PatternCategory,
    id: &'static str,
    regex: Regex,
}

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    fake: Vec<CompiledPattern>,
    authentic: Vec<(&'static str, Regex)>,
}

fn compile(id: &str, template: &str) -> Result<Regex, CatalogError> {
    Regex::new(template).map_err(|source| CatalogError::InvalidTemplate {
        id: id.to_string(),
        source,
    })
}

impl PatternCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_templates(FAKE_TEMPLATES, AUTHENTIC_TEMPLATES)
    }

    pub fn from_templates(
        fake: &[PatternTemplate],
        authentic: &[(&'static str, &'static str)],
    ) -> Result<Self, CatalogError> {
        if fake.is_empty() {
            return Err(CatalogError::Empty);
        }

        let fake = fake
            .iter()
            .map(|t| {
                Ok(CompiledPattern {
                    category: t.category,
                    id: t.id,
                    regex: compile(t.id, t.template)?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let authentic = authentic
            .iter()
            .map(|(id, template)| Ok((*id, compile(id, template)?)))
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self { fake, authentic })
    }

    pub fn fake_template_count(&self) -> usize {
        self.fake.len()
    }

    /// Score fake-review phrasing. Every non-overlapping match of every template
    /// adds its category weight.
    pub fn analyze(&self, text: &str) -> PatternReport {
        let lower = text.to_lowercase();
        let mut report = PatternReport::default();

        for pattern in &self.fake {
            let matched: Vec<String> = pattern
                .regex
                .find_iter(&lower)
                .map(|m| m.as_str().to_string())
                .collect();
            if matched.is_empty() {
                continue;
            }

            let weight = pattern.category.weight();
            report.fake_pattern_score += weight * matched.len() as f64;
            report.matches.push(PatternMatch {
                category: pattern.category,
                pattern_id: format!("{}.{}", pattern.category.as_str(), pattern.id),
                weight,
                occurrences: matched.len(),
                matched,
            });
        }

        report
    }

    /// Ids of authentic-indicator templates present in the text (each counted once).
    pub fn authentic_indicators(&self, text: &str) -> Vec<&'static str> {
        let lower = text.to_lowercase();
        self.authentic
            .iter()
            .filter(|(_, re)| re.is_match(&lower))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PatternCatalog {
        PatternCatalog::builtin().unwrap()
    }

    #[test]
    fn test_builtin_catalog_compiles() {
        let c = catalog();
        assert_eq!(c.fake_template_count(), FAKE_TEMPLATES.len());
        for category in PatternCategory::ALL {
            assert!(FAKE_TEMPLATES.iter().any(|t| t.category == category));
        }
        assert_eq!(AUTHENTIC_TEMPLATES.len(), 6);
    }

    #[test]
    fn test_invalid_template_fails_at_construction() {
        let bad = [tpl(GenericPraise, "broken", r"(unclosed")];
        let err = PatternCatalog::from_templates(&bad, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTemplate { ref id, .. } if id == "broken"));
        assert!(matches!(
            PatternCatalog::from_templates(&[], AUTHENTIC_TEMPLATES),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_pattern_score_sums_weights() {
        let report = catalog().analyze("This is the best product ever!!! Highly recommend, five stars!");
        // generic praise x2 (2.0 each), superlatives x2 (1.5 each), enthusiasm x1 (1.2)
        assert!((report.fake_pattern_score - 8.2).abs() < 1e-9);
        let ids: Vec<&str> = report.matches.iter().map(|m| m.pattern_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "generic_praise.highly_recommend",
                "generic_praise.best_purchase_ever",
                "superlatives.best_greatest",
                "superlatives.five_stars",
                "suspicious_enthusiasm.repeated_exclamation",
            ]
        );
    }

    #[test]
    fn test_occurrences_counted_per_match() {
        let report = catalog().analyze("Love it. LOVE IT. loved it!");
        let love = report
            .matches
            .iter()
            .find(|m| m.pattern_id == "generic_praise.love_it")
            .unwrap();
        assert_eq!(love.occurrences, 3);
        assert_eq!(love.matched, vec!["love it", "love it", "loved it"]);
        assert!((report.fake_pattern_score - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_fast_shipping_counts_in_both_categories() {
        let report = catalog().analyze("fast shipping");
        assert_eq!(report.matches.len(), 2);
        assert!((report.fake_pattern_score - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_plain_text_scores_zero() {
        let report = catalog().analyze("The handle cracked after a week of light use.");
        assert_eq!(report.fake_pattern_score, 0.0);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let c = catalog();
        let text = "Absolutely perfect!! Great value, as described, does the job.";
        assert_eq!(c.analyze(text), c.analyze(text));
    }

    #[test]
    fn test_authentic_indicators() {
        let c = catalog();
        let found = c.authentic_indicators(
            "Been using it for a month. However, compared to my old kettle it is slow.",
        );
        assert_eq!(found, vec!["contrast", "comparative", "used_over_time"]);
        assert!(c.authentic_indicators("Great.").is_empty());
    }
}
