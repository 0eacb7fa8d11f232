// Detection Module
// Review authenticity scoring organized into specialized submodules:
// - gibberish: Decides whether the cleaned text is language at all
// - patterns: Weighted fake-phrasing catalog and authentic indicators
// - linguistic: Statistical features over the original text
// - fusion: Combines every signal into one bounded score with rationale
// - fallback: Dependency-free heuristic for the degraded path
// - scorer: Runs the stages for one review
// - pipeline: Chooses between the full and fallback paths per request
// - decision: Flag threshold contract

pub mod gibberish;
pub mod patterns;
pub mod linguistic;
pub mod fusion;
pub mod fallback;
pub mod scorer;
pub mod pipeline;
pub mod decision;

// Re-export commonly used items
pub use gibberish::{detect_gibberish, GibberishIndicator};
pub use patterns::{CatalogError, PatternCatalog, PatternTemplate};
pub use linguistic::extract_features;
pub use fusion::{fuse_signals, FusionInputs};
pub use fallback::fallback_score;
pub use scorer::{ReviewScorer, ScoreBreakdown, ScorerError};
pub use pipeline::ReviewDetector;
pub use decision::{is_potentially_fake, to_review_output, DEFAULT_FLAG_THRESHOLD};
