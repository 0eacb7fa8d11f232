// ReviewGuard Core Services

pub mod text_processor;
pub mod dictionary;
pub mod config_store;
pub mod classifier;
pub mod detection;

pub use text_processor::*;
pub use dictionary::*;
pub use config_store::*;
pub use classifier::*;

// Re-export detection entry points
pub use detection::{
    detect_gibberish,
    extract_features,
    fallback_score,
    fuse_signals,
    is_potentially_fake,
    CatalogError,
    PatternCatalog,
    ReviewDetector,
    ReviewScorer,
    ScoreBreakdown,
    ScorerError,
};
