// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn io_err(action: &'static str) -> impl FnOnce(std::io::Error) -> ConfigError {
    move |source| ConfigError::Io { action, source }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub gibberish: GibberishConfig,
    /// `isPotentiallyFake := score < flagThreshold`
    #[serde(default = "default_flag_threshold")]
    pub flag_threshold: f64,
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            scoring: ScoringConfig::default(),
            gibberish: GibberishConfig::default(),
            flag_threshold: default_flag_threshold(),
            dictionary_path: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Fusion constants. The sentiment index and thresholds are tied to the label
/// order of the configured sentiment model; revalidate them when the model changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    pub base_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub gibberish_score: f64,
    pub high_pattern_score: f64,
    pub moderate_pattern_score: f64,
    pub some_pattern_score: f64,
    pub high_pattern_penalty: f64,
    pub moderate_pattern_penalty: f64,
    pub some_pattern_penalty: f64,
    pub sentiment_positive_index: usize,
    pub extreme_positive: f64,
    pub very_positive: f64,
    pub extreme_positive_penalty: f64,
    pub very_positive_penalty: f64,
    pub joy_label: String,
    pub excessive_joy: f64,
    pub excessive_joy_penalty: f64,
    pub authentic_bonus_step: f64,
    pub authentic_bonus_cap: f64,
    pub short_review_words: usize,
    pub short_review_penalty: f64,
    pub low_diversity: f64,
    pub low_diversity_penalty: f64,
    pub excessive_exclamation: f64,
    pub excessive_exclamation_penalty: f64,
    pub excessive_capitals: f64,
    pub excessive_capitals_penalty: f64,
    /// Average words per sentence below which sentences count as very short.
    pub short_sentence_length: f64,
    pub short_sentence_penalty: f64,
    pub long_sentence_length: f64,
    pub long_sentence_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 0.7,
            min_score: 0.01,
            max_score: 0.99,
            gibberish_score: 0.05,
            high_pattern_score: 5.0,
            moderate_pattern_score: 3.0,
            some_pattern_score: 1.0,
            high_pattern_penalty: 0.4,
            moderate_pattern_penalty: 0.25,
            some_pattern_penalty: 0.1,
            sentiment_positive_index: 2,
            extreme_positive: 0.9,
            very_positive: 0.8,
            extreme_positive_penalty: 0.2,
            very_positive_penalty: 0.1,
            joy_label: "joy".to_string(),
            excessive_joy: 0.8,
            excessive_joy_penalty: 0.15,
            authentic_bonus_step: 0.05,
            authentic_bonus_cap: 0.2,
            short_review_words: 10,
            short_review_penalty: 0.15,
            low_diversity: 0.5,
            low_diversity_penalty: 0.1,
            excessive_exclamation: 0.05,
            excessive_exclamation_penalty: 0.1,
            excessive_capitals: 0.15,
            excessive_capitals_penalty: 0.1,
            short_sentence_length: 3.0,
            short_sentence_penalty: 0.1,
            long_sentence_length: 30.0,
            long_sentence_penalty: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GibberishConfig {
    pub misspelling_ratio: f64,
    pub decisive_misspelling_ratio: f64,
    pub consonant_heavy_ratio: f64,
    pub decisive_consonant_heavy_ratio: f64,
}

impl Default for GibberishConfig {
    fn default() -> Self {
        Self {
            misspelling_ratio: 0.4,
            decisive_misspelling_ratio: 0.6,
            consonant_heavy_ratio: 0.3,
            decisive_consonant_heavy_ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    pub enabled: bool,
    pub base_url: String,
    pub sentiment_model: String,
    pub emotion_model: String,
    /// Stable label order of the sentiment distribution.
    pub sentiment_labels: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            sentiment_model: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            emotion_model: "j-hartmann/emotion-english-distilroberta-base".to_string(),
            sentiment_labels: vec![
                "negative".to_string(),
                "neutral".to_string(),
                "positive".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

fn default_version() -> String { "1.0.0".to_string() }
fn default_flag_threshold() -> f64 { 0.3 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Store backed by an explicit file rather than the default `config.json`.
    pub fn with_file(config_file: PathBuf) -> Self {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("review-guard"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(io_err("create config dir"))
    }

    /// Load configuration from file
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(io_err("read config"))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(io_err("write config"))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(io_err("create backup dir"))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(io_err("create backup"))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(io_err("read backup dir"))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
