// Dictionary Lookup Service
// Word-list spelling dictionary used by the gibberish detector

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Dictionary {0} contains no words")]
    Empty(String),
}

/// Spelling lookup collaborator.
pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

/// In-memory set of lower-cased words.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a newline-separated word list. Lines starting with `#` are ignored.
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines().filter(|l| !l.trim_start().starts_with('#')))
    }

    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dict = Self::parse(&content);
        if dict.is_empty() {
            return Err(DictionaryError::Empty(path.display().to_string()));
        }
        info!("[dictionary] Loaded {} words from {}", dict.len(), path.display());
        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}
