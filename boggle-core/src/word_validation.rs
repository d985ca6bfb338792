use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// The dictionary of playable words, stored upper-cased.
#[derive(Debug, Clone, Default)]
pub struct WordValidator {
    valid_words: HashSet<String>,
}

impl WordValidator {
    /// Build a validator from newline-separated words. Blank lines and
    /// `#` comments are skipped.
    pub fn from_word_list(word_list: &str) -> Self {
        let valid_words = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_uppercase)
            .collect();

        Self { valid_words }
    }

    /// Load a word list file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;

        let validator = Self::from_word_list(&contents);
        info!(
            "Loaded {} words from {}",
            validator.word_count(),
            path.display()
        );
        Ok(validator)
    }

    /// Exact membership check against an already upper-cased word.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.valid_words.contains(word)
    }

    pub fn word_count(&self) -> usize {
        self.valid_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_words.is_empty()
    }
}
