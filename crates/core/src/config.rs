//! Configuration for locating and loading the shared wordlist.
//!
//! The wordlist lives in a directory as `wordlist.txt`. Defaults point at
//! `wordlists/wordlist.txt`; environment variables override them:
//!
//! | Variable                  | Effect                                   |
//! |---------------------------|------------------------------------------|
//! | `IPV6POETRY_WORDLIST`     | path of the word file                    |
//! | `IPV6POETRY_WORDLIST_DIR` | directory holding `wordlist.txt`         |
//! | `IPV6POETRY_STRICT`       | `1`/`true`/`yes` rejects non-canonical lists |
//!
//! An explicit file path wins over a directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::codec::Codec;
use crate::error::Result;
use crate::vocabulary::Vocabulary;

/// File name of the wordlist inside its directory.
pub const WORDLIST_FILE: &str = "wordlist.txt";

/// Directory searched when nothing else is configured.
pub const DEFAULT_WORDLIST_DIR: &str = "wordlists";

pub const ENV_WORDLIST: &str = "IPV6POETRY_WORDLIST";
pub const ENV_WORDLIST_DIR: &str = "IPV6POETRY_WORDLIST_DIR";
pub const ENV_STRICT: &str = "IPV6POETRY_STRICT";

/// What to do with a wordlist that is not exactly 65,536 unique words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardinalityPolicy {
    /// Log a warning and keep going with modulo indexing
    #[default]
    Warn,
    /// Fail the load
    Reject,
}

/// Complete configuration for building a codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Word file path
    pub wordlist_path: PathBuf,

    /// Handling of non-canonical wordlists
    pub cardinality: CardinalityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_dir(DEFAULT_WORDLIST_DIR)
    }
}

impl Config {
    /// Use `dir/wordlist.txt` with the default policy.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            wordlist_path: dir.as_ref().join(WORDLIST_FILE),
            cardinality: CardinalityPolicy::default(),
        }
    }

    /// Use an explicit word file with the default policy.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            wordlist_path: path.into(),
            cardinality: CardinalityPolicy::default(),
        }
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (lookup(ENV_WORDLIST), lookup(ENV_WORDLIST_DIR)) {
            (Some(path), _) if !path.trim().is_empty() => Self::from_path(path.trim()),
            (_, Some(dir)) if !dir.trim().is_empty() => Self::from_dir(dir.trim()),
            _ => Self::default(),
        };

        if let Some(strict) = lookup(ENV_STRICT) {
            if is_truthy(&strict) {
                config.cardinality = CardinalityPolicy::Reject;
            }
        }

        config
    }

    /// Set the cardinality policy.
    pub fn with_cardinality(mut self, policy: CardinalityPolicy) -> Self {
        self.cardinality = policy;
        self
    }

    /// Load the configured wordlist.
    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::load_with(&self.wordlist_path, self.cardinality)
    }

    /// Load the configured wordlist and wrap it in a codec.
    pub fn codec(&self) -> Result<Codec> {
        Ok(Codec::new(Arc::new(self.load_vocabulary()?)))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
