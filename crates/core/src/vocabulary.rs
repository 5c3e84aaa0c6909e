//! The shared wordlist mapping 16-bit values to words and back.
//!
//! A canonical wordlist has exactly [`CANONICAL_SIZE`] unique lowercase words,
//! one per line. Every party exchanging phrases must use a byte-identical
//! file: there is no negotiation, and a different list silently produces
//! different phrases.
//!
//! # Non-canonical lists
//!
//! A list of any other size still loads under [`CardinalityPolicy::Warn`].
//! Lookups then wrap with `index % len`, so phrases made from it will not
//! round-trip against the canonical list. This exists for compatibility with
//! lists already in use and is not the normal mode of operation.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::{CardinalityPolicy, WORDLIST_FILE};
use crate::error::{Result, VocabularyError};

/// Number of words in a canonical list: one per 16-bit value.
pub const CANONICAL_SIZE: usize = 1 << 16;

/// Reported when a list's size is not [`CANONICAL_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityWarning {
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for CardinalityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wordlist contains {} words, expected {}; phrases will not match the canonical list",
            self.actual, self.expected
        )
    }
}

/// Ordered wordlist with O(1) lookup in both directions.
///
/// Immutable once built, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Words in file order, trimmed and lowercased
    words: Vec<String>,

    /// Word -> position (last position wins for duplicates)
    index: HashMap<String, usize>,

    /// Number of lines whose word already appeared earlier
    duplicates: usize,

    /// Number of entries that are blank or contain whitespace
    malformed: usize,
}

impl Vocabulary {
    /// Load a word file, warning about a non-canonical size.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, CardinalityPolicy::Warn)
    }

    /// Load `dir/wordlist.txt`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(dir.as_ref().join(WORDLIST_FILE))
    }

    /// Load a word file under the given policy.
    ///
    /// # Errors
    /// - `VocabularyError::Read` if the file cannot be opened or read
    /// - `VocabularyError::Empty` if it contains no lines
    /// - `VocabularyError::Cardinality` / `DuplicateWord` / `MalformedWord`
    ///   under [`CardinalityPolicy::Reject`]
    pub fn load_with(path: impl AsRef<Path>, policy: CardinalityPolicy) -> Result<Self> {
        let path = path.as_ref();
        let read_error = |source: std::io::Error| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_error)?;
        let words = read_lines(BufReader::new(file)).map_err(read_error)?;
        let vocabulary = Self::from_words(words, policy)?;

        debug!(path = %path.display(), words = vocabulary.len(), "loaded wordlist");
        Ok(vocabulary)
    }

    /// Read newline-delimited words from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R, policy: CardinalityPolicy) -> Result<Self> {
        let words = read_lines(reader).map_err(VocabularyError::from)?;
        Self::from_words(words, policy)
    }

    /// Build from words already in memory. Each word is trimmed and lowercased.
    pub fn from_words<I, S>(words: I, policy: CardinalityPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words.into_iter().map(|w| normalize(w.as_ref())).collect();

        if words.is_empty() {
            return Err(VocabularyError::Empty.into());
        }

        let mut index = HashMap::with_capacity(words.len());
        let mut duplicates = 0;
        let mut malformed = 0;

        for (position, word) in words.iter().enumerate() {
            // A phrase is split on whitespace, so such an entry shifts every later word
            if !is_token(word) {
                if policy == CardinalityPolicy::Reject {
                    return Err(VocabularyError::MalformedWord {
                        word: word.clone(),
                        position,
                    }
                    .into());
                }
                malformed += 1;
            }

            if let Some(first) = index.insert(word.clone(), position) {
                if policy == CardinalityPolicy::Reject {
                    return Err(VocabularyError::DuplicateWord {
                        word: word.clone(),
                        first,
                        second: position,
                    }
                    .into());
                }
                duplicates += 1;
            }
        }

        let vocabulary = Self {
            words,
            index,
            duplicates,
            malformed,
        };

        if let Some(warning) = vocabulary.cardinality_warning() {
            if policy == CardinalityPolicy::Reject {
                return Err(VocabularyError::Cardinality {
                    expected: warning.expected,
                    actual: warning.actual,
                }
                .into());
            }
            warn!("{warning}");
        }
        if duplicates > 0 {
            warn!(
                duplicates,
                "wordlist contains repeated words; later positions shadow earlier ones"
            );
        }
        if malformed > 0 {
            warn!(
                malformed,
                "wordlist contains blank or multi-word entries; phrases using them will not decode"
            );
        }

        Ok(vocabulary)
    }

    /// Word for `index`, wrapping modulo the list length.
    pub fn word_at(&self, index: usize) -> &str {
        &self.words[index % self.words.len()]
    }

    /// Position of `token`, ignoring case and surrounding whitespace.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(&normalize(token)).copied()
    }

    /// Whether `token` is in the list.
    pub fn contains(&self, token: &str) -> bool {
        self.index_of(token).is_some()
    }

    /// Number of words, including duplicates.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: an empty list is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of lines that repeat an earlier word.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Number of entries that are blank or contain whitespace.
    pub fn malformed_count(&self) -> usize {
        self.malformed
    }

    /// True when the list has exactly [`CANONICAL_SIZE`] unique, well-formed words.
    pub fn is_canonical(&self) -> bool {
        self.words.len() == CANONICAL_SIZE && self.duplicates == 0 && self.malformed == 0
    }

    /// Size mismatch against the canonical list, if any.
    pub fn cardinality_warning(&self) -> Option<CardinalityWarning> {
        (self.words.len() != CANONICAL_SIZE).then_some(CardinalityWarning {
            expected: CANONICAL_SIZE,
            actual: self.words.len(),
        })
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// A word must be non-empty and free of whitespace to survive a split phrase.
fn is_token(word: &str) -> bool {
    !word.is_empty() && !word.chars().any(char::is_whitespace)
}

fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    reader.lines().collect()
}
