//! Error types for the ipv6-poetry codec.
//!
//! Only structural failures are errors: an unreadable word file, a malformed
//! address, a phrase with too few words. Unknown words and checksum
//! mismatches are reported inside [`crate::codec::DecodeResult`] instead.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Vocabulary: the word file could not be read or was rejected by policy
/// - Address: the text given to `encode` is not a valid IPv6 address
/// - Phrase: the text given to `decode` is too short to hold an address
#[derive(Debug, Error)]
pub enum Error {
    /// Vocabulary could not be loaded
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Malformed address text
    #[error("invalid IPv6 address: {0}")]
    Address(#[from] AddressError),

    /// Malformed phrase text
    #[error("invalid phrase: {0}")]
    Phrase(#[from] PhraseError),
}

/// Vocabulary loading errors.
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// The word file is missing or unreadable
    #[error("cannot read wordlist {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already-open source failed
    #[error("cannot read wordlist: {0}")]
    Io(#[from] std::io::Error),

    /// No words at all, so there is nothing to index into
    #[error("wordlist is empty")]
    Empty,

    /// Word count differs from the canonical size (strict policy only)
    #[error("wordlist has {actual} words, expected {expected}")]
    Cardinality { expected: usize, actual: usize },

    /// Entry is blank or contains whitespace, so it cannot survive a
    /// whitespace-split phrase (strict policy only)
    #[error("entry {word:?} at position {position} is blank or contains whitespace")]
    MalformedWord { word: String, position: usize },

    /// The same word appears at two positions (strict policy only)
    #[error("word {word:?} appears at positions {first} and {second}")]
    DuplicateWord {
        word: String,
        first: usize,
        second: usize,
    },
}

/// Address parsing errors. Every variant carries the full input text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// No `:` anywhere in the input
    #[error("{input:?} contains no ':' separator")]
    MissingSeparator { input: String },

    /// More than one `::` in the input
    #[error("{input:?} contains more than one '::'")]
    MultipleElisions { input: String },

    /// Wrong number of groups without elision
    #[error("{input:?} has {count} groups, expected 8")]
    GroupCount { input: String, count: usize },

    /// `::` given alongside too many explicit groups
    #[error("{input:?} has {explicit} explicit groups, at most 7 allowed with '::'")]
    ElisionOverflow { input: String, explicit: usize },

    /// Two adjacent separators outside of the single elision, or a dangling one
    #[error("{input:?} has an empty group at position {position}")]
    EmptyGroup { input: String, position: usize },

    /// Group contains characters that are not hex digits
    #[error("group {group:?} in {input:?} is not hexadecimal")]
    InvalidGroup { input: String, group: String },

    /// Group has more than four hex digits
    #[error("group {group:?} in {input:?} does not fit in 16 bits")]
    GroupTooLong { input: String, group: String },

    /// Dotted-quad tail that is malformed or not in the last position
    #[error("embedded IPv4 part {tail:?} in {input:?} is invalid")]
    InvalidIpv4Tail { input: String, tail: String },
}

/// Phrase decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseError {
    /// Fewer words than address groups
    #[error("need at least {required} words, got {actual}")]
    TooFewWords { required: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
