//! Address <-> phrase conversion.
//!
//! # Phrase Format
//!
//! ```text
//! word[f0] word[f1] word[f2] word[f3] word[f4] word[f5] word[f6] word[f7] word[crc]
//! |<------------------ one word per 16-bit group ------------------>|  checksum
//! ```
//!
//! Decoding is forgiving. The phrase usually comes from a person copying it
//! by hand, so an unknown word becomes a zero group and a wrong checksum word
//! is reported, and in both cases decoding still returns an address. Only a
//! phrase with fewer than eight words is an error.
//!
//! # Example
//! ```
//! use ipv6_poetry_core::codec::{ChecksumStatus, Codec};
//! use ipv6_poetry_core::config::CardinalityPolicy;
//! use ipv6_poetry_core::vocabulary::Vocabulary;
//!
//! let words = (0..65536).map(|i| format!("w{i}"));
//! let codec = Codec::new(Vocabulary::from_words(words, CardinalityPolicy::Reject).unwrap());
//!
//! let phrase = codec.encode("::1").unwrap();
//! assert_eq!(phrase, "w0 w0 w0 w0 w0 w0 w0 w1 w31683");
//!
//! let decoded = codec.decode(&phrase).unwrap();
//! assert_eq!(decoded.address, "::1");
//! assert_eq!(decoded.checksum, ChecksumStatus::Valid);
//! ```

use std::fmt;
use std::net::Ipv6Addr;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::address::{self, AddressFields, GROUPS};
use crate::checksum::checksum;
use crate::error::{PhraseError, Result};
use crate::vocabulary::Vocabulary;

/// Words in a complete phrase: one per group plus the checksum word.
pub const PHRASE_WORDS: usize = GROUPS + 1;

/// A complete nine-word phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    words: Vec<String>,
}

impl Phrase {
    /// All nine words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The eight words that carry the address.
    pub fn address_words(&self) -> &[String] {
        &self.words[..GROUPS]
    }

    /// The trailing checksum word.
    pub fn checksum_word(&self) -> &str {
        &self.words[GROUPS]
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

/// Outcome of comparing the ninth word against the recomputed checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// Ninth word matches
    Valid,

    /// Ninth word differs from what the decoded address produces
    Invalid { expected: String, found: String },

    /// Only eight words were given, so nothing was checked
    Unchecked,
}

impl ChecksumStatus {
    /// `"valid"`, `"invalid"` or `"unchecked"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumStatus::Valid => "valid",
            ChecksumStatus::Invalid { .. } => "invalid",
            ChecksumStatus::Unchecked => "unchecked",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ChecksumStatus::Valid)
    }
}

impl fmt::Display for ChecksumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phrase word that is not in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord {
    /// Zero-based position in the phrase (8 is the checksum word)
    pub position: usize,

    /// The word as given, lowercased
    pub word: String,
}

/// Everything learned from decoding a phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Decoded groups; unknown words contribute 0
    pub fields: AddressFields,

    /// Canonical text form of `fields`
    pub address: String,

    /// Checksum comparison
    pub checksum: ChecksumStatus,

    /// Words that could not be resolved, in phrase order
    pub unknown_words: Vec<UnknownWord>,
}

impl DecodeResult {
    /// Decoded address as a std type.
    pub fn ip(&self) -> Ipv6Addr {
        self.fields.into()
    }

    /// True when every word resolved and the checksum word matched.
    pub fn is_clean(&self) -> bool {
        self.checksum.is_valid() && self.unknown_words.is_empty()
    }
}

/// Encoder/decoder bound to one vocabulary.
///
/// Cloning is cheap; clones share the vocabulary.
#[derive(Debug, Clone)]
pub struct Codec {
    vocabulary: Arc<Vocabulary>,
}

impl Codec {
    /// Create a codec over `vocabulary`.
    pub fn new(vocabulary: impl Into<Arc<Vocabulary>>) -> Self {
        Self {
            vocabulary: vocabulary.into(),
        }
    }

    /// The vocabulary in use.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Encode address text into a space-separated nine-word phrase.
    ///
    /// # Errors
    /// Returns `Error::Address` if the text is not a valid address.
    pub fn encode(&self, address: &str) -> Result<String> {
        let fields = address::parse(address)?;
        Ok(self.encode_fields(&fields).to_string())
    }

    /// Encode a std address.
    pub fn encode_ip(&self, ip: Ipv6Addr) -> Phrase {
        self.encode_fields(&AddressFields::from(ip))
    }

    /// Encode already-parsed groups.
    pub fn encode_fields(&self, fields: &AddressFields) -> Phrase {
        let mut words: Vec<String> = fields
            .iter()
            .map(|group| self.vocabulary.word_at(group as usize).to_string())
            .collect();
        words.push(self.checksum_word(fields).to_string());

        Phrase { words }
    }

    /// The checksum word for `fields`.
    pub fn checksum_word(&self, fields: &AddressFields) -> &str {
        self.vocabulary.word_at(checksum(fields) as usize)
    }

    /// Decode a phrase of at least eight words.
    ///
    /// Words are split on whitespace and matched case-insensitively. Words
    /// past the ninth are ignored.
    ///
    /// # Errors
    /// Returns `PhraseError::TooFewWords` for fewer than eight words. Unknown
    /// words and checksum mismatches are reported in the result instead.
    pub fn decode(&self, phrase: &str) -> Result<DecodeResult> {
        let tokens: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();

        if tokens.len() < GROUPS {
            return Err(PhraseError::TooFewWords {
                required: GROUPS,
                actual: tokens.len(),
            }
            .into());
        }

        let mut groups = [0u16; GROUPS];
        let mut unknown_words = Vec::new();

        for (position, (group, token)) in groups.iter_mut().zip(&tokens).enumerate() {
            match self.resolve(token) {
                Some(value) => *group = value,
                None => {
                    debug!(position, word = %token, "unknown word, substituting 0");
                    unknown_words.push(UnknownWord {
                        position,
                        word: token.clone(),
                    });
                }
            }
        }

        let fields = AddressFields::new(groups);

        let checksum = match tokens.get(GROUPS) {
            None => ChecksumStatus::Unchecked,
            Some(found) => {
                if self.resolve(found).is_none() {
                    unknown_words.push(UnknownWord {
                        position: GROUPS,
                        word: found.clone(),
                    });
                }

                let expected = self.checksum_word(&fields);
                if found == expected {
                    ChecksumStatus::Valid
                } else {
                    debug!(
                        %expected,
                        %found,
                        "checksum mismatch, phrase may contain transcription errors"
                    );
                    ChecksumStatus::Invalid {
                        expected: expected.to_string(),
                        found: found.clone(),
                    }
                }
            }
        };

        if tokens.len() > PHRASE_WORDS {
            trace!(ignored = tokens.len() - PHRASE_WORDS, "ignoring words after the checksum");
        }

        Ok(DecodeResult {
            fields,
            address: address::render(&fields),
            checksum,
            unknown_words,
        })
    }

    /// Group value for a word. Positions past 65535 (oversized lists) can
    /// never be produced by `encode`, so they count as unknown.
    fn resolve(&self, token: &str) -> Option<u16> {
        self.vocabulary
            .index_of(token)
            .and_then(|index| u16::try_from(index).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardinalityPolicy;
    use crate::error::Error;
    use crate::vocabulary::CANONICAL_SIZE;

    fn codec() -> Codec {
        let words = (0..CANONICAL_SIZE).map(|i| format!("word{i}"));
        Codec::new(Vocabulary::from_words(words, CardinalityPolicy::Reject).unwrap())
    }

    #[test]
    fn test_encode_shape() {
        let phrase = codec().encode("2001:db8::1").unwrap();
        let words: Vec<&str> = phrase.split(' ').collect();

        assert_eq!(words.len(), PHRASE_WORDS);
        assert_eq!(
            &words[..GROUPS],
            &["word8193", "word3512", "word0", "word0", "word0", "word0", "word0", "word1"]
        );
        assert_eq!(words[GROUPS], "word45144");
    }

    #[test]
    fn test_encode_fields_phrase() {
        let phrase = codec().encode_fields(&AddressFields::new([0xffff; 8]));

        assert_eq!(phrase.words().len(), PHRASE_WORDS);
        assert!(phrase.address_words().iter().all(|w| w == "word65535"));
        assert_eq!(phrase.checksum_word(), "word50714");
    }

    #[test]
    fn test_encode_ip_matches_text() {
        let codec = codec();
        let ip: Ipv6Addr = "fe80::1:2".parse().unwrap();
        assert_eq!(codec.encode_ip(ip).to_string(), codec.encode("fe80::1:2").unwrap());
    }

    #[test]
    fn test_encode_invalid_address() {
        let result = codec().encode("not-an-address");
        assert!(matches!(result, Err(Error::Address(_))));
    }

    #[test]
    fn test_decode_valid() {
        let codec = codec();
        let phrase = codec.encode("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap();
        let decoded = codec.decode(&phrase).unwrap();

        assert_eq!(decoded.address, "2001:db8::1");
        assert_eq!(decoded.fields.groups(), [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        assert_eq!(decoded.checksum, ChecksumStatus::Valid);
        assert!(decoded.unknown_words.is_empty());
        assert!(decoded.is_clean());
        assert_eq!(decoded.ip(), "2001:db8::1".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_decode_unchecked() {
        let decoded = codec()
            .decode("word0 word0 word0 word0 word0 word0 word0 word1")
            .unwrap();

        assert_eq!(decoded.address, "::1");
        assert_eq!(decoded.checksum, ChecksumStatus::Unchecked);
        assert_eq!(decoded.checksum.as_str(), "unchecked");
        assert!(!decoded.is_clean());
    }

    #[test]
    fn test_decode_invalid_checksum() {
        let decoded = codec()
            .decode("word0 word0 word0 word0 word0 word0 word0 word1 word12345")
            .unwrap();

        assert_eq!(decoded.address, "::1");
        assert_eq!(
            decoded.checksum,
            ChecksumStatus::Invalid {
                expected: "word31683".to_string(),
                found: "word12345".to_string(),
            }
        );
        assert_eq!(decoded.checksum.to_string(), "invalid");
        assert!(decoded.unknown_words.is_empty());
    }

    #[test]
    fn test_decode_unknown_word() {
        let decoded = codec()
            .decode("word8193 word3512 word34211 gibberish word0 word35374 word880 word29492")
            .unwrap();

        assert_eq!(decoded.fields.groups()[3], 0);
        assert_eq!(
            decoded.unknown_words,
            vec![UnknownWord {
                position: 3,
                word: "gibberish".to_string()
            }]
        );
        assert_eq!(decoded.address, "2001:db8:85a3::8a2e:370:7334");
    }

    #[test]
    fn test_decode_unknown_checksum_word() {
        let decoded = codec()
            .decode("word0 word0 word0 word0 word0 word0 word0 word1 nonsense")
            .unwrap();

        assert!(matches!(decoded.checksum, ChecksumStatus::Invalid { .. }));
        assert_eq!(
            decoded.unknown_words,
            vec![UnknownWord {
                position: 8,
                word: "nonsense".to_string()
            }]
        );
    }

    #[test]
    fn test_decode_too_few_words() {
        let result = codec().decode("word0 word0 word0 word0 word0 word0 word0");
        assert!(matches!(
            result,
            Err(Error::Phrase(PhraseError::TooFewWords {
                required: 8,
                actual: 7
            }))
        ));
        assert!(codec().decode("   ").is_err());
    }

    #[test]
    fn test_decode_case_and_spacing() {
        let codec = codec();
        let phrase = codec.encode("::1").unwrap().to_uppercase().replace(' ', "\t \n");
        let decoded = codec.decode(&phrase).unwrap();

        assert_eq!(decoded.address, "::1");
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_decode_ignores_extra_words() {
        let codec = codec();
        let phrase = format!("{} word7 word8", codec.encode("::1").unwrap());
        let decoded = codec.decode(&phrase).unwrap();

        assert_eq!(decoded.address, "::1");
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_short_vocabulary_wraps() {
        let vocabulary = Vocabulary::from_words(["a", "b", "c"], CardinalityPolicy::Warn).unwrap();
        let codec = Codec::new(vocabulary);

        // 31683 % 3 == 0
        assert_eq!(codec.encode("::1").unwrap(), "a a a a a a a b a");
        assert_eq!(codec.encode("::4").unwrap().split(' ').nth(7), Some("b"));

        let decoded = codec.decode("a a a a a a a b a").unwrap();
        assert_eq!(decoded.address, "::1");
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_oversized_vocabulary_tail_is_unknown() {
        let words = (0..CANONICAL_SIZE + 1).map(|i| format!("word{i}"));
        let codec = Codec::new(Vocabulary::from_words(words, CardinalityPolicy::Warn).unwrap());

        let decoded = codec
            .decode("word65536 word0 word0 word0 word0 word0 word0 word0")
            .unwrap();
        assert_eq!(decoded.unknown_words.len(), 1);
        assert_eq!(decoded.unknown_words[0].position, 0);
        assert_eq!(decoded.fields.groups()[0], 0);
    }

    #[test]
    fn test_oversized_vocabulary_tail_checksum_word_is_unknown() {
        let words = (0..CANONICAL_SIZE + 1).map(|i| format!("word{i}"));
        let codec = Codec::new(Vocabulary::from_words(words, CardinalityPolicy::Warn).unwrap());

        let decoded = codec
            .decode("word65536 word0 word0 word0 word0 word0 word0 word0 word65536")
            .unwrap();
        let positions: Vec<usize> = decoded.unknown_words.iter().map(|u| u.position).collect();
        assert_eq!(positions, vec![0, 8]);
        assert!(matches!(decoded.checksum, ChecksumStatus::Invalid { .. }));
    }

    #[test]
    fn test_clones_share_vocabulary() {
        let codec = codec();
        let clone = codec.clone();
        assert!(std::ptr::eq(codec.vocabulary(), clone.vocabulary()));
    }
}
