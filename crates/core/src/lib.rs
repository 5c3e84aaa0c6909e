//! ipv6-poetry-core: IPv6 addresses as memorable phrases
//!
//! This library converts an IPv6 address into nine words and back:
//! - Each of the eight 16-bit groups selects one word from a 65,536-word list
//! - A ninth word, chosen by a CRC-32 of the address, catches copying mistakes
//! - Decoding recovers the address even from a partly garbled phrase
//!
//! # Architecture
//!
//! - `address`: address text <-> eight 16-bit groups
//! - `checksum`: the checksum word index
//! - `vocabulary`: the shared wordlist
//! - `codec`: encode/decode built from the above
//! - `config`: where the wordlist comes from and how strictly it is checked
//!
//! # Design Principles
//!
//! - **No global state**: a `Codec` owns an explicitly loaded `Vocabulary`
//! - **Deterministic**: the same address and wordlist always give the same phrase
//! - **Forgiving decode**: bad words and bad checksums are reported, not raised
//! - **Not security**: the checksum detects typos, it does not authenticate
//!
//! # Example
//! ```no_run
//! use ipv6_poetry_core::Config;
//!
//! # fn main() -> ipv6_poetry_core::Result<()> {
//! let codec = Config::from_env().codec()?;
//! let phrase = codec.encode("2001:db8:85a3::8a2e:370:7334")?;
//! let decoded = codec.decode(&phrase)?;
//! assert_eq!(decoded.address, "2001:db8:85a3::8a2e:370:7334");
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod checksum;
pub mod codec;
pub mod config;
pub mod error;
pub mod vocabulary;

// Re-export commonly used types
pub use address::AddressFields;
pub use codec::{ChecksumStatus, Codec, DecodeResult, Phrase, UnknownWord};
pub use config::{CardinalityPolicy, Config};
pub use error::{Error, Result};
pub use vocabulary::Vocabulary;
