//! Checksum word derivation.
//!
//! The ninth word of a phrase is `vocabulary[checksum(fields)]`. The checksum
//! is the low half of a standard CRC-32 computed over the address in network
//! byte order:
//!
//! ```text
//! +-------------------------------+
//! | field[0] (2) ... field[7] (2) |  u16 big-endian, 16 bytes total
//! +-------------------------------+
//!             |
//!          CRC-32 (reflected 0xEDB88320, init/xorout 0xFFFFFFFF)
//!             |
//!         low 16 bits -> vocabulary index
//! ```
//!
//! This only catches transcription slips. Anyone can recompute it, so it says
//! nothing about whether a phrase was tampered with.

use crate::address::AddressFields;

/// Compute the full 32-bit CRC over the big-endian address bytes.
pub fn crc32(fields: &AddressFields) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&fields.to_bytes());
    hasher.finalize()
}

/// Compute the 16-bit checksum index for an address.
pub fn checksum(fields: &AddressFields) -> u16 {
    (crc32(fields) & 0xFFFF) as u16
}
