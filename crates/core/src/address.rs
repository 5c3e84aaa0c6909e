//! IPv6 address text <-> eight 16-bit fields.
//!
//! Parsing accepts the usual shorthand: leading zeros may be dropped inside a
//! group, one `::` may stand for a run of zero groups, and the last 32 bits
//! may be written as a dotted quad (`::ffff:192.0.2.1`).
//!
//! Rendering produces the RFC 5952 canonical form:
//! - lowercase hex, no leading zeros
//! - the longest run of two or more zero groups becomes `::`
//! - on a tie the leftmost run wins
//!
//! # Example
//! ```
//! use ipv6_poetry_core::address::AddressFields;
//!
//! let fields: AddressFields = "2001:0DB8:0:0:0:0:0:1".parse().unwrap();
//! assert_eq!(fields.groups(), [0x2001, 0x0db8, 0, 0, 0, 0, 0, 1]);
//! assert_eq!(fields.to_string(), "2001:db8::1");
//! ```

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::AddressError;

/// Number of 16-bit groups in an address.
pub const GROUPS: usize = 8;

/// Eight 16-bit groups of a 128-bit address, in network order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AddressFields([u16; GROUPS]);

impl AddressFields {
    /// Wrap eight groups.
    pub const fn new(groups: [u16; GROUPS]) -> Self {
        Self(groups)
    }

    /// The eight groups by value.
    pub const fn groups(&self) -> [u16; GROUPS] {
        self.0
    }

    /// Iterate over the groups in order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Big-endian byte form: two bytes per group, group order preserved.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        for (chunk, group) in bytes.chunks_exact_mut(2).zip(self.0) {
            chunk.copy_from_slice(&group.to_be_bytes());
        }
        bytes
    }

    /// Inverse of [`AddressFields::to_bytes`].
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut groups = [0u16; GROUPS];
        for (group, chunk) in groups.iter_mut().zip(bytes.chunks_exact(2)) {
            *group = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        Self(groups)
    }

    /// Parse address text. See [`parse`].
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        parse(text)
    }

    /// Canonical text form. See [`render`].
    pub fn render(&self) -> String {
        render(self)
    }
}

impl From<[u16; GROUPS]> for AddressFields {
    fn from(groups: [u16; GROUPS]) -> Self {
        Self(groups)
    }
}

impl From<AddressFields> for [u16; GROUPS] {
    fn from(fields: AddressFields) -> Self {
        fields.0
    }
}

impl From<Ipv6Addr> for AddressFields {
    fn from(ip: Ipv6Addr) -> Self {
        Self(ip.segments())
    }
}

impl From<AddressFields> for Ipv6Addr {
    fn from(fields: AddressFields) -> Self {
        Ipv6Addr::from(fields.0)
    }
}

impl From<u128> for AddressFields {
    fn from(value: u128) -> Self {
        Self::from_bytes(value.to_be_bytes())
    }
}

impl From<AddressFields> for u128 {
    fn from(fields: AddressFields) -> Self {
        u128::from_be_bytes(fields.to_bytes())
    }
}

impl FromStr for AddressFields {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for AddressFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Parse address text into eight groups.
///
/// Surrounding whitespace is ignored and hex digits may be either case.
///
/// # Errors
/// - `MissingSeparator` if there is no `:` at all
/// - `MultipleElisions` if `::` appears more than once
/// - `GroupCount` if there is no `::` and the group count is not 8
/// - `ElisionOverflow` if `::` appears with 8 or more explicit groups
/// - `EmptyGroup`, `InvalidGroup`, `GroupTooLong`, `InvalidIpv4Tail` for a
///   bad individual group
pub fn parse(text: &str) -> Result<AddressFields, AddressError> {
    let input = text.trim();

    if !input.contains(':') {
        return Err(AddressError::MissingSeparator {
            input: input.to_string(),
        });
    }

    let mut halves = input.split("::");
    let head = halves.next().unwrap_or_default();
    let tail = halves.next();
    if halves.next().is_some() {
        return Err(AddressError::MultipleElisions {
            input: input.to_string(),
        });
    }

    let mut groups = [0u16; GROUPS];

    match tail {
        Some(tail) => {
            let head_groups = parse_groups(head, input, 0, false)?;
            let tail_groups = parse_groups(tail, input, count_groups(head), true)?;

            // `::` has to stand for at least one zero group
            let explicit = head_groups.len() + tail_groups.len();
            if explicit >= GROUPS {
                return Err(AddressError::ElisionOverflow {
                    input: input.to_string(),
                    explicit,
                });
            }

            groups[..head_groups.len()].copy_from_slice(&head_groups);
            groups[GROUPS - tail_groups.len()..].copy_from_slice(&tail_groups);
        }
        None => {
            let all = parse_groups(input, input, 0, true)?;
            if all.len() != GROUPS {
                return Err(AddressError::GroupCount {
                    input: input.to_string(),
                    count: all.len(),
                });
            }
            groups.copy_from_slice(&all);
        }
    }

    Ok(AddressFields(groups))
}

/// Render eight groups in canonical compressed form.
pub fn render(fields: &AddressFields) -> String {
    let groups = &fields.0;

    match longest_zero_run(groups) {
        Some((start, len)) => format!(
            "{}::{}",
            join_hex(&groups[..start]),
            join_hex(&groups[start + len..])
        ),
        None => join_hex(groups),
    }
}

/// Number of textual groups in one side of an elision.
fn count_groups(side: &str) -> usize {
    if side.is_empty() {
        0
    } else {
        side.split(':').count()
    }
}

/// Parse the colon-separated groups on one side of an elision.
///
/// `offset` is the textual position of the first group, used in errors.
/// A dotted-quad is allowed only as the final group of the whole address,
/// which is what `ends_address` marks.
fn parse_groups(
    side: &str,
    input: &str,
    offset: usize,
    ends_address: bool,
) -> Result<Vec<u16>, AddressError> {
    if side.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = side.split(':').collect();
    let last = parts.len() - 1;
    let mut groups = Vec::with_capacity(parts.len() + 1);

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(AddressError::EmptyGroup {
                input: input.to_string(),
                position: offset + i,
            });
        }

        if part.contains('.') {
            if !(ends_address && i == last) {
                return Err(invalid_tail(input, part));
            }
            let v4: Ipv4Addr = part.parse().map_err(|_| invalid_tail(input, part))?;
            let [a, b, c, d] = v4.octets();
            groups.push(u16::from_be_bytes([a, b]));
            groups.push(u16::from_be_bytes([c, d]));
            continue;
        }

        groups.push(parse_hex_group(part, input)?);
    }

    Ok(groups)
}

/// Parse one group of 1-4 hex digits.
fn parse_hex_group(group: &str, input: &str) -> Result<u16, AddressError> {
    // from_str_radix tolerates a leading '+', so check digits explicitly
    if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidGroup {
            input: input.to_string(),
            group: group.to_string(),
        });
    }
    if group.len() > 4 {
        return Err(AddressError::GroupTooLong {
            input: input.to_string(),
            group: group.to_string(),
        });
    }

    u16::from_str_radix(group, 16).map_err(|_| AddressError::InvalidGroup {
        input: input.to_string(),
        group: group.to_string(),
    })
}

fn invalid_tail(input: &str, tail: &str) -> AddressError {
    AddressError::InvalidIpv4Tail {
        input: input.to_string(),
        tail: tail.to_string(),
    }
}

/// Find the longest run of zero groups of length >= 2, leftmost on ties.
///
/// Returns `(start, len)`.
fn longest_zero_run(groups: &[u16; GROUPS]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < GROUPS {
        if groups[i] != 0 {
            i += 1;
            continue;
        }

        let start = i;
        while i < GROUPS && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;

        // Strictly longer only, so the earlier run keeps a tie
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    best
}

fn join_hex(groups: &[u16]) -> String {
    groups
        .iter()
        .map(|g| format!("{:x}", g))
        .collect::<Vec<_>>()
        .join(":")
}
