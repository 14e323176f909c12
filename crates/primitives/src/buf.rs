use std::{fmt, str::FromStr};

use arbitrary::Arbitrary;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ParseError;

/// A 32-byte buffer, used for batch commitments and state root hashes.
///
/// Renders as a `0x`-prefixed lowercase hex string, which is also its wire
/// representation.
#[derive(Copy, Clone, Eq, Default, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub struct Buf32([u8; 32]);

impl Buf32 {
    pub const fn new(data: [u8; 32]) -> Self {
        Self(data)
    }

    /// Returns the all-zeroes buffer.
    pub const fn zero() -> Self {
        Self([0; 32])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Parses a `0x`-prefixed hex string of exactly 64 digits.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let digits = s.strip_prefix("0x").ok_or(ParseError::MissingHexPrefix)?;
        if digits.len() != 64 {
            return Err(ParseError::InvalidLength {
                expected: 64,
                actual: digits.len(),
            });
        }
        let mut buf = [0u8; 32];
        hex::decode_to_slice(digits, &mut buf)?;
        Ok(Self(buf))
    }
}

impl From<[u8; 32]> for Buf32 {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8; 32]> for Buf32 {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Buf32 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buf32({self})")
    }
}

impl Serialize for Buf32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Buf32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
