//! Fixed-width index keys.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Key width in bytes (256 bits).
pub const KEY_WIDTH: usize = 32;

/// Errors from index key construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The derived value does not fit the 256-bit key width.
    #[error("value of {0} bytes does not fit the {KEY_WIDTH}-byte key width")]
    OutOfRange(usize),

    /// Malformed hex encoding of a key.
    #[error("invalid key encoding: {0}")]
    Encoding(String),
}

/// A 256-bit record key, derived deterministically from content.
///
/// Keys are the primary address of records and signatures on the ledger.
/// The byte order is big-endian: the key read as an unsigned integer equals
/// the digest it was derived from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexKey([u8; KEY_WIDTH]);

impl IndexKey {
    /// Build a key from a digest, big-endian.
    ///
    /// Digests shorter than the key width are left-padded with zeros.
    /// Digests wider than 256 bits cannot be represented and are rejected.
    /// With SHA-256 in the derivation path this is unreachable, but the
    /// check guards any future substitution of a different digest.
    pub fn from_digest(digest: &[u8]) -> Result<Self, KeyError> {
        if digest.len() > KEY_WIDTH {
            return Err(KeyError::OutOfRange(digest.len()));
        }
        let mut bytes = [0u8; KEY_WIDTH];
        bytes[KEY_WIDTH - digest.len()..].copy_from_slice(digest);
        Ok(Self(bytes))
    }

    /// Build a key from the SHA-256 digest of `text`.
    pub fn from_text_digest(text: &str) -> Result<Self, KeyError> {
        Self::from_digest(&Sha256::digest(text.as_bytes()))
    }

    /// Raw key bytes, big-endian.
    pub fn as_bytes(&self) -> &[u8; KEY_WIDTH] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a `0x`-prefixed or bare hex encoding of a full-width key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| KeyError::Encoding(e.to_string()))?;
        if bytes.len() != KEY_WIDTH {
            return Err(KeyError::Encoding(format!(
                "expected {} hex bytes, got {}",
                KEY_WIDTH,
                bytes.len()
            )));
        }
        let mut out = [0u8; KEY_WIDTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexKey({})", self.to_hex())
    }
}

impl Serialize for IndexKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IndexKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}
