//! Ledger account identities.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Width of a ledger account address in bytes.
pub const ACCOUNT_WIDTH: usize = 20;

/// Error parsing a signer address from hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid signer address {input:?}: {reason}")]
pub struct ParseSignerIdError {
    pub input: String,
    pub reason: String,
}

/// A ledger account authorized to sign attestations (20-byte address).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignerId([u8; ACCOUNT_WIDTH]);

impl SignerId {
    pub fn new(bytes: [u8; ACCOUNT_WIDTH]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_WIDTH] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Deterministic development account for local runs and tests.
    ///
    /// The address is the truncated digest of a fixed label, so every
    /// process derives the same account list without key material.
    pub fn dev(index: usize) -> Self {
        let digest = Sha256::digest(format!("velum dev signer {index}").as_bytes());
        let mut bytes = [0u8; ACCOUNT_WIDTH];
        bytes.copy_from_slice(&digest[..ACCOUNT_WIDTH]);
        Self(bytes)
    }
}

impl FromStr for SignerId {
    type Err = ParseSignerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_part).map_err(|e| ParseSignerIdError {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        if bytes.len() != ACCOUNT_WIDTH {
            return Err(ParseSignerIdError {
                input: s.to_string(),
                reason: format!("expected {ACCOUNT_WIDTH} bytes, got {}", bytes.len()),
            });
        }
        let mut out = [0u8; ACCOUNT_WIDTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerId({})", self.to_hex())
    }
}

impl Serialize for SignerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_accounts_are_stable_and_distinct() {
        assert_eq!(SignerId::dev(0), SignerId::dev(0));
        assert_ne!(SignerId::dev(0), SignerId::dev(1));
    }

    #[test]
    fn hex_roundtrip() {
        let signer = SignerId::dev(3);
        let parsed: SignerId = signer.to_hex().parse().unwrap();
        assert_eq!(parsed, signer);
    }

    #[test]
    fn rejects_wrong_width() {
        let err = "0x1234".parse::<SignerId>().unwrap_err();
        assert!(err.reason.contains("expected 20 bytes"));
    }
}
