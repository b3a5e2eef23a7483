//! VELUM Key Derivation
//!
//! Turns record text into the fixed-width key the ledger is addressed by,
//! in two stages:
//!
//! 1. *Obfuscate*: a fixed-shift alphabetic substitution. The stored payload
//!    differs from the raw input while staying a total, invertible transform.
//!    This is a placeholder confidentiality step, not a security primitive.
//! 2. *Hash*: SHA-256 of the obfuscated text, interpreted as a 256-bit
//!    big-endian integer ([`IndexKey`]).
//!
//! Both stages are pure, so the same text and shift always derive the same
//! key. A lookup must therefore use the exact shift its record was ingested
//! with, or it will never match.

pub mod key;
pub mod shift;

pub use key::{IndexKey, KeyError, KEY_WIDTH};
pub use shift::{deobfuscate, obfuscate};

/// Substitution shift used by the reference deployment.
pub const DEFAULT_SHIFT: u8 = 3;

/// Derive the index key for raw record text: obfuscate, then hash.
pub fn derive_key(raw: &str, shift: u8) -> Result<IndexKey, KeyError> {
    IndexKey::from_text_digest(&obfuscate(raw, shift))
}
