//! API key generation and validation for service accounts
//!
//! Keys carry 256 bits of OS-sourced entropy and are stored only as SHA-256
//! digests. Hashing is deliberately deterministic and unsalted: the digest
//! doubles as the storage lookup key, unlike password hashing.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Raw entropy per key in bytes (256 bits)
const KEY_ENTROPY_BYTES: usize = 32;

/// API key generator and verifier
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Generate a new API key: 32 random bytes, URL-safe base64 without
    /// padding (43 chars). The plaintext is returned exactly once and never
    /// stored or logged by this component.
    pub fn generate() -> String {
        let mut bytes = [0u8; KEY_ENTROPY_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Hash an API key for storage using SHA-256 (hex-encoded)
    pub fn hash(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Verify a presented key against its stored hash.
    ///
    /// The comparison runs in constant time over the full digest so timing
    /// cannot leak how many leading bytes matched.
    pub fn verify(key: &str, stored_hash: &str) -> bool {
        let computed = Self::hash(key);
        computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
    }
}
