//! Symmetric encryption for sensitive configuration values
//!
//! AES-256-GCM with a fresh random nonce per call. The encrypted string is
//! `base64(nonce || ciphertext+tag)`, so a value is self-contained and only
//! ever meaningful under the exact key that produced it.

use crate::{
    config::{SecurityConfig, ENCRYPTION_KEY_SIZE},
    error::SecurityError,
    Result,
};
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use secrecy::ExposeSecret;

/// Size of the nonce in bytes (96 bits, standard for GCM)
const NONCE_SIZE: usize = 12;

/// Cipher service owning the symmetric key for the process lifetime
pub struct CipherManager {
    cipher: Aes256Gcm,
}

impl CipherManager {
    /// Create cipher from config. The configured key must be base64 of
    /// exactly 32 bytes (256 bits).
    pub fn from_config(config: &SecurityConfig) -> Result<Self> {
        let key_bytes = BASE64
            .decode(config.encryption_key.expose_secret())
            .map_err(|_| SecurityError::config("encryption key is not valid base64"))?;

        if key_bytes.len() != ENCRYPTION_KEY_SIZE {
            return Err(SecurityError::config(format!(
                "encryption key must be {} bytes, got {}",
                ENCRYPTION_KEY_SIZE,
                key_bytes.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| SecurityError::internal(format!("Failed to create cipher: {}", e)))?;

        Ok(Self { cipher })
    }

    /// Encrypt a string value.
    ///
    /// Repeated calls with the same plaintext produce different outputs:
    /// the nonce is drawn fresh from the OS random source each time and
    /// never reused.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self.cipher.encrypt(&nonce, plaintext.as_bytes()).map_err(|e| {
            tracing::error!("Encryption failed: {:?}", e);
            SecurityError::internal(format!("Encryption failed: {}", e))
        })?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(combined))
    }

    /// Decrypt a previously encrypted value.
    ///
    /// Any malformed, truncated, tampered, or wrong-key input fails with
    /// `DecryptionFailed`; partial plaintext is never returned.
    pub fn decrypt(&self, value: &str) -> Result<String> {
        let combined = BASE64.decode(value).map_err(|_| {
            tracing::debug!("Decryption failed: value is not valid base64");
            SecurityError::DecryptionFailed
        })?;

        if combined.len() <= NONCE_SIZE {
            tracing::debug!("Decryption failed: value too short");
            return Err(SecurityError::DecryptionFailed);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            // GCM authentication failure: wrong key or corrupted data
            tracing::debug!("Decryption failed: authentication error");
            SecurityError::DecryptionFailed
        })?;

        String::from_utf8(plaintext).map_err(|_| SecurityError::DecryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> CipherManager {
        let config = SecurityConfig::new("test_secret_key_32_characters_long!", None);
        CipherManager::from_config(&config).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = test_cipher();
        let plaintext = "postgresql://user:hunter2@db:5432/app";

        let encrypted = cipher.encrypt(plaintext).unwrap();
        assert_ne!(encrypted, plaintext);

        let decrypted = cipher.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encrypt_is_nondeterministic() {
        let cipher = test_cipher();

        let first = cipher.encrypt("same-value").unwrap();
        let second = cipher.encrypt("same-value").unwrap();

        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first).unwrap(), "same-value");
        assert_eq!(cipher.decrypt(&second).unwrap(), "same-value");
    }

    #[test]
    fn test_decrypt_garbage_fails() {
        let cipher = test_cipher();

        assert!(matches!(
            cipher.decrypt("not-a-real-ciphertext"),
            Err(SecurityError::DecryptionFailed)
        ));

        // Valid base64, but no nonce/ciphertext structure
        assert!(matches!(
            cipher.decrypt(&BASE64.encode(b"short")),
            Err(SecurityError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_decrypt_with_wrong_key_fails() {
        let cipher1 = test_cipher();
        let cipher2 = test_cipher(); // fresh generated key

        let encrypted = cipher1.encrypt("secret").unwrap();
        assert!(matches!(cipher2.decrypt(&encrypted), Err(SecurityError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let cipher = test_cipher();

        let encrypted = cipher.encrypt("secret").unwrap();
        let mut bytes = BASE64.decode(&encrypted).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = BASE64.encode(bytes);

        assert!(matches!(cipher.decrypt(&tampered), Err(SecurityError::DecryptionFailed)));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let config = SecurityConfig::new(
            "test_secret_key_32_characters_long!",
            Some(BASE64.encode([0u8; 16])),
        );
        assert!(CipherManager::from_config(&config).is_err());

        let config =
            SecurityConfig::new("test_secret_key_32_characters_long!", Some("%%%".to_string()));
        assert!(CipherManager::from_config(&config).is_err());
    }
}
