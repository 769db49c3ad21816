//! Field codec: the string-level encrypt/decrypt boundary for persisted
//! contact fields.
//!
//! One plaintext string in, one base64url ciphertext string out, and back.
//! Every call draws a fresh nonce, so equal plaintexts produce unequal
//! ciphertexts and nothing about stored values can be compared at rest.
//!
//! Decryption of anything that is not an intact ciphertext produced under
//! the same key — malformed base64, truncated wire bytes, a flipped bit,
//! a different key — fails with an error. Corrupted plaintext is never
//! returned silently.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::{aead, error::CryptoError, kdf::MasterKey};

/// Domain-separation AAD for persisted contact fields. Versioned so a
/// future format change can coexist with old rows.
const FIELD_AAD: &[u8] = b"cf-field-v1";

/// Stateless field codec. Cheap to clone; safe to share across requests.
#[derive(Clone)]
pub struct FieldCipher {
    key: MasterKey,
}

impl FieldCipher {
    pub fn new(key: MasterKey) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext field value for storage.
    pub fn encrypt_field(&self, plaintext: &str) -> Result<String, CryptoError> {
        let wire = aead::encrypt(&self.key.0, plaintext.as_bytes(), FIELD_AAD)?;
        Ok(URL_SAFE_NO_PAD.encode(wire))
    }

    /// Decrypt a stored field value back to plaintext.
    pub fn decrypt_field(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let wire = URL_SAFE_NO_PAD.decode(ciphertext)?;
        let plaintext = aead::decrypt(&self.key.0, &wire, FIELD_AAD)?;
        String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::Utf8)
    }
}
