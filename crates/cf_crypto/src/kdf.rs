//! Key derivation
//!
//! `master_key_from_passphrase` — Argon2id, derives the 32-byte key that
//! encrypts every persisted contact field. The key is process-wide
//! configuration: derived (or parsed) once at startup and shared by all
//! requests for the process lifetime.

use argon2::{Argon2, Params, Version};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// 32-byte master key for field encryption. Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct MasterKey(pub [u8; 32]);

impl MasterKey {
    /// Parse a key supplied directly as 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("hex decode: {e}")))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("master key must be 32 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl Clone for MasterKey {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

/// Argon2id parameters — tuned for interactive use.
fn argon2_params() -> Params {
    Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 iterations
        1,         // p_cost: 1 thread
        Some(32),  // output len
    )
    .expect("Static Argon2 params are always valid")
}

/// Derive a master key from a passphrase + 16-byte salt.
/// The salt is configuration alongside the passphrase (not secret).
pub fn master_key_from_passphrase(
    passphrase: &[u8],
    salt: &[u8; 16],
) -> Result<MasterKey, CryptoError> {
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params());
    let mut output = [0u8; 32];
    argon2
        .hash_password_into(passphrase, salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(MasterKey(output))
}

/// Generate a fresh random 16-byte salt (call once when provisioning a deployment).
pub fn generate_salt() -> [u8; 16] {
    use rand::RngCore;
    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let salt = [3u8; 16];
        let a = master_key_from_passphrase(b"correct horse", &salt).unwrap();
        let b = master_key_from_passphrase(b"correct horse", &salt).unwrap();
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn salt_changes_key() {
        let a = master_key_from_passphrase(b"pw", &[1u8; 16]).unwrap();
        let b = master_key_from_passphrase(b"pw", &[2u8; 16]).unwrap();
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn hex_key_round_trip() {
        let hex_key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
        let key = MasterKey::from_hex(hex_key).unwrap();
        assert_eq!(hex::encode(key.0), hex_key);
    }

    #[test]
    fn short_hex_key_rejected() {
        assert!(MasterKey::from_hex("deadbeef").is_err());
    }
}
