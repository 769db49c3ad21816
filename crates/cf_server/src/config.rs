//! Process-wide configuration, read once at startup.
//!
//! Secrets come from the environment:
//! - `CARDFILE_MASTER_KEY`        — 64 hex chars, the field-encryption key, or
//! - `CARDFILE_MASTER_PASSPHRASE` + `CARDFILE_KEY_SALT` (32 hex chars) —
//!   Argon2id derivation of the same key.
//! - `CARDFILE_TOKEN_SECRET`      — hex, HMAC secret shared with the
//!   identity provider.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use cf_crypto::{kdf, MasterKey};

pub const ENV_MASTER_KEY: &str = "CARDFILE_MASTER_KEY";
pub const ENV_MASTER_PASSPHRASE: &str = "CARDFILE_MASTER_PASSPHRASE";
pub const ENV_KEY_SALT: &str = "CARDFILE_KEY_SALT";
pub const ENV_TOKEN_SECRET: &str = "CARDFILE_TOKEN_SECRET";

/// Load the field-encryption master key.  Direct hex key wins; otherwise
/// derive from passphrase + salt.
pub fn master_key_from_env() -> Result<MasterKey> {
    if let Ok(hex_key) = env::var(ENV_MASTER_KEY) {
        return MasterKey::from_hex(&hex_key)
            .map_err(|e| anyhow!("{ENV_MASTER_KEY}: {e}"));
    }

    let passphrase = env::var(ENV_MASTER_PASSPHRASE).map_err(|_| {
        anyhow!("set {ENV_MASTER_KEY}, or {ENV_MASTER_PASSPHRASE} with {ENV_KEY_SALT}")
    })?;
    let salt_hex = env::var(ENV_KEY_SALT)
        .map_err(|_| anyhow!("{ENV_KEY_SALT} is required with {ENV_MASTER_PASSPHRASE}"))?;
    let salt_bytes = hex::decode(salt_hex.trim()).context(ENV_KEY_SALT)?;
    let salt: [u8; 16] = salt_bytes
        .try_into()
        .map_err(|_| anyhow!("{ENV_KEY_SALT} must be 16 bytes (32 hex chars)"))?;

    kdf::master_key_from_passphrase(passphrase.as_bytes(), &salt)
        .map_err(|e| anyhow!("key derivation: {e}"))
}

/// Load the bearer-token HMAC secret.
pub fn token_secret_from_env() -> Result<Vec<u8>> {
    let hex_secret =
        env::var(ENV_TOKEN_SECRET).map_err(|_| anyhow!("{ENV_TOKEN_SECRET} is required"))?;
    let secret = hex::decode(hex_secret.trim()).context(ENV_TOKEN_SECRET)?;
    if secret.is_empty() {
        return Err(anyhow!("{ENV_TOKEN_SECRET} must not be empty"));
    }
    Ok(secret)
}

/// Database location: explicit flag, else the OS data directory.
pub fn resolve_db_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    let dirs = directories::ProjectDirs::from("", "", "cardfile")
        .ok_or_else(|| anyhow!("no usable data directory; pass --db"))?;
    Ok(dirs.data_dir().join("contacts.db"))
}
