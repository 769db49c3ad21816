//! cf_crypto — Cardfile cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Errors are opaque: no plaintext or key material in error values.
//!
//! # Module layout
//! - `aead`  — XChaCha20-Poly1305 encrypt/decrypt helpers
//! - `kdf`   — Argon2id master-key derivation
//! - `field` — string-level field codec used by the contact store
//! - `error` — unified error type

pub mod aead;
pub mod error;
pub mod field;
pub mod kdf;

pub use error::CryptoError;
pub use field::FieldCipher;
pub use kdf::MasterKey;
