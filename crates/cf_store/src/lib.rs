//! cf_store — Encrypted contact record store for Cardfile
//!
//! # Encryption strategy
//! SQLite does NOT natively encrypt.  We use application-level encryption:
//! - Personally-identifying columns (names, phone, email, address, company,
//!   job title) are stored as XChaCha20-Poly1305 ciphertext, base64-encoded.
//!   Encryption happens above this crate, in the service layer; the store
//!   only ever sees ciphertext for those columns.
//! - Non-sensitive metadata (ids, owner id, avatar color, timestamps) is
//!   stored in plaintext to allow efficient queries.
//!
//! # Ownership
//! The store is owner-agnostic on reads, but every mutating operation takes
//! both the record id and the owner id and applies them in a single SQL
//! statement.  "Update only if owner matches" and "delete only if owner
//! matches" are atomic at the database, so there is no window between an
//! ownership check and the mutation.
//!
//! # Migration
//! SQLx migrations in `migrations/` are run on open.

pub mod contacts;
pub mod db;
pub mod error;
pub mod models;

pub use db::Store;
pub use error::StoreError;
pub use models::{ContactFieldsRow, ContactRow, NewContactRow};
