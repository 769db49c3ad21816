use thiserror::Error;

/// Service-level error taxonomy.  Validation and authorization errors are
/// produced locally and surfaced directly; persistence and crypto failures
/// are surfaced without internal detail.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No resolvable caller identity")]
    Unauthenticated,

    /// Deliberately merged: a missing record and another user's record are
    /// indistinguishable to the caller, so record existence never leaks.
    #[error("Contact not found or unauthorized")]
    NotFoundOrUnauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Field crypto error: {0}")]
    Decode(#[from] cf_crypto::CryptoError),

    #[error("Storage error: {0}")]
    Internal(#[from] cf_store::StoreError),
}
