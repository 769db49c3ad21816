//! Database row models — these map to/from SQL rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted contact. Every `*_enc` column is base64 AEAD ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactRow {
    pub id: String,
    /// Owning user. Immutable after creation; mutations are scoped by it.
    pub owner_user_id: String,
    pub first_name_enc: String,
    pub last_name_enc: String,
    pub phone_enc: String,
    pub email_enc: String,
    pub address_enc: String,
    pub company_enc: Option<String>,
    pub job_title_enc: Option<String>,
    /// Display-only color token. Assigned at creation, never encrypted.
    pub avatar_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. Timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewContactRow {
    pub id: String,
    pub owner_user_id: String,
    pub fields: ContactFieldsRow,
    pub avatar_color: String,
}

/// The encrypted field columns written by create and update.
#[derive(Debug, Clone)]
pub struct ContactFieldsRow {
    pub first_name_enc: String,
    pub last_name_enc: String,
    pub phone_enc: String,
    pub email_enc: String,
    pub address_enc: String,
    pub company_enc: Option<String>,
    pub job_title_enc: Option<String>,
}
