//! Contact record queries.
//!
//! Reads are owner-agnostic (the service layer decides what the caller may
//! see).  Mutations take both id and owner and are single statements, so
//! "only if owner matches" is atomic — zero rows affected means the record
//! is missing or foreign, and the caller cannot tell which from here.

use chrono::{DateTime, Utc};

use crate::{
    db::Store,
    error::StoreError,
    models::{ContactFieldsRow, ContactRow, NewContactRow},
};

impl Store {
    /// Insert a new contact. Timestamps are assigned here and returned so
    /// the caller can shape its response without a follow-up read.
    pub async fn insert_contact(&self, new: &NewContactRow) -> Result<DateTime<Utc>, StoreError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO contacts (id, owner_user_id, first_name_enc, last_name_enc, \
             phone_enc, email_enc, address_enc, company_enc, job_title_enc, \
             avatar_color, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.id)
        .bind(&new.owner_user_id)
        .bind(&new.fields.first_name_enc)
        .bind(&new.fields.last_name_enc)
        .bind(&new.fields.phone_enc)
        .bind(&new.fields.email_enc)
        .bind(&new.fields.address_enc)
        .bind(&new.fields.company_enc)
        .bind(&new.fields.job_title_enc)
        .bind(&new.avatar_color)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(now)
    }

    /// Fetch a contact by id, whoever owns it.
    pub async fn fetch_contact(&self, id: &str) -> Result<Option<ContactRow>, StoreError> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT * FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// All contacts belonging to `owner`, oldest first.  Name ordering is
    /// meaningless at this layer — the columns are ciphertext — so the
    /// service sorts after decryption.
    pub async fn list_contacts_for_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<ContactRow>, StoreError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT * FROM contacts WHERE owner_user_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Replace all field columns of the contact, only if `owner` owns it.
    /// Returns the number of rows affected (0 or 1).  All columns are
    /// written by the one statement, so concurrent updates can never leave
    /// a row with fields from two different calls.
    pub async fn update_contact_where(
        &self,
        id: &str,
        owner: &str,
        fields: &ContactFieldsRow,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE contacts SET first_name_enc = ?, last_name_enc = ?, phone_enc = ?, \
             email_enc = ?, address_enc = ?, company_enc = ?, job_title_enc = ?, \
             updated_at = ? \
             WHERE id = ? AND owner_user_id = ?",
        )
        .bind(&fields.first_name_enc)
        .bind(&fields.last_name_enc)
        .bind(&fields.phone_enc)
        .bind(&fields.email_enc)
        .bind(&fields.address_enc)
        .bind(&fields.company_enc)
        .bind(&fields.job_title_enc)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete the contact, only if `owner` owns it.  Hard removal, no
    /// tombstone.  Returns the number of rows affected (0 or 1).
    pub async fn delete_contact_where(&self, id: &str, owner: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND owner_user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
