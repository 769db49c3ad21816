//! Contact service: the single authorized entry point for contact
//! operations.
//!
//! Every write encrypts field-by-field before the store sees it; every
//! read decrypts after the store returns.  Ownership is enforced here, and
//! mutations ride the store's owner-scoped single-statement operations so
//! there is no gap between the ownership check and the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cf_crypto::FieldCipher;
use cf_store::{ContactFieldsRow, ContactRow, NewContactRow, Store};

use crate::{avatar, error::ServiceError, phone};

/// Plaintext payload for create and update (full replacement).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

/// Plaintext view returned to the owner.  Create and read paths produce
/// the same shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub id: String,
    pub owner_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub avatar_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ContactService {
    store: Store,
    cipher: FieldCipher,
}

impl ContactService {
    pub fn new(store: Store, cipher: FieldCipher) -> Self {
        Self { store, cipher }
    }

    /// Validate, encrypt, and persist a new contact for `owner`.
    /// The returned view is built from the caller's plaintext — no
    /// redundant decrypt — but matches the read-path shape exactly.
    pub async fn create_contact(
        &self,
        owner: &str,
        input: ContactInput,
    ) -> Result<ContactView, ServiceError> {
        let input = validate(input)?;

        let id = Uuid::new_v4().to_string();
        let avatar_color = avatar::generate_color();
        let new = NewContactRow {
            id: id.clone(),
            owner_user_id: owner.to_string(),
            fields: self.encrypt_fields(&input)?,
            avatar_color: avatar_color.clone(),
        };
        let created_at = self.store.insert_contact(&new).await?;
        tracing::info!(contact_id = %id, "contact created");

        Ok(ContactView {
            id,
            owner_id: owner.to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            company: input.company,
            job_title: input.job_title,
            avatar_color,
            created_at,
            updated_at: created_at,
        })
    }

    /// Fetch one contact.  A missing record and a record owned by someone
    /// else fail identically.
    pub async fn get_contact(&self, owner: &str, id: &str) -> Result<ContactView, ServiceError> {
        match self.store.fetch_contact(id).await? {
            Some(row) if row.owner_user_id == owner => self.decrypt_row(row),
            _ => Err(ServiceError::NotFoundOrUnauthorized),
        }
    }

    /// All of `owner`'s contacts, sorted by first name, case-insensitive
    /// ascending.  Sorting happens after decryption — ciphertext order is
    /// meaningless.  A record that no longer decrypts is skipped with a
    /// warning rather than sinking the whole listing.
    pub async fn list_contacts(&self, owner: &str) -> Result<Vec<ContactView>, ServiceError> {
        let rows = self.store.list_contacts_for_owner(owner).await?;
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match self.decrypt_row(row) {
                Ok(view) => views.push(view),
                Err(err) => {
                    tracing::warn!(contact_id = %id, error = %err, "skipping undecryptable contact");
                }
            }
        }
        views.sort_by_cached_key(|v| v.first_name.to_lowercase());
        Ok(views)
    }

    /// Case-insensitive substring search across all plaintext fields.
    /// Phone values additionally match on digit skeletons, so
    /// "(555) 123-4567" is found by "5551234567" and vice versa.
    pub async fn search_contacts(
        &self,
        owner: &str,
        query: &str,
    ) -> Result<Vec<ContactView>, ServiceError> {
        let needle = query.trim().to_lowercase();
        let views = self.list_contacts(owner).await?;
        if needle.is_empty() {
            return Ok(views);
        }
        let digit_needle = phone::digits_only(&needle);
        Ok(views
            .into_iter()
            .filter(|v| matches_query(v, &needle, &digit_needle))
            .collect())
    }

    /// Full-replacement update.  The owner-scoped store update is one
    /// statement; zero rows affected means missing-or-foreign, reported as
    /// the merged error with no separate existence probe.
    pub async fn update_contact(
        &self,
        owner: &str,
        id: &str,
        input: ContactInput,
    ) -> Result<ContactView, ServiceError> {
        let input = validate(input)?;
        let fields = self.encrypt_fields(&input)?;

        let affected = self.store.update_contact_where(id, owner, &fields).await?;
        if affected == 0 {
            return Err(ServiceError::NotFoundOrUnauthorized);
        }
        tracing::info!(contact_id = %id, "contact updated");

        // Re-read for the response; the row may vanish between the update
        // and this read if a concurrent delete won.
        match self.store.fetch_contact(id).await? {
            Some(row) if row.owner_user_id == owner => self.decrypt_row(row),
            _ => Err(ServiceError::NotFoundOrUnauthorized),
        }
    }

    /// Atomic owner-scoped delete.  Hard removal.
    pub async fn delete_contact(&self, owner: &str, id: &str) -> Result<(), ServiceError> {
        let affected = self.store.delete_contact_where(id, owner).await?;
        if affected == 0 {
            return Err(ServiceError::NotFoundOrUnauthorized);
        }
        tracing::info!(contact_id = %id, "contact deleted");
        Ok(())
    }

    fn encrypt_fields(&self, input: &ContactInput) -> Result<ContactFieldsRow, ServiceError> {
        Ok(ContactFieldsRow {
            first_name_enc: self.cipher.encrypt_field(&input.first_name)?,
            last_name_enc: self.cipher.encrypt_field(&input.last_name)?,
            phone_enc: self.cipher.encrypt_field(&input.phone)?,
            email_enc: self.cipher.encrypt_field(&input.email)?,
            address_enc: self.cipher.encrypt_field(&input.address)?,
            company_enc: match &input.company {
                Some(c) => Some(self.cipher.encrypt_field(c)?),
                None => None,
            },
            job_title_enc: match &input.job_title {
                Some(j) => Some(self.cipher.encrypt_field(j)?),
                None => None,
            },
        })
    }

    fn decrypt_row(&self, row: ContactRow) -> Result<ContactView, ServiceError> {
        Ok(ContactView {
            first_name: self.cipher.decrypt_field(&row.first_name_enc)?,
            last_name: self.cipher.decrypt_field(&row.last_name_enc)?,
            phone: self.cipher.decrypt_field(&row.phone_enc)?,
            email: self.cipher.decrypt_field(&row.email_enc)?,
            address: self.cipher.decrypt_field(&row.address_enc)?,
            company: match &row.company_enc {
                Some(c) => Some(self.cipher.decrypt_field(c)?),
                None => None,
            },
            job_title: match &row.job_title_enc {
                Some(j) => Some(self.cipher.decrypt_field(j)?),
                None => None,
            },
            id: row.id,
            owner_id: row.owner_user_id,
            avatar_color: row.avatar_color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Reject missing required fields before anything is encrypted or
/// persisted, and collapse blank optionals to None (an empty company box
/// means "no company", not an encrypted empty string).
fn validate(mut input: ContactInput) -> Result<ContactInput, ServiceError> {
    let required = [
        ("firstName", &input.first_name),
        ("lastName", &input.last_name),
        ("phone", &input.phone),
        ("email", &input.email),
        ("address", &input.address),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{name} is required")));
        }
    }
    input.company = input.company.filter(|c| !c.trim().is_empty());
    input.job_title = input.job_title.filter(|j| !j.trim().is_empty());
    Ok(input)
}

fn matches_query(view: &ContactView, needle: &str, digit_needle: &str) -> bool {
    let haystacks = [
        Some(&view.first_name),
        Some(&view.last_name),
        Some(&view.phone),
        Some(&view.email),
        Some(&view.address),
        view.company.as_ref(),
        view.job_title.as_ref(),
    ];
    if haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    {
        return true;
    }
    // Digit-skeleton phone match; only when the query actually has digits.
    !digit_needle.is_empty() && phone::digits_only(&view.phone).contains(digit_needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ContactInput {
        ContactInput {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            phone: "5551234567".into(),
            email: "a@x.com".into(),
            address: "1 Main St".into(),
            company: None,
            job_title: None,
        }
    }

    #[test]
    fn validate_rejects_blank_required_field() {
        let mut bad = input();
        bad.first_name = "   ".into();
        let err = validate(bad).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("firstName")));
    }

    #[test]
    fn validate_collapses_blank_optionals() {
        let mut i = input();
        i.company = Some("".into());
        i.job_title = Some("  ".into());
        let clean = validate(i).unwrap();
        assert_eq!(clean.company, None);
        assert_eq!(clean.job_title, None);
    }

    #[test]
    fn validate_keeps_populated_optionals() {
        let mut i = input();
        i.company = Some("MongoDB".into());
        let clean = validate(i).unwrap();
        assert_eq!(clean.company.as_deref(), Some("MongoDB"));
    }
}
