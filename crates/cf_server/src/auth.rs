//! Access-control gate: bearer-token verification.
//!
//! Authentication itself (login, sessions, user accounts) belongs to an
//! external identity provider.  What this service trusts is a token minted
//! with a shared HMAC secret:
//!
//!   cf1.<base64url(owner_id)>.<hex hmac-sha256(owner_id)>
//!
//! Verification is constant-time and happens before any store access, so
//! an unauthenticated caller learns nothing and costs nothing downstream.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

const TOKEN_PREFIX: &str = "cf1";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct TokenVerifier {
    secret: Vec<u8>,
}

impl TokenVerifier {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Mint a token for `owner_id`.  Used by the operator CLI; in
    /// production the identity provider holds the same secret and mints
    /// tokens itself.
    pub fn mint(&self, owner_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(owner_id.as_bytes());
        let tag = hex::encode(mac.finalize().into_bytes());
        format!("{TOKEN_PREFIX}.{}.{tag}", URL_SAFE_NO_PAD.encode(owner_id))
    }

    /// Resolve a bearer token to an owner id.  `None` means the token is
    /// missing a part, carries a bad tag, or names an empty owner — all
    /// indistinguishable to the caller.
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut parts = token.split('.');
        let (prefix, owner_b64, tag_hex) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || prefix != TOKEN_PREFIX {
            return None;
        }

        let owner_bytes = URL_SAFE_NO_PAD.decode(owner_b64).ok()?;
        let owner_id = String::from_utf8(owner_bytes).ok()?;
        if owner_id.is_empty() {
            return None;
        }

        let tag = hex::decode(tag_hex).ok()?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(owner_id.as_bytes());
        // verify_slice is constant-time over the tag bytes.
        mac.verify_slice(&tag).ok()?;

        Some(owner_id)
    }
}
