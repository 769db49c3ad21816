//! cf_server — the Cardfile contact service
//!
//! The service layer is the single authorized entry point for contact
//! operations: it encrypts on write, decrypts on read, and enforces the
//! one-owner rule.  The HTTP layer in `http` is a thin boundary; identity
//! resolution happens in `auth` before any store access.

pub mod auth;
pub mod avatar;
pub mod config;
pub mod error;
pub mod http;
pub mod phone;
pub mod service;

pub use error::ServiceError;
pub use service::{ContactInput, ContactService, ContactView};
