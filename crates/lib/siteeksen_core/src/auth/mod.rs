//! Authentication logic.
//!
//! Credential validation, the session issuer that delegates to the external
//! identity service, and the signed session token codec shared with the web
//! layer.

pub mod credentials;
pub mod issuer;
pub mod jwt;
pub mod phone;

use thiserror::Error;

pub use credentials::Credentials;
pub use issuer::{ExchangeError, HttpIdentityProvider, IdentityProvider, SessionIssuer};

/// Authentication errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Phone number and password are required")]
    MissingFields,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Token error: {0}")]
    TokenError(String),
}
