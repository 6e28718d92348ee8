//! Login credential pair.

use std::fmt;

use super::AuthError;
use super::phone::normalize_phone;

/// A validated phone + password pair, alive only for one login attempt.
///
/// The phone is already normalized. The password is never printed.
#[derive(Clone)]
pub struct Credentials {
    phone: String,
    password: String,
}

impl Credentials {
    /// Validate and normalize raw form input.
    ///
    /// An empty password, or a phone with nothing but separators, yields
    /// [`AuthError::MissingFields`]; a phone number that cannot be normalized
    /// yields [`AuthError::InvalidPhone`].
    pub fn new(phone: &str, password: &str, country_code: &str) -> Result<Self, AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(Self {
            phone: normalize_phone(phone, country_code)?,
            password: password.to_string(),
        })
    }

    /// Normalized phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone", &self.phone)
            .field("password", &"***")
            .finish()
    }
}
