//! Phone number normalization.

use super::AuthError;

/// Country code prefixed to national numbers (Turkey).
pub const DEFAULT_COUNTRY_CODE: &str = "90";

/// Shortest and longest digit counts accepted after the `+` (E.164 bounds).
const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// Normalize a phone number to `+<country><national>`.
///
/// Separators (whitespace, dashes, dots, parentheses) are dropped; input
/// with nothing else is [`AuthError::MissingFields`]. A leading `+`
/// marks the number as already international and `00` is treated the same
/// way. Anything else is a national number: one trunk `0` is dropped and
/// `country_code` is prefixed.
pub fn normalize_phone(raw: &str, country_code: &str) -> Result<String, AuthError> {
    let compact: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '.' | '(' | ')')))
        .collect();

    if compact.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let digits = if let Some(rest) = compact.strip_prefix('+') {
        rest.to_string()
    } else if let Some(rest) = compact.strip_prefix("00") {
        rest.to_string()
    } else {
        let national = compact.strip_prefix('0').unwrap_or(&compact);
        format!("{country_code}{national}")
    };

    let valid = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(AuthError::InvalidPhone);
    }

    Ok(format!("+{digits}"))
}
