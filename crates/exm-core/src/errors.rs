//! Cross-cutting error types for Examina.
//!
//! Storage errors (`DatabaseError`) live in `exm-db`. The CLI converges
//! everything through `anyhow`.

use thiserror::Error;

/// Errors raised while validating core values before they reach the store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required text field was empty.
    #[error("Validation error: {field} must not be empty")]
    EmptyField { field: &'static str },

    /// Data failed validation (format, range).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Check a locale tag such as `en` or `pt-BR`.
///
/// Only the shape is checked (ASCII alphanumerics, `-` and `_`); the set of
/// locales is open.
///
/// # Errors
///
/// Returns `CoreError::EmptyField` for an empty tag and
/// `CoreError::Validation` for any other character.
pub fn validate_locale(locale: &str) -> Result<(), CoreError> {
    if locale.is_empty() {
        return Err(CoreError::EmptyField { field: "locale" });
    }
    if let Some(bad) = locale
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(CoreError::Validation(format!(
            "locale '{locale}' contains invalid character {bad:?}"
        )));
    }
    Ok(())
}
