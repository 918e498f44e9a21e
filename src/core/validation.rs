//! Input validation for hoist.
//!
//! Validates secret keys and app names before they reach the deployment CLI.

use crate::error::{Result, ValidationError};

/// Validate a secret key name.
///
/// Secret keys must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some(first_char) = key.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: "cannot start with a digit".to_string(),
            }
            .into());
        }
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate an app name.
///
/// The name is handed to the deployment CLI as an argument, so it must be
/// non-empty, contain no whitespace, and must not look like a flag.
///
/// # Errors
///
/// Returns `ValidationError` if the name is unusable.
pub fn validate_target(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyTarget.into());
    }

    if name.starts_with('-') {
        return Err(ValidationError::InvalidTarget {
            name: name.to_string(),
            reason: "cannot start with '-'".to_string(),
        }
        .into());
    }

    if let Some(ch) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidTarget {
            name: name.to_string(),
            reason: format!("contains {:?}", ch),
        }
        .into());
    }

    Ok(())
}
