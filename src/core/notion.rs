//! Notion identifier formatting.
//!
//! Notion hands out database and page ids either as 32 bare hex characters
//! (copied from a URL) or in dashed UUID form. The bot's client expects the
//! dashed form, so ids can be normalised before they are provisioned.

use tracing::warn;

use crate::core::domain::SecretsFile;

/// Key suffixes whose values are treated as Notion ids.
pub const ID_SUFFIXES: &[&str] = &["_DATABASE_ID", "_PAGE_ID"];

const ID_LEN: usize = 32;

/// Format a Notion id into 8-4-4-4-12 form.
///
/// Non-alphanumeric characters are dropped first, so already-dashed ids
/// come back unchanged. Returns `None` when the cleaned id is not 32
/// characters long.
pub fn format_id(raw: &str) -> Option<String> {
    let clean: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if clean.len() != ID_LEN {
        return None;
    }

    Some(format!(
        "{}-{}-{}-{}-{}",
        &clean[..8],
        &clean[8..12],
        &clean[12..16],
        &clean[16..20],
        &clean[20..]
    ))
}

/// Whether a key holds a Notion id.
pub fn is_id_key(key: &str) -> bool {
    ID_SUFFIXES.iter().any(|suffix| key.ends_with(suffix))
}

/// Rewrite every Notion id in `file` into dashed form.
///
/// Values that cannot be formatted are left alone and logged. Returns the
/// keys whose values changed.
pub fn normalize(file: &mut SecretsFile) -> Vec<String> {
    let mut changed = Vec::new();

    for secret in file.entries_mut() {
        if !is_id_key(secret.key()) {
            continue;
        }

        match format_id(secret.value()) {
            Some(formatted) if formatted != secret.value() => {
                changed.push(secret.key().to_string());
                secret.set_value(formatted);
            }
            Some(_) => {}
            None => warn!(key = secret.key(), "not a 32 character Notion id, left as is"),
        }
    }

    changed
}
