//! Secrets file type.
//!
//! Represents a parsed `KEY=VALUE` secrets file (usually `.env`).

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::core::validation::validate_key;
use crate::error::{Result, SecretsError};

/// One key/value pair read from a secrets file.
///
/// The value is wiped from memory when the entry is dropped.
#[derive(Clone)]
pub struct Secret {
    key: String,
    value: Zeroizing<String>,
}

impl Secret {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Replace the value, wiping the previous one.
    pub fn set_value(&mut self, value: String) {
        self.value = Zeroizing::new(value);
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("key", &self.key)
            .field("value", &"***")
            .finish()
    }
}

/// A parsed secrets file
#[derive(Debug, Clone)]
pub struct SecretsFile {
    entries: Vec<Secret>,
    path: PathBuf,
}

impl SecretsFile {
    /// Parse a secrets file from disk
    ///
    /// Skips empty lines and comments (lines starting with #).
    /// Each remaining line is split on its first `=`; later `=` characters
    /// stay in the value. Matching single or double quotes around the value
    /// are stripped.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or any line is malformed.
    /// Nothing is returned for a partially valid file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            SecretsError::ReadFile {
                path: path.to_path_buf(),
                source,
            }
        })?);

        Self::parse(&contents, path)
    }

    /// Parse secrets from an in-memory string.
    ///
    /// `path` is only used for error messages.
    pub fn parse(contents: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut entries = Vec::new();

        // editors on Windows may save with a byte order mark
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |reason: String| SecretsError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                reason,
            };

            let line = line
                .strip_prefix("export ")
                .map(str::trim_start)
                .unwrap_or(line);

            let Some((key, value)) = line.split_once('=') else {
                return Err(malformed("expected KEY=VALUE".to_string()).into());
            };

            let key = key.trim();
            validate_key(key).map_err(|e| malformed(e.to_string()))?;

            entries.push(Secret::new(key, strip_quotes(value.trim())));
        }

        Ok(Self {
            entries,
            path: path.to_path_buf(),
        })
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value())
    }

    /// All entries in file order
    pub fn entries(&self) -> &[Secret] {
        &self.entries
    }

    /// Mutable access for value rewriting before transmission
    pub fn entries_mut(&mut self) -> &mut [Secret] {
        &mut self.entries
    }

    /// Names from `required` that the file does not define.
    pub fn missing<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| self.get(name).map_or(true, str::is_empty))
            .map(String::as_str)
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }

    raw
}
