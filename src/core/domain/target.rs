//! Target type.
//!
//! The remote application a deployment publishes to.

use std::fmt;

use crate::core::validation::validate_target;
use crate::error::Result;

/// A validated deployment target name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    /// Create a target from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the trimmed name is empty or unusable.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        validate_target(name)?;
        Ok(Self(name.to_string()))
    }

    /// Target name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the platform whether a target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    Missing,
}
