//! SQL identifiers taken from configuration.
//!
//! Table and column names are interpolated into the query text, so they are
//! restricted to `[A-Za-z_][A-Za-z0-9_]*` before they ever reach a template.

use std::fmt;

use dcloud_core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `value`; `field` names the config key in the error.
    pub fn parse(field: &'static str, value: &str) -> Result<Self> {
        if is_valid(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(Error::InvalidIdentifier { field, value: value.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
