//! Prefix and canonical identifier value types.

use std::fmt;
use std::str::FromStr;

use crate::codec::{self, is_word_char};
use crate::error::IdError;

// =============================================================================
// Prefix
// =============================================================================

/// A type prefix: a non-empty run of word characters.
///
/// Equality is exact. Registries compare by [`Prefix::key`], which is the
/// lowercased form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validates and wraps a prefix.
    pub fn new(prefix: impl Into<String>) -> Result<Self, IdError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(IdError::EmptyPrefix);
        }
        if !prefix.chars().all(is_word_char) {
            return Err(IdError::InvalidPrefix { prefix });
        }
        Ok(Self(prefix))
    }

    /// Returns the prefix as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lookup key used for case-insensitive comparison.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Prefix {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Canonical identifier
// =============================================================================

/// A parsed `{prefix}-{code}` identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalId {
    prefix: Prefix,
    code: String,
}

impl CanonicalId {
    /// Builds an identifier from already-valid parts.
    pub fn new(prefix: Prefix, code: impl Into<String>) -> Self {
        Self {
            prefix,
            code: code.into(),
        }
    }

    /// Parses an identifier against the canonical grammar.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let (prefix, code) = codec::parse(s)?;
        Ok(Self {
            prefix: Prefix(prefix.to_string()),
            code: code.to_string(),
        })
    }

    /// The prefix as written in the identifier.
    #[must_use]
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// The code part.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Splits the identifier into its prefix and code.
    #[must_use]
    pub fn into_parts(self) -> (Prefix, String) {
        (self.prefix, self.code)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, codec::SEPARATOR, self.code)
    }
}

impl FromStr for CanonicalId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for CanonicalId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CanonicalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
