//! Canonical identifier grammar.
//!
//! A canonical identifier is `{prefix}-{code}`:
//!
//! - `prefix` matches `\w+` (ASCII letters, digits, underscore)
//! - `code` is drawn from [`ALPHABET`] (`[a-z0-9]+`)
//!
//! Externally supplied bare codes are held to the looser
//! [`is_valid_trimmed_code`] check instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::IdError;
use crate::types::Prefix;

/// The 36 characters codes are generated from.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Separator between prefix and code.
pub const SEPARATOR: char = '-';

/// Maximum length of an externally supplied code.
pub const MAX_TRIMMED_CODE_LENGTH: usize = 255;

static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)-([a-z0-9]+)$").expect("canonical grammar is a valid regex")
});

/// Returns true if `c` is a word character (`\w`, ASCII only).
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if `prefix` is a non-empty run of word characters.
///
/// Usable in const context, where [`Prefix::new`] is not.
pub const fn is_valid_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns true if `c` belongs to [`ALPHABET`].
#[inline]
pub fn is_code_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Formats a canonical identifier from its parts.
///
/// The prefix is already validated by construction; the code is taken as is.
pub fn canonical(prefix: &Prefix, code: &str) -> String {
    let mut out = String::with_capacity(prefix.as_str().len() + 1 + code.len());
    out.push_str(prefix.as_str());
    out.push(SEPARATOR);
    out.push_str(code);
    out
}

/// Splits a canonical identifier into `(prefix, code)`.
///
/// The prefix may be any run of word characters; the code must come from
/// [`ALPHABET`] and run to the end of the input.
pub fn parse(identifier: &str) -> Result<(&str, &str), IdError> {
    let caps = CANONICAL_RE
        .captures(identifier)
        .ok_or_else(|| IdError::InvalidFormat {
            input: identifier.to_string(),
        })?;

    match (caps.get(1), caps.get(2)) {
        (Some(prefix), Some(code)) => Ok((prefix.as_str(), code.as_str())),
        _ => Err(IdError::InvalidFormat {
            input: identifier.to_string(),
        }),
    }
}

/// Strips `{expected_prefix}-` from the front of `identifier`.
///
/// Fails with [`IdError::InvalidPrefixForType`] when the identifier is empty
/// or carries a different prefix.
pub fn trim<'a>(expected_prefix: &str, identifier: &'a str) -> Result<&'a str, IdError> {
    identifier
        .strip_prefix(expected_prefix)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .ok_or_else(|| IdError::InvalidPrefixForType {
            expected: expected_prefix.to_string(),
            actual: identifier.to_string(),
        })
}

/// Returns true if `identifier` starts with `{expected_prefix}-`.
pub fn matches_expected_prefix(expected_prefix: &str, identifier: &str) -> bool {
    trim(expected_prefix, identifier).is_ok()
}

/// Permissive syntax check for externally supplied bare codes: `^\w+$`, at
/// most 255 bytes.
pub fn is_valid_trimmed_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_TRIMMED_CODE_LENGTH && code.chars().all(is_word_char)
}

/// Grammar for one prefix, compiled once when a type is set up.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: Prefix,
    head: String,
    syntax: Regex,
}

impl PrefixMatcher {
    /// Compiles the matcher for `prefix`.
    pub fn new(prefix: Prefix) -> Result<Self, IdError> {
        let head = format!("{}{}", prefix.as_str(), SEPARATOR);
        let syntax = Regex::new(&format!(r"^{}[A-Za-z0-9_]", regex::escape(&head))).map_err(
            |_| IdError::InvalidPrefix {
                prefix: prefix.as_str().to_string(),
            },
        )?;

        Ok(Self {
            prefix,
            head,
            syntax,
        })
    }

    /// The prefix this matcher was compiled for.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Same as [`trim`] against this matcher's prefix.
    pub fn trim<'a>(&self, identifier: &'a str) -> Result<&'a str, IdError> {
        identifier
            .strip_prefix(self.head.as_str())
            .ok_or_else(|| IdError::InvalidPrefixForType {
                expected: self.prefix.as_str().to_string(),
                actual: identifier.to_string(),
            })
    }

    /// Same as [`matches_expected_prefix`] against this matcher's prefix.
    pub fn matches_prefix(&self, identifier: &str) -> bool {
        identifier.starts_with(self.head.as_str())
    }

    /// True if `identifier` is `{prefix}-` followed by at least one word
    /// character.
    pub fn is_valid_syntax(&self, identifier: &str) -> bool {
        self.syntax.is_match(identifier)
    }

    /// Formats a canonical identifier for `code` under this prefix.
    pub fn canonical(&self, code: &str) -> String {
        let mut out = String::with_capacity(self.head.len() + code.len());
        out.push_str(&self.head);
        out.push_str(code);
        out
    }
}
