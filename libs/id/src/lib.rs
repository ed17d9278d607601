//! # canonid-id
//!
//! Compact, human-recognizable identifiers of the form `{prefix}-{code}`.
//!
//! ## Design Principles
//!
//! - Each entity type owns exactly one prefix
//! - Codes are short random strings, unique within one type only
//! - Parsing is strict: malformed input is an error, never a fuzzy match
//! - Identifiers roundtrip (`parse(canonical(p, c)) == (p, c)`)
//!
//! ## ID Format
//!
//! - `prefix` matches `\w+`
//! - `code` matches `[a-z0-9]+`, 8 characters when generated
//!
//! Examples:
//! - `a-k3x9q0zt`
//! - `u-0m2hd7pa`
//!
//! This crate is pure: it knows nothing about registries or storage. See
//! `canonid-registry` for prefix registration, collision checking, and
//! resolution.

mod codec;
mod error;
mod generator;
mod macros;
mod types;

pub use codec::{
    canonical, is_code_char, is_valid_prefix, is_valid_trimmed_code, is_word_char,
    matches_expected_prefix, parse, trim, PrefixMatcher, ALPHABET, MAX_TRIMMED_CODE_LENGTH,
    SEPARATOR,
};
pub use error::IdError;
pub use generator::{generate, generate_with, DEFAULT_CODE_LENGTH};
pub use types::{CanonicalId, Prefix};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
