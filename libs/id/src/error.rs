//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Errors that can occur when formatting, parsing, or trimming identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The prefix string is empty.
    #[error("prefix cannot be empty")]
    EmptyPrefix,

    /// The prefix contains characters outside `\w`.
    #[error("invalid prefix '{prefix}': only word characters are allowed")]
    InvalidPrefix { prefix: String },

    /// The input does not match the canonical identifier grammar.
    #[error("invalid identifier syntax: '{input}'")]
    InvalidFormat { input: String },

    /// The identifier does not start with the expected prefix and separator.
    #[error("invalid or unsupported identifier '{actual}': expected prefix '{expected}'")]
    InvalidPrefixForType { expected: String, actual: String },

    /// An externally supplied code fails the trimmed-code syntax check.
    #[error("invalid code '{code}'")]
    InvalidCode { code: String },
}

impl IdError {
    /// Returns true if the input did not match the identifier or code grammar.
    pub fn is_format_error(&self) -> bool {
        matches!(self, IdError::InvalidFormat { .. } | IdError::InvalidCode { .. })
    }

    /// Returns true if this error indicates a prefix problem.
    pub fn is_prefix_error(&self) -> bool {
        matches!(
            self,
            IdError::EmptyPrefix
                | IdError::InvalidPrefix { .. }
                | IdError::InvalidPrefixForType { .. }
        )
    }
}
