//! Registry error types.

use canonid_id::IdError;
use thiserror::Error;

/// Error reported by a backing-store collaborator.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by registration, collision checking, and resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Identifier grammar or prefix mismatch.
    #[error(transparent)]
    Id(#[from] IdError),

    /// No type is registered under the prefix.
    #[error("unknown prefix: {prefix}")]
    UnknownPrefix { prefix: String },

    /// The prefix is already bound to another registration.
    #[error("found collision for prefix '{prefix}': bound to {existing}, cannot bind {attempted}")]
    DuplicatePrefixRegistration {
        prefix: String,
        existing: String,
        attempted: String,
    },

    /// Neither the type nor any ancestor declares a prefix.
    #[error("prefix is unset for: {type_name}")]
    UnsetPrefix { type_name: String },

    /// The code already exists within the type's scope.
    #[error("duplicate identifier: {identifier} already exists")]
    CodeDuplication { identifier: String },

    /// Every attempt of a bounded regenerate loop collided.
    #[error("no free code for {type_name} after {attempts} attempts")]
    AttemptsExhausted { type_name: String, attempts: u32 },

    /// The backing store failed.
    #[error("backing store for {type_name} failed: {source}")]
    Store {
        type_name: String,
        #[source]
        source: StoreError,
    },
}

impl RegistryError {
    /// Returns true if the input did not match the identifier grammar.
    pub fn is_format_error(&self) -> bool {
        matches!(self, RegistryError::Id(e) if e.is_format_error())
    }

    /// Returns true if a prefix is missing, unknown, malformed, or foreign
    /// to the type.
    pub fn is_prefix_error(&self) -> bool {
        match self {
            RegistryError::Id(e) => e.is_prefix_error(),
            RegistryError::UnknownPrefix { .. } | RegistryError::UnsetPrefix { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this error is a prefix or code collision.
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            RegistryError::DuplicatePrefixRegistration { .. }
                | RegistryError::CodeDuplication { .. }
        )
    }

    /// Returns true if the backing store failed.
    pub fn is_store_error(&self) -> bool {
        matches!(self, RegistryError::Store { .. })
    }
}
