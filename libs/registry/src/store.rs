//! Backing-store collaborator contract.
//!
//! The registry never touches storage directly. Each entity type supplies a
//! [`BackingStore`] that answers existence and lookup questions for codes
//! within that type's scope.

use canonid_id::DEFAULT_CODE_LENGTH;

use crate::error::StoreError;

/// Shape of the identity column a store should declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityColumn {
    /// Column width in characters.
    pub size: usize,

    /// Fixed-width (`CHAR`) rather than variable (`VARCHAR`).
    pub fixed: bool,

    /// Enforce uniqueness at commit time.
    pub unique: bool,

    pub nullable: bool,
}

impl Default for IdentityColumn {
    fn default() -> Self {
        Self {
            size: DEFAULT_CODE_LENGTH,
            fixed: true,
            unique: true,
            nullable: false,
        }
    }
}

/// Per-type storage capabilities consumed by the registry.
///
/// Implementations should enforce a real uniqueness constraint on the code
/// column. The registry's existence check is advisory: two concurrent
/// creations can both observe "absent" for the same code.
pub trait BackingStore: Send + Sync {
    /// The entity returned by lookups.
    type Entity;

    /// Returns true if an entity with `code` exists.
    fn exists_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Looks up the entity with `code`.
    fn find_by_code(&self, code: &str) -> Result<Option<Self::Entity>, StoreError>;

    /// Declares the identity column if the store has not done so yet.
    fn ensure_identity_column(&self, _column: &IdentityColumn) -> Result<(), StoreError> {
        Ok(())
    }
}
