//! Type descriptors: an entity type bound to its backing store.

use std::fmt;
use std::sync::Arc;

use canonid_id::{Prefix, PrefixMatcher};

use crate::entity::EntityType;
use crate::error::{RegistryError, StoreError};
use crate::store::{BackingStore, IdentityColumn};

/// Shared handle to a type's backing store.
pub type SharedStore<E> = Arc<dyn BackingStore<Entity = E>>;

/// Binds an [`EntityType`] to the store that holds its entities.
///
/// The effective prefix is resolved once, at construction, and its grammar
/// compiled into a [`PrefixMatcher`]. A descriptor therefore never exists
/// for a type without a prefix.
pub struct TypeDescriptor<E> {
    entity_type: Arc<EntityType>,
    store: SharedStore<E>,
    matcher: PrefixMatcher,
}

impl<E> TypeDescriptor<E> {
    /// Creates a descriptor, failing with `UnsetPrefix` if the type has no
    /// own or inherited prefix.
    pub fn new(entity_type: Arc<EntityType>, store: SharedStore<E>) -> Result<Self, RegistryError> {
        let prefix = entity_type.effective_prefix()?.clone();
        let matcher = PrefixMatcher::new(prefix)?;
        Ok(Self {
            entity_type,
            store,
            matcher,
        })
    }

    pub fn entity_type(&self) -> &Arc<EntityType> {
        &self.entity_type
    }

    pub fn type_name(&self) -> &str {
        self.entity_type.name()
    }

    /// The effective prefix.
    pub fn prefix(&self) -> &Prefix {
        self.matcher.prefix()
    }

    /// Formats the canonical identifier of `code` for this type.
    pub fn canonical(&self, code: &str) -> String {
        self.matcher.canonical(code)
    }

    /// Strips this type's prefix from `identifier`.
    pub fn trim<'a>(&self, identifier: &'a str) -> Result<&'a str, RegistryError> {
        Ok(self.matcher.trim(identifier)?)
    }

    /// True if `identifier` starts with `{prefix}-`.
    pub fn matches_prefix(&self, identifier: &str) -> bool {
        self.matcher.matches_prefix(identifier)
    }

    /// True if `identifier` is `{prefix}-` followed by a word character.
    pub fn is_valid_syntax(&self, identifier: &str) -> bool {
        self.matcher.is_valid_syntax(identifier)
    }

    /// Asks the store whether `code` is taken.
    pub fn exists_by_code(&self, code: &str) -> Result<bool, RegistryError> {
        self.store
            .exists_by_code(code)
            .map_err(|source| self.store_error(source))
    }

    /// Looks `code` up in the store.
    pub fn find_by_code(&self, code: &str) -> Result<Option<E>, RegistryError> {
        self.store
            .find_by_code(code)
            .map_err(|source| self.store_error(source))
    }

    /// Strict typed lookup: `identifier` must carry this type's prefix.
    pub fn find(&self, identifier: &str) -> Result<Option<E>, RegistryError> {
        let code = self.trim(identifier)?;
        self.find_by_code(code)
    }

    /// Asks the store to declare its identity column.
    pub fn ensure_identity_column(&self, column: &IdentityColumn) -> Result<(), RegistryError> {
        self.store
            .ensure_identity_column(column)
            .map_err(|source| self.store_error(source))
    }

    fn store_error(&self, source: StoreError) -> RegistryError {
        RegistryError::Store {
            type_name: self.type_name().to_string(),
            source,
        }
    }
}

impl<E> fmt::Debug for TypeDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name())
            .field("prefix", self.prefix())
            .finish_non_exhaustive()
    }
}
