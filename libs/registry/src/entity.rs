//! Entity types and prefix inheritance.
//!
//! An [`EntityType`] may declare its own prefix, a parent, or both. A type
//! without its own prefix adopts the nearest ancestor's, and with it that
//! ancestor's registry slot and collision scope.

use std::sync::Arc;

use canonid_id::Prefix;

use crate::error::RegistryError;

/// An entity type known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    name: String,
    prefix: Option<Prefix>,
    parent: Option<Arc<EntityType>>,
}

impl EntityType {
    /// Creates a type with no prefix and no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            parent: None,
        }
    }

    /// Declares the type's own prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Declares the parent type prefixes are inherited from.
    #[must_use]
    pub fn with_parent(mut self, parent: Arc<EntityType>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prefix declared on this type itself, ignoring ancestors.
    pub fn own_prefix(&self) -> Option<&Prefix> {
        self.prefix.as_ref()
    }

    pub fn parent(&self) -> Option<&Arc<EntityType>> {
        self.parent.as_ref()
    }

    /// Resolves the prefix this type operates under.
    ///
    /// Walks the parent chain until a type declaring a prefix is found.
    pub fn effective_prefix(&self) -> Result<&Prefix, RegistryError> {
        let mut current = self;
        loop {
            if let Some(prefix) = &current.prefix {
                return Ok(prefix);
            }
            match &current.parent {
                Some(parent) => current = parent.as_ref(),
                None => {
                    return Err(RegistryError::UnsetPrefix {
                        type_name: self.name.clone(),
                    })
                }
            }
        }
    }
}

/// Free-function form of [`EntityType::effective_prefix`].
pub fn effective_prefix(entity_type: &EntityType) -> Result<Prefix, RegistryError> {
    entity_type.effective_prefix().cloned()
}
