//! Canonical identifier resolution.

use std::sync::Arc;

use canonid_id::parse;
use tracing::debug;

use crate::descriptor::TypeDescriptor;
use crate::error::RegistryError;
use crate::registry::Registry;

/// Resolves canonical identifiers to entities through a [`Registry`].
///
/// Malformed input and unregistered prefixes are errors. An identifier that
/// is well formed but matches nothing resolves to `None`.
pub struct Resolver<'r, E> {
    registry: &'r Registry<E>,
}

impl<'r, E> Resolver<'r, E> {
    pub fn new(registry: &'r Registry<E>) -> Self {
        Self { registry }
    }

    /// Finds the type that owns `identifier`'s prefix.
    pub fn resolve_type(&self, identifier: &str) -> Result<Arc<TypeDescriptor<E>>, RegistryError> {
        let (prefix, _) = parse(identifier)?;
        self.registry.lookup(prefix)
    }

    /// Finds the entity named by `identifier`.
    pub fn find(&self, identifier: &str) -> Result<Option<E>, RegistryError> {
        let (prefix, code) = parse(identifier)?;
        let descriptor = self.registry.lookup(prefix)?;
        let entity = descriptor.find_by_code(code)?;
        debug!(
            identifier,
            type_name = descriptor.type_name(),
            found = entity.is_some(),
            "Resolved identifier"
        );
        Ok(entity)
    }

    /// Returns true if `identifier` names an existing entity.
    pub fn exists(&self, identifier: &str) -> Result<bool, RegistryError> {
        Ok(self.find(identifier)?.is_some())
    }
}

impl<E> Clone for Resolver<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Resolver<'_, E> {}

#[cfg(test)]
mod tests {
    use canonid_id::IdError;

    use super::*;
    use crate::entity::EntityType;
    use crate::test_support::{prefix, BrokenStore, MapStore, Row};

    fn registry() -> Registry<Row> {
        let registry = Registry::new();
        for (name, p, codes) in [("Account", "a", &["abcd1234"][..]), ("User", "u", &[][..])] {
            let entity_type = Arc::new(EntityType::new(name).with_prefix(prefix(p)));
            let store = Arc::new(MapStore::with_codes(codes));
            registry
                .register(TypeDescriptor::<Row>::new(entity_type, store).unwrap())
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_find_existing() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let row = resolver.find("a-abcd1234").unwrap().unwrap();
        assert_eq!(row.code, "abcd1234");
        assert!(resolver.exists("a-abcd1234").unwrap());
    }

    #[test]
    fn test_absent_is_not_an_error() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        assert_eq!(resolver.find("a-zzzzzzzz").unwrap(), None);
        assert!(!resolver.exists("a-zzzzzzzz").unwrap());
    }

    #[test]
    fn test_scope_is_per_type() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        assert!(!resolver.exists("u-abcd1234").unwrap());
    }

    #[test]
    fn test_unknown_prefix() {
        let registry = registry();
        let err = Resolver::new(&registry).find("x-abcd1234").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownPrefix { ref prefix } if prefix == "x"));
        assert!(Resolver::new(&registry).exists("x-abcd1234").is_err());
    }

    #[test]
    fn test_invalid_format() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        for input in ["not-an-id-!!", "abcd1234", "", "a-ABCD"] {
            let err = resolver.exists(input).unwrap_err();
            assert!(
                matches!(err, RegistryError::Id(IdError::InvalidFormat { .. })),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_prefix_lookup_case_insensitive() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        assert!(resolver.exists("A-abcd1234").unwrap());
        assert_eq!(resolver.resolve_type("U-abcd").unwrap().type_name(), "User");
    }

    #[test]
    fn test_store_error_is_not_absence() {
        let registry = Registry::new();
        let entity_type = Arc::new(EntityType::new("Legacy").with_prefix(prefix("l")));
        registry
            .register(TypeDescriptor::<Row>::new(entity_type, Arc::new(BrokenStore)).unwrap())
            .unwrap();
        let err = Resolver::new(&registry).exists("l-abcd1234").unwrap_err();
        assert!(err.is_store_error());
    }
}
