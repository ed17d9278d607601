//! Prefix registry.
//!
//! Maps prefixes to [`TypeDescriptor`]s. Registration normally happens once
//! per type during startup; lookups may happen at any time, including while
//! other types are still registering. Reads share a lock; writes take it
//! exclusively. Entries are never removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::collision::CollisionChecker;
use crate::config::RegistryConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::RegistryError;
use crate::store::IdentityColumn;

/// Process-wide mapping from prefix to type descriptor.
///
/// Keys are compared case-insensitively; the registered spelling is kept on
/// the descriptor.
pub struct Registry<E> {
    config: RegistryConfig,
    entries: RwLock<HashMap<String, Arc<TypeDescriptor<E>>>>,
}

impl<E> Registry<E> {
    /// Creates an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry; out-of-range settings are clamped.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config: config.normalized(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// A checker generating codes of the same length the identity columns
    /// are sized for.
    pub fn collision_checker(&self) -> CollisionChecker {
        CollisionChecker::from(&self.config)
    }

    /// Registers a descriptor under its type's own prefix.
    ///
    /// Types that only inherit a prefix share their ancestor's slot and
    /// cannot be registered themselves (`UnsetPrefix`). A prefix that is
    /// already taken, by any descriptor, fails with
    /// `DuplicatePrefixRegistration`.
    pub fn register(
        &self,
        descriptor: TypeDescriptor<E>,
    ) -> Result<Arc<TypeDescriptor<E>>, RegistryError> {
        let prefix = descriptor
            .entity_type()
            .own_prefix()
            .ok_or_else(|| RegistryError::UnsetPrefix {
                type_name: descriptor.type_name().to_string(),
            })?
            .clone();
        let key = prefix.key();

        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&key) {
            warn!(
                prefix = %prefix,
                existing = existing.type_name(),
                attempted = descriptor.type_name(),
                "Rejected duplicate prefix registration"
            );
            return Err(RegistryError::DuplicatePrefixRegistration {
                prefix: prefix.to_string(),
                existing: existing.type_name().to_string(),
                attempted: descriptor.type_name().to_string(),
            });
        }

        let descriptor = Arc::new(descriptor);
        entries.insert(key, Arc::clone(&descriptor));
        info!(
            prefix = %prefix,
            type_name = descriptor.type_name(),
            "Registered prefix"
        );
        Ok(descriptor)
    }

    /// Looks up the descriptor registered under `prefix`.
    pub fn lookup(&self, prefix: &str) -> Result<Arc<TypeDescriptor<E>>, RegistryError> {
        let key = prefix.to_ascii_lowercase();
        self.entries
            .read()
            .get(&key)
            .cloned()
            .ok_or(RegistryError::UnknownPrefix { prefix: key })
    }

    /// Returns true if `prefix` is registered.
    pub fn contains(&self, prefix: &str) -> bool {
        self.entries
            .read()
            .contains_key(&prefix.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered prefixes in their registered spelling, sorted.
    pub fn prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self
            .entries
            .read()
            .values()
            .map(|d| d.prefix().to_string())
            .collect();
        prefixes.sort();
        prefixes
    }

    /// Asks every registered type's store to declare its identity column.
    ///
    /// Intended to run once at schema-setup time. Returns the number of
    /// stores visited.
    pub fn ensure_identity_columns(&self) -> Result<usize, RegistryError> {
        let column = IdentityColumn {
            size: self.config.code_length,
            ..IdentityColumn::default()
        };

        // Snapshot so store calls run without holding the lock.
        let descriptors: Vec<Arc<TypeDescriptor<E>>> =
            self.entries.read().values().cloned().collect();

        for descriptor in &descriptors {
            descriptor.ensure_identity_column(&column)?;
            debug!(
                prefix = %descriptor.prefix(),
                size = column.size,
                "Identity column ensured"
            );
        }
        Ok(descriptors.len())
    }
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("prefixes", &self.prefixes())
            .finish()
    }
}
