//! # canonid-registry
//!
//! Binds prefixes to entity types and ties canonical identifiers back to
//! entities.
//!
//! ## Components
//!
//! - [`EntityType`]: a type's own prefix and optional parent, with
//!   inheritance resolution via [`EntityType::effective_prefix`]
//! - [`BackingStore`]: the per-type storage collaborator (existence and
//!   lookup by code)
//! - [`TypeDescriptor`]: an entity type bound to its store, with the prefix
//!   grammar compiled once
//! - [`Registry`]: prefix → descriptor, duplicate-safe, shared reads
//! - [`CollisionChecker`]: code assignment and the creation-time existence
//!   check
//! - [`Resolver`]: canonical identifier → entity
//!
//! ## Consistency
//!
//! Collision checking is advisory. Stores must enforce a uniqueness
//! constraint on the code column at commit time; that constraint, not the
//! check here, is what guarantees uniqueness under concurrent creation.

mod collision;
mod config;
mod descriptor;
mod entity;
mod error;
mod registry;
mod resolver;
mod store;

#[cfg(test)]
mod test_support;

pub use collision::{AcceptedCode, CandidateCode, CollisionChecker};
pub use config::{RegistryConfig, DEFAULT_MAX_ATTEMPTS};
pub use descriptor::{SharedStore, TypeDescriptor};
pub use entity::{effective_prefix, EntityType};
pub use error::{RegistryError, StoreError};
pub use registry::Registry;
pub use resolver::Resolver;
pub use store::{BackingStore, IdentityColumn};

/// Re-export the identifier crate for consumers that only depend on this one.
pub use canonid_id as id;
