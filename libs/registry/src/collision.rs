//! Code assignment and collision checking at entity-creation time.
//!
//! Each entity under construction moves through
//! `Unassigned -> CodeAssigned -> Checked -> {Accepted | Rejected}`:
//!
//! - [`CollisionChecker::assign`] produces a [`CandidateCode`] (`CodeAssigned`),
//!   generating one when none was supplied.
//! - [`CollisionChecker::check`] consults the type's store and yields an
//!   [`AcceptedCode`] or fails with `CodeDuplication` (`Rejected`).
//!
//! The check is optimistic. Nothing here holds a lock across the existence
//! query and the eventual insert, so the store's own uniqueness constraint
//! is the authoritative guard. No retries happen unless the caller opts in
//! via [`CollisionChecker::assign_with_retries`].

use canonid_id::{generate, is_valid_trimmed_code, CanonicalId, IdError, Prefix, SEPARATOR};
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::RegistryError;

/// A code assigned to an entity but not yet checked against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCode {
    code: String,
    generated: bool,
}

impl CandidateCode {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True if the code was generated rather than supplied by the caller.
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

/// A code that passed the collision check for its type.
///
/// Only [`CollisionChecker::check`] constructs one. The code is fixed for
/// the entity's lifetime, so there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCode {
    prefix: Prefix,
    code: String,
}

impl AcceptedCode {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// The full `{prefix}-{code}` identifier.
    pub fn canonical(&self) -> String {
        canonid_id::canonical(&self.prefix, &self.code)
    }

    pub fn into_canonical_id(self) -> CanonicalId {
        CanonicalId::new(self.prefix, self.code)
    }

    pub fn into_code(self) -> String {
        self.code
    }
}

/// Assigns codes and checks them for collisions within a type's scope.
#[derive(Debug, Clone, Default)]
pub struct CollisionChecker {
    config: RegistryConfig,
}

impl CollisionChecker {
    /// Creates a checker; out-of-range settings are clamped.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Assigns a code to an entity of `descriptor`'s type.
    ///
    /// With no supplied value a fresh code is generated. A supplied value
    /// containing the separator is treated as a canonical identifier and
    /// trimmed against the type's effective prefix; the remaining bare code
    /// must pass the trimmed-code syntax check.
    pub fn assign<E>(
        &self,
        descriptor: &TypeDescriptor<E>,
        supplied: Option<&str>,
    ) -> Result<CandidateCode, RegistryError> {
        let Some(supplied) = supplied else {
            let code = generate(self.config.code_length);
            if !is_valid_trimmed_code(&code) {
                return Err(IdError::InvalidCode { code }.into());
            }
            return Ok(CandidateCode {
                code,
                generated: true,
            });
        };

        let code = if supplied.contains(SEPARATOR) {
            descriptor.trim(supplied)?
        } else {
            supplied
        };

        if !is_valid_trimmed_code(code) {
            return Err(IdError::InvalidCode {
                code: code.to_string(),
            }
            .into());
        }

        Ok(CandidateCode {
            code: code.to_string(),
            generated: false,
        })
    }

    /// Checks a candidate against the type's store.
    pub fn check<E>(
        &self,
        descriptor: &TypeDescriptor<E>,
        candidate: CandidateCode,
    ) -> Result<AcceptedCode, RegistryError> {
        if descriptor.exists_by_code(&candidate.code)? {
            let identifier = descriptor.canonical(&candidate.code);
            warn!(
                identifier = %identifier,
                type_name = descriptor.type_name(),
                generated = candidate.generated,
                "Code collision detected"
            );
            return Err(RegistryError::CodeDuplication { identifier });
        }

        debug!(
            prefix = %descriptor.prefix(),
            code = %candidate.code,
            "Code accepted"
        );
        Ok(AcceptedCode {
            prefix: descriptor.prefix().clone(),
            code: candidate.code,
        })
    }

    /// Runs [`assign`](Self::assign) then [`check`](Self::check).
    pub fn accept<E>(
        &self,
        descriptor: &TypeDescriptor<E>,
        supplied: Option<&str>,
    ) -> Result<AcceptedCode, RegistryError> {
        let candidate = self.assign(descriptor, supplied)?;
        self.check(descriptor, candidate)
    }

    /// Generates and checks codes until one is free, at most
    /// `max_attempts` times.
    ///
    /// Only collisions are retried; store failures are returned at once.
    pub fn assign_with_retries<E>(
        &self,
        descriptor: &TypeDescriptor<E>,
    ) -> Result<AcceptedCode, RegistryError> {
        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.accept(descriptor, None) {
                Err(RegistryError::CodeDuplication { identifier }) => {
                    debug!(
                        identifier = %identifier,
                        attempt,
                        max_attempts = attempts,
                        "Regenerating after collision"
                    );
                }
                result => return result,
            }
        }

        warn!(
            type_name = descriptor.type_name(),
            attempts, "Exhausted code generation attempts"
        );
        Err(RegistryError::AttemptsExhausted {
            type_name: descriptor.type_name().to_string(),
            attempts,
        })
    }
}

impl From<&RegistryConfig> for CollisionChecker {
    fn from(config: &RegistryConfig) -> Self {
        Self::new(config.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canonid_id::is_code_char;

    use super::*;
    use crate::entity::EntityType;
    use crate::test_support::{prefix, BrokenStore, MapStore, Row};

    fn account(store: MapStore) -> TypeDescriptor<Row> {
        let entity_type = Arc::new(EntityType::new("Account").with_prefix(prefix("a")));
        TypeDescriptor::new(entity_type, Arc::new(store)).unwrap()
    }

    #[test]
    fn test_generates_when_unassigned() {
        let checker = CollisionChecker::default();
        let candidate = checker.assign(&account(MapStore::default()), None).unwrap();
        assert!(candidate.is_generated());
        assert_eq!(candidate.code().len(), 8);
        assert!(candidate.code().chars().all(is_code_char));
    }

    #[test]
    fn test_respects_configured_length() {
        let checker = CollisionChecker::new(RegistryConfig {
            code_length: 12,
            ..RegistryConfig::default()
        });
        let accepted = checker.accept(&account(MapStore::default()), None).unwrap();
        assert_eq!(accepted.code().len(), 12);
    }

    #[test]
    fn test_zero_length_config_still_yields_parseable_ids() {
        let checker = CollisionChecker::new(RegistryConfig {
            code_length: 0,
            max_attempts: 0,
        });
        assert_eq!(checker.config().code_length, 1);

        let accepted = checker.accept(&account(MapStore::default()), None).unwrap();
        assert_eq!(accepted.code().len(), 1);
        let id = accepted.canonical();
        let (p, code) = canonid_id::parse(&id).unwrap();
        assert_eq!((p, code), ("a", accepted.code()));
        assert!(checker
            .assign_with_retries(&account(MapStore::default()))
            .is_ok());
    }

    #[test]
    fn test_from_config_ref() {
        let config = RegistryConfig {
            code_length: 10,
            ..RegistryConfig::default()
        };
        let checker = CollisionChecker::from(&config);
        assert_eq!(checker.config(), &config);
    }

    #[test]
    fn test_accepted_code_parts() {
        let accepted = CollisionChecker::default()
            .accept(&account(MapStore::default()), Some("abcd1234"))
            .unwrap();
        assert_eq!(accepted.prefix().as_str(), "a");
        assert_eq!(accepted.clone().into_code(), "abcd1234");
        let (p, code) = accepted.into_canonical_id().into_parts();
        assert_eq!((p.as_str(), code.as_str()), ("a", "abcd1234"));
    }

    #[test]
    fn test_supplied_bare_code() {
        let checker = CollisionChecker::default();
        let accepted = checker
            .accept(&account(MapStore::default()), Some("abcd1234"))
            .unwrap();
        assert_eq!(accepted.code(), "abcd1234");
        assert_eq!(accepted.canonical(), "a-abcd1234");
    }

    #[test]
    fn test_supplied_canonical_is_trimmed() {
        let checker = CollisionChecker::default();
        let candidate = checker
            .assign(&account(MapStore::default()), Some("a-abcd1234"))
            .unwrap();
        assert!(!candidate.is_generated());
        assert_eq!(candidate.code(), "abcd1234");
    }

    #[test]
    fn test_supplied_foreign_prefix() {
        let checker = CollisionChecker::default();
        let err = checker
            .assign(&account(MapStore::default()), Some("u-abcd1234"))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Id(IdError::InvalidPrefixForType { .. })
        ));
    }

    #[test]
    fn test_supplied_bad_code() {
        let checker = CollisionChecker::default();
        for bad in ["", "ab cd", "a-", "a-ab!"] {
            let err = checker
                .assign(&account(MapStore::default()), Some(bad))
                .unwrap_err();
            assert!(err.is_format_error(), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let checker = CollisionChecker::default();
        let err = checker
            .accept(&account(MapStore::with_codes(&["abcd1234"])), Some("abcd1234"))
            .unwrap_err();
        match err {
            RegistryError::CodeDuplication { identifier } => assert_eq!(identifier, "a-abcd1234"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_implicit_retry() {
        let checker = CollisionChecker::default();
        let err = checker
            .accept(&account(MapStore::colliding(1)), None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::CodeDuplication { .. }));
    }

    #[test]
    fn test_retries_until_free() {
        let checker = CollisionChecker::default();
        let accepted = checker
            .assign_with_retries(&account(MapStore::colliding(3)))
            .unwrap();
        assert_eq!(accepted.code().len(), 8);
    }

    #[test]
    fn test_retries_bounded() {
        let checker = CollisionChecker::new(RegistryConfig {
            max_attempts: 2,
            ..RegistryConfig::default()
        });
        let err = checker
            .assign_with_retries(&account(MapStore::colliding(2)))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AttemptsExhausted { attempts: 2, .. }
        ));
    }

    #[test]
    fn test_store_failure_propagates() {
        let checker = CollisionChecker::default();
        let entity_type = Arc::new(EntityType::new("Account").with_prefix(prefix("a")));
        let desc = TypeDescriptor::<Row>::new(entity_type, Arc::new(BrokenStore)).unwrap();
        let err = checker.assign_with_retries(&desc).unwrap_err();
        assert!(err.is_store_error());
    }

    #[test]
    fn test_inherited_scope() {
        let parent = Arc::new(EntityType::new("Account").with_prefix(prefix("a")));
        let child = Arc::new(EntityType::new("Admin").with_parent(parent));
        let desc =
            TypeDescriptor::<Row>::new(child, Arc::new(MapStore::with_codes(&["taken000"])))
                .unwrap();
        let checker = CollisionChecker::default();

        let accepted = checker.accept(&desc, Some("a-free0000")).unwrap();
        assert_eq!(accepted.into_canonical_id().to_string(), "a-free0000");
        assert!(checker.accept(&desc, Some("a-taken000")).is_err());
    }
}
