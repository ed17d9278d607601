//! In-memory backing stores for tests.
//!
//! [`MemoryStore`] behaves like a table with a unique index on the code
//! column: [`MemoryStore::insert`] is the commit-time guard, while
//! `exists_by_code` only reports what has been committed so far.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use canonid_registry::{AcceptedCode, BackingStore, IdentityColumn, StoreError};
use parking_lot::Mutex;
use thiserror::Error;

/// Insert rejected by the unique index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unique constraint violated: code '{code}' already exists")]
pub struct UniqueViolation {
    pub code: String,
}

/// Thread-safe in-memory store keyed by code.
#[derive(Debug)]
pub struct MemoryStore<E> {
    rows: Mutex<BTreeMap<String, E>>,
    identity_column: Mutex<Option<IdentityColumn>>,
    forced_collisions: AtomicUsize,
    exists_calls: AtomicUsize,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            identity_column: Mutex::new(None),
            forced_collisions: AtomicUsize::new(0),
            exists_calls: AtomicUsize::new(0),
        }
    }
}

impl<E: Clone> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` existence checks report a collision regardless
    /// of the stored rows.
    pub fn report_collisions(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    /// Commits a row, enforcing code uniqueness.
    pub fn insert(&self, code: impl Into<String>, entity: E) -> Result<(), UniqueViolation> {
        let code = code.into();
        let mut rows = self.rows.lock();
        if rows.contains_key(&code) {
            return Err(UniqueViolation { code });
        }
        rows.insert(code, entity);
        Ok(())
    }

    /// Commits a row under a code that passed the collision check.
    pub fn insert_accepted(&self, accepted: &AcceptedCode, entity: E) -> Result<(), UniqueViolation> {
        self.insert(accepted.code(), entity)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// The identity column declared through `ensure_identity_column`.
    pub fn identity_column(&self) -> Option<IdentityColumn> {
        *self.identity_column.lock()
    }

    /// Number of `exists_by_code` calls served.
    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }
}

impl<E: Clone + Send + Sync> BackingStore for MemoryStore<E> {
    type Entity = E;

    fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        let forced = self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        Ok(forced || self.rows.lock().contains_key(code))
    }

    fn find_by_code(&self, code: &str) -> Result<Option<E>, StoreError> {
        Ok(self.rows.lock().get(code).cloned())
    }

    fn ensure_identity_column(&self, column: &IdentityColumn) -> Result<(), StoreError> {
        let mut declared = self.identity_column.lock();
        if declared.is_none() {
            *declared = Some(*column);
        }
        Ok(())
    }
}

/// Store whose every call fails, for error propagation tests.
#[derive(Debug, Clone)]
pub struct FailingStore<E> {
    message: &'static str,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E> FailingStore<E> {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            _entity: std::marker::PhantomData,
        }
    }
}

impl<E> BackingStore for FailingStore<E> {
    type Entity = E;

    fn exists_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Err(self.message.into())
    }

    fn find_by_code(&self, _code: &str) -> Result<Option<E>, StoreError> {
        Err(self.message.into())
    }

    fn ensure_identity_column(&self, _column: &IdentityColumn) -> Result<(), StoreError> {
        Err(self.message.into())
    }
}
