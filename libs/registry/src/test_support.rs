//! Minimal store for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use canonid_id::Prefix;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::store::{BackingStore, IdentityColumn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub code: String,
}

#[derive(Debug, Default)]
pub struct MapStore {
    rows: Mutex<BTreeMap<String, Row>>,
    /// Remaining `exists_by_code` calls that report a collision.
    forced_collisions: AtomicUsize,
    pub columns: Mutex<Vec<IdentityColumn>>,
}

impl MapStore {
    pub fn with_codes(codes: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock();
            for code in codes {
                rows.insert(
                    code.to_string(),
                    Row {
                        code: code.to_string(),
                    },
                );
            }
        }
        store
    }

    pub fn colliding(times: usize) -> Self {
        let store = Self::default();
        store.forced_collisions.store(times, Ordering::SeqCst);
        store
    }
}

impl BackingStore for MapStore {
    type Entity = Row;

    fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let forced = self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        Ok(forced || self.rows.lock().contains_key(code))
    }

    fn find_by_code(&self, code: &str) -> Result<Option<Row>, StoreError> {
        Ok(self.rows.lock().get(code).cloned())
    }

    fn ensure_identity_column(&self, column: &IdentityColumn) -> Result<(), StoreError> {
        self.columns.lock().push(*column);
        Ok(())
    }
}

pub struct BrokenStore;

impl BackingStore for BrokenStore {
    type Entity = Row;

    fn exists_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Err("connection reset".into())
    }

    fn find_by_code(&self, _code: &str) -> Result<Option<Row>, StoreError> {
        Err("connection reset".into())
    }
}

pub fn prefix(s: &str) -> Prefix {
    Prefix::new(s).unwrap()
}
