//! # karin-store — Case Persistence Contract
//!
//! The deadline engine never initiates writes; it returns new instance
//! collections for the caller to persist. This crate is the entire
//! collaborator contract that persistence must satisfy: get/put/delete
//! of a JSON-shaped [`CaseRecord`] keyed by tenant and case id. No
//! transactions, joins, or range queries are required of implementors.
//!
//! [`InMemoryCaseStore`] is the reference implementation, used by the
//! integration tests and suitable for embedding; the production web
//! application supplies its own document-store-backed implementor.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use karin_core::{CaseContext, CaseId, TenantId};
use karin_deadline::DeadlineInstance;

/// Errors from case persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure, opaque to the engine.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// The unit of persistence: a case context plus its last-persisted
/// deadline instances.
///
/// The instance statuses inside a stored record are snapshots; readers
/// must refresh them against the current date before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// The case context the deadlines were computed from.
    pub context: CaseContext,
    /// Deadline instances in ascending end-date order.
    pub deadlines: Vec<DeadlineInstance>,
    /// When this record was last written (UTC).
    pub updated_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Assemble a record stamped with the current wall-clock time.
    pub fn new(context: CaseContext, deadlines: Vec<DeadlineInstance>) -> Self {
        Self {
            context,
            deadlines,
            updated_at: Utc::now(),
        }
    }
}

/// Get/put semantics over case records, keyed by tenant and case id.
///
/// Cases never cross tenant boundaries: a record written for one tenant
/// is invisible under any other.
pub trait CaseStore: Send + Sync {
    /// Fetch the record for a case, if one was persisted.
    fn get(&self, tenant_id: &TenantId, case_id: &CaseId) -> Result<Option<CaseRecord>, StoreError>;

    /// Persist (insert or replace) a case record.
    fn put(&self, record: CaseRecord) -> Result<(), StoreError>;

    /// Remove a case record. Returns whether a record existed.
    fn delete(&self, tenant_id: &TenantId, case_id: &CaseId) -> Result<bool, StoreError>;
}

/// In-memory [`CaseStore`] over a `parking_lot` read-write lock.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryCaseStore {
    inner: Arc<RwLock<HashMap<(TenantId, CaseId), CaseRecord>>>,
}

impl InMemoryCaseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all tenants.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl CaseStore for InMemoryCaseStore {
    fn get(&self, tenant_id: &TenantId, case_id: &CaseId) -> Result<Option<CaseRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .get(&(tenant_id.clone(), case_id.clone()))
            .cloned())
    }

    fn put(&self, record: CaseRecord) -> Result<(), StoreError> {
        let key = (
            record.context.tenant_id.clone(),
            record.context.case_id.clone(),
        );
        self.inner.write().insert(key, record);
        Ok(())
    }

    fn delete(&self, tenant_id: &TenantId, case_id: &CaseId) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .write()
            .remove(&(tenant_id.clone(), case_id.clone()))
            .is_some())
    }
}
