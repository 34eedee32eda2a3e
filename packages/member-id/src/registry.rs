//! Registry capability: the store of already-issued Member IDs.
//!
//! The core only needs two operations, so the store is a trait and the
//! surrounding service picks the implementation. `InMemoryRegistry`
//! ships here for tests and single-process consumers; the Postgres
//! implementation lives in the `member-id-postgres` package.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::RegistryError;
use crate::member_id::MemberId;

/// One issued Member ID as the registry stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub value: String,
    pub created_at: DateTime<Utc>,
}

/// Point lookup and append over issued Member IDs.
///
/// Implementations own their concurrency discipline; the core only
/// requires `append` to be atomic with respect to duplicate detection.
#[async_trait]
pub trait MemberIdRegistry: Send + Sync {
    /// Exact-string lookup on the canonical value; no fuzzy matching.
    async fn exists(&self, value: &str) -> Result<bool, RegistryError>;

    /// Record a newly issued ID.
    ///
    /// A duplicate of an already-registered value is rejected with
    /// [`RegistryError::Conflict`] and the original entry is untouched.
    async fn append(&self, id: &MemberId) -> Result<RegistryEntry, RegistryError>;
}

/// In-process registry for tests and consumers without a database.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: Mutex<BTreeMap<String, DateTime<Utc>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of issued IDs currently recorded.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl MemberIdRegistry for InMemoryRegistry {
    async fn exists(&self, value: &str) -> Result<bool, RegistryError> {
        Ok(self.entries.lock().await.contains_key(value))
    }

    async fn append(&self, id: &MemberId) -> Result<RegistryEntry, RegistryError> {
        let value = id.value();
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&value) {
            return Err(RegistryError::Conflict { value });
        }
        let created_at = Utc::now();
        entries.insert(value.clone(), created_at);
        Ok(RegistryEntry { value, created_at })
    }
}
