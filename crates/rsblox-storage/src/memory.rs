//! In-memory bind store for testing and embedding.
//!
//! Binds are kept per scope in configuration order; saves with an existing
//! bind id replace in place so the order administrators created binds in is
//! preserved across edits.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use rsblox_domain::Bind;

use crate::error::{StorageError, StorageResult};
use crate::traits::{validate_bind, BindStore};

/// In-memory implementation of `BindStore`.
///
/// Uses DashMap for thread-safe concurrent access without a global lock;
/// each scope's bind list is guarded by its own shard entry.
#[derive(Debug, Default)]
pub struct MemoryBindStore {
    binds: DashMap<String, Vec<Bind>>,
}

impl MemoryBindStore {
    /// Creates a new in-memory bind store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory bind store wrapped in Arc.
    pub fn new_shared() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::new())
    }
}

#[async_trait]
impl BindStore for MemoryBindStore {
    async fn load_binds(&self, scope_id: &str) -> StorageResult<Vec<Bind>> {
        Ok(self
            .binds
            .get(scope_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    #[instrument(skip(self, bind), fields(scope_id = %scope_id, bind_id = bind.id))]
    async fn save_bind(&self, scope_id: &str, bind: Bind) -> StorageResult<()> {
        validate_bind(&bind)?;

        let mut entry = self.binds.entry(scope_id.to_string()).or_default();
        match entry.iter_mut().find(|existing| existing.id == bind.id) {
            Some(existing) => *existing = bind,
            None => entry.push(bind),
        }
        Ok(())
    }

    #[instrument(skip(self), fields(scope_id = %scope_id, bind_id = bind_id))]
    async fn delete_bind(&self, scope_id: &str, bind_id: u64) -> StorageResult<()> {
        let mut entry =
            self.binds
                .get_mut(scope_id)
                .ok_or_else(|| StorageError::BindNotFound {
                    scope_id: scope_id.to_string(),
                    bind_id,
                })?;

        let before = entry.len();
        entry.retain(|bind| bind.id != bind_id);
        if entry.len() == before {
            return Err(StorageError::BindNotFound {
                scope_id: scope_id.to_string(),
                bind_id,
            });
        }
        Ok(())
    }
}
