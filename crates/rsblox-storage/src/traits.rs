//! BindStore trait definition.

use async_trait::async_trait;

use rsblox_domain::Bind;

use crate::error::{StorageError, StorageResult};

/// Abstract storage interface for bind configuration.
///
/// A *scope* is the unit of bind ownership (a guild, a community); scope
/// ids are opaque strings owned by the hosting application.
///
/// Implementations must be thread-safe (Send + Sync) and support async
/// operations.
#[async_trait]
pub trait BindStore: Send + Sync + 'static {
    /// Loads every bind configured for a scope, in configuration order.
    ///
    /// A scope with no binds yields an empty list, not an error.
    async fn load_binds(&self, scope_id: &str) -> StorageResult<Vec<Bind>>;

    /// Saves a bind, replacing any existing bind with the same id in the
    /// scope (the original configuration order is kept on replace).
    async fn save_bind(&self, scope_id: &str, bind: Bind) -> StorageResult<()>;

    /// Deletes a bind by id.
    async fn delete_bind(&self, scope_id: &str, bind_id: u64) -> StorageResult<()>;
}

/// Structural validation applied before a bind enters storage.
pub(crate) fn validate_bind(bind: &Bind) -> StorageResult<()> {
    bind.validate().map_err(|err| StorageError::InvalidBind {
        message: err.to_string(),
    })
}
