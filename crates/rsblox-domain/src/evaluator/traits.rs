//! Traits for entity resolution needed by the evaluator.

use async_trait::async_trait;

use crate::entity::{Entity, EntityKind, RobloxUser};
use crate::error::DomainResult;

/// Capability to resolve and refresh Roblox entities.
///
/// Implemented once per backing client; the evaluator is generic over it so
/// tests can substitute a scripted resolver. `resolve` is cache-first and
/// returns hydrated entities; `sync` bypasses the cache read but repopulates
/// the entry.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    /// Resolves an entity, consulting the cache first.
    async fn resolve(&self, kind: EntityKind, id: u64) -> DomainResult<Entity>;

    /// Forces a refresh, bypassing the cache read but repopulating it.
    async fn sync(&self, kind: EntityKind, id: u64) -> DomainResult<Entity>;

    /// Ownership probe for badge/gamepass/asset criteria.
    ///
    /// Implementations consult the user's owned-id sets before any remote
    /// call; a missing remote item means "not owned", not an error.
    async fn owns(&self, user: &RobloxUser, kind: EntityKind, id: u64) -> DomainResult<bool>;
}
