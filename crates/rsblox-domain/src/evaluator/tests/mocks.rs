//! Mock implementations for evaluator testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entity::{Entity, EntityKind, GroupMembership, RobloxGroup, RobloxUser};
use crate::error::{DomainError, DomainResult};
use crate::evaluator::{BindEvaluator, EntityResolver};

/// Scripted entity resolver for testing.
pub struct MockEntityResolver {
    groups: RwLock<HashMap<u64, RobloxGroup>>,
    /// Group ids whose `resolve` hands back a shell; `sync` hydrates them.
    shells: RwLock<HashSet<u64>>,
    failures: RwLock<HashMap<(EntityKind, u64), DomainError>>,
    /// Ownership probe results beyond the user's owned-id sets.
    probe_owned: RwLock<HashSet<(EntityKind, u64)>>,
    delays: RwLock<HashMap<(EntityKind, u64), Duration>>,
    pub resolve_calls: AtomicUsize,
    pub sync_calls: AtomicUsize,
}

impl MockEntityResolver {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            shells: RwLock::new(HashSet::new()),
            failures: RwLock::new(HashMap::new()),
            probe_owned: RwLock::new(HashSet::new()),
            delays: RwLock::new(HashMap::new()),
            resolve_calls: AtomicUsize::new(0),
            sync_calls: AtomicUsize::new(0),
        }
    }

    pub async fn add_group(&self, id: u64, name: &str) {
        self.groups.write().await.insert(
            id,
            RobloxGroup::Hydrated {
                id,
                name: name.to_string(),
                member_count: 1,
                roles: Default::default(),
            },
        );
    }

    /// Makes `resolve` return a shell for this group until `sync` is called.
    pub async fn add_shell_group(&self, id: u64, name: &str) {
        self.add_group(id, name).await;
        self.shells.write().await.insert(id);
    }

    pub async fn fail_with(&self, kind: EntityKind, id: u64, err: DomainError) {
        self.failures.write().await.insert((kind, id), err);
    }

    pub async fn set_probe_owned(&self, kind: EntityKind, id: u64) {
        self.probe_owned.write().await.insert((kind, id));
    }

    pub async fn delay(&self, kind: EntityKind, id: u64, duration: Duration) {
        self.delays.write().await.insert((kind, id), duration);
    }

    async fn apply_delay(&self, kind: EntityKind, id: u64) {
        let delay = self.delays.read().await.get(&(kind, id)).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn check_failure(&self, kind: EntityKind, id: u64) -> DomainResult<()> {
        match self.failures.read().await.get(&(kind, id)) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntityResolver for MockEntityResolver {
    async fn resolve(&self, kind: EntityKind, id: u64) -> DomainResult<Entity> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay(kind, id).await;
        self.check_failure(kind, id).await?;

        match kind {
            EntityKind::Group => {
                if self.shells.read().await.contains(&id) {
                    return Ok(Entity::Group(RobloxGroup::Shell { id }));
                }
                self.groups
                    .read()
                    .await
                    .get(&id)
                    .cloned()
                    .map(Entity::Group)
                    .ok_or_else(|| DomainError::NotFound {
                        entity: format!("group {id}"),
                    })
            }
            kind => Err(DomainError::NotFound {
                entity: format!("{kind} {id}"),
            }),
        }
    }

    async fn sync(&self, kind: EntityKind, id: u64) -> DomainResult<Entity> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(kind, id).await?;
        self.shells.write().await.remove(&id);

        match kind {
            EntityKind::Group => self
                .groups
                .read()
                .await
                .get(&id)
                .cloned()
                .map(Entity::Group)
                .ok_or_else(|| DomainError::NotFound {
                    entity: format!("group {id}"),
                }),
            kind => Err(DomainError::NotFound {
                entity: format!("{kind} {id}"),
            }),
        }
    }

    async fn owns(&self, user: &RobloxUser, kind: EntityKind, id: u64) -> DomainResult<bool> {
        self.apply_delay(kind, id).await;
        self.check_failure(kind, id).await?;

        if let Some(owned) = user.owned_ids(kind) {
            if owned.contains(&id) {
                return Ok(true);
            }
        }
        Ok(self.probe_owned.read().await.contains(&(kind, id)))
    }
}

/// Helper to create an evaluator over a fresh mock resolver.
pub fn create_evaluator() -> (Arc<MockEntityResolver>, BindEvaluator<MockEntityResolver>) {
    let resolver = Arc::new(MockEntityResolver::new());
    let evaluator = BindEvaluator::new(Arc::clone(&resolver));
    (resolver, evaluator)
}

/// A user with the given group memberships as `(group_id, rank)` pairs.
pub fn user_with_groups(id: u64, memberships: &[(u64, u8)]) -> RobloxUser {
    RobloxUser {
        id,
        username: format!("user{id}"),
        display_name: format!("User {id}"),
        groups: memberships
            .iter()
            .map(|(group_id, rank)| GroupMembership {
                group_id: *group_id,
                rank: *rank,
                role_name: "Member".to_string(),
            })
            .collect(),
        ..Default::default()
    }
}
