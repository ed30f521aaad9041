//! Cache-backed Roblox entity resolvers.
//!
//! One resolver per entity kind, dispatched through a single
//! [`RobloxResolver`] that knows each kind's endpoints, typed shape, and how
//! to sync itself. Resolution is cache-first; a `sync` bypasses the cache
//! read and repopulates the entry.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use rsblox_domain::cache::{EntityCache, EntityKey};
use rsblox_domain::entity::{
    Entity, EntityKind, GroupMembership, RobloxAsset, RobloxBadge, RobloxGamePass, RobloxGroup,
    RobloxUser,
};
use rsblox_domain::error::{DomainError, DomainResult};
use rsblox_domain::evaluator::EntityResolver;

use crate::error::FetchError;
use crate::fetch::{FetchClient, FetchOptions, Typed};
use crate::roblox::groups::{GroupResponse, GroupRolesResponse};
use crate::roblox::items::{
    item_type_number, AssetDetailsResponse, BadgeResponse, GamePassProductResponse,
};
use crate::roblox::users::{
    UserBadgesResponse, UserGroupsResponse, UserResponse, UsernameLookupResponse,
};
use crate::roblox::RobloxEndpoints;
use crate::transport::{HttpTransport, Method};

/// How many badge listing pages to follow per user sync.
const MAX_BADGE_PAGES: usize = 10;

/// Identifies the user to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    Id(u64),
    Username(String),
}

/// Resolves Roblox entities through the typed fetch client, consulting the
/// entity cache first. Concurrent resolutions of the same `(kind, id)`
/// coalesce into one fetch.
pub struct RobloxResolver<T> {
    fetch: FetchClient<T>,
    cache: Arc<EntityCache>,
    endpoints: RobloxEndpoints,
}

impl<T> RobloxResolver<T>
where
    T: HttpTransport,
{
    pub fn new(fetch: FetchClient<T>, cache: Arc<EntityCache>, endpoints: RobloxEndpoints) -> Self {
        Self {
            fetch,
            cache,
            endpoints,
        }
    }

    /// The underlying typed fetch client, exposed for non-Roblox use.
    pub fn fetcher(&self) -> &FetchClient<T> {
        &self.fetch
    }

    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    /// Resolves a user by id or username, hydrated with group-shell
    /// memberships and owned badge ids.
    pub async fn resolve_user(&self, query: &UserQuery) -> DomainResult<RobloxUser> {
        let id = match query {
            UserQuery::Id(id) => *id,
            UserQuery::Username(name) => self.lookup_username(name).await?,
        };
        let entity = self.resolve(EntityKind::User, id).await?;
        entity.into_user().ok_or_else(|| DomainError::Decode {
            message: format!("cache returned a non-user entity for user {id}"),
        })
    }

    async fn lookup_username(&self, username: &str) -> DomainResult<u64> {
        let url = format!("{}/v1/usernames/users", self.endpoints.users_api);
        let options = FetchOptions::default().with_body(serde_json::json!({
            "usernames": [username],
            "excludeBannedUsers": false,
        }));

        let looked_up: Typed<UsernameLookupResponse> = self
            .fetch
            .fetch_typed(Method::Post, &url, options)
            .await
            .map_err(fetch_to_domain(format!("user @{username}")))?;

        looked_up
            .value
            .data
            .first()
            .map(|m| m.id)
            .ok_or_else(|| DomainError::NotFound {
                entity: format!("user @{username}"),
            })
    }

    async fn load(&self, kind: EntityKind, id: u64) -> DomainResult<Entity> {
        match kind {
            EntityKind::User => self.load_user(id).await,
            EntityKind::Group => self.load_group(id).await,
            EntityKind::Badge => self.load_badge(id).await,
            EntityKind::GamePass => self.load_gamepass(id).await,
            EntityKind::Asset => self.load_asset(id).await,
        }
    }

    async fn load_user(&self, id: u64) -> DomainResult<Entity> {
        let entity_label = || format!("user {id}");
        let base_url = format!("{}/v1/users/{id}", self.endpoints.users_api);
        let groups_url = format!("{}/v2/users/{id}/groups/roles", self.endpoints.groups_api);

        let (base, groups, badge_ids) = tokio::join!(
            self.fetch.get_typed::<UserResponse>(&base_url),
            self.fetch.get_typed::<UserGroupsResponse>(&groups_url),
            self.load_user_badges(id),
        );

        let base = base.map_err(fetch_to_domain(entity_label()))?;
        let groups = groups.map_err(fetch_to_domain(entity_label()))?;

        // Memberships are group shells: id + rank + role name, no hydration.
        let memberships = groups
            .value
            .data
            .into_iter()
            .map(|entry| GroupMembership {
                group_id: entry.group.id,
                rank: entry.role.rank,
                role_name: entry.role.name,
            })
            .collect();

        Ok(Entity::User(RobloxUser {
            id: base.value.id,
            username: base.value.name,
            display_name: base.value.display_name,
            groups: memberships,
            badge_ids,
            gamepass_ids: HashSet::new(),
            asset_ids: HashSet::new(),
        }))
    }

    /// Owned badge ids from the cursor-paginated listing endpoint.
    ///
    /// A failing listing degrades to an empty set rather than failing the
    /// user sync: ownership criteria fall back to the per-item probe.
    async fn load_user_badges(&self, id: u64) -> HashSet<u64> {
        let mut badge_ids = HashSet::new();
        let base_url = format!(
            "{}/v1/users/{id}/badges?limit=100&sortOrder=Asc",
            self.endpoints.badges_api
        );

        let mut cursor: Option<String> = None;
        for _ in 0..MAX_BADGE_PAGES {
            let url = match &cursor {
                Some(cursor) => format!("{base_url}&cursor={cursor}"),
                None => base_url.clone(),
            };
            let page: Typed<UserBadgesResponse> = match self.fetch.get_typed(&url).await {
                Ok(page) => page,
                Err(err) => {
                    warn!(user_id = id, error = %err, "badge listing failed, continuing without it");
                    return HashSet::new();
                }
            };
            badge_ids.extend(page.value.data.iter().map(|badge| badge.id));
            match page.value.next_page_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        badge_ids
    }

    async fn load_group(&self, id: u64) -> DomainResult<Entity> {
        let entity_label = || format!("group {id}");
        let roles_url = format!("{}/v1/groups/{id}/roles", self.endpoints.groups_api);
        let info_url = format!("{}/v1/groups/{id}", self.endpoints.groups_api);

        // Rank-to-role-name mapping comes in one call; a user's rank within
        // the group is a lookup on it, never a separate fetch.
        let (roles, info) = tokio::join!(
            self.fetch.get_typed::<GroupRolesResponse>(&roles_url),
            self.fetch.get_typed::<GroupResponse>(&info_url),
        );
        let roles = roles.map_err(fetch_to_domain(entity_label()))?;
        let info = info.map_err(fetch_to_domain(entity_label()))?;

        Ok(Entity::Group(RobloxGroup::Hydrated {
            id,
            name: info.value.name,
            member_count: info.value.member_count,
            roles: roles
                .value
                .roles
                .into_iter()
                .map(|role| (role.rank, role.name))
                .collect(),
        }))
    }

    async fn load_badge(&self, id: u64) -> DomainResult<Entity> {
        let url = format!("{}/v1/badges/{id}", self.endpoints.badges_api);
        let badge: Typed<BadgeResponse> = self
            .fetch
            .get_typed(&url)
            .await
            .map_err(fetch_to_domain(format!("badge {id}")))?;

        Ok(Entity::Badge(RobloxBadge {
            id: badge.value.id,
            name: badge.value.name,
            description: badge.value.description,
        }))
    }

    async fn load_gamepass(&self, id: u64) -> DomainResult<Entity> {
        let url = format!(
            "{}/v1/game-pass/{id}/game-pass-product-info",
            self.endpoints.economy_api
        );
        let pass: Typed<GamePassProductResponse> = self
            .fetch
            .get_typed(&url)
            .await
            .map_err(fetch_to_domain(format!("gamepass {id}")))?;

        Ok(Entity::GamePass(RobloxGamePass {
            id,
            name: pass.value.name,
            price: pass.value.price_in_robux,
        }))
    }

    async fn load_asset(&self, id: u64) -> DomainResult<Entity> {
        let url = format!("{}/v2/assets/{id}/details", self.endpoints.economy_api);
        let asset: Typed<AssetDetailsResponse> = self
            .fetch
            .get_typed(&url)
            .await
            .map_err(fetch_to_domain(format!("asset {id}")))?;

        Ok(Entity::Asset(RobloxAsset {
            id: asset.value.asset_id,
            name: asset.value.name,
            price: asset.value.price_in_robux,
            creator: asset.value.creator.map(|creator| creator.name),
        }))
    }
}

#[async_trait]
impl<T> EntityResolver for RobloxResolver<T>
where
    T: HttpTransport,
{
    async fn resolve(&self, kind: EntityKind, id: u64) -> DomainResult<Entity> {
        let key = EntityKey::new(kind, id);
        let entity = self.cache.get_or_load(key, || self.load(kind, id)).await?;

        // Shells never participate in satisfaction decisions; hydrate on
        // sight so callers always get a full entity.
        if matches!(&entity, Entity::Group(group) if !group.is_hydrated()) {
            return self.sync(kind, id).await;
        }
        Ok(entity)
    }

    async fn sync(&self, kind: EntityKind, id: u64) -> DomainResult<Entity> {
        self.cache
            .refresh(EntityKey::new(kind, id), || self.load(kind, id))
            .await
    }

    async fn owns(&self, user: &RobloxUser, kind: EntityKind, id: u64) -> DomainResult<bool> {
        if let Some(owned) = user.owned_ids(kind) {
            if owned.contains(&id) {
                return Ok(true);
            }
        }

        let Some(type_number) = item_type_number(kind) else {
            return Err(DomainError::Validation {
                message: format!("{kind} is not an ownable item"),
            });
        };

        let url = format!(
            "{}/v1/users/{}/items/{}/{}/is-owned",
            self.endpoints.inventory_api, user.id, type_number, id
        );
        match self
            .fetch
            .fetch_text(Method::Get, &url, FetchOptions::default())
            .await
        {
            Ok(body) => Ok(body.value.trim() == "true"),
            // A missing item, or an API-level rejection, means "not owned".
            Err(FetchError::NotFound) => Ok(false),
            Err(FetchError::Http { status }) if status < 500 => Ok(false),
            Err(err) => Err(fetch_to_domain(format!("{kind} {id}"))(err)),
        }
    }
}

/// Maps a fetch failure into the domain taxonomy at the resolver boundary.
fn fetch_to_domain(entity: String) -> impl FnOnce(FetchError) -> DomainError {
    move |err| match err {
        FetchError::NotFound => DomainError::NotFound { entity },
        FetchError::Decode { message } => DomainError::Decode { message },
        FetchError::Transport { message } => DomainError::Unavailable { entity, message },
        FetchError::Http { status } => DomainError::Unavailable {
            entity,
            message: format!("http status {status}"),
        },
    }
}
