//! Typed Roblox entities.
//!
//! Every entity is identified by `(EntityKind, id)`; the identity is immutable
//! once the object exists. Users and groups carry the data bind evaluation
//! needs; badges, passes and assets are lightweight ownable items.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag for a Roblox entity. Forms the cache key together with the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Group,
    Badge,
    #[serde(rename = "gamepass")]
    GamePass,
    Asset,
}

impl EntityKind {
    /// Stable lowercase name, matching the persisted bind format.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
            EntityKind::Badge => "badge",
            EntityKind::GamePass => "gamepass",
            EntityKind::Asset => "asset",
        }
    }

    /// Whether this kind is an ownable item (checked via owned-id sets).
    pub fn is_ownable(&self) -> bool {
        matches!(
            self,
            EntityKind::Badge | EntityKind::GamePass | EntityKind::Asset
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's standing in one group: the rank plus the role name attached to it.
///
/// Memberships are group *shells*: the group id and the user's rank are known
/// without the group itself being hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub group_id: u64,
    /// Rank number within the group, 0-255.
    pub rank: u8,
    pub role_name: String,
}

/// A Roblox user with the resolved data bind evaluation needs.
///
/// Mutated only by replacing the whole value through a resolver `sync`;
/// never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RobloxUser {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    /// Group memberships in the order the API returned them.
    pub groups: Vec<GroupMembership>,
    pub badge_ids: HashSet<u64>,
    pub gamepass_ids: HashSet<u64>,
    pub asset_ids: HashSet<u64>,
}

impl RobloxUser {
    /// The user's membership in the given group, if any.
    pub fn membership(&self, group_id: u64) -> Option<&GroupMembership> {
        self.groups.iter().find(|m| m.group_id == group_id)
    }

    /// The owned-id set for an ownable kind; `None` for users and groups.
    pub fn owned_ids(&self, kind: EntityKind) -> Option<&HashSet<u64>> {
        match kind {
            EntityKind::Badge => Some(&self.badge_ids),
            EntityKind::GamePass => Some(&self.gamepass_ids),
            EntityKind::Asset => Some(&self.asset_ids),
            EntityKind::User | EntityKind::Group => None,
        }
    }
}

/// A Roblox group, either a shell (only the id is known) or hydrated.
///
/// Shells come from user group memberships; hydration (the rank-to-role-name
/// mapping) is deferred until a criterion needs it. A shell never
/// participates in a satisfaction decision — the evaluator forces a sync
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobloxGroup {
    Shell {
        id: u64,
    },
    Hydrated {
        id: u64,
        name: String,
        member_count: u64,
        /// Rank number (0-255) to role name.
        roles: BTreeMap<u8, String>,
    },
}

impl RobloxGroup {
    pub fn id(&self) -> u64 {
        match self {
            RobloxGroup::Shell { id } | RobloxGroup::Hydrated { id, .. } => *id,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self, RobloxGroup::Hydrated { .. })
    }

    /// Group name; `None` until hydrated.
    pub fn name(&self) -> Option<&str> {
        match self {
            RobloxGroup::Shell { .. } => None,
            RobloxGroup::Hydrated { name, .. } => Some(name),
        }
    }

    pub fn member_count(&self) -> Option<u64> {
        match self {
            RobloxGroup::Shell { .. } => None,
            RobloxGroup::Hydrated { member_count, .. } => Some(*member_count),
        }
    }

    /// Rank-to-role-name mapping; `None` until hydrated.
    pub fn roles(&self) -> Option<&BTreeMap<u8, String>> {
        match self {
            RobloxGroup::Shell { .. } => None,
            RobloxGroup::Hydrated { roles, .. } => Some(roles),
        }
    }

    /// Role name for a rank number, once hydrated.
    pub fn role_name(&self, rank: u8) -> Option<&str> {
        self.roles()?.get(&rank).map(String::as_str)
    }
}

/// A badge on Roblox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobloxBadge {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

/// A game pass on Roblox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobloxGamePass {
    pub id: u64,
    pub name: String,
    /// Price in Robux; absent for off-sale passes.
    pub price: Option<u64>,
}

/// A catalog asset on Roblox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobloxAsset {
    pub id: u64,
    pub name: String,
    pub price: Option<u64>,
    pub creator: Option<String>,
}

/// Sum over all entity kinds; the value type stored in the entity cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    User(RobloxUser),
    Group(RobloxGroup),
    Badge(RobloxBadge),
    GamePass(RobloxGamePass),
    Asset(RobloxAsset),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::User(_) => EntityKind::User,
            Entity::Group(_) => EntityKind::Group,
            Entity::Badge(_) => EntityKind::Badge,
            Entity::GamePass(_) => EntityKind::GamePass,
            Entity::Asset(_) => EntityKind::Asset,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Entity::User(user) => user.id,
            Entity::Group(group) => group.id(),
            Entity::Badge(badge) => badge.id,
            Entity::GamePass(pass) => pass.id,
            Entity::Asset(asset) => asset.id,
        }
    }

    pub fn as_user(&self) -> Option<&RobloxUser> {
        match self {
            Entity::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&RobloxGroup> {
        match self {
            Entity::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn into_user(self) -> Option<RobloxUser> {
        match self {
            Entity::User(user) => Some(user),
            _ => None,
        }
    }
}
