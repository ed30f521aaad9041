//! Wire DTOs for the users, user-groups and user-badges endpoints.

use serde::Deserialize;

/// `GET /v1/users/{id}` on users.roblox.com.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub display_name: String,
}

/// `POST /v1/usernames/users` on users.roblox.com.
#[derive(Debug, Deserialize)]
pub struct UsernameLookupResponse {
    pub data: Vec<UsernameMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameMatch {
    pub id: u64,
    pub name: String,
}

/// `GET /v2/users/{id}/groups/roles` on groups.roblox.com.
#[derive(Debug, Deserialize)]
pub struct UserGroupsResponse {
    pub data: Vec<UserGroupEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UserGroupEntry {
    pub group: UserGroupSummary,
    pub role: UserGroupRole,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupSummary {
    pub id: u64,
    pub name: String,
    pub member_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupRole {
    pub id: u64,
    pub name: String,
    pub rank: u8,
}

/// `GET /v1/users/{id}/badges` on badges.roblox.com (cursor-paginated).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgesResponse {
    pub next_page_cursor: Option<String>,
    pub data: Vec<UserBadgeStub>,
}

#[derive(Debug, Deserialize)]
pub struct UserBadgeStub {
    pub id: u64,
    pub name: String,
}
