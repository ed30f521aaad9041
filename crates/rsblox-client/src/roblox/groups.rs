//! Wire DTOs for the group endpoints.

use serde::Deserialize;

/// `GET /v1/groups/{id}` on groups.roblox.com.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub member_count: u64,
}

/// `GET /v1/groups/{id}/roles` on groups.roblox.com.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRolesResponse {
    pub group_id: u64,
    pub roles: Vec<GroupRoleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRoleEntry {
    pub id: u64,
    pub name: String,
    /// User-facing rank number, 0-255.
    pub rank: u8,
    pub member_count: Option<u64>,
}
