//! Roblox API surface: endpoint configuration and wire DTOs.
//!
//! DTOs mirror the JSON the public Roblox APIs return; field naming follows
//! each endpoint (most are camelCase, the economy endpoints are PascalCase).
//! Unknown fields are ignored on decode.

pub mod groups;
pub mod items;
pub mod users;

/// Base URLs for the Roblox API families, overridable for tests or proxies.
#[derive(Debug, Clone)]
pub struct RobloxEndpoints {
    pub users_api: String,
    pub groups_api: String,
    pub badges_api: String,
    pub economy_api: String,
    pub inventory_api: String,
}

impl Default for RobloxEndpoints {
    fn default() -> Self {
        Self {
            users_api: "https://users.roblox.com".to_string(),
            groups_api: "https://groups.roblox.com".to_string(),
            badges_api: "https://badges.roblox.com".to_string(),
            economy_api: "https://economy.roblox.com".to_string(),
            inventory_api: "https://inventory.roblox.com".to_string(),
        }
    }
}

impl RobloxEndpoints {
    /// Points every API family at one base URL; for tests and proxies.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            users_api: format!("{base}/users"),
            groups_api: format!("{base}/groups"),
            badges_api: format!("{base}/badges"),
            economy_api: format!("{base}/economy"),
            inventory_api: format!("{base}/inventory"),
        }
    }
}
