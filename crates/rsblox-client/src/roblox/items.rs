//! Wire DTOs for badge, game pass and asset detail endpoints, plus the
//! inventory ownership probe.

use serde::Deserialize;

use rsblox_domain::EntityKind;

/// `GET /v1/badges/{id}` on badges.roblox.com.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

/// `GET /v1/game-pass/{id}/game-pass-product-info` on economy.roblox.com.
/// This endpoint speaks PascalCase.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GamePassProductResponse {
    pub target_id: u64,
    pub name: String,
    pub price_in_robux: Option<u64>,
}

/// `GET /v2/assets/{id}/details` on economy.roblox.com. PascalCase as well.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetDetailsResponse {
    pub asset_id: u64,
    pub name: String,
    pub price_in_robux: Option<u64>,
    pub creator: Option<AssetCreator>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetCreator {
    pub name: String,
}

/// Item type discriminant for the inventory `is-owned` endpoint.
///
/// Only ownable kinds have one; users and groups are not inventory items.
pub(crate) fn item_type_number(kind: EntityKind) -> Option<u8> {
    match kind {
        EntityKind::Asset => Some(0),
        EntityKind::GamePass => Some(1),
        EntityKind::Badge => Some(2),
        EntityKind::User | EntityKind::Group => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamepass_product_info_decodes_pascal_case() {
        let pass: GamePassProductResponse = serde_json::from_str(
            r#"{"TargetId":123,"ProductType":"Game Pass","Name":"VIP","PriceInRobux":50}"#,
        )
        .unwrap();
        assert_eq!(pass.target_id, 123);
        assert_eq!(pass.name, "VIP");
        assert_eq!(pass.price_in_robux, Some(50));
    }

    #[test]
    fn test_asset_details_decodes_creator_and_null_price() {
        let asset: AssetDetailsResponse = serde_json::from_str(
            r#"{"AssetId":55,"Name":"Cap","PriceInRobux":null,"Creator":{"Id":1,"Name":"Roblox"}}"#,
        )
        .unwrap();
        assert_eq!(asset.asset_id, 55);
        assert_eq!(asset.price_in_robux, None);
        assert_eq!(asset.creator.unwrap().name, "Roblox");
    }
}
