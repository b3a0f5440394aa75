use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct WishList {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Vec<WishListItem>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WishListItem {
    pub id: i64,
    pub product_id: i64,
}

/// Wish list id plus `productId -> wishListItemId`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WishListSnapshot {
    pub wish_list_id: Option<i64>,
    pub items: BTreeMap<i64, i64>,
}

impl WishListSnapshot {
    pub fn contains(&self, product_id: i64) -> bool {
        self.items.contains_key(&product_id)
    }

    pub fn item_id(&self, product_id: i64) -> Option<i64> {
        self.items.get(&product_id).copied()
    }
}

impl From<WishList> for WishListSnapshot {
    fn from(list: WishList) -> Self {
        Self {
            wish_list_id: list.id,
            items: list.items.into_iter().map(|i| (i.product_id, i.id)).collect(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddWishListItemRequest {
    pub id: i64,
    pub wish_list_id: i64,
    pub product_id: i64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddWishListItemResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub wish_list_id: Option<i64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWishListItemRequest {
    pub wish_list_id: i64,
    pub wish_list_item_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_products_to_items() {
        let list: WishList = serde_json::from_str(
            r#"{"id": 2, "items": [{"id": 10, "product_id": 5}, {"id": 11, "product_id": 7}]}"#,
        ).unwrap();
        let snapshot = WishListSnapshot::from(list);
        assert_eq!(snapshot.wish_list_id, Some(2));
        assert!(snapshot.contains(5));
        assert_eq!(snapshot.item_id(7), Some(11));
        assert!(!snapshot.contains(10));
    }

    #[test]
    fn snapshot_survives_persistence() {
        let mut snapshot = WishListSnapshot { wish_list_id: Some(1), ..Default::default() };
        snapshot.items.insert(42, 9);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WishListSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
