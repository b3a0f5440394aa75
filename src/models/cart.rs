use serde::{Deserialize, Serialize};
use crate::utils::serde_helper::lenient_f64;

/// `GET carts/{userId}`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_price: f64,
}

/// One line of `GET carts/{userId}/cart-items`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i64,
}

/// Everything the cart page and the header badge render from. Rebuilt in
/// full on every load; the persisted copy is only a fallback.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub cart_id: Option<i64>,
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub total_items: i64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, cart_item_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == cart_item_id)
    }

    /// Counter shown in the header, hidden when zero
    pub fn badge(&self) -> Option<i64> {
        (self.total_items > 0).then_some(self.total_items)
    }
}

/// `POST carts/add_item`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AddCartItemRequest {
    pub id: i64,
    pub quantity: i64,
    pub user_id: i64,
    pub cart_id: i64,
    pub product_id: i64,
}

/// `DELETE carts/delete_item`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    pub cart_id: i64,
    pub cart_item_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_hidden_when_empty() {
        assert_eq!(CartSnapshot::default().badge(), None);
        let snapshot = CartSnapshot { total_items: 3, ..CartSnapshot::default() };
        assert_eq!(snapshot.badge(), Some(3));
    }

    #[test]
    fn payloads_keep_backend_casing() {
        let add = serde_json::to_value(AddCartItemRequest {
            id: 0,
            quantity: 1,
            user_id: 4,
            cart_id: 8,
            product_id: 15,
        }).unwrap();
        assert_eq!(add, serde_json::json!({"id": 0, "quantity": 1, "user_id": 4, "cart_id": 8, "product_id": 15}));

        let remove = serde_json::to_value(RemoveCartItemRequest { cart_id: 8, cart_item_id: 2 }).unwrap();
        assert_eq!(remove, serde_json::json!({"cartId": 8, "cartItemId": 2}));
    }
}
