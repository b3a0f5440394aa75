// ============================================================================
// WISHLIST VIEWMODEL - Lista de deseos compartida por home y producto
// ============================================================================
// Igual que el carrito: tras cada alta o baja se recarga la lista completa.
// ============================================================================

use std::rc::Rc;
use crate::error::ClientResult;
use crate::models::{AddWishListItemRequest, RemoveWishListItemRequest, WishListSnapshot};
use crate::services::{ApiClient, SnapshotCache, SyncOutcome};
use crate::utils::constants::LS_WISHLIST_KEY;

pub const WISHLIST_ADDED: &str = "Добавлено в избранное";
pub const WISHLIST_REMOVED: &str = "Удалено из избранного";
pub const WISHLIST_TOGGLE_FAILED: &str = "Ошибка обновления избранного";

#[derive(Clone)]
pub struct WishlistViewModel {
    api: ApiClient,
    cache: Rc<SnapshotCache<WishListSnapshot>>,
}

impl WishlistViewModel {
    pub fn new(api: ApiClient) -> Self {
        let cache = Rc::new(SnapshotCache::new(api.session().storage(), LS_WISHLIST_KEY));
        Self { api, cache }
    }

    pub fn snapshot(&self) -> WishListSnapshot {
        self.cache.current()
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.cache.current().contains(product_id)
    }

    /// `GET wish_lists/{userId}`, falling back to the persisted snapshot
    pub async fn load(&self) -> SyncOutcome {
        let user_id = self.api.session().user_id();
        let api = self.api.clone();
        self.cache
            .load(
                || async move { api.get_wish_list(user_id).await.map(WishListSnapshot::from) },
                |_| {},
            )
            .await
    }

    /// Add or remove `product_id`; returns whether the reloaded list has it
    pub async fn toggle(&self, product_id: i64) -> ClientResult<bool> {
        let snapshot = self.cache.current();
        match snapshot.item_id(product_id) {
            Some(item_id) => {
                let request = RemoveWishListItemRequest {
                    wish_list_id: snapshot.wish_list_id.unwrap_or(0),
                    wish_list_item_id: item_id,
                };
                self.api.remove_wish_list_item(&request).await?;
                self.reload_after_mutation(product_id).await
            }
            None => self.add(product_id).await,
        }
    }

    /// `POST wish_lists/add_item` under the current wish list (0 when unknown)
    pub async fn add(&self, product_id: i64) -> ClientResult<bool> {
        let request = AddWishListItemRequest {
            id: 0,
            wish_list_id: self.cache.current().wish_list_id.unwrap_or(0),
            product_id,
        };
        self.api.add_wish_list_item(&request).await?;
        self.reload_after_mutation(product_id).await
    }

    /// A failed reload keeps the last synced list and surfaces the error
    async fn reload_after_mutation(&self, product_id: i64) -> ClientResult<bool> {
        match self.load().await {
            SyncOutcome::Fresh => Ok(self.contains(product_id)),
            SyncOutcome::Stale(e) | SyncOutcome::Empty(e) => {
                log::warn!("⚠️ [WISHLIST] Cambio aplicado, recarga fallida: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::HttpMethod;
    use serde_json::json;

    fn loaded(h: &Harness) -> WishlistViewModel {
        h.transport.mock_response(HttpMethod::Get, &h.url("wish_lists/4"), 200, json!({
            "id": 9, "items": [{"id": 100, "product_id": 1}]
        }));
        WishlistViewModel::new(h.api.clone())
    }

    #[tokio::test]
    async fn load_maps_products_to_items() {
        let h = Harness::new();
        let vm = loaded(&h);
        assert!(vm.load().await.is_fresh());
        assert!(vm.contains(1));
        assert_eq!(vm.snapshot().wish_list_id, Some(9));
    }

    #[tokio::test]
    async fn toggle_off_sends_item_id_then_reloads() {
        let h = Harness::new();
        let vm = loaded(&h);
        vm.load().await;
        h.transport.reset_responses();
        h.transport.mock_response(HttpMethod::Delete, &h.url("wish_lists/delete_item"), 200, json!({}));
        h.transport.mock_response(HttpMethod::Get, &h.url("wish_lists/4"), 200, json!({"id": 9, "items": []}));

        assert!(!vm.toggle(1).await.unwrap());
        let sent = h.transport.sent(HttpMethod::Delete, &h.url("wish_lists/delete_item"));
        assert_eq!(sent[0].json_body(), Some(json!({"wishListId": 9, "wishListItemId": 100})));
        assert_eq!(h.transport.sent(HttpMethod::Get, &h.url("wish_lists/4")).len(), 2);
        assert!(!vm.contains(1));
    }

    #[tokio::test]
    async fn toggle_on_takes_ids_from_reloaded_list() {
        let h = Harness::new();
        h.transport.mock_network_error(HttpMethod::Get, &h.url("wish_lists/4"));
        h.transport.mock_response(HttpMethod::Get, &h.url("wish_lists/4"), 200, json!({
            "id": 12, "items": [{"id": 55, "product_id": 2}]
        }));
        let vm = WishlistViewModel::new(h.api.clone());
        vm.load().await;
        h.transport.mock_response(HttpMethod::Post, &h.url("wish_lists/add_item"), 200, json!({
            "id": 999, "wishListId": 999
        }));

        assert!(vm.toggle(2).await.unwrap());
        let sent = h.transport.sent(HttpMethod::Post, &h.url("wish_lists/add_item"));
        assert_eq!(sent[0].json_body(), Some(json!({"id": 0, "wishListId": 0, "productId": 2})));
        assert_eq!(h.transport.sent(HttpMethod::Get, &h.url("wish_lists/4")).len(), 2);
        assert_eq!(vm.snapshot().item_id(2), Some(55));
        assert_eq!(vm.snapshot().wish_list_id, Some(12));
    }

    #[tokio::test]
    async fn accepted_toggle_with_failed_reload_is_an_error() {
        let h = Harness::new();
        let vm = loaded(&h);
        vm.load().await;
        h.transport.reset_responses();
        h.transport.mock_response(HttpMethod::Delete, &h.url("wish_lists/delete_item"), 200, json!({}));
        h.transport.mock_network_error(HttpMethod::Get, &h.url("wish_lists/4"));

        assert!(vm.toggle(1).await.is_err());
        assert!(vm.contains(1));
    }

    #[tokio::test]
    async fn failed_toggle_leaves_snapshot() {
        let h = Harness::new();
        let vm = loaded(&h);
        vm.load().await;
        h.transport.mock_text(HttpMethod::Delete, &h.url("wish_lists/delete_item"), 500, "boom");

        assert!(vm.toggle(1).await.is_err());
        assert!(vm.contains(1));
    }
}
