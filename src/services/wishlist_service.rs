use crate::error::ClientResult;
use crate::models::{AddWishListItemRequest, AddWishListItemResponse, RemoveWishListItemRequest, WishList};
use crate::services::api_client::ApiClient;
use crate::services::http::HttpMethod;

impl ApiClient {
    pub async fn get_wish_list(&self, user_id: i64) -> ClientResult<WishList> {
        self.get_json(&format!("wish_lists/{}", user_id)).await
    }

    pub async fn add_wish_list_item(&self, request: &AddWishListItemRequest) -> ClientResult<AddWishListItemResponse> {
        log::info!("💜 [WISHLIST] Añadiendo producto {}", request.product_id);
        self.send_json_for(HttpMethod::Post, "wish_lists/add_item", request).await
    }

    pub async fn remove_wish_list_item(&self, request: &RemoveWishListItemRequest) -> ClientResult<()> {
        log::info!("💔 [WISHLIST] Eliminando elemento {}", request.wish_list_item_id);
        self.send_json(HttpMethod::Delete, "wish_lists/delete_item", request).await?;
        Ok(())
    }
}
