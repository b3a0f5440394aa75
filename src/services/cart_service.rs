use crate::error::ClientResult;
use crate::models::{AddCartItemRequest, Cart, CartItem, RemoveCartItemRequest};
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpMethod, HttpRequest};

impl ApiClient {
    pub async fn get_cart(&self, user_id: i64) -> ClientResult<Cart> {
        self.get_json(&format!("carts/{}", user_id)).await
    }

    pub async fn get_cart_items(&self, user_id: i64) -> ClientResult<Vec<CartItem>> {
        self.get_json(&format!("carts/{}/cart-items", user_id)).await
    }

    /// Plain-text integer; anything unparsable counts as 0
    pub async fn total_cart_items(&self, cart_id: i64) -> ClientResult<i64> {
        let req = HttpRequest::get(&self.url(&format!("carts/{}/total_cart_items", cart_id)));
        let text = self.send_authorized(req).await?.text();
        Ok(text.trim().parse().unwrap_or(0))
    }

    pub async fn add_cart_item(&self, request: &AddCartItemRequest) -> ClientResult<()> {
        log::info!("🛒 [CART] Añadiendo producto {} x{}", request.product_id, request.quantity);
        self.send_json(HttpMethod::Post, "carts/add_item", request).await?;
        Ok(())
    }

    pub async fn remove_cart_item(&self, request: &RemoveCartItemRequest) -> ClientResult<()> {
        log::info!("🛒 [CART] Eliminando línea {}", request.cart_item_id);
        self.send_json(HttpMethod::Delete, "carts/delete_item", request).await?;
        Ok(())
    }
}
