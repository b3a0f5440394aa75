use crate::error::ClientResult;
use crate::models::{Order, OrderUserRequest};
use crate::services::api_client::ApiClient;
use crate::services::http::HttpMethod;

impl ApiClient {
    pub async fn user_orders(&self, user_id: i64) -> ClientResult<Vec<Order>> {
        self.get_json(&format!("orders/user/{}", user_id)).await
    }

    pub async fn pay_order(&self, order_id: i64, user_id: i64) -> ClientResult<()> {
        log::info!("💰 [ORDERS] Pagando pedido {}", order_id);
        self.send_json(HttpMethod::Post, &format!("orders/{}/pay", order_id), &OrderUserRequest { user_id }).await?;
        Ok(())
    }

    pub async fn cancel_order(&self, order_id: i64, user_id: i64) -> ClientResult<()> {
        log::info!("🚫 [ORDERS] Cancelando pedido {}", order_id);
        self.send_json(HttpMethod::Delete, &format!("orders/{}/cancel_order", order_id), &OrderUserRequest { user_id }).await?;
        Ok(())
    }
}
