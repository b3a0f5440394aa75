// ============================================================================
// ORDERS VIEWMODEL - Pedidos del usuario: pagar / cancelar + recarga
// ============================================================================

use crate::error::{ClientError, ClientResult};
use crate::models::Order;
use crate::services::ApiClient;

pub const ORDER_PAID: &str = "Заказ успешно оплачен!";
pub const ORDER_PAY_FAILED: &str = "Ошибка при оплате заказа";
pub const ORDER_CANCELLED: &str = "Заказ успешно отменён";
pub const ORDER_CANCEL_FAILED: &str = "Ошибка при отмене заказа";
pub const ORDER_CANCEL_CONFIRM: &str = "Вы уверены, что хотите отменить этот заказ?";
pub const ORDERS_LOAD_FAILED: &str = "Ошибка загрузки заказов";
pub const ORDER_SKELETONS: usize = 3;

pub fn order_title(order: &Order) -> String {
    format!("Заказ #{}", order.id)
}

pub fn quantity_label(quantity: i64) -> String {
    format!("Количество: {} шт.", quantity)
}

#[derive(Clone)]
pub struct OrdersViewModel {
    api: ApiClient,
}

impl OrdersViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> ClientResult<Vec<Order>> {
        let user_id = self.api.session().user_id();
        let orders = self.api.user_orders(user_id).await?;
        log::info!("📋 [ORDERS] {} pedidos para usuario {}", orders.len(), user_id);
        Ok(orders)
    }

    /// Only `PENDING` orders reach the endpoint
    pub async fn pay(&self, order: &Order) -> ClientResult<Vec<Order>> {
        if !order.can_pay() {
            return Err(ClientError::validation(ORDER_PAY_FAILED));
        }
        self.api.pay_order(order.id, self.api.session().user_id()).await?;
        self.load().await
    }

    /// `PENDING` and `PAID` orders can be cancelled
    pub async fn cancel(&self, order: &Order) -> ClientResult<Vec<Order>> {
        if !order.can_cancel() {
            return Err(ClientError::validation(ORDER_CANCEL_FAILED));
        }
        self.api.cancel_order(order.id, self.api.session().user_id()).await?;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::HttpMethod;
    use serde_json::json;

    fn order(id: i64, status: &str) -> Order {
        Order { id, order_status: status.to_string(), products: Vec::new() }
    }

    #[test]
    fn titles() {
        assert_eq!(order_title(&order(12, "PAID")), "Заказ #12");
        assert_eq!(quantity_label(2), "Количество: 2 шт.");
    }

    #[tokio::test]
    async fn pay_posts_user_and_reloads() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Post, &h.url("orders/7/pay"), 200, json!({"id": 7}));
        h.transport.mock_response(HttpMethod::Get, &h.url("orders/user/4"), 200, json!([
            {"id": 7, "orderStatus": "PAID", "products": [{"productId": 1, "productPrice": 10, "quantity": 2}]}
        ]));

        let orders = OrdersViewModel::new(h.api.clone()).pay(&order(7, "PENDING")).await.unwrap();

        assert_eq!(orders[0].order_status, "PAID");
        assert_eq!(orders[0].total(), 20.0);
        let sent = h.transport.sent(HttpMethod::Post, &h.url("orders/7/pay"));
        assert_eq!(sent[0].json_body(), Some(json!({"user_id": 4})));
    }

    #[tokio::test]
    async fn paid_order_cannot_be_paid_again() {
        let h = Harness::new();
        let err = OrdersViewModel::new(h.api.clone()).pay(&order(7, "PAID")).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn cancel_allowed_for_paid_only_up_to_shipping() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Delete, &h.url("orders/7/cancel_order"), 200, json!({}));
        h.transport.mock_response(HttpMethod::Get, &h.url("orders/user/4"), 200, json!([]));
        let vm = OrdersViewModel::new(h.api.clone());

        assert!(vm.cancel(&order(7, "PAID")).await.unwrap().is_empty());
        assert!(vm.cancel(&order(8, "SHIPPED")).await.is_err());
        assert_eq!(h.transport.sent(HttpMethod::Delete, &h.url("orders/8/cancel_order")).len(), 0);
    }

    #[tokio::test]
    async fn load_failure_surfaces() {
        let h = Harness::new();
        h.transport.mock_network_error(HttpMethod::Get, &h.url("orders/user/4"));
        assert!(OrdersViewModel::new(h.api.clone()).load().await.is_err());
    }
}
