use serde::{Deserialize, Serialize};
use crate::utils::serde_helper::lenient_f64;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub product_price: f64,
    #[serde(default)]
    pub quantity: i64,
}

impl OrderProduct {
    pub fn line_total(&self) -> f64 {
        self.product_price * self.quantity as f64
    }

    pub fn display_name(&self) -> String {
        match &self.product_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Товар #{}", self.product_id),
        }
    }
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(&self.order_status)
    }

    /// Σ price × quantity; an order without lines totals 0
    pub fn total(&self) -> f64 {
        order_total(&self.products)
    }

    pub fn can_pay(&self) -> bool {
        self.status().map(|s| s.can_pay()).unwrap_or(false)
    }

    pub fn can_cancel(&self) -> bool {
        self.status().map(|s| s.can_cancel()).unwrap_or(false)
    }

    pub fn status_label(&self) -> String {
        self.status()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| self.order_status.clone())
    }

    pub fn status_color(&self) -> &'static str {
        self.status().map(|s| s.color()).unwrap_or(UNKNOWN_STATUS_COLOR)
    }
}

pub fn order_total(products: &[OrderProduct]) -> f64 {
    products.iter().map(OrderProduct::line_total).sum()
}

pub const UNKNOWN_STATUS_COLOR: &str = "#6b7280";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn from_code(code: &str) -> Option<OrderStatus> {
        match code {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            "PROCESSING" => Some(OrderStatus::Processing),
            "SHIPPED" => Some(OrderStatus::Shipped),
            "DELIVERED" => Some(OrderStatus::Delivered),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Ожидает оплаты",
            OrderStatus::Paid => "Оплачен",
            OrderStatus::Processing => "В обработке",
            OrderStatus::Shipped => "Отправлен",
            OrderStatus::Delivered => "Доставлен",
            OrderStatus::Cancelled => "Отменён",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "#f59e0b",
            OrderStatus::Paid => "#10b981",
            OrderStatus::Processing => "#3b82f6",
            OrderStatus::Shipped => "#8b5cf6",
            OrderStatus::Delivered => "#22c55e",
            OrderStatus::Cancelled => "#ef4444",
        }
    }

    pub fn can_pay(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }
}

/// Body of `orders/{id}/pay` and `orders/{id}/cancel_order`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OrderUserRequest {
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: i64) -> OrderProduct {
        OrderProduct { product_id: 1, product_name: None, product_price: price, quantity }
    }

    #[test]
    fn total_is_sum_of_lines() {
        assert_eq!(order_total(&[]), 0.0);
        assert_eq!(order_total(&[line(100.0, 2), line(50.5, 1)]), 250.5);
    }

    #[test]
    fn action_matrix() {
        let all = ["PENDING", "PAID", "PROCESSING", "SHIPPED", "DELIVERED", "CANCELLED"];
        for code in all {
            let status = OrderStatus::from_code(code).unwrap();
            assert_eq!(status.can_pay(), code == "PENDING", "{}", code);
            assert_eq!(status.can_cancel(), code == "PENDING" || code == "PAID", "{}", code);
        }
    }

    #[test]
    fn unknown_status_is_grey_and_inert() {
        let order: Order = serde_json::from_str(r#"{"id": 1, "orderStatus": "RETURNED"}"#).unwrap();
        assert_eq!(order.status_color(), UNKNOWN_STATUS_COLOR);
        assert_eq!(order.status_label(), "RETURNED");
        assert!(!order.can_pay());
        assert!(!order.can_cancel());
        assert_eq!(order.total(), 0.0);
    }

    #[test]
    fn line_name_falls_back_to_id() {
        let mut product = line(1.0, 1);
        product.product_id = 77;
        assert_eq!(product.display_name(), "Товар #77");
        product.product_name = Some("Книга".into());
        assert_eq!(product.display_name(), "Книга");
    }
}
