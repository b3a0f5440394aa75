use crate::error::ClientResult;
use crate::models::{NewProduct, PriceChange, Product, ProductFilters, ProductUpdate, StockChange};
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpMethod, HttpRequest, MultipartPart};

/// Image picked in the moderator form
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub async fn top_products(&self) -> ClientResult<Vec<Product>> {
        self.get_json("products/top_10").await
    }

    pub async fn search_products(&self, keyword: &str) -> ClientResult<Vec<Product>> {
        log::info!("🔍 [CATALOG] Buscando '{}'", keyword);
        self.get_json(&format!("products/search?keyword={}", urlencoding::encode(keyword))).await
    }

    pub async fn filter_products(&self, filters: &ProductFilters) -> ClientResult<Vec<Product>> {
        let query = filters.query_string();
        if query.is_empty() {
            self.get_json("products/filter").await
        } else {
            self.get_json(&format!("products/filter?{}", query)).await
        }
    }

    pub async fn products_by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        self.get_json(&format!("products/category?category={}", urlencoding::encode(category))).await
    }

    pub async fn get_product(&self, product_id: i64) -> ClientResult<Product> {
        self.get_json(&format!("products/{}", product_id)).await
    }

    /// Raw image bytes; the view turns them into an object URL
    pub async fn product_image(&self, product_id: i64) -> ClientResult<Vec<u8>> {
        let req = HttpRequest::get(&self.url(&format!("products/{}/image", product_id)));
        Ok(self.send_authorized(req).await?.body)
    }

    /// Multipart `products/add`: a JSON `product` part and an optional `image`
    pub async fn add_product(&self, product: &NewProduct, image: Option<ImageUpload>) -> ClientResult<()> {
        log::info!("➕ [MODERATOR] Creando producto '{}'", product.name);
        let mut parts = vec![MultipartPart {
            name: "product".to_string(),
            filename: None,
            content_type: "application/json".to_string(),
            bytes: serde_json::to_vec(product)?,
        }];
        if let Some(image) = image {
            parts.push(MultipartPart {
                name: "image".to_string(),
                filename: Some(image.filename),
                content_type: image.content_type,
                bytes: image.bytes,
            });
        }
        let req = HttpRequest::new(HttpMethod::Post, &self.url("products/add")).with_multipart(parts);
        self.send_authorized(req).await?;
        Ok(())
    }

    pub async fn update_product(&self, product: &ProductUpdate) -> ClientResult<()> {
        log::info!("✏️ [MODERATOR] Actualizando producto {}", product.id);
        self.send_json(HttpMethod::Put, "products/update_product", product).await?;
        Ok(())
    }

    pub async fn change_stock(&self, product_id: i64, stock: i64) -> ClientResult<()> {
        self.send_json(HttpMethod::Patch, "products/change_stock", &StockChange { id: product_id, stock }).await?;
        Ok(())
    }

    pub async fn change_price(&self, product_id: i64, price: f64) -> ClientResult<()> {
        self.send_json(HttpMethod::Patch, "products/change_price", &PriceChange { id: product_id, price }).await?;
        Ok(())
    }

    pub async fn delete_product(&self, product_id: i64) -> ClientResult<()> {
        log::info!("🗑️ [MODERATOR] Eliminando producto {}", product_id);
        let req = HttpRequest::new(HttpMethod::Delete, &self.url(&format!("products/delete/{}", product_id)));
        self.send_authorized(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::http::RequestBody;

    #[tokio::test]
    async fn search_encodes_keyword() {
        let h = Harness::new();
        let url = h.url("products/search?keyword=%D1%87%D0%B0%D0%B9%20black");
        h.transport.mock_response(HttpMethod::Get, &url, 200, serde_json::json!([{"id": 1, "name": "Чай"}]));
        let found = h.api.search_products("чай black").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn empty_filter_hits_bare_route() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Get, &h.url("products/filter"), 200, serde_json::json!([]));
        assert!(h.api.filter_products(&ProductFilters::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_product_sends_json_part_and_image() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Post, &h.url("products/add"), 200, serde_json::json!({"id": 5}));
        let product = NewProduct {
            category: "BOOKS".into(),
            name: "Rust".into(),
            description: "book".into(),
            price: 10.0,
            stock: 3,
            rating: 0.0,
        };
        let image = ImageUpload { filename: "c.png".into(), content_type: "image/png".into(), bytes: vec![1, 2] };
        h.api.add_product(&product, Some(image)).await.unwrap();

        let sent = h.transport.sent(HttpMethod::Post, &h.url("products/add"));
        let RequestBody::Multipart(parts) = &sent[0].body else { panic!("expected multipart") };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "product");
        let json: serde_json::Value = serde_json::from_slice(&parts[0].bytes).unwrap();
        assert_eq!(json["rating"], 0.0);
        assert_eq!(parts[1].filename.as_deref(), Some("c.png"));
    }

    #[tokio::test]
    async fn inline_edits_patch_single_field() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Patch, &h.url("products/change_stock"), 200, serde_json::json!({}));
        h.transport.mock_response(HttpMethod::Patch, &h.url("products/change_price"), 200, serde_json::json!({}));
        h.api.change_stock(7, 0).await.unwrap();
        h.api.change_price(7, 99.5).await.unwrap();

        let stock = h.transport.sent(HttpMethod::Patch, &h.url("products/change_stock"));
        assert_eq!(stock[0].json_body(), Some(serde_json::json!({"id": 7, "stock": 0})));
        let price = h.transport.sent(HttpMethod::Patch, &h.url("products/change_price"));
        assert_eq!(price[0].json_body(), Some(serde_json::json!({"id": 7, "price": 99.5})));
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let h = Harness::new();
        h.transport.mock_text(HttpMethod::Delete, &h.url("products/delete/3"), 204, "");
        h.api.delete_product(3).await.unwrap();
    }
}
