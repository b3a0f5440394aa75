use crate::error::ClientResult;
use crate::models::{ReviewRequest, ReviewsPage};
use crate::services::api_client::ApiClient;
use crate::services::http::HttpMethod;

impl ApiClient {
    pub async fn product_reviews(&self, product_id: i64) -> ClientResult<ReviewsPage> {
        self.get_json(&format!("reviews/{}", product_id)).await
    }

    pub async fn make_review(&self, request: &ReviewRequest) -> ClientResult<()> {
        log::info!("⭐ [REVIEWS] Nueva reseña ({}) para producto {}", request.rating, request.product_id);
        self.send_json(HttpMethod::Post, "reviews/make_review", request).await?;
        Ok(())
    }
}
