use crate::error::ClientResult;
use crate::models::{ChangePasswordRequest, RechargeRequest, UpdateProfileRequest, UserProfile};
use crate::services::api_client::ApiClient;
use crate::services::http::HttpMethod;

impl ApiClient {
    pub async fn get_user(&self, user_id: i64) -> ClientResult<UserProfile> {
        log::info!("👤 [PROFILE] Obteniendo usuario {}", user_id);
        self.get_json(&format!("users/{}", user_id)).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<UserProfile> {
        self.send_json_for(HttpMethod::Put, "users/update", request).await
    }

    pub async fn recharge(&self, request: &RechargeRequest) -> ClientResult<UserProfile> {
        log::info!("💳 [PROFILE] Recarga de {} para usuario {}", request.amount, request.user_id);
        self.send_json_for(HttpMethod::Patch, "users/recharge", request).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        self.send_json(HttpMethod::Patch, "users/change_password", request).await?;
        Ok(())
    }
}
