/// Base URL of the backend REST API (everything lives under `/api/v1`)
/// Configured at compile time:
/// - Development: http://localhost:8080/api/v1 (default)
/// - Otherwise: BACKEND_URL env var (forwarded from .env by build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

/// User id used when neither the cached profile nor the token carries one
pub const DEFAULT_USER_ID: i64 = 1;

// Persistent storage keys
pub const LS_ACCESS_TOKEN_KEY: &str = "oss_jwt_access";
pub const LS_REFRESH_TOKEN_KEY: &str = "oss_jwt_refresh";
pub const LS_PROFILE_KEY: &str = "oss_profile_user";
pub const LS_CART_KEY: &str = "oss_cart_data";
pub const LS_WISHLIST_KEY: &str = "oss_wishlist";
pub const LS_FAVORITES_KEY: &str = "oss_favorites";
pub const LS_LAST_LOGIN_EMAIL: &str = "oss_last_login_email";
pub const LS_LAST_REGISTER_EMAIL: &str = "oss_last_register_email";

pub const MODERATOR_ROLE: &str = "ROLE_MODERATOR";
pub const MIN_PASSWORD_LEN: usize = 6;
