use serde::{Deserialize, Serialize};
use crate::utils::constants::{BACKEND_URL, DEFAULT_USER_ID};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of every REST resource (`{api_base_url}/carts/...`)
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub pages: PageConfig,
    pub ui_config: UIConfig,
    pub default_user_id: i64,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            pages: PageConfig::default(),
            ui_config: UIConfig::default(),
            default_user_id: DEFAULT_USER_ID,
            currency_symbol: "₸".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub login_page: String,
    pub home_page: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            login_page: "login.html".to_string(),
            home_page: "home.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub toast_duration_ms: u32,
    pub search_debounce_ms: u32,
    /// Delay before leaving a product page that failed to load
    pub product_error_redirect_ms: u32,
    pub top_skeletons: usize,
    pub grid_skeletons: usize,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 2500,
            search_debounce_ms: 400,
            product_error_redirect_ms: 2000,
            top_skeletons: 5,
            grid_skeletons: 8,
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: BACKEND_URL.trim_end_matches('/').to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            pages: PageConfig {
                login_page: option_env!("LOGIN_PAGE")
                    .unwrap_or("login.html").to_string(),
                home_page: option_env!("HOME_PAGE")
                    .unwrap_or("home.html").to_string(),
            },
            ui_config: UIConfig {
                toast_duration_ms: option_env!("TOAST_DURATION_MS")
                    .unwrap_or("2500").parse().unwrap_or(2500),
                search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                    .unwrap_or("400").parse().unwrap_or(400),
                ..defaults.ui_config
            },
            default_user_id: option_env!("DEFAULT_USER_ID")
                .unwrap_or("1").parse().unwrap_or(DEFAULT_USER_ID),
            currency_symbol: option_env!("CURRENCY_SYMBOL")
                .unwrap_or("₸").to_string(),
        }
    }

    /// Join a resource path onto the API base
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Level handed to wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
