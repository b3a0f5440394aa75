// ============================================================================
// CLIENT ERROR - Error taxonomy shared by services, view models and views
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced by the storefront client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// 401/403 from the backend. Credentials are already cleared and the
    /// login redirect already issued when this is returned.
    #[error("Не авторизован")]
    Unauthorized,

    /// Transport failure (no response at all)
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-2xx response
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Persistent storage unavailable or write rejected
    #[error("Storage error: {0}")]
    Storage(String),

    /// Client-side form check failed; no request was sent
    #[error("{0}")]
    Validation(String),

    /// DOM glue failure
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Message suitable for a toast or an inline form error. Server text is
    /// preferred when the backend sent any.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ClientError::Unauthorized => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Parse(e.to_string())
    }
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        ClientError::Dom(format!("{:?}", value))
    }
}

impl From<ClientError> for JsValue {
    fn from(e: ClientError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ClientError::Status { status: 400, message: "Email уже занят".into() };
        assert_eq!(err.user_message("Ошибка регистрации"), "Email уже занят");
    }

    #[test]
    fn user_message_falls_back_on_blank_body() {
        let err = ClientError::Status { status: 500, message: "  ".into() };
        assert_eq!(err.user_message("Ошибка входа"), "Ошибка входа");

        let err = ClientError::Network("offline".into());
        assert_eq!(err.user_message("Ошибка входа"), "Ошибка входа");
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = ClientError::validation("Заполните email и пароль");
        assert_eq!(err.user_message("x"), "Заполните email и пароль");
        assert!(!err.is_unauthorized());
        assert!(ClientError::Unauthorized.is_unauthorized());
    }
}
