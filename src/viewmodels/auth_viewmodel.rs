// ============================================================================
// AUTH VIEWMODEL - Login y registro
// ============================================================================
// Validación local antes de cualquier petición; login y registro no pasan
// por el Bearer (todavía no hay token).
// ============================================================================

use crate::error::{ClientError, ClientResult};
use crate::models::{RegisterRequest, UserProfile};
use crate::services::ApiClient;
use crate::utils::constants::MIN_PASSWORD_LEN;

pub const LOGIN_FIELDS_REQUIRED: &str = "Заполните email и пароль";
pub const BAD_CREDENTIALS: &str = "Неверный email или пароль";
pub const LOGIN_FAILED: &str = "Ошибка входа";
pub const REGISTER_FIELDS_REQUIRED: &str = "Все поля обязательны";
pub const PASSWORD_TOO_SHORT: &str = "Пароль должен быть не короче 6 символов";
pub const REGISTER_FAILED: &str = "Ошибка регистрации";

/// Register form values as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Every field present, password at least six characters
    pub fn validate(&self) -> ClientResult<RegisterRequest> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        if first_name.is_empty() || last_name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(ClientError::validation(REGISTER_FIELDS_REQUIRED));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::validation(PASSWORD_TOO_SHORT));
        }
        Ok(RegisterRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            balance: 0.0,
        })
    }
}

pub fn validate_login(email: &str, password: &str) -> ClientResult<(String, String)> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ClientError::validation(LOGIN_FIELDS_REQUIRED));
    }
    Ok((email.to_string(), password.to_string()))
}

/// Server text when there is one; a rejected login without a body reads as
/// bad credentials
pub fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Status { status: 401 | 403, message } if message.trim().is_empty() => {
            BAD_CREDENTIALS.to_string()
        }
        other => other.user_message(LOGIN_FAILED),
    }
}

#[derive(Clone)]
pub struct AuthViewModel {
    api: ApiClient,
}

impl AuthViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn last_login_email(&self) -> Option<String> {
        self.api.session().last_login_email()
    }

    pub fn last_register_email(&self) -> Option<String> {
        self.api.session().last_register_email()
    }

    /// Validate, remember the email, then log in
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        let (email, password) = validate_login(email, password)?;
        self.api.session().remember_login_email(&email);
        self.api.login(&email, &password).await
    }

    pub async fn register(&self, form: &RegisterForm) -> ClientResult<()> {
        let request = form.validate()?;
        self.api.session().remember_register_email(&request.email);
        self.api.register(&request).await
    }

    /// Forget credentials and go back to the login page
    pub fn logout(&self, login_page: &str) {
        self.api.session().clear();
        self.api.navigator().go_to(login_page);
    }
}
