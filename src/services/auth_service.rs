use crate::error::ClientResult;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpMethod, HttpRequest};

impl ApiClient {
    /// `POST auth/login`, then persist tokens and profile.
    /// Sent without a bearer; a rejected login returns the server's text.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        log::info!("🔐 [LOGIN] Iniciando sesión para {}", email);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = HttpRequest::new(HttpMethod::Post, &self.url("auth/login")).with_json(&body)?;
        let response: LoginResponse = self.send_public(req).await?.json()?;
        let profile = self.session().store_login(&response)?;
        log::info!("✅ [LOGIN] Sesión iniciada (usuario {:?})", profile.id);
        Ok(profile)
    }

    /// `POST auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        log::info!("📝 [REGISTER] Registrando {}", request.email);
        let req = HttpRequest::new(HttpMethod::Post, &self.url("auth/register")).with_json(request)?;
        self.send_public(req).await?;
        log::info!("✅ [REGISTER] Registro completado");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ClientError;
    use crate::services::api_client::tests::Harness;
    use crate::services::http::HttpMethod;
    use crate::models::RegisterRequest;

    #[tokio::test]
    async fn login_stores_session_without_sending_bearer() {
        let h = Harness::logged_out();
        h.transport.mock_response(HttpMethod::Post, &h.url("auth/login"), 200, serde_json::json!({
            "accessToken": "x.y.z", "id": 12, "email": "a@b.kz", "firstName": "A", "lastName": "B", "balance": 5
        }));

        let profile = h.api.login("a@b.kz", "secret").await.unwrap();
        assert_eq!(profile.id, Some(12));
        assert_eq!(h.api.session().token().as_deref(), Some("x.y.z"));
        assert_eq!(h.api.session().user_id(), 12);

        let sent = &h.transport.requests.borrow()[0];
        assert!(sent.header("Authorization").is_none());
        assert_eq!(sent.json_body(), Some(serde_json::json!({"email": "a@b.kz", "password": "secret"})));
    }

    #[tokio::test]
    async fn failed_login_returns_server_text_and_keeps_page() {
        let h = Harness::logged_out();
        h.transport.mock_text(HttpMethod::Post, &h.url("auth/login"), 401, "Неверный пароль");

        let err = h.api.login("a@b.kz", "bad").await.unwrap_err();
        assert_eq!(err, ClientError::Status { status: 401, message: "Неверный пароль".into() });
        assert!(h.navigator.visits.borrow().is_empty());
    }

    #[tokio::test]
    async fn register_posts_zero_balance() {
        let h = Harness::logged_out();
        h.transport.mock_response(HttpMethod::Post, &h.url("auth/register"), 201, serde_json::json!({"id": 1}));
        let request = RegisterRequest {
            first_name: "Иван".into(),
            last_name: "Петров".into(),
            email: "i@p.kz".into(),
            password: "123456".into(),
            balance: 0.0,
        };
        h.api.register(&request).await.unwrap();
        let body = h.transport.requests.borrow()[0].json_body().unwrap();
        assert_eq!(body["balance"], 0.0);
        assert_eq!(body["firstName"], "Иван");
    }
}
