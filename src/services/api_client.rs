// ============================================================================
// API CLIENT - Envoltorio autorizado sobre el transporte HTTP
// ============================================================================
// Inyecta el Bearer, traduce estados HTTP a ClientError y aplica la política
// 401/403 (borrar credenciales + ir al login) para TODOS los endpoints.
// Los endpoints concretos viven en los *_service.rs como `impl ApiClient`.
// ============================================================================

use std::rc::Rc;
use serde::{Serialize, de::DeserializeOwned};
use crate::config::CONFIG;
use crate::error::{ClientError, ClientResult};
use crate::services::http::{BrowserTransport, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::services::navigation::{BrowserNavigator, Navigator};
use crate::services::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    login_page: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            login_page: CONFIG.pages.login_page.clone(),
            transport,
            session,
            navigator,
        }
    }

    /// Client wired to gloo-net, localStorage and `window.location`
    pub fn browser() -> Self {
        Self::new(
            &CONFIG.api_base_url,
            Rc::new(BrowserTransport),
            SessionStore::browser(),
            Rc::new(BrowserNavigator),
        )
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        self.navigator.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send without credentials (login/register). Non-2xx bodies are handed
    /// back as the error message.
    pub(crate) async fn send_public(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let response = self.transport.send(req).await?;
        if response.ok() {
            Ok(response)
        } else {
            Err(ClientError::Status { status: response.status, message: response.text() })
        }
    }

    /// Send with `Authorization: Bearer <token>` when a token is stored.
    ///
    /// 401/403 clear the stored credentials, navigate to the login page and
    /// fail with [`ClientError::Unauthorized`]. Any other non-2xx becomes
    /// [`ClientError::Status`] carrying the response text.
    pub async fn send_authorized(&self, mut req: HttpRequest) -> ClientResult<HttpResponse> {
        if let Some(token) = self.session.token() {
            req = req.with_header("Authorization", &format!("Bearer {}", token));
        }
        let method = req.method;
        let url = req.url.clone();

        let response = self.transport.send(req).await.map_err(|e| {
            log::error!("❌ [API] {} {} sin respuesta: {}", method.as_str(), url, e);
            e
        })?;

        if response.status == 401 || response.status == 403 {
            log::warn!("🔒 [API] {} {} -> {}; cerrando sesión", method.as_str(), url, response.status);
            self.session.clear();
            self.navigator.go_to(&self.login_page);
            return Err(ClientError::Unauthorized);
        }
        if !response.ok() {
            log::warn!("⚠️ [API] {} {} -> HTTP {}", method.as_str(), url, response.status);
            return Err(ClientError::Status { status: response.status, message: response.text() });
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_authorized(HttpRequest::get(&self.url(path))).await?.json()
    }

    /// JSON request whose response body is not needed
    pub async fn send_json<B: Serialize + ?Sized>(&self, method: HttpMethod, path: &str, body: &B) -> ClientResult<HttpResponse> {
        let req = HttpRequest::new(method, &self.url(path)).with_json(body)?;
        self.send_authorized(req).await
    }

    pub async fn send_json_for<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(method, path, body).await?.json()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::http::MockTransport;
    use crate::services::navigation::RecordingNavigator;
    use crate::services::session::tests::make_token;
    use crate::utils::constants::*;
    use crate::utils::storage::{KeyValueStore, MemoryStorage};

    pub const BASE: &str = "http://api.test/api/v1";

    /// Client over in-memory fakes, already logged in as user 4
    pub struct Harness {
        pub api: ApiClient,
        pub transport: Rc<MockTransport>,
        pub store: Rc<MemoryStorage>,
        pub navigator: Rc<RecordingNavigator>,
    }

    impl Harness {
        pub fn new() -> Self {
            let store = Rc::new(MemoryStorage::new());
            let transport = Rc::new(MockTransport::new());
            let navigator = Rc::new(RecordingNavigator::new());
            store.set_item(LS_ACCESS_TOKEN_KEY, &make_token(serde_json::json!({"id": 4}))).unwrap();
            let session = SessionStore::new(store.clone(), DEFAULT_USER_ID);
            let api = ApiClient::new(BASE, transport.clone(), session, navigator.clone());
            Self { api, transport, store, navigator }
        }

        pub fn logged_out() -> Self {
            let harness = Self::new();
            harness.store.remove_item(LS_ACCESS_TOKEN_KEY);
            harness
        }

        pub fn url(&self, path: &str) -> String {
            self.api.url(path)
        }
    }

    #[tokio::test]
    async fn bearer_header_is_attached() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Get, &h.url("products/top_10"), 200, serde_json::json!([]));
        let _: Vec<serde_json::Value> = h.api.get_json("products/top_10").await.unwrap();

        let sent = h.transport.sent(HttpMethod::Get, &h.url("products/top_10"));
        let token = h.api.session().token().unwrap();
        assert_eq!(sent[0].header("Authorization"), Some(format!("Bearer {}", token).as_str()));
    }

    #[tokio::test]
    async fn no_header_without_token() {
        let h = Harness::logged_out();
        h.transport.mock_response(HttpMethod::Get, &h.url("products/1"), 200, serde_json::json!({"id": 1}));
        let _: serde_json::Value = h.api.get_json("products/1").await.unwrap();
        assert!(h.transport.requests.borrow()[0].header("Authorization").is_none());
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_redirects() {
        for status in [401u16, 403] {
            let h = Harness::new();
            h.store.set_item(LS_PROFILE_KEY, r#"{"id": 4}"#).unwrap();
            h.transport.mock_text(HttpMethod::Get, &h.url("carts/4"), status, "");

            let err = h.api.get_json::<serde_json::Value>("carts/4").await.unwrap_err();
            assert!(err.is_unauthorized());
            assert!(h.api.session().token().is_none());
            assert!(h.api.session().cached_profile().is_none());
            assert_eq!(h.navigator.last().as_deref(), Some("login.html"));
        }
    }

    #[tokio::test]
    async fn other_errors_carry_status_and_text() {
        let h = Harness::new();
        h.transport.mock_text(HttpMethod::Get, &h.url("orders/user/4"), 500, "boom");
        let err = h.api.get_json::<serde_json::Value>("orders/user/4").await.unwrap_err();
        assert_eq!(err, ClientError::Status { status: 500, message: "boom".into() });
        assert!(h.api.session().is_authenticated());
        assert!(h.navigator.visits.borrow().is_empty());
    }

    #[tokio::test]
    async fn transport_and_parse_failures_are_distinct() {
        let h = Harness::new();
        h.transport.mock_network_error(HttpMethod::Get, &h.url("products/top_10"));
        h.transport.mock_text(HttpMethod::Get, &h.url("products/2"), 200, "<html>");

        let network = h.api.get_json::<serde_json::Value>("products/top_10").await.unwrap_err();
        assert!(matches!(network, ClientError::Network(_)));
        let parse = h.api.get_json::<serde_json::Value>("products/2").await.unwrap_err();
        assert!(matches!(parse, ClientError::Parse(_)));
    }
}
