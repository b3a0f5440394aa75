// ============================================================================
// SESSION - Token, perfil en caché e identidad del usuario
// ============================================================================
// Única puerta de acceso a las credenciales persistidas. Ninguna otra parte
// del cliente lee oss_jwt_access ni oss_profile_user directamente.
// ============================================================================

use std::rc::Rc;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use crate::config::CONFIG;
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginResponse, TokenClaims, UserProfile};
use crate::utils::constants::*;
use crate::utils::storage::{load_from_storage, save_to_storage, BrowserStorage, KeyValueStore};

#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
    fallback_user_id: i64,
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>, fallback_user_id: i64) -> Self {
        Self { store, fallback_user_id }
    }

    /// Session backed by `window.localStorage`
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage), CONFIG.default_user_id)
    }

    pub fn storage(&self) -> Rc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.store.get_item(LS_ACCESS_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get_item(LS_REFRESH_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist tokens and profile from a successful login
    pub fn store_login(&self, response: &LoginResponse) -> ClientResult<UserProfile> {
        let token = response
            .bearer()
            .ok_or_else(|| ClientError::Parse("La respuesta de login no contiene token".to_string()))?;
        self.store.set_item(LS_ACCESS_TOKEN_KEY, token)?;
        if let Some(refresh) = response.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.store.set_item(LS_REFRESH_TOKEN_KEY, refresh)?;
        }
        let profile = response.profile();
        self.save_profile(&profile)?;
        log::info!("🔐 [SESSION] Sesión guardada para {}", profile.email);
        Ok(profile)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> ClientResult<()> {
        save_to_storage(self.store.as_ref(), LS_PROFILE_KEY, profile)
    }

    pub fn cached_profile(&self) -> Option<UserProfile> {
        load_from_storage(self.store.as_ref(), LS_PROFILE_KEY)
    }

    /// Unverified payload of the stored token
    pub fn token_claims(&self) -> Option<TokenClaims> {
        decode_token_claims(&self.token()?)
    }

    /// Cached profile id, then the token's `id` claim, then the fallback
    pub fn user_id(&self) -> i64 {
        if let Some(id) = self.cached_profile().and_then(|p| p.id).filter(|id| *id != 0) {
            return id;
        }
        if let Some(id) = self.token_claims().and_then(|c| c.user_id()).filter(|id| *id != 0) {
            return id;
        }
        self.fallback_user_id
    }

    pub fn has_moderator_role(&self) -> bool {
        if self.cached_profile().map(|p| p.is_moderator()).unwrap_or(false) {
            return true;
        }
        self.token_claims()
            .map(|c| c.has_role(MODERATOR_ROLE))
            .unwrap_or(false)
    }

    /// Forget tokens and cached profile
    pub fn clear(&self) {
        log::info!("🗑️ [SESSION] Limpiando credenciales");
        self.store.remove_item(LS_ACCESS_TOKEN_KEY);
        self.store.remove_item(LS_REFRESH_TOKEN_KEY);
        self.store.remove_item(LS_PROFILE_KEY);
    }

    pub fn remember_login_email(&self, email: &str) {
        self.remember(LS_LAST_LOGIN_EMAIL, email);
    }

    pub fn last_login_email(&self) -> Option<String> {
        self.store.get_item(LS_LAST_LOGIN_EMAIL)
    }

    pub fn remember_register_email(&self, email: &str) {
        self.remember(LS_LAST_REGISTER_EMAIL, email);
    }

    pub fn last_register_email(&self) -> Option<String> {
        self.store.get_item(LS_LAST_REGISTER_EMAIL)
    }

    fn remember(&self, key: &str, email: &str) {
        if let Err(e) = self.store.set_item(key, email) {
            log::warn!("⚠️ [SESSION] No se pudo recordar el email: {}", e);
        }
    }
}

/// Decode the payload segment of a JWT. Both base64 alphabets are accepted
/// and padding is optional; anything malformed yields `None`.
pub fn decode_token_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    pub fn make_token(payload: serde_json::Value) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload.to_string()))
    }

    fn session() -> (Rc<MemoryStorage>, SessionStore) {
        let store = Rc::new(MemoryStorage::new());
        (store.clone(), SessionStore::new(store, DEFAULT_USER_ID))
    }

    #[test]
    fn user_id_prefers_profile_then_token_then_default() {
        let (store, session) = session();
        assert_eq!(session.user_id(), DEFAULT_USER_ID);

        store.set_item(LS_ACCESS_TOKEN_KEY, &make_token(serde_json::json!({"id": 17}))).unwrap();
        assert_eq!(session.user_id(), 17);

        session.save_profile(&UserProfile { id: Some(5), ..Default::default() }).unwrap();
        assert_eq!(session.user_id(), 5);
    }

    #[test]
    fn undecodable_token_falls_through() {
        let (store, session) = session();
        store.set_item(LS_ACCESS_TOKEN_KEY, "not-a-jwt").unwrap();
        assert_eq!(session.user_id(), DEFAULT_USER_ID);
        store.set_item(LS_ACCESS_TOKEN_KEY, "a.%%%%.c").unwrap();
        assert_eq!(session.user_id(), DEFAULT_USER_ID);
        assert!(!session.has_moderator_role());
    }

    #[test]
    fn padded_standard_alphabet_payload_decodes() {
        let standard = base64::engine::general_purpose::STANDARD.encode(r#"{"id":3,"x":"??>"}"#);
        let claims = decode_token_claims(&format!("h.{}.s", standard)).unwrap();
        assert_eq!(claims.user_id(), Some(3));
    }

    #[test]
    fn moderator_from_profile_or_token() {
        let (store, session) = session();
        store.set_item(LS_ACCESS_TOKEN_KEY, &make_token(serde_json::json!({"authorities": ["ROLE_MODERATOR"]}))).unwrap();
        assert!(session.has_moderator_role());

        store.set_item(LS_ACCESS_TOKEN_KEY, &make_token(serde_json::json!({"roles": "ROLE_USER"}))).unwrap();
        assert!(!session.has_moderator_role());

        session.save_profile(&UserProfile { roles: vec![MODERATOR_ROLE.to_string()], ..Default::default() }).unwrap();
        assert!(session.has_moderator_role());
    }

    #[test]
    fn store_login_then_clear() {
        let (store, session) = session();
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "a.b.c", "refreshToken": "r", "id": 9, "email": "u@shop.kz", "balance": "10"
        })).unwrap();
        let profile = session.store_login(&response).unwrap();
        assert_eq!(profile.balance, 10.0);
        assert_eq!(session.token().as_deref(), Some("a.b.c"));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
        assert_eq!(session.user_id(), 9);

        session.remember_login_email("u@shop.kz");
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.cached_profile().is_none());
        assert!(!store.contains(LS_REFRESH_TOKEN_KEY));
        assert_eq!(session.last_login_email().as_deref(), Some("u@shop.kz"));
    }

    #[test]
    fn login_without_token_is_rejected() {
        let (_, session) = session();
        let response = LoginResponse { id: Some(1), ..Default::default() };
        assert!(session.store_login(&response).is_err());
        assert!(!session.is_authenticated());
    }
}
