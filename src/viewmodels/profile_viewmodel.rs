// ============================================================================
// PROFILE VIEWMODEL - Perfil, saldo y contraseña
// ============================================================================
// El perfil en caché (oss_profile_user) es el mismo que usa SessionStore
// para resolver el id de usuario y el rol de moderador.
// ============================================================================

use std::rc::Rc;
use crate::error::{ClientError, ClientResult};
use crate::models::{ChangePasswordRequest, RechargeRequest, UpdateProfileRequest, UserProfile};
use crate::services::{ApiClient, SnapshotCache, SyncOutcome};
use crate::utils::constants::{LS_PROFILE_KEY, MIN_PASSWORD_LEN};

pub const PROFILE_LOAD_FAILED: &str = "Не удалось загрузить профиль";
pub const NAMES_REQUIRED: &str = "Имя и фамилия обязательны";
pub const PROFILE_UPDATE_FAILED: &str = "Не удалось обновить профиль";
pub const PROFILE_UPDATED: &str = "Профиль обновлён";
pub const INVALID_AMOUNT: &str = "Введите корректную сумму больше нуля";
pub const RECHARGE_FAILED: &str = "Не удалось пополнить баланс";
pub const RECHARGED: &str = "Баланс пополнен";
pub const PASSWORD_FIELDS_REQUIRED: &str = "Все поля обязательны";
pub const NEW_PASSWORD_TOO_SHORT: &str = "Новый пароль должен быть не короче 6 символов";
pub const PASSWORDS_DIFFER: &str = "Пароли не совпадают";
pub const PASSWORD_CHANGE_FAILED: &str = "Не удалось сменить пароль";
pub const PASSWORD_CHANGED: &str = "Пароль изменён";

pub fn validate_names(first_name: &str, last_name: &str) -> ClientResult<(String, String)> {
    let (first, last) = (first_name.trim(), last_name.trim());
    if first.is_empty() || last.is_empty() {
        return Err(ClientError::validation(NAMES_REQUIRED));
    }
    Ok((first.to_string(), last.to_string()))
}

/// A finite number strictly greater than zero
pub fn parse_amount(raw: &str) -> ClientResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or_else(|| ClientError::validation(INVALID_AMOUNT))
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> ClientResult<()> {
    let (current, new, confirm) = (current.trim(), new.trim(), confirm.trim());
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(ClientError::validation(PASSWORD_FIELDS_REQUIRED));
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::validation(NEW_PASSWORD_TOO_SHORT));
    }
    if new != confirm {
        return Err(ClientError::validation(PASSWORDS_DIFFER));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ProfileViewModel {
    api: ApiClient,
    cache: Rc<SnapshotCache<Option<UserProfile>>>,
}

impl ProfileViewModel {
    pub fn new(api: ApiClient) -> Self {
        let cache = Rc::new(SnapshotCache::new(api.session().storage(), LS_PROFILE_KEY));
        Self { api, cache }
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.cache.current()
    }

    pub fn is_moderator(&self) -> bool {
        self.api.session().has_moderator_role()
    }

    /// Cached profile first, then `GET users/{id}`
    pub async fn load<P: FnMut(&Option<UserProfile>)>(&self, paint: P) -> SyncOutcome {
        let api = self.api.clone();
        let user_id = api.session().user_id();
        let cached = self.cache.persisted().flatten();
        self.cache
            .load(
                || async move {
                    let fresh = api.get_user(user_id).await?;
                    Ok(Some(keep_known_roles(fresh, cached.as_ref())))
                },
                paint,
            )
            .await
    }

    pub async fn update_names(&self, first_name: &str, last_name: &str) -> ClientResult<UserProfile> {
        let (first_name, last_name) = validate_names(first_name, last_name)?;
        let request = UpdateProfileRequest {
            id: self.api.session().user_id(),
            first_name,
            last_name,
        };
        let updated = self.api.update_profile(&request).await?;
        Ok(self.remember(updated))
    }

    pub async fn recharge(&self, raw_amount: &str) -> ClientResult<UserProfile> {
        let amount = parse_amount(raw_amount)?;
        let request = RechargeRequest {
            user_id: self.api.session().user_id(),
            amount,
        };
        let updated = self.api.recharge(&request).await?;
        Ok(self.remember(updated))
    }

    pub async fn change_password(&self, current: &str, new: &str, confirm: &str) -> ClientResult<()> {
        validate_password_change(current, new, confirm)?;
        let request = ChangePasswordRequest {
            id: self.api.session().user_id(),
            current_password: current.trim().to_string(),
            new_password: new.trim().to_string(),
        };
        self.api.change_password(&request).await
    }

    pub fn logout(&self) {
        log::info!("👋 [PROFILE] Cerrando sesión");
        self.api.session().clear();
        self.cache.clear();
    }

    fn remember(&self, updated: UserProfile) -> UserProfile {
        let merged = keep_known_roles(updated, self.cache.current().as_ref());
        self.cache.replace(Some(merged.clone()));
        merged
    }
}

/// `users/*` responses may omit roles; keep the ones we already know
fn keep_known_roles(mut fresh: UserProfile, known: Option<&UserProfile>) -> UserProfile {
    if fresh.roles.is_empty() {
        if let Some(known) = known {
            fresh.roles = known.roles.clone();
        }
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::HttpMethod;
    use crate::utils::constants::MODERATOR_ROLE;
    use serde_json::json;

    fn cached_moderator(h: &Harness) {
        let profile = UserProfile {
            id: Some(4),
            email: "m@shop.kz".into(),
            first_name: "Old".into(),
            last_name: "Name".into(),
            balance: 1.0,
            roles: vec![MODERATOR_ROLE.to_string()],
        };
        h.api.session().save_profile(&profile).unwrap();
    }

    #[test]
    fn amount_rules() {
        assert_eq!(parse_amount(" 100.5 "), Ok(100.5));
        for bad in ["", "0", "-3", "abc", "NaN", "inf"] {
            assert_eq!(parse_amount(bad), Err(ClientError::validation(INVALID_AMOUNT)), "{}", bad);
        }
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(validate_password_change("", "123456", "123456"), Err(ClientError::validation(PASSWORD_FIELDS_REQUIRED)));
        assert_eq!(validate_password_change("old", "12345", "12345"), Err(ClientError::validation(NEW_PASSWORD_TOO_SHORT)));
        assert_eq!(validate_password_change("old", "123456", "654321"), Err(ClientError::validation(PASSWORDS_DIFFER)));
        assert_eq!(validate_password_change("old", "пароль", "пароль"), Ok(()));
    }

    #[test]
    fn names_required() {
        assert_eq!(validate_names(" ", "B"), Err(ClientError::validation(NAMES_REQUIRED)));
        assert_eq!(validate_names(" A ", "B"), Ok(("A".to_string(), "B".to_string())));
    }

    #[tokio::test]
    async fn load_paints_cache_then_server() {
        let h = Harness::new();
        cached_moderator(&h);
        h.transport.mock_response(HttpMethod::Get, &h.url("users/4"), 200, json!({
            "id": 4, "email": "m@shop.kz", "firstName": "New", "lastName": "Name", "balance": "25.5"
        }));
        let vm = ProfileViewModel::new(h.api.clone());
        let mut names = Vec::new();

        let outcome = vm.load(|p| names.push(p.as_ref().map(|p| p.first_name.clone()))).await;

        assert!(outcome.is_fresh());
        assert_eq!(names, vec![Some("Old".to_string()), Some("New".to_string())]);
        assert_eq!(vm.profile().map(|p| p.balance), Some(25.5));
        assert!(vm.is_moderator());
    }

    #[tokio::test]
    async fn load_failure_without_cache_is_empty() {
        let h = Harness::new();
        h.transport.mock_text(HttpMethod::Get, &h.url("users/4"), 500, "");
        let vm = ProfileViewModel::new(h.api.clone());
        assert!(matches!(vm.load(|_| {}).await, SyncOutcome::Empty(_)));
        assert_eq!(vm.profile(), None);
    }

    #[tokio::test]
    async fn recharge_renders_returned_user() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Patch, &h.url("users/recharge"), 200, json!({
            "id": 4, "email": "a@b.kz", "firstName": "A", "lastName": "B", "balance": 150
        }));
        let vm = ProfileViewModel::new(h.api.clone());

        let updated = vm.recharge("50").await.unwrap();

        assert_eq!(updated.balance, 150.0);
        let sent = h.transport.sent(HttpMethod::Patch, &h.url("users/recharge"));
        assert_eq!(sent[0].json_body(), Some(json!({"userId": 4, "amount": 50.0})));
        assert_eq!(h.api.session().cached_profile().map(|p| p.balance), Some(150.0));
    }

    #[tokio::test]
    async fn invalid_forms_send_nothing() {
        let h = Harness::new();
        let vm = ProfileViewModel::new(h.api.clone());
        assert!(vm.recharge("0").await.is_err());
        assert!(vm.update_names("", "x").await.is_err());
        assert!(vm.change_password("a", "b", "b").await.is_err());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn update_keeps_moderator_role() {
        let h = Harness::new();
        cached_moderator(&h);
        h.transport.mock_response(HttpMethod::Put, &h.url("users/update"), 200, json!({
            "id": 4, "email": "m@shop.kz", "firstName": "Ivan", "lastName": "P", "balance": 1
        }));
        let vm = ProfileViewModel::new(h.api.clone());
        vm.load(|_| {}).await;

        let updated = vm.update_names("Ivan", "P").await.unwrap();

        assert!(updated.is_moderator());
        let sent = h.transport.sent(HttpMethod::Put, &h.url("users/update"));
        assert_eq!(sent[0].json_body(), Some(json!({"id": 4, "firstName": "Ivan", "lastName": "P"})));
    }

    #[tokio::test]
    async fn password_change_sends_camel_case() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Patch, &h.url("users/change_password"), 200, json!({}));
        ProfileViewModel::new(h.api.clone())
            .change_password("old", "secret1", "secret1")
            .await
            .unwrap();
        let sent = h.transport.sent(HttpMethod::Patch, &h.url("users/change_password"));
        assert_eq!(sent[0].json_body(), Some(json!({
            "id": 4, "currentPassword": "old", "newPassword": "secret1"
        })));
    }

    #[tokio::test]
    async fn logout_clears_credentials() {
        let h = Harness::new();
        cached_moderator(&h);
        let vm = ProfileViewModel::new(h.api.clone());
        vm.logout();
        assert!(!h.api.session().is_authenticated());
        assert!(h.api.session().cached_profile().is_none());
    }
}
