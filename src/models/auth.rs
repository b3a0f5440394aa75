use serde::{Deserialize, Serialize};
use crate::models::session::UserProfile;
use crate::utils::serde_helper::lenient_f64;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST auth/login` body. The token may come as `accessToken` or `token`;
/// the profile fields sit at the top level next to it.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: f64,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LoginResponse {
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref()
            .or(self.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            balance: self.balance,
            roles: self.roles.clone(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub balance: f64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    pub user_id: i64,
    pub amount: f64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub id: i64,
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_falls_back_to_token_field() {
        let res: LoginResponse = serde_json::from_str(r#"{"token": "t.k.n", "id": 3}"#).unwrap();
        assert_eq!(res.bearer(), Some("t.k.n"));

        let res: LoginResponse =
            serde_json::from_str(r#"{"accessToken": "a", "token": "b", "refreshToken": "r"}"#).unwrap();
        assert_eq!(res.bearer(), Some("a"));
        assert_eq!(res.refresh_token.as_deref(), Some("r"));

        let res: LoginResponse = serde_json::from_str(r#"{"accessToken": ""}"#).unwrap();
        assert_eq!(res.bearer(), None);
    }

    #[test]
    fn request_bodies_use_backend_field_names() {
        let body = serde_json::to_value(RechargeRequest { user_id: 7, amount: 100.0 }).unwrap();
        assert_eq!(body, serde_json::json!({"userId": 7, "amount": 100.0}));

        let body = serde_json::to_value(ChangePasswordRequest {
            id: 7,
            current_password: "old".into(),
            new_password: "newpass".into(),
        }).unwrap();
        assert_eq!(body["currentPassword"], "old");
        assert_eq!(body["newPassword"], "newpass");
    }
}
