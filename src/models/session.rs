use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::constants::MODERATOR_ROLE;
use crate::utils::serde_helper::lenient_f64;

/// Cached user profile (`oss_profile_user`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
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

impl UserProfile {
    pub fn is_moderator(&self) -> bool {
        self.roles.iter().any(|r| r == MODERATOR_ROLE)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Claims read from the (unverified) token payload segment.
/// Only used as a UX hint: which user id to ask for, whether to show the
/// moderator button. Never an authorization decision.
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct TokenClaims {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub roles: Option<Value>,
    #[serde(default)]
    pub authorities: Option<Value>,
    #[serde(default)]
    pub role: Option<Value>,
}

impl TokenClaims {
    /// `id` as an integer; numeric strings are accepted
    pub fn user_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// First present of `roles`, `authorities`, `role`; array or single string
    pub fn has_role(&self, wanted: &str) -> bool {
        let claim = self.roles.as_ref()
            .or(self.authorities.as_ref())
            .or(self.role.as_ref());
        match claim {
            Some(Value::Array(items)) => items.iter().any(|v| match v {
                Value::String(s) => s == wanted,
                Value::Object(obj) => obj.get("authority").and_then(Value::as_str) == Some(wanted),
                _ => false,
            }),
            Some(Value::String(s)) => s == wanted,
            _ => false,
        }
    }
}
