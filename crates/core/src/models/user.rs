use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A platform account.
///
/// `follows` is only populated when submitting a follow relation: the acting
/// user is sent with a one-element list holding the target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follows: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

impl User {
    /// Copy of `self` carrying a single follow edge towards `target`.
    pub fn with_follow(&self, target: &User) -> Self {
        let mut target = target.clone();
        target.follows.clear();
        Self {
            follows: vec![target],
            ..self.clone()
        }
    }

    /// Name to show in the UI: the alias when set, the username otherwise.
    pub fn display_name(&self) -> &str {
        self.alias_name
            .as_deref()
            .filter(|alias| !alias.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserType {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
}

/// Credentials for the OAuth password grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

/// Bare token document returned by the OAuth endpoint (not enveloped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParams {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub id: DbId,
    pub password: String,
}
