use reqwest::Method;
use wikift_core::models::{
    CounterPoint, FollowCounter, LoginParams, PasswordUpdate, RegisterParams, TokenResponse, User,
    UserType,
};
use wikift_core::DbId;

use crate::client::ApiClient;
use crate::endpoints::{self, with_param};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::session::{CookieSessionStore, Session};

/// Account, profile and follow-relation endpoints.
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token, then load the user's profile.
    ///
    /// On success both entries are written to `store` and the new session is
    /// returned. On failure the pending login name is forgotten and nothing
    /// else is stored.
    pub async fn login(&self, params: &LoginParams, store: &CookieSessionStore) -> ApiResult<Session> {
        store.remember_login_name(&params.username);
        match self.login_inner(params, store).await {
            Ok(session) => {
                tracing::info!(username = %params.username, "Logged in");
                Ok(session)
            }
            Err(e) => {
                store.forget_login_name();
                tracing::warn!(username = %params.username, error = %e, "Login failed");
                Err(e)
            }
        }
    }

    async fn login_inner(&self, params: &LoginParams, store: &CookieSessionStore) -> ApiResult<Session> {
        let config = self.client.config();
        let options = RequestOptions::client().with_query_pairs([
            ("username", params.username.as_str()),
            ("password", params.password.as_str()),
            ("grant_type", config.grant_type.as_str()),
            ("client_id", config.client_id.as_str()),
        ]);
        let token: TokenResponse = self
            .client
            .call_bare(Method::POST, &config.auth_url, options)
            .await?;

        let provisional = Session::new(None, Some(token.access_token.clone()));
        let user = self
            .client
            .with_session(provisional)
            .users()
            .info(&params.username)
            .await?;

        store.save_token(&token.access_token, chrono::Utc::now());
        if let Err(e) = store.save_user(&user) {
            tracing::error!(error = %e, "Failed to persist user info");
        }
        Ok(Session::authenticated(user, token.access_token))
    }

    /// Public profile by username.
    pub async fn info(&self, username: &str) -> ApiResult<User> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::USER_INFO, username),
                RequestOptions::token_json(),
            )
            .await
    }

    pub async fn register(&self, params: &RegisterParams) -> ApiResult<User> {
        self.client
            .call_with(
                Method::POST,
                endpoints::USER_REGISTER,
                RequestOptions::json(),
                params,
            )
            .await
    }

    pub async fn update(&self, user: &User) -> ApiResult<User> {
        self.client
            .call_with(
                Method::PUT,
                endpoints::USER_UPDATE,
                RequestOptions::token_json(),
                user,
            )
            .await
    }

    pub async fn update_email(&self, user: &User) -> ApiResult<User> {
        self.client
            .call_with(
                Method::PUT,
                endpoints::USER_UPDATE_EMAIL,
                RequestOptions::token_json(),
                user,
            )
            .await
    }

    pub async fn update_password(&self, params: &PasswordUpdate) -> ApiResult<User> {
        self.client
            .call_with(
                Method::PUT,
                endpoints::USER_UPDATE_PASSWORD,
                RequestOptions::token_json(),
                params,
            )
            .await
    }

    /// Leaderboard of the most active users.
    pub async fn top_by_active(&self) -> ApiResult<Vec<User>> {
        self.client
            .call(
                Method::GET,
                endpoints::USER_TOP_BY_ACTIVE,
                RequestOptions::plain(),
            )
            .await
    }

    /// Submit `actor` with a single follow edge towards `target`.
    ///
    /// Returns the backend's verdict; a falsy answer means nothing changed.
    pub async fn follow(&self, actor: &User, target: &User) -> ApiResult<bool> {
        let body = actor.with_follow(target);
        let verdict: Option<serde_json::Value> = self
            .client
            .call_with(
                Method::PUT,
                endpoints::USER_FOLLOW,
                RequestOptions::token_json(),
                &body,
            )
            .await?;
        Ok(is_truthy(verdict.as_ref()))
    }

    /// Remove the follow edge from `actor` to `target`.
    pub async fn unfollow(&self, actor: &User, target: &User) -> ApiResult<bool> {
        let body = actor.with_follow(target);
        let verdict: Option<serde_json::Value> = self
            .client
            .call_with(
                Method::PUT,
                endpoints::USER_UNFOLLOW,
                RequestOptions::token_json(),
                &body,
            )
            .await?;
        Ok(is_truthy(verdict.as_ref()))
    }

    /// Whether `follower` currently follows `followee`.
    pub async fn follow_check(&self, follower: DbId, followee: DbId) -> ApiResult<bool> {
        let verdict: Option<serde_json::Value> = self
            .client
            .call(
                Method::GET,
                endpoints::USER_FOLLOW_CHECK,
                RequestOptions::token()
                    .with_query("followUserId", follower)
                    .with_query("coverUserId", followee),
            )
            .await?;
        Ok(is_truthy(verdict.as_ref()))
    }

    pub async fn follows_count(&self, user_id: DbId) -> ApiResult<FollowCounter> {
        self.client
            .call(
                Method::GET,
                endpoints::USER_FOLLOW_COUNT,
                RequestOptions::token().with_query("followUserId", user_id),
            )
            .await
    }

    /// Users that `username` follows.
    pub async fn following(&self, username: &str) -> ApiResult<Vec<User>> {
        self.client
            .call(
                Method::GET,
                endpoints::USER_FOLLOWING,
                RequestOptions::token().with_query("userName", username),
            )
            .await
    }

    pub async fn user_type(&self, username: &str) -> ApiResult<UserType> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::USER_TYPE, username),
                RequestOptions::plain(),
            )
            .await
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.client
            .call(
                Method::GET,
                endpoints::USER_PUBLIC_LIST,
                RequestOptions::plain(),
            )
            .await
    }

    /// Per-day contribution counts, for the profile heatmap.
    pub async fn contribution(&self, username: &str) -> ApiResult<Vec<CounterPoint>> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::USER_CONTRIBUTION, username),
                RequestOptions::plain(),
            )
            .await
    }
}

/// Interpret a loosely typed backend verdict: `true`, non-zero numbers,
/// non-empty strings/collections and objects count as yes.
pub(crate) fn is_truthy(value: Option<&serde_json::Value>) -> bool {
    use serde_json::Value;
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!({"id": 1}))));
    }
}
