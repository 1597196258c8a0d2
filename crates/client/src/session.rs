//! Session context and its cookie-backed persistence.
//!
//! A [`Session`] is a plain value: whoever builds an [`ApiClient`] or a view
//! passes one in explicitly. [`CookieSessionStore`] persists it as two
//! cookie-like entries, the serialized user and the auth token; only the
//! token entry expires.
//!
//! [`ApiClient`]: crate::client::ApiClient

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use wikift_core::models::User;
use wikift_core::Timestamp;

/// Cookie holding the serialized current user.
pub const USER_INFO_KEY: &str = "WIKIFT_USER_INFO";
/// Cookie holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "WIKIFT_AUTH_TOKEN";
/// Cookie holding the username while a login is in flight.
pub const AUTH_USER_NAME_KEY: &str = "WIKIFT_AUTH_USER_NAME";

/// Identity and credentials of the current visitor.
///
/// No user means anonymous view mode: calls that only make sense for a
/// signed-in user are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(user: Option<User>, token: Option<String>) -> Self {
        Self { user, token }
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Errors reading or writing the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Stored user info is not valid JSON: {0}")]
    CorruptUserInfo(#[source] serde_json::Error),

    #[error("Failed to serialize user info: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone)]
struct CookieEntry {
    value: String,
    expires_at: Option<Timestamp>,
}

/// Minimal in-memory cookie jar with per-entry expiry.
#[derive(Debug, Default)]
pub struct CookieJar {
    entries: HashMap<String, CookieEntry>,
}

impl CookieJar {
    pub fn set(&mut self, name: &str, value: impl Into<String>, expires_at: Option<Timestamp>) {
        self.entries.insert(
            name.to_string(),
            CookieEntry {
                value: value.into(),
                expires_at,
            },
        );
    }

    /// Value of `name` if present and not expired at `now`.
    pub fn get(&self, name: &str, now: Timestamp) -> Option<&str> {
        self.entries
            .get(name)
            .filter(|entry| entry.expires_at.map_or(true, |at| now < at))
            .map(|entry| entry.value.as_str())
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Persists the session as cookie entries.
#[derive(Debug)]
pub struct CookieSessionStore {
    jar: RwLock<CookieJar>,
    token_ttl: Duration,
}

impl CookieSessionStore {
    pub fn new(token_ttl: Duration) -> Self {
        Self {
            jar: RwLock::new(CookieJar::default()),
            token_ttl,
        }
    }

    /// Store the auth token, expiring `token_ttl` after `now`.
    pub fn save_token(&self, token: &str, now: Timestamp) {
        let expires_at = chrono::Duration::from_std(self.token_ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl));
        self.write().set(AUTH_TOKEN_KEY, token, expires_at);
    }

    /// Store the serialized user. This entry does not expire.
    pub fn save_user(&self, user: &User) -> Result<(), SessionError> {
        let blob = serde_json::to_string(user).map_err(SessionError::Serialize)?;
        self.write().set(USER_INFO_KEY, blob, None);
        Ok(())
    }

    /// Remember which username a login is being attempted for.
    pub fn remember_login_name(&self, username: &str) {
        self.write().set(AUTH_USER_NAME_KEY, username, None);
    }

    pub fn forget_login_name(&self) {
        self.write().remove(AUTH_USER_NAME_KEY);
    }

    /// The session as of now.
    pub fn load(&self) -> Result<Session, SessionError> {
        self.load_at(chrono::Utc::now())
    }

    /// The session as it stands at `now`. An expired token reads as absent.
    pub fn load_at(&self, now: Timestamp) -> Result<Session, SessionError> {
        let jar = self.jar.read().unwrap_or_else(PoisonError::into_inner);
        let user = jar
            .get(USER_INFO_KEY, now)
            .map(serde_json::from_str::<User>)
            .transpose()
            .map_err(SessionError::CorruptUserInfo)?;
        let token = jar.get(AUTH_TOKEN_KEY, now).map(str::to_string);
        Ok(Session { user, token })
    }

    /// Drop every entry (logout).
    pub fn clear(&self) {
        self.write().clear();
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CookieJar> {
        self.jar.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> Timestamp {
        chrono::Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_store_is_anonymous() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        let session = store.load_at(at(0)).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn saved_session_round_trips() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        store.save_user(&alice()).unwrap();
        store.save_token("tok", at(0));
        let session = store.load_at(at(10)).unwrap();
        assert_eq!(session.user().map(|u| u.id), Some(1));
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn token_expires_but_user_info_does_not() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        store.save_user(&alice()).unwrap();
        store.save_token("tok", at(0));

        let before = store.load_at(at(3599)).unwrap();
        assert_eq!(before.token(), Some("tok"));

        let after = store.load_at(at(3600)).unwrap();
        assert!(after.token().is_none());
        assert!(after.is_authenticated());
    }

    #[test]
    fn corrupt_user_blob_is_reported() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        store.write().set(USER_INFO_KEY, "{not json", None);
        assert_matches!(store.load_at(at(0)), Err(SessionError::CorruptUserInfo(_)));
    }

    #[test]
    fn clear_logs_out() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        store.save_user(&alice()).unwrap();
        store.save_token("tok", at(0));
        store.clear();
        assert_eq!(store.load_at(at(1)).unwrap(), Session::anonymous());
    }
}
