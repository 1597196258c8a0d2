//! Request options and the transport-neutral request value.
//!
//! [`RequestOptions`] carries the two flags every endpoint is classified by
//! (needs auth, sends JSON) plus query parameters. Turning options into
//! headers is a pure function of the options and the [`Session`]: the
//! `Authorization` header is present iff auth is requested and a token
//! exists. A missing token never short-circuits the call; the backend answers
//! with its own auth error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::session::Session;

/// How a request authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    None,
    /// `Authorization: Bearer <session token>`.
    Bearer,
    /// `Authorization: Basic <client_id:client_secret>`, for the token endpoint.
    ClientCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub auth: AuthMode,
    pub json: bool,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// No auth, no body type.
    pub fn plain() -> Self {
        Self::default()
    }

    /// JSON body, no auth.
    pub fn json() -> Self {
        Self {
            json: true,
            ..Self::default()
        }
    }

    /// Bearer auth, no body type.
    pub fn token() -> Self {
        Self {
            auth: AuthMode::Bearer,
            ..Self::default()
        }
    }

    /// Bearer auth and JSON body.
    pub fn token_json() -> Self {
        Self {
            auth: AuthMode::Bearer,
            json: true,
            ..Self::default()
        }
    }

    /// OAuth client credentials.
    pub fn client() -> Self {
        Self {
            auth: AuthMode::ClientCredentials,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Headers these options produce for the given session.
    pub fn headers(&self, session: &Session, config: &ClientConfig) -> Vec<(HeaderName, String)> {
        let mut headers = Vec::with_capacity(2);
        if self.json {
            headers.push((CONTENT_TYPE, "application/json".to_string()));
        }
        match self.auth {
            AuthMode::None => {}
            AuthMode::Bearer => {
                if let Some(token) = session.token() {
                    headers.push((AUTHORIZATION, format!("Bearer {token}")));
                }
            }
            AuthMode::ClientCredentials => {
                let credentials =
                    STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret));
                headers.push((AUTHORIZATION, format!("Basic {credentials}")));
            }
        }
        headers
    }
}

/// A fully resolved request, ready for a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint relative to the API base (or the absolute URL for the token
    /// endpoint). Used for logging and by the scripted transport.
    pub endpoint: String,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(HeaderName, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use wikift_core::models::User;

    use super::*;

    fn signed_in() -> Session {
        Session::authenticated(
            User {
                id: 1,
                username: "alice".into(),
                ..Default::default()
            },
            "tok",
        )
    }

    fn auth_header(options: &RequestOptions, session: &Session) -> Option<String> {
        options
            .headers(session, &ClientConfig::default())
            .into_iter()
            .find(|(name, _)| name == AUTHORIZATION)
            .map(|(_, value)| value)
    }

    #[test]
    fn authorization_present_iff_flag_and_token() {
        let with_token = signed_in();
        let without_token = Session::new(with_token.user().cloned(), None);

        for options in [
            RequestOptions::plain(),
            RequestOptions::json(),
            RequestOptions::token(),
            RequestOptions::token_json(),
        ] {
            for session in [&with_token, &without_token, &Session::anonymous()] {
                let expected = options.auth == AuthMode::Bearer && session.token().is_some();
                assert_eq!(
                    auth_header(&options, session).is_some(),
                    expected,
                    "options {options:?}, token {:?}",
                    session.token()
                );
            }
        }
    }

    #[test]
    fn bearer_header_format() {
        assert_eq!(
            auth_header(&RequestOptions::token(), &signed_in()).as_deref(),
            Some("Bearer tok")
        );
    }

    #[test]
    fn content_type_only_for_json() {
        let headers = RequestOptions::json().headers(&Session::anonymous(), &ClientConfig::default());
        assert_eq!(headers, vec![(CONTENT_TYPE, "application/json".to_string())]);
        assert!(RequestOptions::plain()
            .headers(&Session::anonymous(), &ClientConfig::default())
            .is_empty());
    }

    #[test]
    fn client_credentials_use_basic_auth() {
        let config = ClientConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            ..ClientConfig::default()
        };
        let headers = RequestOptions::client().headers(&Session::anonymous(), &config);
        assert_eq!(headers, vec![(AUTHORIZATION, "Basic aWQ6c2VjcmV0".to_string())]);
    }

    #[test]
    fn query_pairs_keep_order() {
        let options = RequestOptions::token()
            .with_query("followUserId", 1)
            .with_query_pairs([("coverUserId", "2")]);
        assert_eq!(
            options.query,
            vec![
                ("followUserId".to_string(), "1".to_string()),
                ("coverUserId".to_string(), "2".to_string()),
            ]
        );
    }
}
