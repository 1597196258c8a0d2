use std::sync::Arc;

use wikift_client::fake::ScriptedTransport;
use wikift_client::{ApiClient, ClientConfig, Session};
use wikift_core::models::User;

/// A fresh scripted transport plus a client bound to it.
pub fn client_with(session: Session) -> (Arc<ScriptedTransport>, ApiClient) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = ApiClient::new(
        Arc::clone(&transport) as Arc<dyn wikift_client::Transport>,
        Arc::new(ClientConfig::default()),
        session,
    );
    (transport, client)
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        ..Default::default()
    }
}

/// Signed-in session for `alice` (id 1) with token `tok`.
pub fn alice_session() -> Session {
    Session::authenticated(user(1, "alice"), "tok")
}
