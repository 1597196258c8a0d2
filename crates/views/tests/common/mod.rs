#![allow(dead_code)]

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tokio::sync::broadcast;
use wikift_client::fake::{Reply, ScriptedTransport};
use wikift_client::{ApiClient, ClientConfig, Session, Transport};
use wikift_core::models::User;
use wikift_core::DeviceInfo;
use wikift_views::{Notice, Notifier};

pub const ARTICLE_ID: i64 = 7;
pub const AUTHOR_ID: i64 = 2;

/// Scripted backend, a client bound to it, and a notifier.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub client: ApiClient,
    pub notifier: Notifier,
}

impl Harness {
    pub fn new(session: Session) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(ClientConfig::default()),
            session,
        );
        Self {
            transport,
            client,
            notifier: Notifier::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Session::anonymous())
    }

    pub fn signed_in() -> Self {
        Self::new(Session::authenticated(alice(), "tok"))
    }

    pub fn count(&self, method: Method, endpoint: &str) -> usize {
        self.transport.count(&method, endpoint)
    }
}

pub fn alice() -> User {
    User {
        id: 1,
        username: "alice".into(),
        ..Default::default()
    }
}

pub fn device() -> DeviceInfo {
    DeviceInfo {
        user_agent: "Mozilla/5.0".into(),
        browser: "firefox".into(),
        browser_version: "120".into(),
        os: "linux".into(),
        os_version: "6".into(),
    }
}

pub fn article_json() -> serde_json::Value {
    json!({
        "id": ARTICLE_ID,
        "title": "Ownership",
        "content": "borrow all the things",
        "user": { "id": AUTHOR_ID, "username": "bob" },
    })
}

pub fn comment_json(id: i64, content: &str) -> serde_json::Value {
    json!({ "id": id, "content": content, "user": { "id": 3, "username": "carol" } })
}

pub fn trend_json() -> serde_json::Value {
    json!([
        { "dataKey": "2018-02-01", "dataValue": 2 },
        { "dataKey": "2018-02-02", "dataValue": 5 },
    ])
}

/// Script every call of the article detail sequence to succeed.
pub fn script_article_detail(transport: &ScriptedTransport) {
    transport
        .respond(Method::GET, "public/article/info/7", Reply::data(article_json()))
        .respond(Method::POST, "public/article/view", Reply::empty())
        .respond(
            Method::GET,
            "public/comment/list/7",
            Reply::page(&[comment_json(1, "first"), comment_json(2, "second")], 12),
        )
        .respond(Method::GET, "article/fabulous/check", Reply::data(0))
        .respond(Method::GET, "user/follow/check", Reply::data(false))
        .respond(Method::GET, "comment/counter/week/7", Reply::data(trend_json()))
        .respond(Method::GET, "public/article/view/7", Reply::data(trend_json()));
}

/// Every notice queued so far.
pub fn drain(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}
