//! Command-line front end: opens one article detail view and logs its state.
//!
//! Configuration comes from the environment (see `ClientConfig::from_env`).
//! Extra variables:
//!
//! - `WIKIFT_ARTICLE_ID`: article to open (default `1`)
//! - `WIKIFT_USERNAME` / `WIKIFT_PASSWORD`: sign in first when both are set,
//!   otherwise browse anonymously. The session store lives for one run.
//! - `WIKIFT_LOG_JSON=1`: emit JSON logs

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wikift_client::{ApiClient, ClientConfig, CookieSessionStore, HttpTransport, Session};
use wikift_core::models::LoginParams;
use wikift_core::DeviceInfo;
use wikift_views::{ArticleDetailView, Notifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Arc::new(ClientConfig::from_env().context("Invalid configuration")?);
    let transport = Arc::new(
        HttpTransport::new(config.request_timeout).context("Failed to build HTTP client")?,
    );
    let store = CookieSessionStore::new(config.token_ttl);
    let anonymous = ApiClient::new(transport, Arc::clone(&config), Session::anonymous());

    let session = match credentials() {
        Some(params) => anonymous
            .users()
            .login(&params, &store)
            .await
            .context("Login failed")?,
        None => Session::anonymous(),
    };
    let client = anonymous.with_session(session);

    let article_id: i64 = std::env::var("WIKIFT_ARTICLE_ID")
        .unwrap_or_else(|_| "1".into())
        .parse()
        .context("WIKIFT_ARTICLE_ID must be a number")?;

    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            tracing::info!(level = ?notice.level, "{}", notice.message);
        }
    });

    let mut view = ArticleDetailView::new(client, notifier, article_id, host_device());
    let scope = view.scope();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted");
            scope.teardown();
        }
    });

    view.initialize().await?;

    let state = view.state();
    if let Some(article) = &state.article {
        tracing::info!(
            article_id = article.id,
            title = %article.title,
            author = %article.user.display_name(),
            comments = state.comments.len(),
            comment_pages = state.comment_cursor.total_pages,
            fabulous_status = state.fabulous_status,
            can_follow = state.can_follow,
            "Article loaded",
        );
    }
    for (i, comment) in state.comments.iter().enumerate() {
        let author = comment
            .user
            .as_ref()
            .map(|user| user.display_name())
            .unwrap_or("anonymous");
        tracing::info!(index = i, %author, "{}", comment.content);
    }
    if !state.failures.is_empty() {
        tracing::warn!(failures = ?state.failures, "Some sections failed to load");
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wikift_client=debug,wikift_views=debug,wikift=info".into());
    let json = std::env::var("WIKIFT_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn credentials() -> Option<LoginParams> {
    let username = std::env::var("WIKIFT_USERNAME").ok()?;
    let password = std::env::var("WIKIFT_PASSWORD").ok()?;
    Some(LoginParams { username, password })
}

/// Describe the machine running the CLI for view fingerprinting.
fn host_device() -> DeviceInfo {
    DeviceInfo {
        user_agent: format!("wikift-cli/{}", env!("CARGO_PKG_VERSION")),
        browser: "wikift-cli".into(),
        browser_version: env!("CARGO_PKG_VERSION").into(),
        os: std::env::consts::OS.into(),
        os_version: std::env::consts::ARCH.into(),
    }
}
