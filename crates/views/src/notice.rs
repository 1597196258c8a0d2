//! User-visible notices.
//!
//! Views never print or render feedback themselves; they push [`Notice`]s onto
//! a [`tokio::sync::broadcast`] channel. Front ends call
//! [`Notifier::subscribe`] and show them however they like. Sending with no
//! subscriber is not an error.

use serde::Serialize;
use tokio::sync::broadcast;
use wikift_client::ApiError;

/// Broadcast channel capacity for notices.
const NOTICE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sending half of the notice channel, shared by every view of a front end.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn notify(&self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "Notice");
        let _ = self.tx.send(notice);
    }

    /// Report a failed user action.
    pub fn action_failed(&self, action: &str, err: &ApiError) {
        tracing::error!(action, error = %err, "View action failed");
        self.notify(Notice::error(describe(action, err)));
    }
}

/// Human-readable text for a failed action.
fn describe(action: &str, err: &ApiError) -> String {
    match err {
        ApiError::Domain {
            message: Some(message),
            ..
        } if !message.trim().is_empty() => format!("{action} failed: {message}"),
        ApiError::Domain { code, .. } => format!("{action} failed (code {code})"),
        ApiError::Transport(_) if err.is_unauthorized() => {
            format!("{action} failed: please sign in again")
        }
        ApiError::Transport(e) => format!("{action} failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use wikift_client::TransportError;

    use super::*;

    #[test]
    fn domain_message_is_preferred() {
        let err = ApiError::Domain {
            code: 4001,
            message: Some("title taken".into()),
        };
        assert_eq!(describe("Save", &err), "Save failed: title taken");

        let bare = ApiError::Domain {
            code: 4001,
            message: None,
        };
        assert_eq!(describe("Save", &bare), "Save failed (code 4001)");
    }

    #[test]
    fn unauthorized_asks_to_sign_in() {
        let err = ApiError::Transport(TransportError::Status {
            status: 401,
            body: String::new(),
        });
        assert_eq!(describe("Follow", &err), "Follow failed: please sign in again");
    }

    #[tokio::test]
    async fn subscribers_receive_notices() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.notify(Notice::success("done"));
        assert_eq!(rx.recv().await.unwrap(), Notice::success("done"));
    }

    #[test]
    fn notify_without_subscribers_is_fine() {
        Notifier::new().notify(Notice::info("nobody listening"));
    }
}
