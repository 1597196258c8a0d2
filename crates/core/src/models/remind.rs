use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A notification sent to a user (e.g. a followed author published).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remind {
    pub id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub read: bool,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<Timestamp>,
}

/// Which reminders to list. Anything unrecognised lists unread ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemindKind {
    Read,
    #[default]
    Unread,
}

impl RemindKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Unread => "unread",
        }
    }
}
