use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::user::User;
use crate::types::{DbId, Timestamp};

/// Reference to another entity by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: DbId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub content: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<Timestamp>,
}

impl Comment {
    /// New comment on `article_id` by `author`.
    ///
    /// Rejects empty or whitespace-only content.
    pub fn draft(article_id: DbId, author: Option<User>, content: &str) -> Result<Self, CoreError> {
        let content = validate_content(Some(content))?;
        Ok(Self {
            id: None,
            article: Some(EntityRef { id: article_id }),
            user: author,
            content: content.to_string(),
            create_time: None,
        })
    }
}

/// Check that comment content is present and not blank.
pub fn validate_content(content: Option<&str>) -> Result<&str, CoreError> {
    match content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoreError::Validation(
            "Comment content must not be empty".into(),
        )),
    }
}
