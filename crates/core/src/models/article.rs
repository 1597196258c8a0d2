use serde::{Deserialize, Serialize};

use crate::fingerprint::{self, DeviceInfo};
use crate::models::user::User;
use crate::types::{DbId, Timestamp};

/// An article as returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: DbId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Owning user; the author whose follow status the detail view shows.
    pub user: User,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<Timestamp>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabulous_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

/// Body of the fabulous ("like") mutation and its check.
///
/// `user_id` is the reacting user, not the article's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFabulous {
    pub user_id: DbId,
    pub article_id: DbId,
}

impl ArticleFabulous {
    pub fn new(user_id: DbId, article_id: DbId) -> Self {
        Self {
            user_id,
            article_id,
        }
    }
}

/// A single view record, deduplicated server-side by `device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub user_id: DbId,
    pub article_id: DbId,
    pub view_count: u32,
    pub device: String,
}

impl ArticleView {
    /// One view of `article` from the given device.
    pub fn record(article: &Article, device: &DeviceInfo) -> Self {
        let user_id = article.user.id;
        Self {
            user_id,
            article_id: article.id,
            view_count: 1,
            device: fingerprint::fingerprint(device, user_id, article.id),
        }
    }
}

/// One entry of an article's edit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleHistory {
    pub id: DbId,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<Timestamp>,
}

/// Sort order accepted by the public article listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleOrder {
    #[default]
    NativeCreateTime,
    CreateTime,
    View,
}

impl ArticleOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NativeCreateTime => "NATIVE_CREATE_TIME",
            Self::CreateTime => "CREATE_TIME",
            Self::View => "VIEW",
        }
    }
}

/// Optional filters for article search. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleSearch {
    pub tag_id: Option<DbId>,
    pub article_title: Option<String>,
    pub space_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

impl ArticleSearch {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(tag_id) = self.tag_id {
            query.push(("tagId", tag_id.to_string()));
        }
        if let Some(title) = self.article_title.as_deref().filter(|t| !t.is_empty()) {
            query.push(("articleTitle", title.to_string()));
        }
        if let Some(space_id) = self.space_id {
            query.push(("spaceId", space_id.to_string()));
        }
        if let Some(user_id) = self.user_id {
            query.push(("userId", user_id.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        serde_json::from_str(
            r#"{"id":11,"title":"Hello","user":{"id":3,"username":"bob"},"createTime":1518000000000}"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_millisecond_timestamps() {
        let a = article();
        assert_eq!(a.create_time.unwrap().timestamp(), 1_518_000_000);
        assert!(a.update_time.is_none());
    }

    #[test]
    fn fabulous_serializes_reacting_user_and_article() {
        let a = article();
        let f = ArticleFabulous::new(1, a.id);
        assert_eq!(f, ArticleFabulous { user_id: 1, article_id: 11 });
        let json = serde_json::to_value(f).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["articleId"], 11);
    }

    #[test]
    fn view_record_counts_one_and_fingerprints_device() {
        let device = DeviceInfo {
            user_agent: "agent".into(),
            browser: "firefox".into(),
            browser_version: "120".into(),
            os: "linux".into(),
            os_version: "6".into(),
        };
        let view = ArticleView::record(&article(), &device);
        assert_eq!(view.view_count, 1);
        assert_eq!(view.device, fingerprint::fingerprint(&device, 3, 11));
    }

    #[test]
    fn search_skips_unset_filters() {
        let search = ArticleSearch {
            article_title: Some("rust".into()),
            user_id: Some(9),
            ..Default::default()
        };
        assert_eq!(
            search.query(),
            vec![("articleTitle", "rust".to_string()), ("userId", "9".to_string())]
        );
        assert!(ArticleSearch::default().query().is_empty());
    }

    #[test]
    fn order_wire_names() {
        assert_eq!(ArticleOrder::default().as_str(), "NATIVE_CREATE_TIME");
        assert_eq!(
            serde_json::to_value(ArticleOrder::CreateTime).unwrap(),
            "CREATE_TIME"
        );
    }
}
