use reqwest::Method;
use wikift_core::models::{Comment, CounterPoint};
use wikift_core::{DbId, Page, PageCursor, PageResponse};

use crate::client::ApiClient;
use crate::endpoints::{self, with_param};
use crate::error::ApiResult;
use crate::request::RequestOptions;

pub struct CommentService<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of comments on an article.
    pub async fn list_by_article(&self, article_id: DbId, cursor: &PageCursor) -> ApiResult<Page<Comment>> {
        let response: PageResponse<Comment> = self
            .client
            .call(
                Method::GET,
                &with_param(endpoints::COMMENT_LIST_BY_ARTICLE, article_id),
                RequestOptions::plain().with_query_pairs(cursor.query()),
            )
            .await?;
        Ok(response.into())
    }

    pub async fn create(&self, comment: &Comment) -> ApiResult<Option<Comment>> {
        self.client
            .call_with(
                Method::POST,
                endpoints::COMMENT_CREATE,
                RequestOptions::token_json(),
                comment,
            )
            .await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client
            .call(
                Method::DELETE,
                &with_param(endpoints::COMMENT_DELETE, id),
                RequestOptions::token(),
            )
            .await
            .map(|_: Option<serde_json::Value>| ())
    }

    /// Comments per day over the last week.
    pub async fn counter_by_week(&self, article_id: DbId) -> ApiResult<Vec<CounterPoint>> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::COMMENT_COUNTER_BY_WEEK, article_id),
                RequestOptions::token(),
            )
            .await
    }
}
