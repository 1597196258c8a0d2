use reqwest::Method;
use wikift_core::models::{
    Article, ArticleFabulous, ArticleHistory, ArticleOrder, ArticleSearch, ArticleView,
    CounterPoint,
};
use wikift_core::{DbId, Page, PageCursor, PageResponse};

use crate::client::ApiClient;
use crate::endpoints::{self, with_param};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::services::user::is_truthy;

/// Article reads, reactions and view tracking.
pub struct ArticleService<'a> {
    client: &'a ApiClient,
}

impl<'a> ArticleService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn info(&self, id: DbId) -> ApiResult<Article> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::ARTICLE_INFO, id),
                RequestOptions::plain(),
            )
            .await
    }

    /// Public listing in the given order.
    pub async fn list(&self, cursor: &PageCursor, order: ArticleOrder) -> ApiResult<Page<Article>> {
        let options = RequestOptions::plain()
            .with_query_pairs(cursor.query())
            .with_query("orderBy", order.as_str());
        self.page(endpoints::ARTICLE_LIST, options).await
    }

    pub async fn search(&self, cursor: &PageCursor, filter: &ArticleSearch) -> ApiResult<Page<Article>> {
        let options = RequestOptions::plain()
            .with_query_pairs(cursor.query())
            .with_query_pairs(filter.query());
        self.page(endpoints::ARTICLE_SEARCH, options).await
    }

    /// Articles written by `user_id`, as seen by their author.
    pub async fn mine(&self, cursor: &PageCursor, user_id: DbId) -> ApiResult<Page<Article>> {
        let options = RequestOptions::token()
            .with_query_pairs(cursor.query())
            .with_query("userId", user_id);
        self.page(endpoints::ARTICLE_MY, options).await
    }

    /// Most recent articles of one author.
    pub async fn top_by_user(&self, username: &str) -> ApiResult<Vec<Article>> {
        self.client
            .call(
                Method::GET,
                endpoints::ARTICLE_TOP_BY_USER,
                RequestOptions::token().with_query("username", username),
            )
            .await
    }

    /// Record one view. The backend deduplicates on the device fingerprint.
    pub async fn record_view(&self, view: &ArticleView) -> ApiResult<()> {
        self.client
            .call_with(
                Method::POST,
                endpoints::ARTICLE_VIEW,
                RequestOptions::json(),
                view,
            )
            .await
            .map(|_: Option<serde_json::Value>| ())
    }

    /// Views per day over the last week.
    pub async fn view_counter(&self, id: DbId) -> ApiResult<Vec<CounterPoint>> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::ARTICLE_VIEW_COUNTER, id),
                RequestOptions::plain(),
            )
            .await
    }

    pub async fn fabulous(&self, reaction: &ArticleFabulous) -> ApiResult<()> {
        self.client
            .call_with(
                Method::POST,
                endpoints::ARTICLE_FABULOUS,
                RequestOptions::token_json(),
                reaction,
            )
            .await
            .map(|_: Option<serde_json::Value>| ())
    }

    pub async fn unfabulous(&self, reaction: &ArticleFabulous) -> ApiResult<()> {
        let endpoint = format!(
            "{}{}/{}",
            endpoints::ARTICLE_UNFABULOUS,
            reaction.user_id,
            reaction.article_id
        );
        self.client
            .call(Method::DELETE, &endpoint, RequestOptions::token())
            .await
            .map(|_: Option<serde_json::Value>| ())
    }

    /// Whether the reaction exists. The backend answers with a count.
    pub async fn fabulous_check(&self, reaction: &ArticleFabulous) -> ApiResult<bool> {
        let verdict: Option<serde_json::Value> = self
            .client
            .call(
                Method::GET,
                endpoints::ARTICLE_FABULOUS_CHECK,
                RequestOptions::token()
                    .with_query("userId", reaction.user_id)
                    .with_query("articleId", reaction.article_id),
            )
            .await?;
        Ok(is_truthy(verdict.as_ref()))
    }

    pub async fn fabulous_count(&self, article_id: DbId) -> ApiResult<u64> {
        let count: Option<u64> = self
            .client
            .call(
                Method::GET,
                endpoints::ARTICLE_FABULOUS_COUNT,
                RequestOptions::token().with_query("articleId", article_id),
            )
            .await?;
        Ok(count.unwrap_or(0))
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client
            .call(
                Method::DELETE,
                &with_param(endpoints::ARTICLE_DELETE, id),
                RequestOptions::token(),
            )
            .await
            .map(|_: Option<serde_json::Value>| ())
    }

    pub async fn history(&self, id: DbId) -> ApiResult<Vec<ArticleHistory>> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::ARTICLE_HISTORY, id),
                RequestOptions::token(),
            )
            .await
    }

    async fn page(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Page<Article>> {
        let response: PageResponse<Article> =
            self.client.call(Method::GET, endpoint, options).await?;
        Ok(response.into())
    }
}
