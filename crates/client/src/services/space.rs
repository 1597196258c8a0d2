use reqwest::Method;
use wikift_core::models::Space;
use wikift_core::{DbId, Page, PageCursor, PageResponse};

use crate::client::ApiClient;
use crate::endpoints::{self, with_param};
use crate::error::ApiResult;
use crate::request::RequestOptions;

pub struct SpaceService<'a> {
    client: &'a ApiClient,
}

impl<'a> SpaceService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Public spaces, paged.
    pub async fn list(&self, cursor: &PageCursor) -> ApiResult<Page<Space>> {
        let response: PageResponse<Space> = self
            .client
            .call(
                Method::GET,
                endpoints::SPACE_LIST,
                RequestOptions::plain().with_query_pairs(cursor.query()),
            )
            .await?;
        Ok(response.into())
    }

    /// Every space owned by `user_id`, private ones included.
    pub async fn list_by_user(&self, user_id: DbId) -> ApiResult<Page<Space>> {
        let response: PageResponse<Space> = self
            .client
            .call(
                Method::GET,
                &with_param(endpoints::SPACE_LIST_BY_USER, user_id),
                RequestOptions::token(),
            )
            .await?;
        Ok(response.into())
    }

    pub async fn info(&self, code: &str) -> ApiResult<Space> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::SPACE_INFO, code),
                RequestOptions::plain(),
            )
            .await
    }

    pub async fn create(&self, space: &Space) -> ApiResult<Space> {
        self.client
            .call_with(
                Method::POST,
                endpoints::SPACE_CREATE,
                RequestOptions::token_json(),
                space,
            )
            .await
    }
}
