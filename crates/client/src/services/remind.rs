use reqwest::Method;
use wikift_core::models::{Remind, RemindKind};
use wikift_core::DbId;

use crate::client::ApiClient;
use crate::endpoints::{self, with_param};
use crate::error::ApiResult;
use crate::request::RequestOptions;

/// Reminders (notifications) addressed to the signed-in user.
pub struct RemindService<'a> {
    client: &'a ApiClient,
}

impl<'a> RemindService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_by_user(&self, user_id: DbId, kind: RemindKind) -> ApiResult<Vec<Remind>> {
        self.client
            .call(
                Method::GET,
                endpoints::REMIND_LIST_BY_USER,
                RequestOptions::token()
                    .with_query("userId", user_id)
                    .with_query("type", kind.as_str()),
            )
            .await
    }

    pub async fn info(&self, id: DbId) -> ApiResult<Remind> {
        self.client
            .call(
                Method::GET,
                &with_param(endpoints::REMIND_INFO, id),
                RequestOptions::token(),
            )
            .await
    }

    /// Mark one reminder as read.
    pub async fn read(&self, id: DbId) -> ApiResult<()> {
        self.client
            .call(
                Method::PUT,
                &with_param(endpoints::REMIND_READ, id),
                RequestOptions::token(),
            )
            .await
            .map(|_: Option<serde_json::Value>| ())
    }
}
