//! Users followed by one account.

use wikift_client::ApiClient;
use wikift_core::models::User;

use crate::error::ViewResult;
use crate::failures::{Failures, Slice};
use crate::notice::Notifier;
use crate::scope::{ScopeHandle, ViewScope};

#[derive(Debug, Clone, PartialEq)]
pub struct FollowedUsersState {
    pub username: String,
    pub users: Vec<User>,
    pub failures: Failures,
}

pub struct FollowedUsersView {
    client: ApiClient,
    notifier: Notifier,
    scope: ViewScope,
    state: FollowedUsersState,
}

impl FollowedUsersView {
    pub fn new(client: ApiClient, notifier: Notifier, username: impl Into<String>) -> Self {
        Self {
            client,
            notifier,
            scope: ViewScope::new(),
            state: FollowedUsersState {
                username: username.into(),
                users: Vec::new(),
                failures: Failures::default(),
            },
        }
    }

    pub fn state(&self) -> &FollowedUsersState {
        &self.state
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    pub async fn initialize(&mut self) -> ViewResult<()> {
        tracing::info!(username = %self.state.username, "Loading followed users");
        let result = self
            .scope
            .run(self.client.users().following(&self.state.username))
            .await?;
        match result {
            Ok(users) => {
                self.state.failures.clear(Slice::Following);
                self.state.users = users;
                Ok(())
            }
            Err(e) => {
                self.state.failures.record(Slice::Following, &e);
                self.notifier.action_failed("Loading followed users", &e);
                Err(e.into())
            }
        }
    }
}
