//! Space listing page.
//!
//! Lists public spaces page by page, or every space owned by the signed-in
//! user.

use wikift_client::{ApiClient, ApiResult};
use wikift_core::models::Space;
use wikift_core::{Page, PageCursor};

use crate::error::{ViewError, ViewResult};
use crate::failures::{Failures, Slice};
use crate::notice::{Notice, Notifier};
use crate::scope::{ScopeHandle, ViewScope};

/// Spaces shown per page.
pub const SPACE_PAGE_SIZE: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceListState {
    pub spaces: Vec<Space>,
    pub cursor: PageCursor,
    pub failures: Failures,
}

pub struct SpaceListView {
    client: ApiClient,
    notifier: Notifier,
    scope: ViewScope,
    state: SpaceListState,
}

impl SpaceListView {
    pub fn new(client: ApiClient, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            scope: ViewScope::new(),
            state: SpaceListState {
                spaces: Vec::new(),
                cursor: PageCursor::first(SPACE_PAGE_SIZE),
                failures: Failures::default(),
            },
        }
    }

    pub fn state(&self) -> &SpaceListState {
        &self.state
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    /// Public spaces at the current cursor.
    pub async fn load_spaces(&mut self) -> ViewResult<()> {
        self.list_public(self.state.cursor).await
    }

    /// Every space of the signed-in user, from the first page.
    pub async fn load_my_spaces(&mut self) -> ViewResult<()> {
        let Some(user_id) = self.client.session().user().map(|user| user.id) else {
            self.notifier.notify(Notice::warning("Sign in first"));
            return Err(ViewError::NotSignedIn);
        };
        let result = self
            .scope
            .run(self.client.spaces().list_by_user(user_id))
            .await?;
        self.state.cursor = PageCursor::first(SPACE_PAGE_SIZE);
        self.apply(result)
    }

    /// Show public spaces for a one-based UI page.
    pub async fn page_changed(&mut self, ui_page: u32, size: u32) -> ViewResult<()> {
        self.list_public(self.state.cursor.for_ui_page(ui_page, size))
            .await
    }

    async fn list_public(&mut self, cursor: PageCursor) -> ViewResult<()> {
        let result = self.scope.run(self.client.spaces().list(&cursor)).await?;
        self.apply(result)
    }

    fn apply(&mut self, result: ApiResult<Page<Space>>) -> ViewResult<()> {
        match result {
            Ok(page) => {
                self.state.failures.clear(Slice::Spaces);
                self.state.spaces = page.content;
                self.state.cursor = page.cursor;
                Ok(())
            }
            Err(e) => {
                self.state.failures.record(Slice::Spaces, &e);
                self.notifier.action_failed("Loading spaces", &e);
                Err(e.into())
            }
        }
    }
}
