//! Article detail page.
//!
//! [`ArticleDetailView::initialize`] fetches the article, then fans out the
//! dependent fetches concurrently:
//!
//! - reaction check (signed-in only)
//! - view record, keyed by the device fingerprint
//! - follow check against the author (signed-in only)
//! - first page of comments
//! - weekly comment and view trends (signed-in only)
//!
//! Each result patches only its own slice of [`ArticleDetailState`] as it
//! arrives. A failed dependent fetch is recorded in `failures` and does not
//! affect the others.

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use wikift_client::{ApiClient, ApiError};
use wikift_core::models::{
    Article, ArticleFabulous, ArticleHistory, ArticleView, Comment, CounterPoint, User,
};
use wikift_core::{DbId, DeviceInfo, Page, PageCursor};

use crate::error::{ViewError, ViewResult};
use crate::failures::{Failures, Slice};
use crate::notice::{Notice, Notifier};
use crate::scope::{ScopeHandle, ViewScope};

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDetailState {
    pub article_id: DbId,
    pub article: Option<Article>,
    /// True while the visitor can still react to the article.
    pub fabulous_status: bool,
    /// True while the visitor can still follow the author.
    pub can_follow: bool,
    pub view_recorded: bool,
    pub comments: Vec<Comment>,
    pub comment_cursor: PageCursor,
    pub comment_draft: String,
    pub comment_trend: Vec<CounterPoint>,
    pub view_trend: Vec<CounterPoint>,
    pub history: Vec<ArticleHistory>,
    /// Set once the article is deleted; the front end should leave the page.
    pub navigated_away: bool,
    pub failures: Failures,
}

impl ArticleDetailState {
    fn new(article_id: DbId) -> Self {
        Self {
            article_id,
            article: None,
            fabulous_status: true,
            can_follow: true,
            view_recorded: false,
            comments: Vec::new(),
            comment_cursor: PageCursor::default(),
            comment_draft: String::new(),
            comment_trend: Vec::new(),
            view_trend: Vec::new(),
            history: Vec::new(),
            navigated_away: false,
            failures: Failures::default(),
        }
    }
}

/// Outcome of one dependent fetch.
enum Patch {
    Fabulous(Result<bool, ApiError>),
    ViewRecord(Result<(), ApiError>),
    Follow(Result<bool, ApiError>),
    Comments(Result<Page<Comment>, ApiError>),
    CommentTrend(Result<Vec<CounterPoint>, ApiError>),
    ViewTrend(Result<Vec<CounterPoint>, ApiError>),
}

impl Patch {
    fn apply(self, state: &mut ArticleDetailState) {
        match self {
            Patch::Fabulous(result) => {
                if state.failures.track(Slice::Fabulous, result) == Some(true) {
                    state.fabulous_status = false;
                }
            }
            Patch::ViewRecord(result) => {
                if state.failures.track(Slice::ViewRecord, result).is_some() {
                    state.view_recorded = true;
                }
            }
            Patch::Follow(result) => {
                if state.failures.track(Slice::FollowStatus, result) == Some(true) {
                    state.can_follow = false;
                }
            }
            Patch::Comments(result) => {
                if let Some(page) = state.failures.track(Slice::Comments, result) {
                    state.comments = page.content;
                    state.comment_cursor = page.cursor;
                }
            }
            Patch::CommentTrend(result) => {
                if let Some(points) = state.failures.track(Slice::CommentTrend, result) {
                    state.comment_trend = points;
                }
            }
            Patch::ViewTrend(result) => {
                if let Some(points) = state.failures.track(Slice::ViewTrend, result) {
                    state.view_trend = points;
                }
            }
        }
    }
}

pub struct ArticleDetailView {
    client: ApiClient,
    notifier: Notifier,
    device: DeviceInfo,
    scope: ViewScope,
    state: ArticleDetailState,
}

impl ArticleDetailView {
    pub fn new(client: ApiClient, notifier: Notifier, article_id: DbId, device: DeviceInfo) -> Self {
        Self {
            client,
            notifier,
            device,
            scope: ViewScope::new(),
            state: ArticleDetailState::new(article_id),
        }
    }

    pub fn state(&self) -> &ArticleDetailState {
        &self.state
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    /// Load the article, then every slice that depends on it.
    pub async fn initialize(&mut self) -> ViewResult<()> {
        let article_id = self.state.article_id;
        tracing::info!(article_id, "Loading article detail");

        let article = match self.scope.run(self.client.articles().info(article_id)).await? {
            Ok(article) => article,
            Err(e) => {
                self.state.failures.record(Slice::Article, &e);
                self.notifier.action_failed("Loading the article", &e);
                return Err(e.into());
            }
        };
        self.state.failures.clear(Slice::Article);

        let mut pending = dependent_fetches(
            &self.client,
            &self.device,
            &article,
            self.state.comment_cursor.size,
        );
        self.state.article = Some(article);

        while let Some(patch) = self.scope.run(pending.next()).await? {
            patch.apply(&mut self.state);
        }

        tracing::debug!(
            article_id,
            failed = ?self.state.failures,
            "Article detail loaded"
        );
        Ok(())
    }

    /// Show comments for a one-based UI page.
    pub async fn page_changed(&mut self, ui_page: u32, size: u32) -> ViewResult<()> {
        let cursor = self.state.comment_cursor.for_ui_page(ui_page, size);
        self.load_comments(cursor).await
    }

    /// React to the article, then reload the whole page.
    pub async fn fabulous(&mut self) -> ViewResult<()> {
        let reaction = self.reaction()?;
        if let Err(e) = self.scope.run(self.client.articles().fabulous(&reaction)).await? {
            self.notifier.action_failed("Liking the article", &e);
            return Err(e.into());
        }
        tracing::info!(article_id = reaction.article_id, "Article liked");
        self.state.fabulous_status = false;
        self.initialize().await
    }

    /// Withdraw the reaction, then reload the whole page.
    pub async fn unfabulous(&mut self) -> ViewResult<()> {
        let reaction = self.reaction()?;
        if let Err(e) = self.scope.run(self.client.articles().unfabulous(&reaction)).await? {
            self.notifier.action_failed("Removing the like", &e);
            return Err(e.into());
        }
        tracing::info!(article_id = reaction.article_id, "Article like withdrawn");
        self.state.fabulous_status = true;
        self.initialize().await
    }

    /// Follow the article's author. Returns the backend's verdict.
    pub async fn follow(&mut self) -> ViewResult<bool> {
        let actor = self.signed_in_user()?;
        let author = self.loaded_article()?.user.clone();
        match self.scope.run(self.client.users().follow(&actor, &author)).await? {
            Ok(followed) => {
                if followed {
                    self.state.can_follow = false;
                }
                Ok(followed)
            }
            Err(e) => {
                self.notifier.action_failed("Following", &e);
                Err(e.into())
            }
        }
    }

    pub async fn unfollow(&mut self) -> ViewResult<bool> {
        let actor = self.signed_in_user()?;
        let author = self.loaded_article()?.user.clone();
        match self.scope.run(self.client.users().unfollow(&actor, &author)).await? {
            Ok(unfollowed) => {
                if unfollowed {
                    self.state.can_follow = true;
                }
                Ok(unfollowed)
            }
            Err(e) => {
                self.notifier.action_failed("Unfollowing", &e);
                Err(e.into())
            }
        }
    }

    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.state.comment_draft = text.into();
    }

    /// Publish the draft, then reload the first page of comments.
    ///
    /// A blank draft raises one error notice and sends nothing.
    pub async fn publish_comment(&mut self) -> ViewResult<()> {
        let author = self.client.session().user().cloned();
        let comment = match Comment::draft(self.state.article_id, author, &self.state.comment_draft)
        {
            Ok(comment) => comment,
            Err(e) => {
                self.notifier
                    .notify(Notice::error("Comment content must not be empty"));
                return Err(e.into());
            }
        };

        if let Err(e) = self.scope.run(self.client.comments().create(&comment)).await? {
            self.notifier.action_failed("Publishing the comment", &e);
            return Err(e.into());
        }
        tracing::info!(article_id = self.state.article_id, "Comment published");
        self.notifier.notify(Notice::success("Comment published"));
        self.state.comment_draft.clear();

        self.load_comments(PageCursor::first(self.state.comment_cursor.size))
            .await
    }

    /// Delete one comment, then reload comments and the whole page.
    pub async fn delete_comment(&mut self, comment_id: DbId) -> ViewResult<()> {
        if let Err(e) = self.scope.run(self.client.comments().delete(comment_id)).await? {
            self.notifier.action_failed("Deleting the comment", &e);
            return Err(e.into());
        }
        tracing::info!(article_id = self.state.article_id, comment_id, "Comment deleted");
        self.notifier.notify(Notice::success("Comment deleted"));

        self.load_comments(PageCursor::first(self.state.comment_cursor.size))
            .await?;
        self.initialize().await
    }

    /// Delete the article and mark the view as navigated away.
    pub async fn delete_article(&mut self) -> ViewResult<()> {
        let (article_id, title) = {
            let article = self.loaded_article()?;
            (article.id, article.title.clone())
        };
        if let Err(e) = self.scope.run(self.client.articles().delete(article_id)).await? {
            self.notifier.action_failed("Deleting the article", &e);
            return Err(e.into());
        }
        tracing::info!(article_id, "Article deleted");
        self.notifier
            .notify(Notice::success(format!("Article '{title}' deleted")));
        self.state.navigated_away = true;
        Ok(())
    }

    /// Load the article's edit history.
    pub async fn show_history(&mut self) -> ViewResult<()> {
        let article_id = self.loaded_article()?.id;
        let result = self.scope.run(self.client.articles().history(article_id)).await?;
        match result {
            Ok(history) => {
                self.state.failures.clear(Slice::History);
                self.state.history = history;
                Ok(())
            }
            Err(e) => {
                self.state.failures.record(Slice::History, &e);
                self.notifier.action_failed("Loading the history", &e);
                Err(e.into())
            }
        }
    }

    // ---- private helpers ----

    async fn load_comments(&mut self, cursor: PageCursor) -> ViewResult<()> {
        let article_id = self.state.article_id;
        let result = self
            .scope
            .run(self.client.comments().list_by_article(article_id, &cursor))
            .await?;
        match result {
            Ok(page) => {
                self.state.failures.clear(Slice::Comments);
                self.state.comments = page.content;
                self.state.comment_cursor = page.cursor;
                Ok(())
            }
            Err(e) => {
                self.state.failures.record(Slice::Comments, &e);
                self.notifier.action_failed("Loading comments", &e);
                Err(e.into())
            }
        }
    }

    fn loaded_article(&self) -> ViewResult<&Article> {
        self.state.article.as_ref().ok_or(ViewError::NotLoaded)
    }

    fn signed_in_user(&self) -> ViewResult<User> {
        match self.client.session().user() {
            Some(user) => Ok(user.clone()),
            None => {
                self.notifier.notify(Notice::warning("Sign in first"));
                Err(ViewError::NotSignedIn)
            }
        }
    }

    /// The signed-in visitor's reaction to the loaded article.
    fn reaction(&self) -> ViewResult<ArticleFabulous> {
        let visitor = self.signed_in_user()?;
        let article = self.loaded_article()?;
        Ok(ArticleFabulous::new(visitor.id, article.id))
    }
}

/// Every fetch that depends on the loaded article, ready to run concurrently.
///
/// Anonymous sessions skip the reaction check, the follow check and both
/// trends.
fn dependent_fetches<'a>(
    client: &'a ApiClient,
    device: &DeviceInfo,
    article: &Article,
    page_size: u32,
) -> FuturesUnordered<BoxFuture<'a, Patch>> {
    let pending = FuturesUnordered::new();
    let article_id = article.id;
    let author_id = article.user.id;

    let view = ArticleView::record(article, device);
    pending.push(async move { Patch::ViewRecord(client.articles().record_view(&view).await) }.boxed());

    let first_page = PageCursor::first(page_size);
    pending.push(
        async move {
            Patch::Comments(
                client
                    .comments()
                    .list_by_article(article_id, &first_page)
                    .await,
            )
        }
        .boxed(),
    );

    let Some(visitor_id) = client.session().user().map(|user| user.id) else {
        return pending;
    };

    let reaction = ArticleFabulous::new(visitor_id, article_id);
    pending.push(
        async move { Patch::Fabulous(client.articles().fabulous_check(&reaction).await) }.boxed(),
    );
    pending.push(
        async move { Patch::Follow(client.users().follow_check(visitor_id, author_id).await) }
            .boxed(),
    );
    pending.push(
        async move { Patch::CommentTrend(client.comments().counter_by_week(article_id).await) }
            .boxed(),
    );
    pending.push(
        async move { Patch::ViewTrend(client.articles().view_counter(article_id).await) }.boxed(),
    );
    pending
}
