//! User profile page.
//!
//! The profile, the contribution heatmap and (for signed-in visitors) the
//! author's recent articles load independently. Once the profile arrives, a
//! signed-in visitor also gets the follow check and the follow counter.

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use wikift_client::{ApiClient, ApiError};
use wikift_core::models::{Article, CounterPoint, FollowCounter, User};

use crate::error::{ViewError, ViewResult};
use crate::failures::{Failures, Slice};
use crate::notice::{Notice, Notifier};
use crate::scope::{ScopeHandle, ViewScope};

#[derive(Debug, Clone, PartialEq)]
pub struct UserInfoState {
    pub username: String,
    pub user: Option<User>,
    /// True while the visitor can still follow this user.
    pub can_follow: bool,
    pub follow_counter: Option<FollowCounter>,
    pub contribution: Vec<CounterPoint>,
    pub top_articles: Vec<Article>,
    pub failures: Failures,
}

enum Patch {
    Profile(Result<User, ApiError>),
    Contribution(Result<Vec<CounterPoint>, ApiError>),
    TopArticles(Result<Vec<Article>, ApiError>),
    Follow(Result<bool, ApiError>),
    FollowCounter(Result<FollowCounter, ApiError>),
}

pub struct UserInfoView {
    client: ApiClient,
    notifier: Notifier,
    scope: ViewScope,
    state: UserInfoState,
}

impl UserInfoView {
    pub fn new(client: ApiClient, notifier: Notifier, username: impl Into<String>) -> Self {
        Self {
            client,
            notifier,
            scope: ViewScope::new(),
            state: UserInfoState {
                username: username.into(),
                user: None,
                can_follow: true,
                follow_counter: None,
                contribution: Vec::new(),
                top_articles: Vec::new(),
                failures: Failures::default(),
            },
        }
    }

    pub fn state(&self) -> &UserInfoState {
        &self.state
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    /// Load every slice of the page.
    ///
    /// Fails only when the profile itself cannot be loaded; the other slices
    /// still get their chance first.
    pub async fn initialize(&mut self) -> ViewResult<()> {
        let client = &self.client;
        let username = self.state.username.clone();
        let visitor_id = client.session().user().map(|user| user.id);
        tracing::info!(%username, "Loading user profile");

        let mut pending: FuturesUnordered<BoxFuture<'_, Patch>> = FuturesUnordered::new();
        {
            let username = username.clone();
            pending.push(async move { Patch::Profile(client.users().info(&username).await) }.boxed());
        }
        {
            let username = username.clone();
            pending.push(
                async move { Patch::Contribution(client.users().contribution(&username).await) }
                    .boxed(),
            );
        }
        if visitor_id.is_some() {
            let username = username.clone();
            pending.push(
                async move { Patch::TopArticles(client.articles().top_by_user(&username).await) }
                    .boxed(),
            );
        }

        let mut profile_error = None;
        while let Some(patch) = self.scope.run(pending.next()).await? {
            match patch {
                Patch::Profile(Ok(user)) => {
                    self.state.failures.clear(Slice::Profile);
                    if let Some(visitor_id) = visitor_id {
                        let target_id = user.id;
                        pending.push(
                            async move {
                                Patch::Follow(client.users().follow_check(visitor_id, target_id).await)
                            }
                            .boxed(),
                        );
                        pending.push(
                            async move {
                                Patch::FollowCounter(client.users().follows_count(target_id).await)
                            }
                            .boxed(),
                        );
                    }
                    self.state.user = Some(user);
                }
                Patch::Profile(Err(e)) => {
                    self.state.failures.record(Slice::Profile, &e);
                    self.notifier.action_failed("Loading the profile", &e);
                    profile_error = Some(e);
                }
                Patch::Contribution(result) => {
                    if let Some(points) = self.state.failures.track(Slice::Contribution, result) {
                        self.state.contribution = points;
                    }
                }
                Patch::TopArticles(result) => {
                    if let Some(articles) = self.state.failures.track(Slice::TopArticles, result) {
                        self.state.top_articles = articles;
                    }
                }
                Patch::Follow(result) => {
                    if self.state.failures.track(Slice::FollowStatus, result) == Some(true) {
                        self.state.can_follow = false;
                    }
                }
                Patch::FollowCounter(result) => {
                    if let Some(counter) = self.state.failures.track(Slice::FollowCounter, result) {
                        self.state.follow_counter = Some(counter);
                    }
                }
            }
        }

        match profile_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Save an edited profile, then reload the page.
    pub async fn update_profile(&mut self, profile: User) -> ViewResult<()> {
        if let Err(e) = self.scope.run(self.client.users().update(&profile)).await? {
            self.notifier.action_failed("Updating the profile", &e);
            return Err(e.into());
        }
        tracing::info!(user_id = profile.id, "Profile updated");
        self.notifier.notify(Notice::success("Profile updated"));
        self.initialize().await
    }

    pub async fn follow(&mut self) -> ViewResult<bool> {
        let (actor, target) = self.follow_pair()?;
        match self.scope.run(self.client.users().follow(&actor, &target)).await? {
            Ok(followed) => {
                if followed {
                    self.state.can_follow = false;
                    tracing::info!(user_id = target.id, "Followed user");
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
        let (actor, target) = self.follow_pair()?;
        match self.scope.run(self.client.users().unfollow(&actor, &target)).await? {
            Ok(unfollowed) => {
                if unfollowed {
                    self.state.can_follow = true;
                    tracing::info!(user_id = target.id, "Unfollowed user");
                }
                Ok(unfollowed)
            }
            Err(e) => {
                self.notifier.action_failed("Unfollowing", &e);
                Err(e.into())
            }
        }
    }

    fn follow_pair(&self) -> ViewResult<(User, User)> {
        let Some(actor) = self.client.session().user() else {
            self.notifier.notify(Notice::warning("Sign in first"));
            return Err(ViewError::NotSignedIn);
        };
        let target = self.state.user.as_ref().ok_or(ViewError::NotLoaded)?;
        Ok((actor.clone(), target.clone()))
    }
}
