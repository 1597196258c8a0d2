mod common;

use assert_matches::assert_matches;
use common::{alice, Harness};
use reqwest::Method;
use serde_json::json;
use wikift_client::fake::Reply;
use wikift_views::{FollowedUsersView, Slice, UserInfoView, ViewError};

fn script_profile(harness: &Harness) {
    harness
        .transport
        .respond(
            Method::GET,
            "public/user/info/bob",
            Reply::data(json!({ "id": 2, "username": "bob", "aliasName": "Bob" })),
        )
        .respond(
            Method::GET,
            "public/user/contribution/bob",
            Reply::data(json!([{ "dataKey": "2018-03-01", "dataValue": 4 }])),
        )
        .respond(
            Method::GET,
            "article/top/by/user",
            Reply::data(json!([{ "id": 7, "title": "Ownership", "user": { "id": 2, "username": "bob" } }])),
        )
        .respond(Method::GET, "user/follow/check", Reply::data(true))
        .respond(
            Method::GET,
            "user/follow/count",
            Reply::data(json!({ "follows": 3, "cover": 10 })),
        );
}

fn view(harness: &Harness) -> UserInfoView {
    UserInfoView::new(harness.client.clone(), harness.notifier.clone(), "bob")
}

#[tokio::test]
async fn signed_in_profile_loads_everything() {
    let harness = Harness::signed_in();
    script_profile(&harness);
    let mut view = view(&harness);

    view.initialize().await.unwrap();

    let state = view.state();
    assert_eq!(state.user.as_ref().map(|u| u.display_name()), Some("Bob"));
    assert!(!state.can_follow);
    assert_eq!(state.follow_counter.map(|c| c.followers), Some(10));
    assert_eq!(state.contribution.len(), 1);
    assert_eq!(state.top_articles.len(), 1);

    let check = &harness
        .transport
        .requests_to(&Method::GET, "user/follow/check")[0];
    assert_eq!(check.query_value("followUserId"), Some("1"));
    assert_eq!(check.query_value("coverUserId"), Some("2"));
}

#[tokio::test]
async fn anonymous_profile_skips_follow_data() {
    let harness = Harness::anonymous();
    script_profile(&harness);
    let mut view = view(&harness);

    view.initialize().await.unwrap();

    assert!(view.state().user.is_some());
    assert_eq!(view.state().contribution.len(), 1);
    assert_eq!(harness.count(Method::GET, "user/follow/check"), 0);
    assert_eq!(harness.count(Method::GET, "user/follow/count"), 0);
    assert_eq!(harness.count(Method::GET, "article/top/by/user"), 0);
}

#[tokio::test]
async fn missing_profile_still_loads_contribution() {
    let harness = Harness::signed_in();
    script_profile(&harness);
    harness.transport.respond(
        Method::GET,
        "public/user/info/bob",
        Reply::rejected(4004, "no such user"),
    );
    let mut view = view(&harness);

    assert_matches!(view.initialize().await, Err(ViewError::Api(_)));

    let state = view.state();
    assert!(state.user.is_none());
    assert!(state.failures.contains(Slice::Profile));
    assert_eq!(state.contribution.len(), 1);
    assert_eq!(harness.count(Method::GET, "user/follow/check"), 0);
}

#[tokio::test]
async fn update_profile_reloads() {
    let harness = Harness::signed_in();
    script_profile(&harness);
    harness
        .transport
        .respond(Method::PUT, "user/update", Reply::data(json!({ "id": 1, "username": "alice" })));
    let mut view = view(&harness);
    view.initialize().await.unwrap();

    let mut edited = alice();
    edited.signature = Some("hello".into());
    view.update_profile(edited).await.unwrap();

    let sent = &harness.transport.requests_to(&Method::PUT, "user/update")[0];
    assert_eq!(sent.body.as_ref().unwrap()["signature"], "hello");
    assert_eq!(harness.count(Method::GET, "public/user/info/bob"), 2);
}

#[tokio::test]
async fn unfollow_then_follow() {
    let harness = Harness::signed_in();
    script_profile(&harness);
    harness
        .transport
        .respond(Method::PUT, "user/unfollow", Reply::data(1))
        .respond(Method::PUT, "user/follow", Reply::data(1));
    let mut view = view(&harness);
    view.initialize().await.unwrap();

    assert!(view.unfollow().await.unwrap());
    assert!(view.state().can_follow);
    assert!(view.follow().await.unwrap());
    assert!(!view.state().can_follow);
}

#[tokio::test]
async fn followed_users_are_listed() {
    let harness = Harness::signed_in();
    harness.transport.respond(
        Method::GET,
        "user/following",
        Reply::data(json!([{ "id": 2, "username": "bob" }, { "id": 3, "username": "carol" }])),
    );
    let mut view = FollowedUsersView::new(harness.client.clone(), harness.notifier.clone(), "alice");

    view.initialize().await.unwrap();

    assert_eq!(view.state().users.len(), 2);
    let sent = &harness.transport.requests()[0];
    assert_eq!(sent.query_value("userName"), Some("alice"));
}

#[tokio::test]
async fn followed_users_failure_is_recorded() {
    let harness = Harness::signed_in();
    harness
        .transport
        .respond(Method::GET, "user/following", Reply::Status(401));
    let mut rx = harness.notifier.subscribe();
    let mut view = FollowedUsersView::new(harness.client.clone(), harness.notifier.clone(), "alice");

    let err = view.initialize().await.unwrap_err();

    assert_matches!(err, ViewError::Api(ref e) if e.is_unauthorized());
    assert!(view.state().failures.contains(Slice::Following));
    assert!(rx.try_recv().is_ok());
}
