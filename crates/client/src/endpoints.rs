//! Endpoint paths, relative to the API base URL.
//!
//! Paths ending in `/` take a trailing path parameter.

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

pub const USER_INFO: &str = "public/user/info/";
pub const USER_REGISTER: &str = "public/user/register";
pub const USER_UPDATE: &str = "user/update";
pub const USER_UPDATE_EMAIL: &str = "user/update/email";
pub const USER_UPDATE_PASSWORD: &str = "user/update/password";
pub const USER_TOP_BY_ACTIVE: &str = "public/user/top/active";
pub const USER_FOLLOW: &str = "user/follow";
pub const USER_UNFOLLOW: &str = "user/unfollow";
pub const USER_FOLLOW_CHECK: &str = "user/follow/check";
pub const USER_FOLLOW_COUNT: &str = "user/follow/count";
pub const USER_FOLLOWING: &str = "user/following";
pub const USER_TYPE: &str = "public/user/type/";
pub const USER_PUBLIC_LIST: &str = "public/user/list";
pub const USER_CONTRIBUTION: &str = "public/user/contribution/";

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

pub const ARTICLE_INFO: &str = "public/article/info/";
pub const ARTICLE_LIST: &str = "public/article/list";
pub const ARTICLE_SEARCH: &str = "public/article/search";
pub const ARTICLE_MY: &str = "article/my";
pub const ARTICLE_TOP_BY_USER: &str = "article/top/by/user";
pub const ARTICLE_VIEW: &str = "public/article/view";
pub const ARTICLE_VIEW_COUNTER: &str = "public/article/view/";
pub const ARTICLE_FABULOUS: &str = "article/fabulous";
pub const ARTICLE_UNFABULOUS: &str = "article/unfabulous/";
pub const ARTICLE_FABULOUS_CHECK: &str = "article/fabulous/check";
pub const ARTICLE_FABULOUS_COUNT: &str = "article/fabulous/count";
pub const ARTICLE_DELETE: &str = "article/delete/";
pub const ARTICLE_HISTORY: &str = "article/history/";

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

pub const COMMENT_LIST_BY_ARTICLE: &str = "public/comment/list/";
pub const COMMENT_CREATE: &str = "comment/create";
pub const COMMENT_DELETE: &str = "comment/delete/";
pub const COMMENT_COUNTER_BY_WEEK: &str = "comment/counter/week/";

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

pub const SPACE_LIST: &str = "public/space/list";
pub const SPACE_LIST_BY_USER: &str = "space/list/user/";
pub const SPACE_INFO: &str = "public/space/info/";
pub const SPACE_CREATE: &str = "space/create";

// ---------------------------------------------------------------------------
// Remind
// ---------------------------------------------------------------------------

pub const REMIND_LIST_BY_USER: &str = "remind/list/user";
pub const REMIND_INFO: &str = "info/";
pub const REMIND_READ: &str = "read/";

/// `prefix` followed by a path parameter.
pub fn with_param(prefix: &str, param: impl std::fmt::Display) -> String {
    format!("{prefix}{param}")
}
