//! Transport/view records exchanged with the Wikift backend.
//!
//! These live only for the lifetime of the screen that fetched them. Field
//! names follow the backend's camelCase JSON; optional fields are omitted on
//! the way out.

pub mod article;
pub mod comment;
pub mod counter;
pub mod remind;
pub mod space;
pub mod user;

pub use article::{
    Article, ArticleFabulous, ArticleHistory, ArticleOrder, ArticleSearch, ArticleView,
};
pub use comment::{Comment, EntityRef};
pub use counter::{CounterPoint, FollowCounter};
pub use remind::{Remind, RemindKind};
pub use space::Space;
pub use user::{LoginParams, PasswordUpdate, RegisterParams, TokenResponse, User, UserType};
