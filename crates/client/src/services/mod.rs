//! One service per backend resource.
//!
//! Services borrow an [`ApiClient`](crate::client::ApiClient) and map each
//! method to exactly one HTTP call.

pub mod article;
pub mod comment;
pub mod remind;
pub mod space;
pub mod user;

pub use article::ArticleService;
pub use comment::CommentService;
pub use remind::RemindService;
pub use space::SpaceService;
pub use user::UserService;
