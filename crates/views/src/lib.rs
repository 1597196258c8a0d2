//! Page view models for the Wikift client.
//!
//! Each view owns its state, reads the [`Session`](wikift_client::Session)
//! it was built with, and orchestrates the calls that fill that state. Views
//! render nothing; a front end binds to the public state and subscribes to
//! [`Notice`]s for user-visible feedback.
//!
//! Every pending call is bound to the view's [`ViewScope`]. Tearing the view
//! down cancels outstanding calls and no late completion touches state.

pub mod article_detail;
pub mod error;
pub mod failures;
pub mod followed_users;
pub mod notice;
pub mod scope;
pub mod space_list;
pub mod user_info;

pub use article_detail::{ArticleDetailState, ArticleDetailView};
pub use error::{ViewError, ViewResult};
pub use failures::{Failures, Slice};
pub use followed_users::{FollowedUsersState, FollowedUsersView};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use scope::{ScopeHandle, ViewScope};
pub use space_list::{SpaceListState, SpaceListView};
pub use user_info::{UserInfoState, UserInfoView};
