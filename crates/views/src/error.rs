use wikift_client::ApiError;
use wikift_core::CoreError;

/// Why a view operation did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The view was torn down while the operation was pending.
    #[error("View was torn down before the operation completed")]
    Detached,

    /// The action needs a signed-in user.
    #[error("Sign in required")]
    NotSignedIn,

    /// The action needs data the view has not loaded yet.
    #[error("Nothing loaded yet")]
    NotLoaded,

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ViewResult<T> = Result<T, ViewError>;
