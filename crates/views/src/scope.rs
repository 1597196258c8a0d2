//! View lifetime.
//!
//! A [`ViewScope`] wraps a [`CancellationToken`]. Every call a view issues
//! runs through [`ViewScope::run`], which races it against the token; once the
//! scope is torn down, pending and future calls resolve to
//! [`ViewError::Detached`] and their results are dropped unseen.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ViewError, ViewResult};

#[derive(Debug, Default)]
pub struct ViewScope {
    cancel: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that can tear the scope down from another task.
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            cancel: self.cancel.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Drive `fut` unless the scope is torn down first.
    pub async fn run<F: Future>(&self, fut: F) -> ViewResult<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ViewError::Detached),
            out = fut => Ok(out),
        }
    }
}

/// Cloneable teardown trigger for a [`ViewScope`].
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    cancel: CancellationToken,
}

impl ScopeHandle {
    pub fn teardown(&self) {
        tracing::debug!("View torn down");
        self.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
