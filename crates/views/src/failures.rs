use std::collections::BTreeMap;

use serde::Serialize;
use wikift_client::ApiError;

/// A piece of view state filled by one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slice {
    Article,
    Fabulous,
    ViewRecord,
    FollowStatus,
    Comments,
    CommentTrend,
    ViewTrend,
    History,
    Profile,
    FollowCounter,
    Contribution,
    TopArticles,
    Following,
    Spaces,
}

/// Last failure per slice. A later success on the same slice clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Failures(BTreeMap<Slice, String>);

impl Failures {
    pub fn record(&mut self, slice: Slice, err: &ApiError) {
        tracing::warn!(?slice, error = %err, "View slice failed to load");
        self.0.insert(slice, err.to_string());
    }

    pub fn clear(&mut self, slice: Slice) {
        self.0.remove(&slice);
    }

    pub fn get(&self, slice: Slice) -> Option<&str> {
        self.0.get(&slice).map(String::as_str)
    }

    pub fn contains(&self, slice: Slice) -> bool {
        self.0.contains_key(&slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record `result`'s error, or clear the slice on success.
    pub(crate) fn track<T>(&mut self, slice: Slice, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.clear(slice);
                Some(value)
            }
            Err(e) => {
                self.record(slice, &e);
                None
            }
        }
    }
}
