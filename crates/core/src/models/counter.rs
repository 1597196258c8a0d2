use serde::{Deserialize, Serialize};

/// One bucket of a weekly trend (comments or views per day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterPoint {
    pub data_key: String,
    pub data_value: i64,
}

/// Split a trend into chart axes: keys along x, values as the series.
pub fn chart_series(points: &[CounterPoint]) -> (Vec<&str>, Vec<i64>) {
    points
        .iter()
        .map(|p| (p.data_key.as_str(), p.data_value))
        .unzip()
}

/// Follow totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCounter {
    /// Users this user follows.
    #[serde(default)]
    pub follows: u64,
    /// Users following this user.
    #[serde(default, alias = "cover")]
    pub followers: u64,
}
