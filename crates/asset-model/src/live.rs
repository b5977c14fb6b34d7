//! Live materialization state

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::key::AssetKey;

/// Live materialization state of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiveStatus {
    /// Latest materialization succeeded
    Materialized {
        /// Event timestamp in milliseconds since the epoch
        #[serde(rename = "timestampMs")]
        timestamp_ms: i64,
    },
    /// A run materializing the asset is in flight
    InProgress,
    /// Latest attempt failed
    Failed,
    /// Never materialized
    Missing,
    /// No live data fetched for the asset
    #[default]
    Unknown,
}

impl LiveStatus {
    /// Short label for badges
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Materialized { .. } => "Materialized",
            Self::InProgress => "In progress",
            Self::Failed => "Failed",
            Self::Missing => "Never materialized",
            Self::Unknown => "Unknown",
        }
    }
}

/// Live status keyed by asset
pub type LiveDataMap = HashMap<AssetKey, LiveStatus>;

/// Status of `key`, `Unknown` when no live data was fetched
#[must_use]
pub fn status_of(live: &LiveDataMap, key: &AssetKey) -> LiveStatus {
    live.get(key).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_are_unknown() {
        let mut live = LiveDataMap::new();
        let key = AssetKey::single("orders");
        assert_eq!(status_of(&live, &key), LiveStatus::Unknown);

        live.insert(key.clone(), LiveStatus::Failed);
        assert_eq!(status_of(&live, &key), LiveStatus::Failed);
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&LiveStatus::Materialized { timestamp_ms: 5 }).unwrap();
        assert_eq!(json, r#"{"status":"MATERIALIZED","timestampMs":5}"#);
        let back: LiveStatus = serde_json::from_str(r#"{"status":"IN_PROGRESS"}"#).unwrap();
        assert_eq!(back, LiveStatus::InProgress);
    }
}
