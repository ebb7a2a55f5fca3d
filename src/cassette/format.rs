//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the session was recorded at, or "unknown".
    pub commit: String,
    /// The recorded interactions, in call order.
    pub interactions: Vec<Interaction>,
}

/// One recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name (e.g., `"photo_transformer"`).
    pub port: String,
    /// Method name (e.g., `"transform"`).
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized call output, in `{"Ok": ..}` / `{"Err": ..}` convention.
    pub output: serde_json::Value,
}
