use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Durable record of one trigger firing, written exactly once by
/// `TriggerActivationWriter` after fan-out completes (success or failure of
/// the aggregation future).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerActivation {
    pub namespace: String,
    pub entity_name: String,
    pub subject: String,
    pub activation_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub response: Option<Value>,
    pub version: String,
    pub duration_ms: Option<i64>,
    pub logs: Vec<String>,
}
