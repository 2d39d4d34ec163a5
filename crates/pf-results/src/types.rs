//! Result record types.

use pf_network::Snapshot;
use serde::{Deserialize, Serialize};

/// Final network state after a scenario or command script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRecord {
    pub record_id: String,
    pub system_id: String,
    /// RFC 3339.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    pub snapshot: Snapshot,
}
