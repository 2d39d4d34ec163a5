//! Content-based hashing for record IDs.

use crate::ResultsResult;
use pf_project::schema::{ScenarioDef, SystemDef};
use sha2::{Digest, Sha256};

/// Same system, scenario and command script always give the same ID.
///
/// Fails if the system or scenario cannot be serialized.
pub fn compute_record_id(
    system: &SystemDef,
    scenario: Option<&ScenarioDef>,
    commands: &[String],
) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    let system_json = serde_json::to_string(system)?;
    hasher.update(system_json.as_bytes());

    let scenario_json = serde_json::to_string(&scenario)?;
    hasher.update(scenario_json.as_bytes());

    for line in commands {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
