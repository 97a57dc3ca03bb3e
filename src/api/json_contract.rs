use serde::{Deserialize, Serialize};

use crate::error::{TraceViewError, TraceViewResult};

use super::TracePageSnapshot;

pub const TRACE_PAGE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePageSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TracePageSnapshot,
}

impl TracePageSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TraceViewResult<String> {
        let payload = TracePageSnapshotJsonContractV1 {
            schema_version: TRACE_PAGE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TraceViewError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TraceViewResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<TracePageSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: TracePageSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                TraceViewError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != TRACE_PAGE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TraceViewError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
