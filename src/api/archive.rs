use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TraceId;
use crate::extensions::TrackingEvent;

use super::{ArchiveRequest, TracePage};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArchiveState {
    #[default]
    Unarchived,
    Pending,
    Archived,
    Error(String),
}

/// Archive state of the current trace as reported by the archive service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchiveStatus {
    pub state: ArchiveState,
    pub acknowledged: bool,
}

impl TracePage {
    #[must_use]
    pub fn archive_status(&self) -> &ArchiveStatus {
        &self.archive
    }

    /// Asks for the current trace to be archived.
    ///
    /// Returns `None` when archiving is disabled, no trace is navigated, or
    /// a request is already pending or done.
    pub fn archive_trace(&mut self) -> Option<ArchiveRequest> {
        if !self.config.archive_enabled {
            return None;
        }
        let trace_id = self.trace_id.clone()?;
        if matches!(
            self.archive.state,
            ArchiveState::Pending | ArchiveState::Archived
        ) {
            return None;
        }

        self.archive = ArchiveStatus {
            state: ArchiveState::Pending,
            acknowledged: false,
        };
        self.emit_tracking_event(TrackingEvent::ArchiveRequested {
            trace_id: trace_id.clone(),
        });
        Some(ArchiveRequest { trace_id })
    }

    /// Records the archive service's answer for `trace_id`.
    pub fn on_archive_result(&mut self, trace_id: &TraceId, result: Result<(), String>) -> bool {
        if self.trace_id.as_ref() != Some(trace_id) {
            debug!(trace_id = %trace_id, "discarding archive result for stale trace id");
            return false;
        }
        self.archive.state = match result {
            Ok(()) => ArchiveState::Archived,
            Err(message) => ArchiveState::Error(message),
        };
        true
    }

    /// Marks the archive outcome notification as seen.
    pub fn acknowledge_archive(&mut self) {
        self.archive.acknowledged = true;
    }
}
