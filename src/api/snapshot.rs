use serde::{Deserialize, Serialize};

use crate::core::{SpanId, TraceId, TraceSummary};
use crate::error::{TraceViewError, TraceViewResult};
use crate::interaction::ViewRangeTime;

use super::{ArchiveStatus, DerivedTraceCacheStats, TraceFetchState, TracePage, TraceViewType};

/// Which of the candidate traces is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplaySource {
    None,
    Original,
    Represented,
    Subtrace,
}

/// Serializable deterministic page snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePageSnapshot {
    pub trace_id: Option<TraceId>,
    pub focus_span_id: Option<SpanId>,
    pub fetch_state: TraceFetchState,
    pub view_type: TraceViewType,
    pub view_range: ViewRangeTime,
    pub representation: String,
    pub display_source: DisplaySource,
    pub displayed_span_ids: Vec<SpanId>,
    pub summary: Option<TraceSummary>,
    pub search_text: String,
    pub search_matches: Option<Vec<SpanId>>,
    pub archive: ArchiveStatus,
    pub cache: DerivedTraceCacheStats,
}

impl TracePage {
    #[must_use]
    pub fn display_source(&self) -> DisplaySource {
        if self.subtrace.is_some() {
            DisplaySource::Subtrace
        } else if self.representations.output().is_some() {
            DisplaySource::Represented
        } else if self.trace.is_some() {
            DisplaySource::Original
        } else {
            DisplaySource::None
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TracePageSnapshot {
        TracePageSnapshot {
            trace_id: self.trace_id.clone(),
            focus_span_id: self.focus_span_id.clone(),
            fetch_state: self.fetch_state.clone(),
            view_type: self.view_type,
            view_range: self.view_range.time(),
            representation: self.representations.selected().to_owned(),
            display_source: self.display_source(),
            displayed_span_ids: self
                .displayed_trace()
                .map(|trace| trace.spans().iter().map(|span| span.span_id.clone()).collect())
                .unwrap_or_default(),
            summary: self.summary(),
            search_text: self.search.text.clone(),
            search_matches: self
                .search
                .matches
                .as_ref()
                .map(|matches| matches.iter().cloned().collect()),
            archive: self.archive.clone(),
            cache: self.cache.stats(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> TraceViewResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| TraceViewError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
