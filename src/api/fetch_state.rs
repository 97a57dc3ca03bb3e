use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{SpanId, Trace, TraceId};

use super::{ArchiveStatus, FetchRequest, TracePage};

/// Lifecycle of the trace fetch for the navigated trace id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceFetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl TracePage {
    #[must_use]
    pub fn fetch_state(&self) -> &TraceFetchState {
        &self.fetch_state
    }

    /// Applies navigation input (trace id and optional focus span id).
    ///
    /// Returns a fetch request when the trace still has to be loaded.
    pub fn navigate(&mut self, trace_id: TraceId, focus: Option<SpanId>) -> Option<FetchRequest> {
        let focus = focus.filter(|id| !id.is_empty());

        if self.trace_id.as_ref() != Some(&trace_id) {
            self.trace_id = Some(trace_id.clone());
            self.focus_span_id = focus;
            self.fetch_state = TraceFetchState::Idle;
            self.trace = None;
            self.subtrace = None;
            self.representations.clear_output();
            self.cache.invalidate();
            self.archive = ArchiveStatus::default();
            self.view_range.initialize();
            self.clear_search();
            return Some(FetchRequest { trace_id });
        }

        if self.focus_span_id != focus {
            self.set_focus_span(focus);
        }

        match self.fetch_state {
            TraceFetchState::Idle | TraceFetchState::Failed(_) => Some(FetchRequest { trace_id }),
            TraceFetchState::Loading | TraceFetchState::Loaded => None,
        }
    }

    /// Changes the re-root focus, re-deriving the displayed trace and
    /// resetting the view range.
    pub fn set_focus_span(&mut self, focus: Option<SpanId>) {
        let focus = focus.filter(|id| !id.is_empty());
        if self.focus_span_id == focus {
            return;
        }
        self.focus_span_id = focus;
        self.view_range.initialize();
        self.search.scroll_cursor = None;
        self.recompute_display();
    }

    pub fn on_trace_loading(&mut self, trace_id: &TraceId) {
        if !self.is_current_trace(trace_id) {
            debug!(trace_id = %trace_id, "ignoring loading event for stale trace id");
            return;
        }
        self.fetch_state = TraceFetchState::Loading;
    }

    /// Accepts a fetched trace. Returns `false` when it belongs to a trace
    /// id the page no longer shows.
    pub fn on_trace_loaded(&mut self, trace: Trace) -> bool {
        if !self.is_current_trace(trace.trace_id()) {
            debug!(trace_id = %trace.trace_id(), "discarding stale trace result");
            return false;
        }

        let trace = Arc::new(trace);
        self.cache.invalidate();
        self.representations.refresh(&trace);
        self.trace = Some(trace);
        self.fetch_state = TraceFetchState::Loaded;
        self.view_range.initialize();
        self.search.scroll_cursor = None;
        self.recompute_display();
        true
    }

    /// Records a fetch failure. A previously loaded trace stays displayed.
    pub fn on_trace_error(&mut self, trace_id: &TraceId, message: impl Into<String>) -> bool {
        if !self.is_current_trace(trace_id) {
            debug!(trace_id = %trace_id, "discarding stale trace error");
            return false;
        }
        self.fetch_state = TraceFetchState::Failed(message.into());
        true
    }

    fn is_current_trace(&self, trace_id: &TraceId) -> bool {
        self.trace_id.as_ref() == Some(trace_id)
    }
}
