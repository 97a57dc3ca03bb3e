use std::sync::Arc;

use indexmap::IndexSet;

use crate::core::{SpanId, Trace, TraceId, TraceSummary};
use crate::error::TraceViewResult;
use crate::extensions::{TrackingEvent, TrackingSink};
use crate::interaction::{ShortcutBindings, ViewRangeController};

use super::{
    ArchiveStatus, DerivedTraceCache, RepresentationSelector, TraceFetchState, TracePageConfig,
    TraceViewType,
};

#[derive(Debug, Clone, Default)]
pub(super) struct SearchState {
    pub(super) text: String,
    pub(super) matches: Option<IndexSet<SpanId>>,
    pub(super) scroll_cursor: Option<SpanId>,
}

/// Page-level controller for one trace view.
///
/// Owns the navigated trace/focus ids, fetch and archive state, the view
/// range, representation selection and search. Every input event
/// recomputes derived state synchronously; readers take snapshots.
pub struct TracePage {
    pub(super) config: TracePageConfig,
    pub(super) trace_id: Option<TraceId>,
    pub(super) focus_span_id: Option<SpanId>,
    pub(super) fetch_state: TraceFetchState,
    pub(super) trace: Option<Arc<Trace>>,
    pub(super) subtrace: Option<Arc<Trace>>,
    pub(super) representations: RepresentationSelector,
    pub(super) view_range: ViewRangeController,
    pub(super) view_type: TraceViewType,
    pub(super) search: SearchState,
    pub(super) shortcuts: ShortcutBindings,
    pub(super) archive: ArchiveStatus,
    pub(super) cache: DerivedTraceCache,
    pub(super) tracking_sinks: Vec<Box<dyn TrackingSink>>,
}

impl TracePage {
    pub fn new(config: TracePageConfig) -> TraceViewResult<Self> {
        let registry = config.representation_registry()?;
        let shortcuts = config.shortcut_bindings()?;

        Ok(Self {
            trace_id: None,
            focus_span_id: None,
            fetch_state: TraceFetchState::Idle,
            trace: None,
            subtrace: None,
            representations: RepresentationSelector::new(registry),
            view_range: ViewRangeController::new(),
            view_type: config.default_view,
            search: SearchState::default(),
            shortcuts,
            archive: ArchiveStatus::default(),
            cache: DerivedTraceCache::new(),
            tracking_sinks: Vec::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TracePageConfig {
        &self.config
    }

    #[must_use]
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    #[must_use]
    pub fn focus_span_id(&self) -> Option<&SpanId> {
        self.focus_span_id.as_ref()
    }

    /// The fetched trace, before any representation or re-rooting.
    #[must_use]
    pub fn original_trace(&self) -> Option<&Trace> {
        self.trace.as_deref()
    }

    #[must_use]
    pub fn subtrace(&self) -> Option<&Trace> {
        self.subtrace.as_deref()
    }

    /// The trace views should render: subtrace, else the selected
    /// representation's output, else the original trace.
    #[must_use]
    pub fn displayed_trace(&self) -> Option<&Trace> {
        self.subtrace
            .as_deref()
            .or_else(|| self.representations.output())
            .or(self.trace.as_deref())
    }

    #[must_use]
    pub fn summary(&self) -> Option<TraceSummary> {
        self.displayed_trace().map(Trace::summary)
    }

    #[must_use]
    pub fn view_type(&self) -> TraceViewType {
        self.view_type
    }

    /// Switches the active view. Returns `true` when it changed.
    pub fn set_view_type(&mut self, view: TraceViewType) -> bool {
        if self.view_type == view {
            return false;
        }
        self.view_type = view;
        self.emit_tracking_event(TrackingEvent::ViewTypeChanged { view });
        true
    }

    #[must_use]
    pub fn shortcuts(&self) -> &ShortcutBindings {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutBindings {
        &mut self.shortcuts
    }

    /// Re-derives the subtrace and everything that depends on the displayed
    /// trace.
    pub(super) fn recompute_display(&mut self) {
        self.subtrace = match (&self.trace, &self.focus_span_id) {
            (Some(trace), Some(focus)) => self.cache.subtrace(trace, focus),
            _ => None,
        };
        self.refresh_search_matches();
    }
}
