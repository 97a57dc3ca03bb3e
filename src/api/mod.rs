mod archive;
mod display_cache;
mod fetch_state;
mod json_contract;
mod navigation;
mod page_config;
mod representation_selector;
mod search_controller;
mod shortcut_dispatch;
mod snapshot;
mod trace_page;
mod tracking_dispatch;
mod view_range_access;

use serde::{Deserialize, Serialize};

use crate::core::{SpanId, TraceId};

pub use archive::{ArchiveState, ArchiveStatus};
pub use display_cache::{DerivedTraceCache, DerivedTraceCacheStats, TraceCacheKey};
pub use fetch_state::TraceFetchState;
pub use json_contract::{TRACE_PAGE_SNAPSHOT_JSON_SCHEMA_V1, TracePageSnapshotJsonContractV1};
pub use page_config::TracePageConfig;
pub use representation_selector::RepresentationSelector;
pub use snapshot::{DisplaySource, TracePageSnapshot};
pub use trace_page::TracePage;

/// Interchangeable renderings of the displayed trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceViewType {
    #[default]
    Timeline,
    Graph,
    Statistics,
    Flamegraph,
    SpanList,
    TraceJson,
}

/// Request for the fetch collaborator to load a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub trace_id: TraceId,
}

/// Request for the archive collaborator to archive a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub trace_id: TraceId,
}

/// Navigation the page asks the URL layer to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationRequest {
    Focus { trace_id: TraceId, span_id: SpanId },
    ResetRoot { trace_id: TraceId },
}
