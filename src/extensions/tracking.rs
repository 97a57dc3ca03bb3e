use serde::{Deserialize, Serialize};

use crate::api::TraceViewType;
use crate::core::{TimeRange, TraceId};
use crate::interaction::RangeSource;

/// Fire-and-forget analytics notifications emitted by the trace page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackingEvent {
    RangeAdjusted {
        source: RangeSource,
        new_range: TimeRange,
        old_range: TimeRange,
    },
    RepresentationChanged {
        key: String,
    },
    ViewTypeChanged {
        view: TraceViewType,
    },
    ArchiveRequested {
        trace_id: TraceId,
    },
}

/// Receiver for tracking events.
///
/// Sinks observe the page; they cannot alter its control flow.
pub trait TrackingSink {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &TrackingEvent);
}
