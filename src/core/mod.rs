pub mod search;
pub mod span;
pub mod subtrace;
pub mod time_range;
pub mod trace;
pub mod tree;

pub use search::{SpanQuery, filter_spans};
pub use span::{RefType, Span, SpanId, SpanReference, Tag, TagValue, TraceId};
pub use subtrace::derive_subtrace;
pub use time_range::{
    MAX_VIEW_START, MIN_VIEW_END, MIN_VIEW_RANGE, RANGE_EPSILON, TimeRange, VIEW_CHANGE_BASE,
    VIEW_CHANGE_FAST,
};
pub use trace::{Trace, TraceSummary};
pub use tree::SpanTree;
