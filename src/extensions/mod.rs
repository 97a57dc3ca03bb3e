//! Pluggable pieces hosts wire into a trace page.
//!
//! Representations transform trace data before display; tracking sinks
//! observe page events.

pub mod representations;
pub mod tracking;

/// Sentinel selection meaning "show the trace unchanged".
pub const ORIGINAL_REPRESENTATION: &str = "Original";

pub use representations::{
    ErrorPath, Representation, RepresentationConfig, RepresentationRegistry, ServiceFilter,
    TagRedaction,
};
pub use tracking::{TrackingEvent, TrackingSink};
