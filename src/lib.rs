//! trace-view-rs: headless core of a distributed-tracing trace page.
//!
//! The crate keeps the page's state machine independent of any rendering
//! framework: view-range pan/zoom, sub-trace re-rooting, representation
//! selection, search and the page plumbing around them.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TracePage, TracePageConfig};
pub use error::{TraceViewError, TraceViewResult};
