use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::{Span, SpanId, SpanTree, TraceId};
use crate::error::{TraceViewError, TraceViewResult};

/// Immutable, validated collection of spans for one traced request.
///
/// Bounds are always the min start / max end across `spans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace", rename_all = "camelCase")]
pub struct Trace {
    #[serde(rename = "traceID")]
    trace_id: TraceId,
    spans: Vec<Span>,
    start_time: f64,
    end_time: f64,
    #[serde(skip)]
    index: IndexMap<SpanId, usize>,
}

#[derive(Deserialize)]
struct RawTrace {
    #[serde(rename = "traceID")]
    trace_id: TraceId,
    spans: Vec<Span>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = TraceViewError;

    fn try_from(raw: RawTrace) -> TraceViewResult<Self> {
        Self::new(raw.trace_id, raw.spans)
    }
}

/// Header-level figures for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub span_count: usize,
    pub service_count: usize,
    pub depth: usize,
    pub duration: f64,
    pub error_count: usize,
}

impl Trace {
    pub fn new(trace_id: TraceId, spans: Vec<Span>) -> TraceViewResult<Self> {
        if spans.is_empty() {
            return Err(TraceViewError::InvalidData(
                "trace must contain at least one span".to_owned(),
            ));
        }

        let mut index = IndexMap::with_capacity(spans.len());
        let mut start_time = f64::INFINITY;
        let mut end_time = f64::NEG_INFINITY;

        for (position, span) in spans.iter().enumerate() {
            if span.span_id.is_empty() {
                return Err(TraceViewError::InvalidData(
                    "span id must not be empty".to_owned(),
                ));
            }
            if !span.start_time.is_finite() || !span.duration.is_finite() || span.duration < 0.0 {
                return Err(TraceViewError::InvalidData(format!(
                    "span `{}` timing must be finite with duration >= 0",
                    span.span_id
                )));
            }
            if index.insert(span.span_id.clone(), position).is_some() {
                return Err(TraceViewError::InvalidData(format!(
                    "duplicate span id `{}`",
                    span.span_id
                )));
            }
            start_time = start_time.min(span.start_time);
            end_time = end_time.max(span.end_time());
        }

        Ok(Self {
            trace_id,
            spans,
            start_time,
            end_time,
            index,
        })
    }

    #[must_use]
    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    #[must_use]
    pub fn span(&self, span_id: &SpanId) -> Option<&Span> {
        self.index.get(span_id).map(|&position| &self.spans[position])
    }

    #[must_use]
    pub fn position_of(&self, span_id: &SpanId) -> Option<usize> {
        self.index.get(span_id).copied()
    }

    #[must_use]
    pub fn contains(&self, span_id: &SpanId) -> bool {
        self.index.contains_key(span_id)
    }

    /// Offset of a span's start from the trace start, in microseconds.
    #[must_use]
    pub fn relative_start(&self, span: &Span) -> f64 {
        span.start_time - self.start_time
    }

    /// Service names in first-seen order.
    #[must_use]
    pub fn services(&self) -> IndexSet<&str> {
        self.spans
            .iter()
            .map(|span| span.service_name.as_str())
            .collect()
    }

    #[must_use]
    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.start_time as i64)
    }

    #[must_use]
    pub fn tree(&self) -> SpanTree<'_> {
        SpanTree::build(self)
    }

    #[must_use]
    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            span_count: self.spans.len(),
            service_count: self.services().len(),
            depth: self.tree().depth_levels(),
            duration: self.duration(),
            error_count: self.spans.iter().filter(|span| span.is_error()).count(),
        }
    }
}
