use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{SpanId, Trace, TraceId, derive_subtrace};

/// Identity of a loaded trace for cache purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceCacheKey {
    pub trace_id: TraceId,
    pub span_count: usize,
}

impl TraceCacheKey {
    #[must_use]
    pub fn of(trace: &Trace) -> Self {
        Self {
            trace_id: trace.trace_id().clone(),
            span_count: trace.span_count(),
        }
    }
}

/// Runtime metrics exposed by the derived-trace cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedTraceCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Subtraces keyed by trace identity and focus span.
///
/// Misses (unknown focus ids) are cached too. The owner calls
/// [`DerivedTraceCache::invalidate`] whenever the source trace is replaced.
#[derive(Debug, Default)]
pub struct DerivedTraceCache {
    entries: HashMap<(TraceCacheKey, SpanId), Option<Arc<Trace>>>,
    hits: u64,
    misses: u64,
}

impl DerivedTraceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached subtrace, deriving and storing it on a miss.
    pub fn subtrace(&mut self, trace: &Trace, focus: &SpanId) -> Option<Arc<Trace>> {
        if focus.is_empty() {
            return None;
        }
        let key = (TraceCacheKey::of(trace), focus.clone());
        if let Some(entry) = self.entries.get(&key) {
            self.hits += 1;
            return entry.clone();
        }
        self.misses += 1;
        let derived = derive_subtrace(Some(trace), Some(focus)).map(Arc::new);
        self.entries.insert(key, derived.clone());
        derived
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> DerivedTraceCacheStats {
        DerivedTraceCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Span, SpanReference};

    fn trace() -> Trace {
        Trace::new(
            TraceId::new("t"),
            vec![
                Span::new("root", "svc", "op", 0.0, 10.0),
                Span::new("leaf", "svc", "op", 2.0, 3.0)
                    .with_reference(SpanReference::child_of(TraceId::new("t"), SpanId::new("root"))),
            ],
        )
        .expect("valid trace")
    }

    #[test]
    fn second_lookup_is_a_hit_until_invalidated() {
        let trace = trace();
        let mut cache = DerivedTraceCache::new();
        let focus = SpanId::new("leaf");

        let first = cache.subtrace(&trace, &focus).expect("leaf exists");
        let second = cache.subtrace(&trace, &focus).expect("leaf exists");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), DerivedTraceCacheStats { hits: 1, misses: 1, size: 1 });

        cache.invalidate();
        assert_eq!(cache.stats().size, 0);
        let _ = cache.subtrace(&trace, &focus);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn unknown_focus_is_cached_as_miss() {
        let trace = trace();
        let mut cache = DerivedTraceCache::new();
        assert!(cache.subtrace(&trace, &SpanId::new("nope")).is_none());
        assert!(cache.subtrace(&trace, &SpanId::new("nope")).is_none());
        assert_eq!(cache.stats().hits, 1);
    }
}
