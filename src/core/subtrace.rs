use tracing::debug;

use crate::core::{SpanId, Trace};

/// Derives the re-rooted trace for `focus`: the focus span plus all of its
/// transitive descendants, in stable pre-order.
///
/// Returns `None` when there is no trace, no (or an empty) focus id, or the
/// focus id is not part of the trace. Callers fall back to the full trace.
#[must_use]
pub fn derive_subtrace(trace: Option<&Trace>, focus: Option<&SpanId>) -> Option<Trace> {
    let trace = trace?;
    let focus = focus.filter(|id| !id.is_empty())?;

    if !trace.contains(focus) {
        debug!(
            trace_id = %trace.trace_id(),
            focus_span_id = %focus,
            "focus span not present in trace; falling back to full trace"
        );
        return None;
    }

    let spans = trace
        .tree()
        .preorder_from(focus)
        .into_iter()
        .cloned()
        .collect();

    // Bounds are recomputed by `Trace::new` from the collected spans; span
    // ids are already unique and timings already validated.
    match Trace::new(trace.trace_id().clone(), spans) {
        Ok(subtrace) => Some(subtrace),
        Err(err) => {
            debug!(error = %err, "subtrace construction failed; falling back to full trace");
            None
        }
    }
}
