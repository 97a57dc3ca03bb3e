use crate::core::SpanId;

use super::{NavigationRequest, TracePage};

impl TracePage {
    /// Builds the navigation that re-roots the page on `span_id`.
    ///
    /// The page itself changes only when the URL layer reports the new focus
    /// back through [`TracePage::navigate`].
    #[must_use]
    pub fn request_focus(&self, span_id: SpanId) -> Option<NavigationRequest> {
        let trace_id = self.trace_id.clone()?;
        if span_id.is_empty() {
            return None;
        }
        Some(NavigationRequest::Focus { trace_id, span_id })
    }

    /// Builds the navigation back to the full, un-rooted trace.
    #[must_use]
    pub fn request_reset_root(&self) -> Option<NavigationRequest> {
        let trace_id = self.trace_id.clone()?;
        Some(NavigationRequest::ResetRoot { trace_id })
    }
}
