use crate::error::{TraceViewError, TraceViewResult};
use crate::extensions::{TrackingEvent, TrackingSink};

use super::TracePage;

impl TracePage {
    /// Registers a tracking sink with unique identifier.
    pub fn register_tracking_sink(&mut self, sink: Box<dyn TrackingSink>) -> TraceViewResult<()> {
        let sink_id = sink.id().to_owned();
        if sink_id.is_empty() {
            return Err(TraceViewError::InvalidData(
                "tracking sink id must not be empty".to_owned(),
            ));
        }
        if self.has_tracking_sink(&sink_id) {
            return Err(TraceViewError::InvalidData(format!(
                "tracking sink with id `{sink_id}` is already registered"
            )));
        }
        self.tracking_sinks.push(sink);
        Ok(())
    }

    /// Unregisters a tracking sink by id. Returns `true` when removed.
    pub fn unregister_tracking_sink(&mut self, sink_id: &str) -> bool {
        if let Some(position) = self
            .tracking_sinks
            .iter()
            .position(|entry| entry.id() == sink_id)
        {
            self.tracking_sinks.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn tracking_sink_count(&self) -> usize {
        self.tracking_sinks.len()
    }

    #[must_use]
    pub fn has_tracking_sink(&self, sink_id: &str) -> bool {
        self.tracking_sinks.iter().any(|sink| sink.id() == sink_id)
    }

    pub(super) fn emit_tracking_event(&mut self, event: TrackingEvent) {
        for sink in &mut self.tracking_sinks {
            sink.on_event(&event);
        }
    }
}
