use std::sync::Arc;

use tracing::warn;

use crate::core::Trace;
use crate::error::{TraceViewError, TraceViewResult};
use crate::extensions::{
    ORIGINAL_REPRESENTATION, Representation, RepresentationRegistry, TrackingEvent,
};

use super::TracePage;

/// Current representation choice and its output for the loaded trace.
#[derive(Debug)]
pub struct RepresentationSelector {
    registry: RepresentationRegistry,
    selected: String,
    output: Option<Arc<Trace>>,
}

impl RepresentationSelector {
    /// Starts on the first registered representation, or on
    /// [`ORIGINAL_REPRESENTATION`] when the registry is empty.
    #[must_use]
    pub fn new(registry: RepresentationRegistry) -> Self {
        let selected = registry
            .first_key()
            .unwrap_or(ORIGINAL_REPRESENTATION)
            .to_owned();
        Self {
            registry,
            selected,
            output: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    #[must_use]
    pub fn registry(&self) -> &RepresentationRegistry {
        &self.registry
    }

    /// Output of the selected representation; `None` means "original".
    #[must_use]
    pub fn output(&self) -> Option<&Trace> {
        self.output.as_deref()
    }

    pub fn register(&mut self, representation: Arc<dyn Representation>) -> TraceViewResult<()> {
        self.registry.register(representation)
    }

    /// Selects `key` and applies it to `trace`.
    ///
    /// On an unknown key or a failing transform the previous selection and
    /// output are kept unchanged.
    pub fn select(&mut self, key: &str, trace: Option<&Trace>) -> TraceViewResult<()> {
        if key == ORIGINAL_REPRESENTATION {
            self.selected = key.to_owned();
            self.output = None;
            return Ok(());
        }

        let representation = self
            .registry
            .get(key)
            .ok_or_else(|| TraceViewError::UnknownRepresentation(key.to_owned()))?;
        let output = match trace {
            Some(trace) => Some(Arc::new(apply(representation.as_ref(), trace)?)),
            None => None,
        };

        self.selected = key.to_owned();
        self.output = output;
        Ok(())
    }

    /// Re-applies the current selection to a newly loaded trace.
    ///
    /// A failure falls back to showing the original trace.
    pub fn refresh(&mut self, trace: &Trace) {
        self.output = None;
        if self.selected == ORIGINAL_REPRESENTATION {
            return;
        }
        let Some(representation) = self.registry.get(&self.selected) else {
            return;
        };
        match apply(representation.as_ref(), trace) {
            Ok(output) => self.output = Some(Arc::new(output)),
            Err(err) => warn!(
                representation = %self.selected,
                trace_id = %trace.trace_id(),
                error = %err,
                "representation failed on refreshed trace; showing original"
            ),
        }
    }

    pub(super) fn clear_output(&mut self) {
        self.output = None;
    }
}

fn apply(representation: &dyn Representation, trace: &Trace) -> TraceViewResult<Trace> {
    representation.apply(trace).map_err(|err| match err {
        TraceViewError::TransformFailed { .. } => err,
        other => TraceViewError::TransformFailed {
            key: representation.key().to_owned(),
            reason: other.to_string(),
        },
    })
}

impl TracePage {
    #[must_use]
    pub fn representation(&self) -> &str {
        self.representations.selected()
    }

    #[must_use]
    pub fn representation_keys(&self) -> Vec<&str> {
        self.representations.registry().keys()
    }

    /// Registers a host-compiled representation alongside configured ones.
    pub fn register_representation(
        &mut self,
        representation: Arc<dyn Representation>,
    ) -> TraceViewResult<()> {
        self.representations.register(representation)
    }

    /// Selects a representation for the loaded trace.
    ///
    /// Failures are logged and leave the displayed trace unchanged; the
    /// return value reports whether the selection was accepted.
    pub fn select_representation(&mut self, key: &str) -> bool {
        let trace = self.trace.clone();
        match self.representations.select(key, trace.as_deref()) {
            Ok(()) => {
                self.recompute_display();
                self.emit_tracking_event(TrackingEvent::RepresentationChanged {
                    key: key.to_owned(),
                });
                true
            }
            Err(err) => {
                warn!(representation = key, error = %err, "representation selection rejected");
                false
            }
        }
    }
}
