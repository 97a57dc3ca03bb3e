use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Span, SpanId, Trace};
use crate::error::{TraceViewError, TraceViewResult};

/// Named transform from a full trace to a derived trace.
///
/// Implementations are compiled into the host and picked by key from
/// configuration; nothing is evaluated from configuration text.
pub trait Representation: Send + Sync {
    fn key(&self) -> &str;
    fn apply(&self, trace: &Trace) -> TraceViewResult<Trace>;
}

/// Keeps only spans emitted by the listed services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFilter {
    key: String,
    services: Vec<String>,
}

impl ServiceFilter {
    #[must_use]
    pub fn new(key: impl Into<String>, services: Vec<String>) -> Self {
        Self {
            key: key.into(),
            services,
        }
    }
}

impl Representation for ServiceFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn apply(&self, trace: &Trace) -> TraceViewResult<Trace> {
        let spans: Vec<Span> = trace
            .spans()
            .iter()
            .filter(|span| self.services.iter().any(|name| *name == span.service_name))
            .cloned()
            .collect();
        if spans.is_empty() {
            return Err(TraceViewError::TransformFailed {
                key: self.key.clone(),
                reason: format!("no spans belong to services {:?}", self.services),
            });
        }
        Trace::new(trace.trace_id().clone(), spans)
    }
}

/// Drops tags whose key is listed, e.g. to hide noisy or sensitive values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRedaction {
    key: String,
    tag_keys: Vec<String>,
}

impl TagRedaction {
    #[must_use]
    pub fn new(key: impl Into<String>, tag_keys: Vec<String>) -> Self {
        Self {
            key: key.into(),
            tag_keys,
        }
    }
}

impl Representation for TagRedaction {
    fn key(&self) -> &str {
        &self.key
    }

    fn apply(&self, trace: &Trace) -> TraceViewResult<Trace> {
        let spans = trace
            .spans()
            .iter()
            .map(|span| {
                let mut span = span.clone();
                span.tags.retain(|tag| !self.tag_keys.contains(&tag.key));
                span
            })
            .collect();
        Trace::new(trace.trace_id().clone(), spans)
    }
}

/// Keeps error spans together with every ancestor up to their roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPath {
    key: String,
}

impl ErrorPath {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Representation for ErrorPath {
    fn key(&self) -> &str {
        &self.key
    }

    fn apply(&self, trace: &Trace) -> TraceViewResult<Trace> {
        let tree = trace.tree();
        let mut keep: HashSet<&SpanId> = HashSet::new();
        for span in trace.spans().iter().filter(|span| span.is_error()) {
            let mut cursor = Some(span);
            while let Some(current) = cursor {
                if !keep.insert(&current.span_id) {
                    break;
                }
                cursor = tree.parent(&current.span_id);
            }
        }
        if keep.is_empty() {
            return Err(TraceViewError::TransformFailed {
                key: self.key.clone(),
                reason: "trace has no error spans".to_owned(),
            });
        }
        let spans = trace
            .spans()
            .iter()
            .filter(|span| keep.contains(&span.span_id))
            .cloned()
            .collect();
        Trace::new(trace.trace_id().clone(), spans)
    }
}

/// Configuration form of the built-in representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RepresentationConfig {
    ServiceFilter { key: String, services: Vec<String> },
    TagRedaction { key: String, tag_keys: Vec<String> },
    ErrorPath { key: String },
}

impl RepresentationConfig {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::ServiceFilter { key, .. }
            | Self::TagRedaction { key, .. }
            | Self::ErrorPath { key } => key,
        }
    }

    #[must_use]
    pub fn build(&self) -> Arc<dyn Representation> {
        match self {
            Self::ServiceFilter { key, services } => {
                Arc::new(ServiceFilter::new(key.clone(), services.clone()))
            }
            Self::TagRedaction { key, tag_keys } => {
                Arc::new(TagRedaction::new(key.clone(), tag_keys.clone()))
            }
            Self::ErrorPath { key } => Arc::new(ErrorPath::new(key.clone())),
        }
    }
}

/// Ordered registry of available representations.
#[derive(Clone, Default)]
pub struct RepresentationRegistry {
    entries: IndexMap<String, Arc<dyn Representation>>,
}

impl std::fmt::Debug for RepresentationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepresentationRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl RepresentationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs(configs: &[RepresentationConfig]) -> TraceViewResult<Self> {
        let mut registry = Self::new();
        for config in configs {
            registry.register(config.build())?;
        }
        Ok(registry)
    }

    /// Registers a representation under its unique, non-empty key.
    pub fn register(&mut self, representation: Arc<dyn Representation>) -> TraceViewResult<()> {
        let key = representation.key().to_owned();
        if key.is_empty() {
            return Err(TraceViewError::InvalidConfig(
                "representation key must not be empty".to_owned(),
            ));
        }
        if key == super::ORIGINAL_REPRESENTATION {
            return Err(TraceViewError::InvalidConfig(format!(
                "representation key `{key}` is reserved"
            )));
        }
        if self.entries.contains_key(&key) {
            return Err(TraceViewError::InvalidConfig(format!(
                "representation `{key}` is already registered"
            )));
        }
        self.entries.insert(key, representation);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Representation>> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
