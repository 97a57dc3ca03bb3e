use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanId(String);

impl SpanId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpanId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TraceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefType {
    ChildOf,
    FollowsFrom,
}

/// Link from a span to another span, usually its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanReference {
    pub ref_type: RefType,
    #[serde(rename = "traceID")]
    pub trace_id: TraceId,
    #[serde(rename = "spanID")]
    pub span_id: SpanId,
}

impl SpanReference {
    #[must_use]
    pub fn child_of(trace_id: TraceId, span_id: SpanId) -> Self {
        Self {
            ref_type: RefType::ChildOf,
            trace_id,
            span_id,
        }
    }

    #[must_use]
    pub fn follows_from(trace_id: TraceId, span_id: SpanId) -> Self {
        Self {
            ref_type: RefType::FollowsFrom,
            trace_id,
            span_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: TagValue,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single recorded operation.
///
/// Times are microseconds. Parent/child structure is expressed only through
/// `references`, never by pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(rename = "spanID")]
    pub span_id: SpanId,
    pub operation_name: String,
    pub service_name: String,
    #[serde(default)]
    pub references: SmallVec<[SpanReference; 2]>,
    pub start_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Span {
    #[must_use]
    pub fn new(
        span_id: impl Into<SpanId>,
        service_name: impl Into<String>,
        operation_name: impl Into<String>,
        start_time: f64,
        duration: f64,
    ) -> Self {
        Self {
            span_id: span_id.into(),
            operation_name: operation_name.into(),
            service_name: service_name.into(),
            references: SmallVec::new(),
            start_time,
            duration,
            tags: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: SpanReference) -> Self {
        self.references.push(reference);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Parent candidate: the first `CHILD_OF` reference, else the first
    /// `FOLLOWS_FROM` reference.
    #[must_use]
    pub fn parent_id(&self) -> Option<&SpanId> {
        self.references
            .iter()
            .find(|reference| reference.ref_type == RefType::ChildOf)
            .or_else(|| {
                self.references
                    .iter()
                    .find(|reference| reference.ref_type == RefType::FollowsFrom)
            })
            .map(|reference| &reference.span_id)
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| &tag.value)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        match self.tag("error") {
            Some(TagValue::Bool(flag)) => *flag,
            Some(TagValue::String(text)) => text.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl From<String> for SpanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
