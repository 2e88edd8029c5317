//! Span hooks: the observability sink the pipeline reports into.
//!
//! The orchestrator opens a root span per task and child spans for the
//! planner call and each subtask, attaching attributes as it goes.
//! Nothing in the pipeline reads spans back; a recorder that drops
//! everything is a valid implementation.

use serde::{Deserialize, Serialize};

/// Identifier of an open span, unique within one recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpanId(pub u64);

/// A span attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<usize> for AttributeValue {
    fn from(v: usize) -> Self {
        AttributeValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

/// Hierarchical span sink.
pub trait SpanRecorder: Send + Sync {
    /// Open a span, optionally under a parent.
    fn start_span(&self, name: &str, parent: Option<SpanId>) -> SpanId;

    /// Attach or overwrite an attribute on an open span.
    fn set_attribute(&self, span: SpanId, key: &str, value: AttributeValue);

    /// Record a handled failure on the span.
    fn record_error(&self, span: SpanId, message: &str);

    /// Close the span.
    fn end_span(&self, span: SpanId);
}

impl<T: SpanRecorder + ?Sized> SpanRecorder for std::sync::Arc<T> {
    fn start_span(&self, name: &str, parent: Option<SpanId>) -> SpanId {
        (**self).start_span(name, parent)
    }

    fn set_attribute(&self, span: SpanId, key: &str, value: AttributeValue) {
        (**self).set_attribute(span, key, value)
    }

    fn record_error(&self, span: SpanId, message: &str) {
        (**self).record_error(span, message)
    }

    fn end_span(&self, span: SpanId) {
        (**self).end_span(span)
    }
}
