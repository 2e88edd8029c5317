//! Span recorders.
//!
//! - [`NoopRecorder`] drops everything.
//! - [`LogRecorder`] mirrors the span tree into `tracing` spans.
//! - [`MemoryRecorder`] keeps every span for later inspection or dumping.

use crewsim_core::span::{AttributeValue, SpanId, SpanRecorder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info_span, trace, warn, Span};

/// Recorder that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl SpanRecorder for NoopRecorder {
    fn start_span(&self, _name: &str, _parent: Option<SpanId>) -> SpanId {
        SpanId(0)
    }

    fn set_attribute(&self, _span: SpanId, _key: &str, _value: AttributeValue) {}

    fn record_error(&self, _span: SpanId, _message: &str) {}

    fn end_span(&self, _span: SpanId) {}
}

/// Recorder backed by real `tracing` spans.
///
/// Each started span opens an `info_span!` on target `crewsim::span`, nested
/// under its parent's span, so the installed subscriber sees the same tree as
/// a [`MemoryRecorder`]. Attributes and errors become events inside the span.
/// Ending a span drops it.
#[derive(Debug, Default)]
pub struct LogRecorder {
    next_id: AtomicU64,
    open: Mutex<HashMap<SpanId, Span>>,
}

impl LogRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SpanId, Span>> {
        self.open.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn span(&self, span: SpanId) -> Option<Span> {
        self.lock().get(&span).cloned()
    }

    /// Spans started and not yet ended.
    pub fn open_spans(&self) -> usize {
        self.lock().len()
    }
}

impl SpanRecorder for LogRecorder {
    fn start_span(&self, name: &str, parent: Option<SpanId>) -> SpanId {
        let id = SpanId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let mut open = self.lock();
        let parent_id = parent.and_then(|p| open.get(&p)).and_then(Span::id);
        let span = info_span!(
            target: "crewsim::span",
            parent: parent_id,
            "span",
            name = %name,
            id = id.0
        );
        span.in_scope(|| debug!(target: "crewsim::span", "span started"));
        open.insert(id, span);
        id
    }

    fn set_attribute(&self, span: SpanId, key: &str, value: AttributeValue) {
        if let Some(span) = self.span(span) {
            span.in_scope(|| trace!(target: "crewsim::span", key, value = %value, "attribute"));
        }
    }

    fn record_error(&self, span: SpanId, message: &str) {
        if let Some(span) = self.span(span) {
            span.in_scope(|| warn!(target: "crewsim::span", error = message, "span error"));
        }
    }

    fn end_span(&self, span: SpanId) {
        if let Some(span) = self.lock().remove(&span) {
            span.in_scope(|| debug!(target: "crewsim::span", "span ended"));
        }
    }
}

/// One recorded span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub id: SpanId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SpanId>,
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default)]
    pub ended: bool,
}

impl SpanRecord {
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Recorder that keeps spans in memory, in start order.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    next_id: AtomicU64,
    spans: Mutex<Vec<SpanRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SpanRecord>> {
        self.spans.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_span(&self, span: SpanId, f: impl FnOnce(&mut SpanRecord)) {
        let mut spans = self.lock();
        if let Some(record) = spans.iter_mut().rev().find(|s| s.id == span) {
            f(record);
        }
    }

    /// Copy of every span recorded so far.
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.lock().clone()
    }

    /// Take every span recorded so far, leaving the recorder empty.
    pub fn drain(&self) -> Vec<SpanRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Spans whose parent is `parent`.
    pub fn children(&self, parent: SpanId) -> Vec<SpanRecord> {
        self.lock()
            .iter()
            .filter(|s| s.parent == Some(parent))
            .cloned()
            .collect()
    }
}

impl SpanRecorder for MemoryRecorder {
    fn start_span(&self, name: &str, parent: Option<SpanId>) -> SpanId {
        let id = SpanId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.lock().push(SpanRecord {
            id,
            parent,
            name: name.to_string(),
            attributes: BTreeMap::new(),
            errors: Vec::new(),
            ended: false,
        });
        id
    }

    fn set_attribute(&self, span: SpanId, key: &str, value: AttributeValue) {
        self.with_span(span, |record| {
            record.attributes.insert(key.to_string(), value);
        });
    }

    fn record_error(&self, span: SpanId, message: &str) {
        self.with_span(span, |record| record.errors.push(message.to_string()));
    }

    fn end_span(&self, span: SpanId) {
        self.with_span(span, |record| record.ended = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_recorder_builds_hierarchy() {
        let recorder = MemoryRecorder::new();
        let root = recorder.start_span("task.run", None);
        let child = recorder.start_span("subtask.1", Some(root));
        recorder.set_attribute(child, "subtask.similarity", 0.5f64.into());
        recorder.set_attribute(child, "subtask.similarity", 0.75f64.into());
        recorder.record_error(root, "planner down");
        recorder.end_span(child);

        let spans = recorder.spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].errors, vec!["planner down".to_string()]);
        assert!(!spans[0].ended);
        assert!(spans[1].ended);
        assert_eq!(
            spans[1].attribute("subtask.similarity"),
            Some(&AttributeValue::Float(0.75))
        );
        assert_eq!(recorder.children(root).len(), 1);
    }

    #[test]
    fn drain_empties() {
        let recorder = MemoryRecorder::new();
        let id = recorder.start_span("task.run", None);
        recorder.end_span(id);
        assert_eq!(recorder.drain().len(), 1);
        assert!(recorder.is_empty());
    }

    #[test]
    fn span_record_json_shape() {
        let recorder = MemoryRecorder::new();
        let root = recorder.start_span("task.run", None);
        recorder.set_attribute(root, "task.errors", 2usize.into());
        recorder.set_attribute(root, "task.synthetic_ambiguity", true.into());
        recorder.end_span(root);

        let spans = recorder.spans();
        let record = &spans[0];
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["name"], "task.run");
        assert_eq!(json["attributes"]["task.errors"], 2);
        assert!(json.get("parent").is_none());

        let back: SpanRecord = serde_json::from_value(json).unwrap();
        assert_eq!(&back, record);
    }

    #[test]
    fn log_recorder_closes_spans_on_end() {
        let recorder = LogRecorder::new();
        let root = recorder.start_span("task.run", None);
        let child = recorder.start_span("subtask.1", Some(root));
        assert_ne!(root, child);
        assert_eq!(recorder.open_spans(), 2);

        recorder.set_attribute(child, "subtask.result", "Approved".into());
        recorder.record_error(root, "planner down");
        recorder.end_span(child);
        assert_eq!(recorder.open_spans(), 1);
        recorder.end_span(root);
        recorder.end_span(root);
        assert_eq!(recorder.open_spans(), 0);

        recorder.set_attribute(SpanId(99), "k", "v".into());
        assert_eq!(recorder.open_spans(), 0);
    }

    #[test]
    fn unknown_span_is_ignored() {
        let recorder = MemoryRecorder::new();
        recorder.set_attribute(SpanId(99), "k", "v".into());
        recorder.end_span(SpanId(99));
        assert!(recorder.is_empty());
    }
}
