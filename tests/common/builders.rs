//! Test builders — ergonomic constructors for raw hits and search responses.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{json, Map, Value};

/// Fluent builder for a raw search hit.
///
/// # Example
///
/// ```rust
/// let hit = HitBuilder::new("hit-1")
///     .index("winlogbeat-2024.01.15")
///     .agent("name", "ws-01")
///     .message(r#"{"IncidentId": "1"}"#)
///     .build();
/// ```
pub struct HitBuilder {
    id: Option<String>,
    index: Option<String>,
    source: Map<String, Value>,
}

impl HitBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            index: None,
            source: Map::new(),
        }
    }

    /// A hit with no `_id`.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            index: None,
            source: Map::new(),
        }
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn timestamp(mut self, ts: &str) -> Self {
        self.source.insert("@timestamp".into(), json!(ts));
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.source.insert("@version".into(), json!(version));
        self
    }

    pub fn agent(mut self, key: &str, value: impl Into<Value>) -> Self {
        let agent = self.source.entry("agent").or_insert_with(|| json!({}));
        agent[key] = value.into();
        self
    }

    pub fn log_file(mut self, key: &str, value: impl Into<Value>) -> Self {
        let log = self.source.entry("log").or_insert_with(|| json!({"file": {}}));
        log["file"][key] = value.into();
        self
    }

    pub fn log_type(mut self, log_type: &str) -> Self {
        self.source.insert("log_type".into(), json!(log_type));
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.source.insert("message".into(), Value::String(message.into()));
        self
    }

    /// Message encoded as strict JSON text.
    pub fn message_json(self, message: Value) -> Self {
        self.message(message.to_string())
    }

    pub fn build(self) -> Value {
        let mut hit = Map::new();
        if let Some(id) = self.id {
            hit.insert("_id".into(), json!(id));
        }
        if let Some(index) = self.index {
            hit.insert("_index".into(), json!(index));
        }
        hit.insert("_source".into(), Value::Object(self.source));
        Value::Object(hit)
    }
}

/// Wrap hits in a search-response envelope.
pub fn search_response(hits: &[Value]) -> Value {
    json!({
        "took": 5,
        "timed_out": false,
        "hits": {
            "total": {"value": hits.len(), "relation": "eq"},
            "hits": hits,
        }
    })
}
