//! Fire-and-forget event reporting for interview activity.
//!
//! Default: `TracingSink` (structured `tracing` events, target `monitoring`).
//! Optional: `HttpSink`, enabled by `MONITORING_URL`, which also posts each event
//! to an external collector from a background task.
//!
//! `AppState` holds an `Arc<dyn MonitoringSink>`. Sinks never return errors and
//! never block the caller.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

pub trait MonitoringSink: Send + Sync {
    fn log_event(&self, name: &str, metadata: Value);
}

/// Emits every event as a structured log line.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl MonitoringSink for TracingSink {
    fn log_event(&self, name: &str, metadata: Value) {
        info!(target: "monitoring", event_name = name, metadata = %metadata, "monitoring event");
    }
}

#[derive(Debug, Serialize)]
struct EventPayload<'a> {
    name: &'a str,
    metadata: Value,
    timestamp: String,
}

/// Posts events as JSON to an external collector. Delivery failures are logged and dropped.
#[derive(Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSink {
    pub fn new(client: reqwest::Client, url: String, token: Option<String>) -> Self {
        Self { client, url, token }
    }
}

impl MonitoringSink for HttpSink {
    fn log_event(&self, name: &str, metadata: Value) {
        TracingSink.log_event(name, metadata.clone());

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; dropping monitoring event '{name}'");
            return;
        };

        let payload = EventPayload {
            name,
            metadata,
            timestamp: Utc::now().to_rfc3339(),
        };
        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let name = name.to_string();

        handle.spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(
                        "Monitoring collector rejected event '{name}': status {}",
                        response.status()
                    );
                }
                Ok(_) => {}
                Err(e) => warn!("Failed to deliver monitoring event '{name}': {e}"),
            }
        });
    }
}

/// Groups the events of one unit of work under a shared `trace_id` and user id.
pub struct Trace {
    sink: Arc<dyn MonitoringSink>,
    trace_id: Uuid,
    user_id: String,
    metadata: Map<String, Value>,
}

impl Trace {
    /// Starts a trace. `metadata` must be a JSON object; other values are ignored.
    pub fn start(sink: Arc<dyn MonitoringSink>, user_id: &str, metadata: Value) -> Self {
        let metadata = match metadata {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            sink,
            trace_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            metadata,
        }
    }

    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Logs `name` with the trace's base metadata merged under `fields`.
    pub fn log_event(&self, name: &str, fields: Value) {
        let mut merged = self.metadata.clone();
        if let Value::Object(fields) = fields {
            merged.extend(fields);
        }
        merged.insert("trace_id".to_string(), json!(self.trace_id));
        merged.insert("user_id".to_string(), json!(self.user_id));
        self.sink.log_event(name, Value::Object(merged));
    }

    /// Closes the trace with `status` ("completed" or "error").
    pub fn end(self, status: &str) {
        self.log_event("trace_end", json!({ "status": status }));
    }
}
