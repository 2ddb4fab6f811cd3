use serde_json::{Map, Value};

use crate::trace_context::TraceContext;

pub const NO_TRACE: &str = "no-trace";
pub const NO_SPAN: &str = "no-span";

#[derive(Clone, Debug)]
pub struct AppLogger {
    context: &'static str,
}

impl AppLogger {
    pub fn new(context: &'static str) -> Self {
        Self { context }
    }

    pub fn for_context(&self, context: &'static str) -> Self {
        Self { context }
    }

    pub fn log(&self, message: &str, metadata: Value) {
        let payload = payload(message, metadata);
        tracing::info!(context = self.context, "{payload}");
    }

    pub fn warn(&self, message: &str, metadata: Value) {
        let payload = payload(message, metadata);
        tracing::warn!(context = self.context, "{payload}");
    }

    pub fn error(&self, message: &str, metadata: Value, stack: Option<&str>) {
        let payload = payload(message, metadata);
        match stack {
            Some(stack) => tracing::error!(context = self.context, stack = %stack, "{payload}"),
            None => tracing::error!(context = self.context, "{payload}"),
        }
    }

    pub fn debug(&self, message: &str, metadata: Value) {
        let payload = payload(message, metadata);
        tracing::debug!(context = self.context, "{payload}");
    }
}

// Metadata keys are merged last and may override `traceId`/`spanId`.
pub fn payload(message: &str, metadata: Value) -> Value {
    let ctx = TraceContext::current();

    let mut record = Map::new();
    record.insert("message".to_string(), Value::from(message));
    record.insert(
        "traceId".to_string(),
        Value::from(ctx.as_ref().map_or(NO_TRACE, |c| c.trace_id.as_str())),
    );
    record.insert(
        "spanId".to_string(),
        Value::from(ctx.as_ref().map_or(NO_SPAN, |c| c.span_id.as_str())),
    );

    match metadata {
        Value::Object(extra) => record.extend(extra),
        Value::Null => {},
        other => {
            record.insert("metadata".to_string(), other);
        },
    }

    Value::Object(record)
}
