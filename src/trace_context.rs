use std::future::Future;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use rand::Rng;
use tracing::Instrument;

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const SPAN_ID_HEADER: &str = "x-span-id";

const TRACE_ID_BYTES: usize = 16;
const SPAN_ID_BYTES: usize = 8;

tokio::task_local! {
    static CURRENT: TraceContext;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

impl TraceContext {
    /// Builds the context for an inbound request. Only the first
    /// `x-trace-id` value is considered when the header repeats.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = headers.get(TRACE_ID_HEADER).and_then(|v| v.to_str().ok());
        Self { trace_id: resolve_trace_id(raw), span_id: new_span_id() }
    }

    /// The context of the request currently executing on this task, if any.
    pub fn current() -> Option<TraceContext> {
        CURRENT.try_with(Clone::clone).ok()
    }

    /// Runs `fut` with `self` as the ambient context. The previous value, if
    /// any, is visible again once `fut` completes.
    pub async fn scope<F>(self, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT.scope(self, fut).await
    }

    pub fn sync_scope<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(self, f)
    }
}

/// Returns the lowercased inbound id when it is exactly 32 hex characters,
/// otherwise a freshly generated one.
pub fn resolve_trace_id(raw: Option<&str>) -> String {
    match raw {
        Some(id) if is_trace_id(id) => id.to_ascii_lowercase(),
        _ => random_hex(TRACE_ID_BYTES),
    }
}

pub fn new_span_id() -> String {
    random_hex(SPAN_ID_BYTES)
}

fn is_trace_id(candidate: &str) -> bool {
    candidate.len() == TRACE_ID_BYTES * 2 && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill(bytes.as_mut_slice());
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Middleware that resolves the trace context, runs the rest of the stack
/// inside it and stamps both ids on the response.
pub async fn propagate(mut request: Request, next: Next) -> Response {
    let ctx = TraceContext::from_headers(request.headers());
    request.extensions_mut().insert(ctx.clone());

    let span = tracing::info_span!("request", trace_id = %ctx.trace_id, span_id = %ctx.span_id);
    let mut resp = ctx.clone().scope(next.run(request)).instrument(span).await;

    let headers = resp.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&ctx.trace_id) {
        headers.insert(TRACE_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&ctx.span_id) {
        headers.insert(SPAN_ID_HEADER, value);
    }

    resp
}
