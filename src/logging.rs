use std::{net::SocketAddr, time::Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::Level;

use crate::{
    error::FailureReport,
    logger::{AppLogger, NO_SPAN, NO_TRACE},
    trace_context::TraceContext,
};

pub fn completion_tier(status: StatusCode) -> (Level, &'static str) {
    if status.is_server_error() {
        (Level::ERROR, "[END] HTTP request with server error")
    } else if status.is_client_error() {
        (Level::WARN, "[END] HTTP request with client error")
    } else {
        (Level::INFO, "[END] HTTP request success")
    }
}

pub async fn log_requests(
    State(logger): State<AppLogger>,
    request: Request,
    next: Next,
) -> Response {
    let logger = logger.for_context("LoggingMiddleware");
    let started = Instant::now();

    let method = request.method().to_string();
    let original_url = request.uri().to_string();
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let (trace_id, span_id) = match request.extensions().get::<TraceContext>() {
        Some(ctx) => (ctx.trace_id.clone(), ctx.span_id.clone()),
        None => (NO_TRACE.to_string(), NO_SPAN.to_string()),
    };

    logger.log(
        "[START] HTTP request",
        json!({
            "method": method,
            "originalUrl": original_url,
            "ip": ip,
            "traceId": trace_id,
            "spanId": span_id,
            "userAgent": user_agent,
        }),
    );

    let resp = next.run(request).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    if let Some(failure) = resp.extensions().get::<FailureReport>() {
        logger.error(
            "[ERROR] HTTP request failed",
            json!({
                "method": method,
                "originalUrl": original_url,
                "durationMs": duration_ms,
                "traceId": trace_id,
                "spanId": span_id,
                "error": failure.message,
            }),
            Some(failure.stack.as_str()),
        );
        return resp;
    }

    let status = resp.status();
    let metadata = json!({
        "method": method,
        "originalUrl": original_url,
        "statusCode": status.as_u16(),
        "durationMs": duration_ms,
        "traceId": trace_id,
        "spanId": span_id,
    });

    let (level, message) = completion_tier(status);
    if level == Level::ERROR {
        logger.error(message, metadata, None);
    } else if level == Level::WARN {
        logger.warn(message, metadata);
    } else {
        logger.log(message, metadata);
    }

    resp
}
