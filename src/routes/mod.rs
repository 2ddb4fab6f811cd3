mod actors;
mod auth;
mod health;
mod movies;
mod ratings;

use std::sync::Arc;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, auth::require_bearer, logging::log_requests, trace_context};

// Outermost first: HTTP tracing, CORS, trace context, request logging.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(movies::router())
        .merge(actors::router())
        .merge(ratings::router())
        .route_layer(middleware::from_fn_with_state(state.auth.clone(), require_bearer));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(protected)
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
                .layer(middleware::from_fn(trace_context::propagate))
                .layer(middleware::from_fn_with_state(state.logger.clone(), log_requests)),
        )
}
