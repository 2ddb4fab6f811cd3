use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    AppState,
    error::AppResult,
    extract::ValidJson,
    models::{DataResponse, LoginRequest, LoginResponse},
};

async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let resp = state.auth.login(req).await?;
    Ok(Json(DataResponse::new(resp)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}
