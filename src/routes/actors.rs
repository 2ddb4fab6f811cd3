use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    AppState,
    error::AppResult,
    extract::{ApiPath, ValidJson, ValidQuery},
    models::{ActorOutput, ActorQuery, CreateActor, DataResponse, UpdateActor},
    pagination::Page,
};

async fn list(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<ActorQuery>,
) -> AppResult<Json<Page<ActorOutput>>> {
    let page = state.actors.find_all(&query).await?;
    Ok(Json(page.map(ActorOutput::from)))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<DataResponse<ActorOutput>>> {
    let actor = state.actors.find_one(id).await?;
    Ok(Json(DataResponse::new(actor.into())))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<CreateActor>,
) -> AppResult<(StatusCode, Json<DataResponse<ActorOutput>>)> {
    let actor = state.actors.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(actor.into()))))
}

async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ValidJson(input): ValidJson<UpdateActor>,
) -> AppResult<Json<DataResponse<ActorOutput>>> {
    let actor = state.actors.update(id, input).await?;
    Ok(Json(DataResponse::new(actor.into())))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.actors.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actors", get(list).post(create))
        .route("/actors/{id}", get(find_one).patch(update).delete(remove))
}
