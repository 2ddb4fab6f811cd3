use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    AppState,
    auth::AuthUser,
    error::AppResult,
    extract::{ApiPath, ValidJson, ValidQuery},
    models::{
        ActorOutput, CreateMovie, DataResponse, MovieOutput, MovieQuery, PageQuery, UpdateMovie,
    },
    pagination::Page,
};

async fn list(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<MovieQuery>,
) -> AppResult<Json<Page<MovieOutput>>> {
    let page = state.movies.find_all(&query).await?;
    Ok(Json(page.map(MovieOutput::from)))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<DataResponse<MovieOutput>>> {
    let movie = state.movies.find_one(id).await?;
    Ok(Json(DataResponse::new(movie.into())))
}

async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidJson(input): ValidJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<MovieOutput>>)> {
    tracing::debug!(user_id = user.user_id, "create movie");
    let movie = state.movies.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(movie.into()))))
}

async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidJson(input): ValidJson<UpdateMovie>,
) -> AppResult<Json<DataResponse<MovieOutput>>> {
    tracing::debug!(user_id = user.user_id, id, "update movie");
    let movie = state.movies.update(id, input).await?;
    Ok(Json(DataResponse::new(movie.into())))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    tracing::debug!(user_id = user.user_id, id, "delete movie");
    state.movies.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_actors(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ValidQuery(query): ValidQuery<PageQuery>,
) -> AppResult<Json<Page<ActorOutput>>> {
    let page = state.movies.find_actors(id, query.page()).await?;
    Ok(Json(page.map(ActorOutput::from)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list).post(create))
        .route("/movies/{id}", get(find_one).patch(update).delete(remove))
        .route("/movies/{id}/actors", get(list_actors))
}
