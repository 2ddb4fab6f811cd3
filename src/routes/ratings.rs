use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    AppState,
    error::AppResult,
    extract::{ApiPath, ValidJson, ValidQuery},
    models::{CreateRating, DataResponse, RatingOutput, RatingQuery, UpdateRating},
    pagination::Page,
};

async fn list(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<RatingQuery>,
) -> AppResult<Json<Page<RatingOutput>>> {
    let page = state.ratings.find_all(&query).await?;
    Ok(Json(page.map(|(rating, movie)| RatingOutput::new(rating, movie))))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<DataResponse<RatingOutput>>> {
    let (rating, movie) = state.ratings.find_one(id).await?;
    Ok(Json(DataResponse::new(RatingOutput::new(rating, movie))))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<CreateRating>,
) -> AppResult<(StatusCode, Json<DataResponse<RatingOutput>>)> {
    let (rating, movie) = state.ratings.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(RatingOutput::new(rating, movie)))))
}

async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ValidJson(input): ValidJson<UpdateRating>,
) -> AppResult<Json<DataResponse<RatingOutput>>> {
    let (rating, movie) = state.ratings.update(id, input).await?;
    Ok(Json(DataResponse::new(RatingOutput::new(rating, movie))))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.ratings.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movie-ratings", get(list).post(create))
        .route("/movie-ratings/{id}", get(find_one).patch(update).delete(remove))
}
