use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, Set,
};
use serde_json::json;

use crate::{
    db::now_sec,
    entities::{movie, movie_rating},
    error::{AppError, AppResult},
    logger::AppLogger,
    models::{CreateRating, RatingQuery, UpdateRating},
    pagination::{Page, paginate},
};

pub type RatingWithMovie = (movie_rating::Model, Option<movie::Model>);

#[derive(Clone)]
pub struct RatingService {
    db: DatabaseConnection,
    logger: AppLogger,
}

impl RatingService {
    pub fn new(db: DatabaseConnection, logger: &AppLogger) -> Self {
        Self { db, logger: logger.for_context("MovieRatingsService") }
    }

    pub async fn find_all(&self, query: &RatingQuery) -> AppResult<Page<RatingWithMovie>> {
        let params = query.page();
        self.logger.log(
            "Finding all movie ratings",
            json!({
                "filter": {
                    "movieId": query.movie_id,
                    "limit": params.limit,
                    "cursor": params.cursor,
                },
            }),
        );

        let mut select = movie_rating::Entity::find();
        if let Some(movie_id) = query.movie_id {
            select = select.filter(movie_rating::Column::MovieId.eq(movie_id));
        }

        let page = paginate(&self.db, select, movie_rating::Column::Id, params).await?;
        let movies = page.data.load_one(movie::Entity, &self.db).await?;

        self.logger.log(
            "Movie ratings found",
            json!({
                "count": page.data.len(),
                "hasNext": page.meta.has_next,
                "nextCursor": page.meta.next_cursor,
            }),
        );

        let Page { data, meta } = page;
        Ok(Page { data: data.into_iter().zip(movies).collect(), meta })
    }

    pub async fn find_one(&self, id: i32) -> AppResult<RatingWithMovie> {
        self.logger.log("Finding movie rating by ID", json!({ "id": id }));

        let found = movie_rating::Entity::find_by_id(id)
            .find_also_related(movie::Entity)
            .one(&self.db)
            .await?;

        found.ok_or_else(|| {
            self.logger.warn("Movie rating not found", json!({ "id": id }));
            AppError::not_found("Movie rating", id)
        })
    }

    pub async fn create(&self, input: CreateRating) -> AppResult<RatingWithMovie> {
        self.logger.log(
            "Creating movie rating",
            json!({ "movieId": input.movie_id, "score": input.score }),
        );

        self.ensure_movie(input.movie_id, "Movie not found for rating creation").await?;

        let now = now_sec();
        let rating = movie_rating::ActiveModel {
            id: Default::default(),
            score: Set(input.score),
            comment: Set(input.comment),
            movie_id: Set(input.movie_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.logger.log(
            "Movie rating created successfully",
            json!({ "id": rating.id, "movieId": rating.movie_id, "score": rating.score }),
        );

        self.find_one(rating.id).await
    }

    pub async fn update(&self, id: i32, input: UpdateRating) -> AppResult<RatingWithMovie> {
        self.logger.log(
            "Updating movie rating",
            json!({
                "id": id,
                "updates": {
                    "score": input.score,
                    "comment": input.comment,
                    "movieId": input.movie_id,
                },
            }),
        );

        let (rating, _) = self.find_one(id).await?;

        if let Some(movie_id) = input.movie_id.filter(|m| *m != rating.movie_id) {
            self.ensure_movie(movie_id, "Movie not found for rating update").await?;
        }

        let mut active: movie_rating::ActiveModel = rating.into();
        if let Some(score) = input.score {
            active.score = Set(score);
        }
        if let Some(comment) = input.comment {
            active.comment = Set(Some(comment));
        }
        if let Some(movie_id) = input.movie_id {
            active.movie_id = Set(movie_id);
        }
        active.updated_at = Set(now_sec());
        let updated = active.update(&self.db).await?;

        self.logger.log(
            "Movie rating updated successfully",
            json!({ "id": updated.id, "movieId": updated.movie_id, "score": updated.score }),
        );

        self.find_one(updated.id).await
    }

    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.logger.log("Removing movie rating", json!({ "id": id }));

        let (rating, _) = self.find_one(id).await?;
        let movie_id = rating.movie_id;
        rating.delete(&self.db).await?;

        self.logger
            .log("Movie rating removed successfully", json!({ "id": id, "movieId": movie_id }));
        Ok(())
    }

    async fn ensure_movie(&self, movie_id: i32, missing_message: &str) -> AppResult<()> {
        let exists = movie::Entity::find_by_id(movie_id).one(&self.db).await?.is_some();
        if !exists {
            self.logger.warn(missing_message, json!({ "movieId": movie_id }));
            return Err(AppError::not_found("Movie", movie_id));
        }
        Ok(())
    }
}
