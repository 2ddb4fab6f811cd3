use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde_json::json;

use crate::{
    db::now_sec,
    entities::{actor, movie, movie_actor},
    error::{AppError, AppResult},
    logger::AppLogger,
    models::{CreateMovie, MovieQuery, UpdateMovie},
    pagination::{Page, PageParams, paginate},
};

#[derive(Clone)]
pub struct MovieService {
    db: DatabaseConnection,
    logger: AppLogger,
}

impl MovieService {
    pub fn new(db: DatabaseConnection, logger: &AppLogger) -> Self {
        Self { db, logger: logger.for_context("MoviesService") }
    }

    pub async fn find_all(&self, query: &MovieQuery) -> AppResult<Page<movie::Model>> {
        let params = query.page();
        self.logger.log(
            "Finding all movies",
            json!({
                "filter": {
                    "title": query.title(),
                    "limit": params.limit,
                    "cursor": params.cursor,
                },
            }),
        );

        let mut select = movie::Entity::find();
        if let Some(title) = query.title() {
            select = select.filter(movie::Column::Title.contains(title));
        }

        let page = paginate(&self.db, select, movie::Column::Id, params).await?;

        self.logger.log(
            "Movies found",
            json!({
                "count": page.data.len(),
                "hasNext": page.meta.has_next,
                "nextCursor": page.meta.next_cursor,
            }),
        );
        Ok(page)
    }

    pub async fn find_one(&self, id: i32) -> AppResult<movie::Model> {
        self.logger.log("Finding movie by ID", json!({ "id": id }));

        let Some(movie) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            self.logger.warn("Movie not found", json!({ "id": id }));
            return Err(AppError::not_found("Movie", id));
        };

        self.logger.log("Movie found", json!({ "id": id, "title": movie.title }));
        Ok(movie)
    }

    pub async fn create(&self, input: CreateMovie) -> AppResult<movie::Model> {
        self.logger.log(
            "Creating new movie",
            json!({ "title": input.title, "releaseYear": input.release_year }),
        );

        let actor_ids = match &input.actor_ids {
            Some(ids) => Some(self.existing_actor_ids(ids).await?),
            None => None,
        };

        let now = now_sec();
        let txn = self.db.begin().await?;

        let movie = movie::ActiveModel {
            id: Default::default(),
            title: Set(input.title),
            description: Set(input.description),
            release_year: Set(input.release_year),
            genre: Set(input.genre),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if let Some(ids) = actor_ids {
            replace_actors(&txn, movie.id, &ids).await?;
        }

        txn.commit().await?;

        self.logger.log(
            "Movie created successfully",
            json!({ "id": movie.id, "title": movie.title }),
        );
        Ok(movie)
    }

    pub async fn update(&self, id: i32, input: UpdateMovie) -> AppResult<movie::Model> {
        self.logger.log(
            "Updating movie",
            json!({
                "id": id,
                "updates": {
                    "title": input.title,
                    "description": input.description,
                    "releaseYear": input.release_year,
                    "genre": input.genre,
                    "actorIds": input.actor_ids,
                },
            }),
        );

        let existing = self.find_one(id).await?;
        let old_title = existing.title.clone();

        let actor_ids = match &input.actor_ids {
            Some(ids) => Some(self.existing_actor_ids(ids).await?),
            None => None,
        };

        let txn = self.db.begin().await?;

        let mut active: movie::ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(release_year) = input.release_year {
            active.release_year = Set(release_year);
        }
        if let Some(genre) = input.genre {
            active.genre = Set(genre);
        }
        active.updated_at = Set(now_sec());
        let updated = active.update(&txn).await?;

        if let Some(ids) = actor_ids {
            replace_actors(&txn, id, &ids).await?;
        }

        txn.commit().await?;

        self.logger.log(
            "Movie updated successfully",
            json!({ "id": id, "oldTitle": old_title, "newTitle": updated.title }),
        );
        Ok(updated)
    }

    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.logger.log("Removing movie", json!({ "id": id }));

        let movie = self.find_one(id).await?;
        let title = movie.title.clone();
        movie.delete(&self.db).await?;

        self.logger.log("Movie removed successfully", json!({ "id": id, "title": title }));
        Ok(())
    }

    pub async fn find_actors(&self, id: i32, params: PageParams) -> AppResult<Page<actor::Model>> {
        let movie = self.find_one(id).await?;
        self.logger.log(
            "Finding movie actors",
            json!({ "id": id, "limit": params.limit, "cursor": params.cursor }),
        );

        let page = paginate(&self.db, movie.find_related(actor::Entity), actor::Column::Id, params)
            .await?;

        self.logger.log(
            "Movie actors found",
            json!({ "id": id, "count": page.data.len(), "hasNext": page.meta.has_next }),
        );
        Ok(page)
    }

    /// Deduplicates `ids` and fails with 400 when any of them is unknown.
    async fn existing_actor_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let wanted: BTreeSet<i32> = ids.iter().copied().collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let known: BTreeSet<i32> = actor::Entity::find()
            .filter(actor::Column::Id.is_in(wanted.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if known.len() != wanted.len() {
            let missing: Vec<i32> = wanted.difference(&known).copied().collect();
            self.logger.warn("Unknown actor ids", json!({ "missing": missing }));
            return Err(AppError::Validation(format!("Actors not found: {missing:?}")));
        }

        self.logger.debug("Actor ids resolved", json!({ "actorIds": wanted }));
        Ok(wanted.into_iter().collect())
    }
}

async fn replace_actors<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    actor_ids: &[i32],
) -> AppResult<()> {
    movie_actor::Entity::delete_many()
        .filter(movie_actor::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;

    for &actor_id in actor_ids {
        let link = movie_actor::ActiveModel { movie_id: Set(movie_id), actor_id: Set(actor_id) };
        movie_actor::Entity::insert(link).exec_without_returning(conn).await?;
    }

    Ok(())
}
