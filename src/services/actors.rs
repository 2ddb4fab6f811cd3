use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use serde_json::json;

use crate::{
    db::now_sec,
    entities::actor,
    error::{AppError, AppResult},
    logger::AppLogger,
    models::{ActorQuery, CreateActor, UpdateActor},
    pagination::{Page, paginate},
};

#[derive(Clone)]
pub struct ActorService {
    db: DatabaseConnection,
    logger: AppLogger,
}

impl ActorService {
    pub fn new(db: DatabaseConnection, logger: &AppLogger) -> Self {
        Self { db, logger: logger.for_context("ActorsService") }
    }

    pub async fn find_all(&self, query: &ActorQuery) -> AppResult<Page<actor::Model>> {
        let params = query.page();
        self.logger.log(
            "Finding all actors",
            json!({
                "filter": { "name": query.name(), "limit": params.limit, "cursor": params.cursor },
            }),
        );

        let mut select = actor::Entity::find();
        if let Some(name) = query.name() {
            select = select.filter(actor::Column::Name.contains(name));
        }

        let page = paginate(&self.db, select, actor::Column::Id, params).await?;

        self.logger.log(
            "Actors found",
            json!({
                "count": page.data.len(),
                "hasNext": page.meta.has_next,
                "nextCursor": page.meta.next_cursor,
            }),
        );
        Ok(page)
    }

    pub async fn find_one(&self, id: i32) -> AppResult<actor::Model> {
        self.logger.log("Finding actor by ID", json!({ "id": id }));

        let Some(actor) = actor::Entity::find_by_id(id).one(&self.db).await? else {
            self.logger.warn("Actor not found", json!({ "id": id }));
            return Err(AppError::not_found("Actor", id));
        };

        Ok(actor)
    }

    pub async fn create(&self, input: CreateActor) -> AppResult<actor::Model> {
        self.logger.log("Creating new actor", json!({ "name": input.name }));

        let now = now_sec();
        let actor = actor::ActiveModel {
            id: Default::default(),
            name: Set(input.name),
            nationality: Set(input.nationality),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.logger
            .log("Actor created successfully", json!({ "id": actor.id, "name": actor.name }));
        Ok(actor)
    }

    pub async fn update(&self, id: i32, input: UpdateActor) -> AppResult<actor::Model> {
        self.logger.log(
            "Updating actor",
            json!({
                "id": id,
                "updates": { "name": input.name, "nationality": input.nationality },
            }),
        );

        let mut active: actor::ActiveModel = self.find_one(id).await?.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(nationality) = input.nationality {
            active.nationality = Set(nationality);
        }
        active.updated_at = Set(now_sec());
        let updated = active.update(&self.db).await?;

        self.logger.log("Actor updated successfully", json!({ "id": id, "name": updated.name }));
        Ok(updated)
    }

    /// Cast links cascade; the movies themselves are kept.
    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.logger.log("Removing actor", json!({ "id": id }));

        let actor = self.find_one(id).await?;
        actor.delete(&self.db).await?;

        self.logger.log("Actor removed successfully", json!({ "id": id }));
        Ok(())
    }
}
