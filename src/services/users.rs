use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;

use crate::{
    auth::password,
    db::now_sec,
    entities::user,
    error::{AppError, AppResult},
    logger::AppLogger,
};

#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
    logger: AppLogger,
}

impl UserService {
    pub fn new(db: DatabaseConnection, logger: &AppLogger) -> Self {
        Self { db, logger: logger.for_context("UsersService") }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find().filter(user::Column::Email.eq(email)).one(&self.db).await?)
    }

    pub async fn create(
        &self,
        email: &str,
        plain_password: &str,
        role: &str,
    ) -> AppResult<user::Model> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict(format!("User with email {email} already exists")));
        }

        let password_hash = password::hash_password(plain_password)?;
        let now = now_sec();
        let user = user::ActiveModel {
            id: Default::default(),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.logger.log(
            "User created",
            json!({ "id": user.id, "email": user.email, "role": user.role }),
        );
        Ok(user)
    }

    pub fn verify_password(&self, user: &user::Model, plain_password: &str) -> AppResult<bool> {
        password::verify_password(plain_password, &user.password_hash)
    }
}
