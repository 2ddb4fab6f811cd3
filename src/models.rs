use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    db::to_timestamp,
    entities::{actor, movie, movie_rating},
    pagination::{CursorKey, DEFAULT_LIMIT, MAX_LIMIT, PageParams},
};

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT as i64
}

// A cursor of zero or below means "start from the newest row".
fn page_params(limit: i64, cursor: Option<i32>) -> PageParams {
    PageParams {
        limit: limit.clamp(1, MAX_LIMIT as i64) as u64,
        cursor: cursor.filter(|c| *c > 0),
    }
}

fn non_empty(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|s| !s.is_empty())
}

impl CursorKey for movie::Model {
    fn cursor_key(&self) -> i32 {
        self.id
    }
}

impl CursorKey for actor::Model {
    fn cursor_key(&self) -> i32 {
        self.id
    }
}

impl CursorKey for movie_rating::Model {
    fn cursor_key(&self) -> i32 {
        self.id
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieOutput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub genre: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<movie::Model> for MovieOutput {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            release_year: m.release_year,
            genre: m.genre,
            created_at: to_timestamp(m.created_at),
            updated_at: to_timestamp(m.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    #[validate(range(
        min = 1800,
        max = 2100,
        message = "releaseYear must be between 1800 and 2100"
    ))]
    pub release_year: i32,
    #[validate(length(min = 1, message = "genre must not be empty"))]
    pub genre: String,
    #[serde(default)]
    pub actor_ids: Option<Vec<i32>>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,
    #[validate(range(
        min = 1800,
        max = 2100,
        message = "releaseYear must be between 1800 and 2100"
    ))]
    pub release_year: Option<i32>,
    #[validate(length(min = 1, message = "genre must not be empty"))]
    pub genre: Option<String>,
    pub actor_ids: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MovieQuery {
    pub title: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
    pub cursor: Option<i32>,
}

impl MovieQuery {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn page(&self) -> PageParams {
        page_params(self.limit, self.cursor)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
    pub cursor: Option<i32>,
}

impl PageQuery {
    pub fn page(&self) -> PageParams {
        page_params(self.limit, self.cursor)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorOutput {
    pub id: i32,
    pub name: String,
    pub nationality: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<actor::Model> for ActorOutput {
    fn from(a: actor::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
            nationality: a.nationality,
            created_at: to_timestamp(a.created_at),
            updated_at: to_timestamp(a.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 2, message = "nationality must be at least 2 characters"))]
    pub nationality: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateActor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 2, message = "nationality must be at least 2 characters"))]
    pub nationality: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActorQuery {
    pub name: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
    pub cursor: Option<i32>,
}

impl ActorQuery {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn page(&self) -> PageParams {
        page_params(self.limit, self.cursor)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingOutput {
    pub id: i32,
    pub score: i32,
    pub comment: Option<String>,
    pub movie_id: i32,
    pub movie: Option<MovieOutput>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RatingOutput {
    pub fn new(r: movie_rating::Model, movie: Option<movie::Model>) -> Self {
        Self {
            id: r.id,
            score: r.score,
            comment: r.comment,
            movie_id: r.movie_id,
            movie: movie.map(MovieOutput::from),
            created_at: to_timestamp(r.created_at),
            updated_at: to_timestamp(r.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRating {
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: i32,
    #[validate(length(min = 3, message = "comment must be at least 3 characters"))]
    pub comment: Option<String>,
    #[validate(range(min = 1, message = "movieId must be a positive integer"))]
    pub movie_id: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRating {
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: Option<i32>,
    #[validate(length(min = 3, message = "comment must be at least 3 characters"))]
    pub comment: Option<String>,
    #[validate(range(min = 1, message = "movieId must be a positive integer"))]
    pub movie_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RatingQuery {
    #[validate(range(min = 1, message = "movieId must be a positive integer"))]
    pub movie_id: Option<i32>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
    pub cursor: Option<i32>,
}

impl RatingQuery {
    pub fn page(&self) -> PageParams {
        page_params(self.limit, self.cursor)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginUser {
    pub id: i32,
    pub email: String,
    pub role: String,
}
