use std::collections::HashMap;

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    db::now_sec,
    entities::{actor, movie, movie_actor, movie_rating},
    error::AppResult,
    logger::AppLogger,
    services::UserService,
};

const SEED_DATA: &str = include_str!("../seed/seed-data.json");

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 5;

// Upper bound on draws when picking a cast.
const MAX_DRAWS: i64 = 10_000;

#[derive(Clone, Debug, Deserialize)]
pub struct SeedActor {
    pub name: String,
    pub nationality: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SeedRating {
    pub score: i32,
    pub comment: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMovie {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub genre: String,
    pub actor_names: Vec<String>,
    pub ratings: Vec<SeedRating>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticMovies {
    pub count: u32,
    pub base_year: i32,
    pub max_year: Option<i32>,
    #[serde(default = "default_min_actors")]
    pub min_actors_per_movie: usize,
    #[serde(default = "default_max_actors")]
    pub max_actors_per_movie: usize,
    #[serde(default = "default_ratings")]
    pub ratings_per_movie: usize,
    pub genres: Vec<String>,
    pub rating_comments: Vec<SeedRating>,
}

fn default_min_actors() -> usize {
    2
}

fn default_max_actors() -> usize {
    4
}

fn default_ratings() -> usize {
    2
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub actors: Vec<SeedActor>,
    #[serde(default)]
    pub movies: Vec<SeedMovie>,
    pub synthetic_movies: SyntheticMovies,
}

impl SeedData {
    pub fn bundled() -> anyhow::Result<Self> {
        serde_json::from_str(SEED_DATA).context("parsing seed/seed-data.json")
    }

    pub fn all_movies(&self) -> Vec<SeedMovie> {
        let mut movies = self.movies.clone();
        movies.extend(build_synthetic_movies(self));
        movies
    }
}

// Deterministic: the same seed always gives the same value.
pub fn random_int(min: i64, max: i64, seed: i64) -> i64 {
    let x = ((seed * 9999) as f64).sin() * 10000.0;
    let fraction = x - x.floor();
    (fraction * (max - min + 1) as f64).floor() as i64 + min
}

pub fn pick_unique_actors(names: &[String], count: usize, seed: i64) -> Vec<String> {
    let mut distinct = names.to_vec();
    distinct.sort();
    distinct.dedup();
    let count = count.min(distinct.len());

    let mut selected: Vec<String> = Vec::with_capacity(count);
    let mut offset = 0;
    while selected.len() < count && offset < MAX_DRAWS {
        let idx = random_int(0, names.len() as i64 - 1, seed + offset * 13) as usize;
        if let Some(name) = names.get(idx) {
            if !selected.contains(name) {
                selected.push(name.clone());
            }
        }
        offset += 1;
    }
    selected
}

pub fn build_synthetic_movies(data: &SeedData) -> Vec<SeedMovie> {
    let cfg = &data.synthetic_movies;
    let actor_names: Vec<String> = data.actors.iter().map(|a| a.name.clone()).collect();
    let max_year = cfg.max_year.unwrap_or(cfg.base_year + 45);

    (1..=i64::from(cfg.count))
        .map(|index| {
            let release_year = random_int(cfg.base_year.into(), max_year.into(), index * 17) as i32;
            let genre = pick(&cfg.genres, index * 19).cloned().unwrap_or_default();

            let max_actors = cfg.max_actors_per_movie.min(actor_names.len());
            let min_actors = cfg.min_actors_per_movie as i64;
            let actor_count =
                random_int(min_actors, max_actors as i64, index * 23).max(0) as usize;
            let cast = pick_unique_actors(&actor_names, actor_count, index * 29);

            let ratings = (0..cfg.ratings_per_movie.max(1) as i64)
                .filter_map(|k| {
                    let template = pick(&cfg.rating_comments, index * 37 + k)?;
                    let variance = random_int(-1, 1, index * 31 + k) as i32;
                    Some(SeedRating {
                        score: (template.score + variance).clamp(MIN_SCORE, MAX_SCORE),
                        comment: template.comment.clone(),
                    })
                })
                .collect();

            SeedMovie {
                title: format!("Seed Movie {index:03}"),
                description: format!(
                    "Auto-generated movie dataset entry {index} for testing and navigation."
                ),
                release_year,
                genre,
                actor_names: cast,
                ratings,
            }
        })
        .collect()
}

fn pick<T>(items: &[T], seed: i64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get(random_int(0, items.len() as i64 - 1, seed) as usize)
}

pub async fn run(
    db: &DatabaseConnection,
    users: &UserService,
    config: &Config,
    logger: &AppLogger,
) -> AppResult<()> {
    let logger = logger.for_context("SeedService");

    seed_admin(users, config, &logger).await?;
    if config.seed_sample_data {
        seed_sample_data(db, &SeedData::bundled()?, &logger).await?;
    }
    Ok(())
}

async fn seed_admin(users: &UserService, config: &Config, logger: &AppLogger) -> AppResult<()> {
    if users.find_by_email(&config.admin_email).await?.is_some() {
        logger.log("Admin user already exists", json!({ "email": config.admin_email }));
        return Ok(());
    }
    users.create(&config.admin_email, &config.admin_password, "admin").await?;
    logger.log("Admin user created successfully", json!({ "email": config.admin_email }));
    Ok(())
}

pub async fn seed_sample_data(
    db: &DatabaseConnection,
    data: &SeedData,
    logger: &AppLogger,
) -> AppResult<()> {
    let movies = data.all_movies();
    let now = now_sec();
    let txn = db.begin().await?;

    let mut actor_ids: HashMap<&str, i32> = HashMap::new();
    for seed in &data.actors {
        let existing = actor::Entity::find()
            .filter(actor::Column::Name.eq(seed.name.as_str()))
            .one(&txn)
            .await?;
        let id = match existing {
            Some(a) => a.id,
            None => {
                actor::ActiveModel {
                    id: Default::default(),
                    name: Set(seed.name.clone()),
                    nationality: Set(seed.nationality.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?
                .id
            },
        };
        actor_ids.insert(seed.name.as_str(), id);
    }

    for seed in &movies {
        let movie_id = upsert_movie(&txn, seed, now).await?;

        movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        for actor_id in seed.actor_names.iter().filter_map(|n| actor_ids.get(n.as_str())) {
            let link =
                movie_actor::ActiveModel { movie_id: Set(movie_id), actor_id: Set(*actor_id) };
            movie_actor::Entity::insert(link).exec_without_returning(&txn).await?;
        }

        for rating in &seed.ratings {
            create_rating_if_missing(&txn, movie_id, rating, now).await?;
        }
    }

    txn.commit().await?;

    logger.log(
        "Sample dataset seeded successfully",
        json!({ "actors": data.actors.len(), "movies": movies.len() }),
    );
    Ok(())
}

async fn upsert_movie<C: ConnectionTrait>(conn: &C, seed: &SeedMovie, now: i64) -> AppResult<i32> {
    let existing = movie::Entity::find()
        .filter(movie::Column::Title.eq(seed.title.as_str()))
        .one(conn)
        .await?;
    if let Some(found) = existing {
        return Ok(found.id);
    }

    let created = movie::ActiveModel {
        id: Default::default(),
        title: Set(seed.title.clone()),
        description: Set(seed.description.clone()),
        release_year: Set(seed.release_year),
        genre: Set(seed.genre.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;
    Ok(created.id)
}

async fn create_rating_if_missing<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    rating: &SeedRating,
    now: i64,
) -> AppResult<()> {
    let existing = movie_rating::Entity::find()
        .filter(movie_rating::Column::MovieId.eq(movie_id))
        .filter(movie_rating::Column::Score.eq(rating.score))
        .filter(movie_rating::Column::Comment.eq(rating.comment.as_str()))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    movie_rating::ActiveModel {
        id: Default::default(),
        score: Set(rating.score),
        comment: Set(Some(rating.comment.clone())),
        movie_id: Set(movie_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;
    Ok(())
}
