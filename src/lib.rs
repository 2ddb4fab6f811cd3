pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod logger;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod seed;
pub mod services;
pub mod trace_context;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    auth::{AuthService, jwt::JwtKeys},
    config::Config,
    logger::AppLogger,
    services::{ActorService, MovieService, RatingService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
    pub logger: AppLogger,
    pub movies: MovieService,
    pub actors: ActorService,
    pub ratings: RatingService,
    pub users: UserService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let logger = AppLogger::new("Application");
        let users = UserService::new(db.clone(), &logger);
        let keys = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_secs);

        Self {
            movies: MovieService::new(db.clone(), &logger),
            actors: ActorService::new(db.clone(), &logger),
            ratings: RatingService::new(db.clone(), &logger),
            auth: AuthService::new(users.clone(), keys, &logger),
            users,
            logger,
            db,
            config: Arc::new(config),
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    routes::build_router(state)
}
