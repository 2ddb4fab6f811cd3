pub use sea_orm_migration::prelude::*;

mod m20250201_000001_create_catalog;
mod m20250201_000002_create_movie_ratings;
mod m20250208_000001_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250201_000001_create_catalog::Migration),
            Box::new(m20250201_000002_create_movie_ratings::Migration),
            Box::new(m20250208_000001_create_users::Migration),
        ]
    }
}
