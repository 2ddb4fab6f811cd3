use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieRatings::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieRatings::Id))
                    .col(integer(MovieRatings::Score))
                    .col(text_null(MovieRatings::Comment))
                    .col(integer(MovieRatings::MovieId))
                    .col(big_integer(MovieRatings::CreatedAt))
                    .col(big_integer(MovieRatings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_ratings_movie")
                            .from(MovieRatings::Table, MovieRatings::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_ratings_movie")
                    .table(MovieRatings::Table)
                    .col(MovieRatings::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieRatings::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MovieRatings {
    Table,
    Id,
    Score,
    Comment,
    MovieId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
}
