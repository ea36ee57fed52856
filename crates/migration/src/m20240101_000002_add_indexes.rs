//! Secondary indexes for `articles`.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_articles::Articles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_articles_title")
                    .table(Articles::Table)
                    .col(Articles::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_articles_title").table(Articles::Table).to_owned())
            .await
    }
}
