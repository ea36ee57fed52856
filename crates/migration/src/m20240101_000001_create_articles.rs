//! Create `articles` table.
//!
//! `image` and `author_image` hold either a relative asset path or an http(s) URL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(pk_auto(Articles::Id))
                    .col(string_len(Articles::Title, 200).not_null())
                    .col(string_len(Articles::Category, 100).not_null())
                    .col(string_len(Articles::Excerpt, 300).not_null())
                    .col(string_len(Articles::Image, 500).not_null())
                    .col(string_len(Articles::Date, 50).not_null())
                    .col(string_len(Articles::Author, 100).not_null())
                    .col(string_len(Articles::AuthorImage, 500).not_null())
                    .col(text(Articles::Content).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Articles {
    Table,
    Id,
    Title,
    Category,
    Excerpt,
    Image,
    Date,
    Author,
    AuthorImage,
    Content,
}
