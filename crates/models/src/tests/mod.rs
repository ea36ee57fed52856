/// CRUD operations against the `articles` entity
pub mod crud_tests;

/// Transaction commit/rollback behaviour
pub mod transaction_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh SQLite database in a temp dir, migrated up. Keep the `TempDir` alive for the test.
pub(crate) async fn setup_test_db() -> anyhow::Result<(DatabaseConnection, tempfile::TempDir)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("articles.db").display());
    let cfg = configs::DatabaseConfig { url, max_connections: 1, min_connections: 1, ..Default::default() };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, dir))
}

pub(crate) fn sample(title: &str) -> crate::article::ActiveModel {
    use sea_orm::Set;
    crate::article::ActiveModel {
        title: Set(title.to_string()),
        category: Set("tech".into()),
        excerpt: Set("e".into()),
        image: Set("http://x/y.png".into()),
        date: Set("2024-01-01".into()),
        author: Set("Bob".into()),
        author_image: Set("http://x/z.png".into()),
        content: Set("body".into()),
        ..Default::default()
    }
}
