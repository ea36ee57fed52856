#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

/// Fresh migrated SQLite database per test; the returned dir owns the file.
pub async fn get_db() -> Result<(DatabaseConnection, tempfile::TempDir), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("articles.db").display());
    let cfg = configs::DatabaseConfig { url, max_connections: 1, min_connections: 1, ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, dir))
}
