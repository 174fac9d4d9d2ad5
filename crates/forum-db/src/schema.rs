//! Schema bootstrap

use sqlx::PgPool;
use tracing::info;

const FORUM_SCHEMA: &str = include_str!("../migrations/0001_forum.sql");

/// Create the forum tables if they do not exist yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(FORUM_SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
