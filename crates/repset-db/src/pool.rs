//! Database connection pool

use sqlx::PgPool;

use crate::error::{DbError, DbResult};

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create a pool from the `DATABASE_URL` environment variable (.env aware)
pub async fn create_pool_from_env() -> DbResult<DbPool> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DbError::Configuration("DATABASE_URL is not set".to_string()))?;

    Ok(create_pool(&url).await?)
}

/// Run the embedded migrations
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
