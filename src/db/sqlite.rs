use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Embedded schema migrations, applied by [`create_pool`] and by test pools
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Creates a SQLite connection pool and applies pending migrations
///
/// The pool manages connection lifecycle and limits; migrations are embedded
/// at compile time from the `migrations/` directory.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

/// Migrated pool over a private in-memory database, used by tests.
///
/// Capped at one connection: every connection to `sqlite::memory:` opens its
/// own database, so a larger pool would scatter the tables.
pub async fn create_test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_migrates() {
        let pool = create_test_pool().await.unwrap();

        // All eight tables exist after migration
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('user', 'interest_area', 'trip', 'place', 'map_pin', 'record', \
              'recommendation', 'diary')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 8);
    }
}
