use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::Recommendation;

/// A recommendation row ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub place_name: String,
    pub place_type: String,
    pub ranking: i64,
    pub season: String,
    pub age_group: String,
}

/// Replaces a user's entire recommendation set in one transaction.
///
/// Deletes the prior rows and inserts the new ranked set as a single unit:
/// if any statement fails the transaction rolls back and the prior set stays
/// exactly as it was. Concurrent replacements for the same user serialize on
/// the database transaction.
pub async fn replace_for_user(
    pool: &SqlitePool,
    user_id: i64,
    rows: &[NewRecommendation],
) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(AppError::Persistence)?;

    sqlx::query("DELETE FROM recommendation WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Persistence)?;

    for row in rows {
        sqlx::query(
            "INSERT INTO recommendation (user_id, place_name, type, ranking, season, age_group) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&row.place_name)
        .bind(&row.place_type)
        .bind(row.ranking)
        .bind(&row.season)
        .bind(&row.age_group)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Persistence)?;
    }

    tx.commit().await.map_err(AppError::Persistence)?;

    tracing::info!(user_id, rows = rows.len(), "Recommendation set replaced");

    Ok(())
}

/// Fetches a user's persisted recommendation set in rank order
pub async fn fetch_for_user(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Recommendation>> {
    let rows = sqlx::query_as::<_, Recommendation>(
        "SELECT recommendation_id, user_id, place_name, type, ranking, season, age_group \
         FROM recommendation WHERE user_id = ? ORDER BY ranking",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
