use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{Place, Trip};

/// Looks up the trip a diary entry is drafted for
pub async fn find_trip(pool: &SqlitePool, trip_id: i64) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        "SELECT trip_id, user_id, title, start_date, end_date FROM trip WHERE trip_id = ?",
    )
    .bind(trip_id)
    .fetch_optional(pool)
    .await?;

    Ok(trip)
}

/// Looks up a place by name
pub async fn find_place(pool: &SqlitePool, place_name: &str) -> AppResult<Option<Place>> {
    let place = sqlx::query_as::<_, Place>(
        "SELECT place_name, type, latitude, longitude FROM place WHERE place_name = ?",
    )
    .bind(place_name)
    .fetch_optional(pool)
    .await?;

    Ok(place)
}

/// Stores a drafted diary entry
pub async fn insert_entry(
    pool: &SqlitePool,
    trip_id: i64,
    entry_date: NaiveDate,
    content: &str,
) -> AppResult<()> {
    sqlx::query("INSERT INTO diary (trip_id, entry_date, content) VALUES (?, ?, ?)")
        .bind(trip_id)
        .bind(entry_date)
        .bind(content)
        .execute(pool)
        .await?;

    Ok(())
}
