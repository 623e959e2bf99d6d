use sqlx::SqlitePool;

use crate::engine::Snapshot;
use crate::error::AppResult;
use crate::models::{InterestArea, MapPin, Place, Trip, User, VisitRecord};

/// Bulk-reads the six relations into a validated [`Snapshot`].
///
/// Rows are selected in primary-key order so snapshot order (and therefore
/// tie-breaking in the ranked output) is reproducible across calls. A
/// dangling foreign key fails the whole load with a diagnostic naming the
/// offending row.
pub async fn load_snapshot(pool: &SqlitePool) -> AppResult<Snapshot> {
    let users = sqlx::query_as::<_, User>(
        "SELECT user_id, username, birth_date FROM user ORDER BY user_id",
    )
    .fetch_all(pool)
    .await?;

    let interests = sqlx::query_as::<_, InterestArea>(
        "SELECT interest_id, user_id, interest FROM interest_area ORDER BY interest_id",
    )
    .fetch_all(pool)
    .await?;

    let trips = sqlx::query_as::<_, Trip>(
        "SELECT trip_id, user_id, title, start_date, end_date FROM trip ORDER BY trip_id",
    )
    .fetch_all(pool)
    .await?;

    let places = sqlx::query_as::<_, Place>(
        "SELECT place_name, type, latitude, longitude FROM place ORDER BY place_name",
    )
    .fetch_all(pool)
    .await?;

    let pins = sqlx::query_as::<_, MapPin>(
        "SELECT pin_id, trip_id, place_name FROM map_pin ORDER BY pin_id",
    )
    .fetch_all(pool)
    .await?;

    let records = sqlx::query_as::<_, VisitRecord>(
        "SELECT record_id, pin_id, rating, visit_date FROM record ORDER BY record_id",
    )
    .fetch_all(pool)
    .await?;

    let snapshot = Snapshot {
        users,
        interests,
        trips,
        places,
        pins,
        records,
    };

    snapshot.validate()?;

    tracing::debug!(
        users = snapshot.users.len(),
        interests = snapshot.interests.len(),
        trips = snapshot.trips.len(),
        places = snapshot.places.len(),
        pins = snapshot.pins.len(),
        records = snapshot.records.len(),
        "Relation snapshot loaded"
    );

    Ok(snapshot)
}
