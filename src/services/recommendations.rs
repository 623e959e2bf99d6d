use std::time::Instant;

use chrono::{Datelike, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::recommendations::{self, NewRecommendation};
use crate::db::relations;
use crate::engine::{demographics, score_candidates, ScoringWeights};
use crate::error::{AppError, AppResult};
use crate::models::Season;

/// Minimal projection of a recommended place returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedPlace {
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Produces and persists personalized place recommendations for one user.
///
/// Rejects non-positive ids before touching any relation, loads a fresh
/// snapshot, runs the scoring engine, then atomically replaces the user's
/// stored recommendation set with the new ranked list. Nothing is persisted
/// when any step fails.
pub async fn recommend_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> AppResult<Vec<RecommendedPlace>> {
    if user_id <= 0 {
        return Err(AppError::InvalidInput(
            "user_id must be a positive integer".to_string(),
        ));
    }

    let start = Instant::now();
    let today = Utc::now().date_naive();

    let snapshot = relations::load_snapshot(pool).await?;

    let user = snapshot
        .user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
    let (_, age_group) = demographics::classify(user.birth_date.as_deref(), today);
    let season = Season::from_month(today.month());

    let ranked = score_candidates(&snapshot, user_id, &ScoringWeights::default(), today)?;

    let rows: Vec<NewRecommendation> = ranked
        .iter()
        .enumerate()
        .map(|(position, candidate)| NewRecommendation {
            place_name: candidate.place_name.clone(),
            place_type: candidate.place_type.clone(),
            ranking: position as i64 + 1,
            season: season.to_string(),
            age_group: age_group.to_string(),
        })
        .collect();

    recommendations::replace_for_user(pool, user_id, &rows).await?;

    tracing::info!(
        user_id,
        candidates = snapshot.places.len(),
        recommended = ranked.len(),
        season = %season,
        age_group = %age_group,
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations computed"
    );

    Ok(ranked
        .into_iter()
        .map(|candidate| RecommendedPlace {
            place_name: candidate.place_name,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::create_test_pool;

    async fn seed_scenario(pool: &SqlitePool) {
        // Adult food lover with one 5-star cafe visit; a museum competes.
        sqlx::query(
            "INSERT INTO user (user_id, username, birth_date) VALUES (1, 'mina', '1990-01-01')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO interest_area (user_id, interest) VALUES (1, 'food')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO place (place_name, type, latitude, longitude) VALUES \
             ('Corner Cafe', 'cafe', 37.57, 126.98), \
             ('City Museum', 'museum', 37.58, 126.97)",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO trip (trip_id, user_id, title, start_date, end_date) \
             VALUES (1, 1, 'Seoul eats', '2024-03-05', '2024-03-08')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO map_pin (pin_id, trip_id, place_name) VALUES (1, 1, 'Corner Cafe')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO record (pin_id, rating, visit_date) VALUES (1, 5.0, '2024-03-06')")
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_positive_user_id_is_invalid_input() {
        let pool = create_test_pool().await.unwrap();

        let err = recommend_for_user(&pool, 0).await.expect_err("must reject");
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = recommend_for_user(&pool, -3).await.expect_err("must reject");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found_and_persists_nothing() {
        let pool = create_test_pool().await.unwrap();
        seed_scenario(&pool).await;

        let err = recommend_for_user(&pool, 42).await.expect_err("must fail");
        assert!(matches!(err, AppError::NotFound(_)));

        let stored = recommendations::fetch_for_user(&pool, 42).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_recommendations_are_ranked_and_persisted() {
        let pool = create_test_pool().await.unwrap();
        seed_scenario(&pool).await;

        let recommended = recommend_for_user(&pool, 1).await.unwrap();
        assert_eq!(recommended.len(), 2);
        assert_eq!(recommended[0].place_name, "Corner Cafe");

        let stored = recommendations::fetch_for_user(&pool, 1).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].place_name, "Corner Cafe");
        assert_eq!(stored[0].ranking, 1);
        assert_eq!(stored[0].place_type, "cafe");
        assert_eq!(stored[0].age_group, "Adult");
        assert_eq!(stored[1].place_name, "City Museum");
        assert_eq!(stored[1].ranking, 2);
    }

    #[tokio::test]
    async fn test_repeat_invocation_reproduces_identical_ranking() {
        let pool = create_test_pool().await.unwrap();
        seed_scenario(&pool).await;

        let first = recommend_for_user(&pool, 1).await.unwrap();
        let stored_first = recommendations::fetch_for_user(&pool, 1).await.unwrap();

        let second = recommend_for_user(&pool, 1).await.unwrap();
        let stored_second = recommendations::fetch_for_user(&pool, 1).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(stored_first.len(), stored_second.len());
        for (a, b) in stored_first.iter().zip(stored_second.iter()) {
            assert_eq!(a.place_name, b.place_name);
            assert_eq!(a.ranking, b.ranking);
            assert_eq!(a.season, b.season);
            assert_eq!(a.age_group, b.age_group);
        }
    }
}
