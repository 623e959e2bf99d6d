use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::Recommendation;
use crate::services::diary::{self, DiaryDraft};
use crate::services::recommendations::{self, RecommendedPlace};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DraftDiaryRequest {
    pub trip_id: i64,
    pub place_name: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Computes, persists and returns recommendations for one user
pub async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendedPlace>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::InvalidInput("user_id is required".to_string()))?;

    let recommended = recommendations::recommend_for_user(&state.pool, user_id).await?;
    Ok(Json(recommended))
}

/// Returns the user's persisted recommendation set without rescoring
pub async fn saved_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Recommendation>>> {
    if user_id <= 0 {
        return Err(AppError::InvalidInput(
            "user_id must be a positive integer".to_string(),
        ));
    }

    let stored = db::recommendations::fetch_for_user(&state.pool, user_id).await?;
    Ok(Json(stored))
}

/// Drafts and stores a diary entry for a visited place
pub async fn draft_diary(
    State(state): State<AppState>,
    Json(request): Json<DraftDiaryRequest>,
) -> AppResult<Json<DiaryDraft>> {
    if request.place_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "place_name must not be empty".to_string(),
        ));
    }

    let draft = diary::draft_entry(
        &state.pool,
        &state.http,
        &state.config,
        request.trip_id,
        &request.place_name,
    )
    .await?;
    Ok(Json(draft))
}
