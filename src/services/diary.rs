use chrono::{NaiveDate, Utc};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::diary as diary_db;
use crate::error::{AppError, AppResult};
use crate::models::Trip;

const DRAFT_TEMPERATURE: f64 = 0.7;
const DRAFT_MAX_TOKENS: u32 = 150;

/// A drafted diary entry, already stored in the diary table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiaryDraft {
    pub entry_date: NaiveDate,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Drafts a short diary entry for a visited place on a trip.
///
/// Looks up the trip and the place's type for context, asks the configured
/// chat-completions API for a few warm sentences, and stores the result in
/// the diary table before returning it.
pub async fn draft_entry(
    pool: &SqlitePool,
    http: &HttpClient,
    config: &Config,
    trip_id: i64,
    place_name: &str,
) -> AppResult<DiaryDraft> {
    let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
        AppError::ExternalApi("Diary drafting is not configured (OPENAI_API_KEY unset)".to_string())
    })?;

    let trip = diary_db::find_trip(pool, trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", trip_id)))?;

    // Unknown places still get an entry, just without taxonomy context
    let place_type = diary_db::find_place(pool, place_name)
        .await?
        .map(|p| p.place_type)
        .unwrap_or_else(|| "everyday spot".to_string());

    let today = Utc::now().date_naive();
    let prompt = build_prompt(today, &trip, place_name, &place_type);

    let request = ChatRequest {
        model: &config.openai_model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: "You are a warm diary ghostwriter. Use short, natural sentences."
                    .to_string(),
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: DRAFT_TEMPERATURE,
        max_tokens: DRAFT_MAX_TOKENS,
    };

    let url = format!(
        "{}/chat/completions",
        config.openai_api_url.trim_end_matches('/')
    );
    let response = http
        .post(&url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!(
            "Chat completions returned {}",
            response.status()
        )));
    }

    let body: ChatResponse = response.json().await?;
    let content = body
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::ExternalApi("Chat completions returned no content".to_string()))?;

    diary_db::insert_entry(pool, trip_id, today, &content).await?;

    tracing::info!(trip_id, place = %place_name, chars = content.len(), "Diary entry drafted");

    Ok(DiaryDraft {
        entry_date: today,
        content,
    })
}

fn build_prompt(today: NaiveDate, trip: &Trip, place_name: &str, place_type: &str) -> String {
    format!(
        "Write a short, heartfelt diary entry (3-4 sentences) about today ({today}). \
         The trip is titled '{title}' and runs from {start} to {end}. \
         Today I visited '{place}', a place related to '{kind}'. \
         Summarize the essentials and end on a natural, reflective note.",
        today = today,
        title = trip.title,
        start = trip.start_date,
        end = trip.end_date,
        place = place_name,
        kind = place_type,
    )
}
