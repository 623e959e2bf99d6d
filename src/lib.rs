//! Travel place recommendation service.
//!
//! Scores every known place for a user by blending content similarity with
//! their visit history, average ratings, age-group and seasonal popularity,
//! interest-category matches and collaborative filtering, then persists the
//! ranked top five atomically per user. A small diary-drafting endpoint
//! turns a visited place into a short journal entry via a chat-completions
//! API.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
