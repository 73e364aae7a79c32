//! Request handlers for the scrape and chat operations.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use pagetalk_browser::BrowserError;
use pagetalk_extract::{extract_lines, truncate_at_sentence, ExtractOutcome, ScrapedDocument};
use pagetalk_llm::prompt::{answer_prompt, summary_prompt};
use pagetalk_llm::traits::LlmError;

use crate::error::ApiError;
use crate::session_cookie;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub message: &'static str,
    pub summary: String,
    pub source_url: String,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub source_url: String,
    pub success: bool,
}

/// Load a page, extract and bound its content, bind it to the caller's
/// session, and return an LLM summary. A fresh session cookie is issued
/// when the caller does not present a valid one.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<ScrapeRequest>,
) -> Result<(CookieJar, Json<ScrapeResponse>), ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::MissingUrl);
    }

    let (session_id, jar) = session_cookie::resolve(&state.cookie_key, jar);
    tracing::info!(url, session_id = %session_id, "scrape.start");

    // Timeout and driver failures collapse into one user-facing content
    // error; the driver detail stays in the logs.
    let page = state.loader.load(url).await.map_err(|e| match e {
        BrowserError::Timeout => {
            tracing::warn!(url, "scrape.page_timeout");
            ApiError::ContentUnavailable
        }
        BrowserError::Driver(message) => {
            tracing::error!(url, error = %message, "scrape.driver_failed");
            ApiError::ContentUnavailable
        }
    })?;

    let lines = match extract_lines(&page.html) {
        ExtractOutcome::Content(lines) => lines,
        ExtractOutcome::NoContent => {
            tracing::warn!(url, "scrape.no_content");
            return Err(ApiError::ContentUnavailable);
        }
    };
    let document = ScrapedDocument::compose(&lines, url, state.truncation_budget);
    tracing::debug!(
        url,
        lines = lines.len(),
        content_len = document.content.len(),
        "scrape.extracted"
    );

    let summary = state
        .llm
        .complete(&summary_prompt(&document.content))
        .await
        .map_err(llm_to_api)?;

    let source_url = document.source_url.clone();
    state.store.put(&session_id, document);
    tracing::info!(url, session_id = %session_id, "scrape.stored");

    Ok((
        jar,
        Json(ScrapeResponse {
            message: "Website scraped successfully!",
            summary,
            source_url,
            success: true,
        }),
    ))
}

/// Answer a question grounded in the session's most recent document. The
/// inference backend is only reached once the session precondition holds.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    let session_id =
        session_cookie::peek(&state.cookie_key, &jar).ok_or(ApiError::NoSession)?;
    let document = state.store.get(&session_id).ok_or(ApiError::NoSession)?;

    // Already bounded at write time; re-applying the bound is a no-op but
    // keeps the invariant local to the request.
    let context = truncate_at_sentence(&document.content, state.truncation_budget);

    tracing::info!(session_id = %session_id, source_url = %document.source_url, "chat.start");
    let answer = state
        .llm
        .complete(&answer_prompt(context, query))
        .await
        .map_err(llm_to_api)?;

    Ok(Json(ChatResponse {
        answer,
        source_url: document.source_url,
        success: true,
    }))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn llm_to_api(e: LlmError) -> ApiError {
    match e {
        LlmError::Network(message) | LlmError::Backend(message) => ApiError::Backend(message),
        LlmError::Config(message) => ApiError::Internal(message),
    }
}
