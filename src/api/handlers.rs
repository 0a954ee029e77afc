use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::services::recommendations::fetch_movie_and_recommendations;
use crate::views::{labels, render_page, Action, PageView, SelectionState};

use super::AppState;

const DEFAULT_SUGGESTION_LIMIT: usize = 20;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct SelectorResponse {
    pub prompt: &'static str,
    pub notice: &'static str,
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub state: SelectionState,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub title: String,
    pub action: Action,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Sorted titles for the selector
pub async fn get_titles(State(state): State<AppState>) -> Json<SelectorResponse> {
    Json(SelectorResponse {
        prompt: labels::SELECTOR_PROMPT,
        notice: labels::SEARCH_NOTICE,
        titles: state
            .catalog
            .selector_titles()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

/// Free-text suggestions for the selector
pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<String>> {
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let titles = state
        .catalog
        .suggest(&params.q, limit)
        .into_iter()
        .map(String::from)
        .collect();
    Json(titles)
}

/// Starts a new session with collapsed panels
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, session) = state.sessions.create().await;
    tracing::debug!(session_id = %session_id, "Session created");

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            state: session.selection,
        }),
    )
}

/// Drops a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .sessions
        .remove(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the page for `title` with the session's current state
pub async fn get_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<PageView>> {
    ensure_session(&state, session_id).await?;

    let Some(title) = params.title.filter(|t| !t.trim().is_empty()) else {
        return Ok(Json(render_page(None, &SelectionState::default(), &state.images)));
    };

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        title = %title,
        "Rendering page"
    );

    let data =
        fetch_movie_and_recommendations(&state.catalog, state.provider.clone(), &title).await;

    // Read the state only once the fetch is done so actions that landed meanwhile are kept
    let selection = state
        .sessions
        .record(session_id, &title, None)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(render_page(data.as_ref(), &selection, &state.images)))
}

/// Applies a button press and renders the resulting page
pub async fn apply_action(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ActionRequest>,
) -> AppResult<Json<PageView>> {
    ensure_session(&state, session_id).await?;

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        title = %request.title,
        action = ?request.action,
        "Applying action"
    );

    let data = fetch_movie_and_recommendations(
        &state.catalog,
        state.provider.clone(),
        &request.title,
    )
    .await
    .ok_or_else(|| AppError::NotFound(format!("Unknown title: {}", request.title)))?;

    if let Action::ShowRecommendation { index } = request.action {
        if index >= data.recommended.len() {
            return Err(AppError::InvalidInput(format!(
                "Recommendation index {} out of range ({} recommendations)",
                index,
                data.recommended.len()
            )));
        }
    }

    let selection = state
        .sessions
        .record(session_id, &request.title, Some(request.action))
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(render_page(Some(&data), &selection, &state.images)))
}

async fn ensure_session(state: &AppState, session_id: Uuid) -> AppResult<()> {
    if state.sessions.contains(session_id).await {
        Ok(())
    } else {
        Err(session_not_found(session_id))
    }
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", session_id))
}
