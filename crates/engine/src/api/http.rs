//! HTTP routes.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use duskcrawl_shared::{
    routes, ErrorResponse, GameStateView, RequestError, TurnRequest, TurnResponse,
    FIXED_SESSION_KEY, SESSION_HEADER,
};

use crate::app::App;
use crate::config::SessionMode;
use crate::use_cases::turn::TurnError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(routes::TURN, get(turn_liveness).post(play_turn))
        .route(routes::API_TURN, get(turn_liveness).post(play_turn))
        .route(routes::TEST, get(hello))
        .route(routes::HEALTH, get(health))
}

async fn health() -> &'static str {
    "OK"
}

async fn hello() -> &'static str {
    "Hello, World!"
}

async fn turn_liveness() -> &'static str {
    "Game turn endpoint is up. POST {\"playerInput\": \"...\"} to play."
}

async fn play_turn(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TurnResponse>, ApiError> {
    tracing::info!("Received request to /game/turn");

    let session_key = resolve_session_key(&headers, app.session_mode)?;
    let request = TurnRequest::from_slice(&body)?;
    tracing::debug!(session_key = %session_key, "Parsed player input");

    let outcome = app
        .use_cases
        .turn
        .process
        .execute(&session_key, &request.player_input)
        .await?;

    Ok(Json(TurnResponse {
        response: outcome.narration,
        dice_roll: outcome.dice_roll,
        game_state: GameStateView::from(&outcome.state),
    }))
}

/// Pick the storage key for this request from the `Session-ID` header.
fn resolve_session_key(headers: &HeaderMap, mode: SessionMode) -> Result<String, RequestError> {
    let header = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (header, mode) {
        (Some(key), _) => Ok(key.to_string()),
        (None, SessionMode::Optional) => Ok(FIXED_SESSION_KEY.to_string()),
        (None, SessionMode::Required) => Err(RequestError::MissingSession),
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        tracing::warn!(error = %e, "Rejected turn request");
        ApiError::BadRequest(e.to_string())
    }
}

impl From<TurnError> for ApiError {
    fn from(e: TurnError) -> Self {
        tracing::error!(error = %e, "Error in /game/turn");
        ApiError::Internal(e.to_string())
    }
}
