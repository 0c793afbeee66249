//! Quiz session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use quiz_core::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn session_response(session_id: Uuid, session: &Session) -> SessionResponse {
    SessionResponse {
        session_id,
        item: session.current().map(ItemView::from),
        false_guesses: session.false_guesses(),
        progress: session.progress(),
        stats: session.stats(),
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", id))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>> {
    let items = state.catalog.select(&payload.region, &payload.list)?;
    let item_count = items.len();

    let session = match payload.seed {
        Some(seed) => Session::start(
            items,
            state.scheduler,
            state.matching,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => Session::start(items, state.scheduler, state.matching, &mut rand::rng()),
    };

    let mut response = session_response(Uuid::nil(), &session);
    response.session_id = state.sessions.insert(session, Utc::now());

    tracing::info!(
        session = %response.session_id,
        region = %payload.region,
        list = %payload.list,
        items = item_count,
        "Started session"
    );

    Ok(Json(response))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    state
        .sessions
        .with_session(id, Utc::now(), |session| session_response(id, session))
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /api/sessions/{id}/guess
pub async fn guess(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GuessRequest>,
) -> Result<Json<GuessResponse>> {
    let response = state
        .sessions
        .with_session(id, Utc::now(), |session| {
            let turn = session.submit(&payload.guess)?;
            Ok::<_, ApiError>(GuessResponse {
                feedback: turn.feedback,
                next: NextView::from(&turn.next),
                progress: session.progress(),
                stats: session.stats(),
            })
        })
        .ok_or_else(|| not_found(id))??;

    if response.next.status == NextStatus::Done {
        tracing::info!(session = %id, answered = response.stats.answered, "Session finished");
    }

    Ok(Json(response))
}

/// DELETE /api/sessions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
