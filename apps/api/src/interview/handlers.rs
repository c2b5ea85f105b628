//! Axum route handlers for the Interview API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::questions::JobRole;
use crate::interview::session::{InterviewTurn, Session, SessionStatus};
use crate::interview::store::SessionRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub role: String,
    pub candidate_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<JobRole>,
}

/// Everything a UI needs to render a session: the current question while in
/// progress, the full history once completed.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub role: String,
    pub candidate_name: Option<String>,
    pub status: SessionStatus,
    pub current_question: Option<String>,
    pub question_number: Option<usize>,
    pub total_questions: usize,
    pub progress: f64,
    pub history: Vec<InterviewTurn>,
    pub created_at: DateTime<Utc>,
}

impl SessionView {
    fn new(session_id: Uuid, record: &SessionRecord) -> Self {
        let session = &record.session;
        Self {
            session_id,
            role: session.role().name.clone(),
            candidate_name: record.candidate_name.clone(),
            status: session.status(),
            current_question: session.current_question().map(str::to_string),
            question_number: session.question_number(),
            total_questions: session.role().question_count(),
            progress: session.progress(),
            history: session.history().to_vec(),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub turn: InterviewTurn,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.question_bank.roles().to_vec(),
    })
}

/// POST /api/v1/sessions
///
/// Starts an interview at the first question of the requested role.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let role = find_role(&state, &request.role)?;
    let candidate_name = request
        .candidate_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let session_id = state
        .sessions
        .insert(SessionRecord::new(Session::new(role), candidate_name))
        .await;
    info!("Started interview session {session_id} for '{}'", request.role);

    let entry = find_session(&state, session_id).await?;
    let record = entry.lock().await;
    Ok((StatusCode::CREATED, Json(SessionView::new(session_id, &record))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let entry = find_session(&state, session_id).await?;
    let record = entry.lock().await;
    Ok(Json(SessionView::new(session_id, &record)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Session {session_id} not found")));
    }
    info!("Ended interview session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/answers
///
/// Submits an answer to the current question. Feedback that fails the safety
/// gate, or could not be generated, is still recorded and the session advances.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let entry = find_session(&state, session_id).await?;
    let mut guard = entry.lock().await;
    let record = &mut *guard;

    let turn = state
        .interviewer
        .submit_answer(
            &mut record.session,
            record.candidate_name.as_deref(),
            &request.answer,
        )
        .await?;

    Ok(Json(SubmitAnswerResponse {
        turn,
        session: SessionView::new(session_id, record),
    }))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let entry = find_session(&state, session_id).await?;
    let mut record = entry.lock().await;
    record.session.reset();
    info!("Reset interview session {session_id}");
    Ok(Json(SessionView::new(session_id, &record)))
}

/// PUT /api/v1/sessions/:id/role
///
/// Switches to another role. Progress in the previous role is discarded.
pub async fn handle_switch_role(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SwitchRoleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let role = find_role(&state, &request.role)?;
    let entry = find_session(&state, session_id).await?;
    let mut record = entry.lock().await;
    record.session.switch_role(role);
    info!("Session {session_id} switched to '{}'", request.role);
    Ok(Json(SessionView::new(session_id, &record)))
}

fn find_role(state: &AppState, name: &str) -> Result<JobRole, AppError> {
    state
        .question_bank
        .role(name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Role '{name}' not found")))
}

async fn find_session(
    state: &AppState,
    session_id: Uuid,
) -> Result<Arc<Mutex<SessionRecord>>, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}
