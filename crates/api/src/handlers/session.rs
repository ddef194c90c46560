//! Handlers for the onboarding-session lifecycle.
//!
//! The session state machine lives in `hackgate_core::session`; these
//! handlers look up the row, ask the state machine what to do, and apply the
//! result through `SessionRepo`. The server reports remaining budget but
//! never rejects a write purely for lateness: expiry enforcement is
//! client-driven.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use hackgate_core::error::CoreError;
use hackgate_core::session::{self, SessionState, StartDisposition};
use hackgate_core::team_code;
use hackgate_core::types::Timestamp;
use hackgate_db::models::session::{NewSession, OnboardingSession};
use hackgate_db::models::submission::{NewSubmission, SubmissionFile};
use hackgate_db::repositories::{SessionRepo, SubmissionRepo, TeamCodeRepo};

use crate::error::{is_unique_violation, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Session row annotated with the freshly computed remaining budget and the
/// observable state, as every session endpoint returns it.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: OnboardingSession,
    pub remaining_time_ms: i64,
    pub state: SessionState,
}

impl SessionResponse {
    fn new(session: OnboardingSession, now: Timestamp) -> Self {
        let remaining_time_ms = session::remaining_time_ms(session.start_time, now);
        let state = session::classify(session.start_time, session.is_completed, now);
        SessionResponse {
            session,
            remaining_time_ms,
            state,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /session
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub team_code: String,
    pub question_type: Option<i32>,
    #[serde(default)]
    pub force_restart: bool,
}

/// Start a session, or return the existing one (idempotent read).
///
/// A stale row (budget lapsed) or `force_restart` deletes the old row and
/// inserts a fresh one; a completed row within budget is a 409.
pub async fn start_or_get(
    State(state): State<AppState>,
    Json(input): Json<StartSessionRequest>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    let code = team_code::require(&input.team_code)?;

    let code_row = TeamCodeRepo::find_by_code(&state.pool, &code)
        .await?
        .filter(|row| row.is_registered)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Team code",
            key: code.clone(),
        })?;

    let now = Utc::now();

    if let Some(existing) = SessionRepo::find_by_team_code(&state.pool, &code).await? {
        match session::start_disposition(
            existing.start_time,
            existing.is_completed,
            input.force_restart,
            now,
        ) {
            StartDisposition::ReturnExisting => {
                return Ok(Json(DataResponse {
                    data: SessionResponse::new(existing, now),
                }));
            }
            StartDisposition::AlreadyCompleted => {
                return Err(CoreError::Conflict(
                    "Your team has already completed the onboarding".to_string(),
                )
                .into());
            }
            StartDisposition::Restart => {
                SessionRepo::delete_by_team_code(&state.pool, &code).await?;
            }
        }
    }

    let new_session = NewSession {
        team_code: code.clone(),
        team_id: code_row.team_id,
        question_type: input.question_type,
        // The clock starts only once a question is chosen.
        start_time: input.question_type.map(|_| now),
    };

    // A concurrent start that loses this insert race observes a 23505 on
    // uq_onboarding_sessions_team_code, which classifies as 409.
    let created = SessionRepo::create(&state.pool, &new_session).await?;

    tracing::info!(
        team_code = %code,
        question_type = ?created.question_type,
        "Session created"
    );

    Ok(Json(DataResponse {
        data: SessionResponse::new(created, now),
    }))
}

// ---------------------------------------------------------------------------
// PUT /session
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub team_code: String,
    pub question_type: Option<i32>,
    pub is_completed: Option<bool>,
}

/// Bind a question type and/or flag the session completed.
///
/// Binding a question on a session with no `start_time` starts the clock,
/// and nothing else does. Completion is idempotent: flagging an already-completed
/// session is a harmless no-op, never an error. Completion is monotonic;
/// `is_completed: false` never reverts the flag.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateSessionRequest>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    if input.question_type.is_none() && input.is_completed.is_none() {
        return Err(CoreError::Validation(
            "At least one of question_type or is_completed must be provided".to_string(),
        )
        .into());
    }

    let code = team_code::require(&input.team_code)?;

    let not_found = || CoreError::NotFound {
        entity: "Session",
        key: code.clone(),
    };

    let mut session = SessionRepo::find_by_team_code(&state.pool, &code)
        .await?
        .ok_or_else(not_found)?;

    if let Some(question_type) = input.question_type {
        session = SessionRepo::bind_question(&state.pool, &code, question_type)
            .await?
            .ok_or_else(not_found)?;
    }

    if input.is_completed == Some(true) {
        session = SessionRepo::complete(&state.pool, &code)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(team_code = %code, "Session flagged completed");
    }

    Ok(Json(DataResponse {
        data: SessionResponse::new(session, Utc::now()),
    }))
}

// ---------------------------------------------------------------------------
// PATCH /session
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CompleteSessionRequest {
    #[serde(default)]
    pub team_code: String,
    pub submission: SubmissionPayload,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionPayload {
    /// Falls back to the question type bound to the session.
    pub question_type: Option<i32>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub files: Vec<SubmissionFile>,
}

/// Complete the session by submitting, in one request.
///
/// The completed flag and the submissions unique index independently guard
/// against double completion; whichever trips first, no second submission
/// row is ever created.
pub async fn complete_with_submission(
    State(state): State<AppState>,
    Json(input): Json<CompleteSessionRequest>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    let code = team_code::require(&input.team_code)?;

    let session = SessionRepo::find_by_team_code(&state.pool, &code)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Session",
            key: code.clone(),
        })?;

    if session.is_completed {
        return Err(CoreError::Conflict("Session is already completed".to_string()).into());
    }

    // Reconcile drift: a submission row without the completed flag means a
    // previous completion half-landed. Refuse rather than double-submit.
    if SubmissionRepo::exists(&state.pool, &code).await? {
        return Err(
            CoreError::Conflict("A submission already exists for this team".to_string()).into(),
        );
    }

    let question_type = input
        .submission
        .question_type
        .or(session.question_type)
        .ok_or_else(|| {
            CoreError::Validation(
                "question_type is required when the session has none bound".to_string(),
            )
        })?;

    let new_submission = NewSubmission {
        team_code: code.clone(),
        question_type,
        explanation: input.submission.explanation,
        files: input.submission.files,
    };

    if let Err(err) = SubmissionRepo::create(&state.pool, &new_submission).await {
        if is_unique_violation(&err, "uq_submissions_team_code") {
            return Err(CoreError::Conflict(
                "A submission already exists for this team".to_string(),
            )
            .into());
        }
        return Err(err.into());
    }

    let completed = SessionRepo::complete(&state.pool, &code)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Session",
            key: code.clone(),
        })?;

    tracing::info!(team_code = %code, "Session completed via submission");

    Ok(Json(DataResponse {
        data: SessionResponse::new(completed, Utc::now()),
    }))
}
