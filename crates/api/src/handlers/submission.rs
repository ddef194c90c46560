//! Handlers for the `/submission` resource.
//!
//! Submissions are write-once per team. The create endpoint accepts either a
//! JSON body (files already base64-encoded by the client) or
//! `multipart/form-data` (raw file parts, encoded here). File content is
//! omitted from read responses unless explicitly requested, so routine
//! checks never drag the blobs across the wire.

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;

use hackgate_core::error::CoreError;
use hackgate_core::team_code;
use hackgate_db::models::submission::{NewSubmission, SubmissionFile, SubmissionSummary};
use hackgate_db::repositories::{SessionRepo, SubmissionRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /submission
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateSubmissionRequest {
    #[serde(default)]
    pub team_code: String,
    pub question_type: Option<i32>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub files: Vec<SubmissionFile>,
}

/// Create the team's single submission.
///
/// A duplicate (found by the pre-insert probe or by losing the insert race
/// on `uq_submissions_team_code`) returns 409 with the existing
/// submission's metadata so the client can reconcile without a second round
/// trip.
pub async fn create(State(state): State<AppState>, request: Request) -> AppResult<Response> {
    let input = parse_create_request(request).await?;

    let mut violations: Vec<String> = Vec::new();
    let code = team_code::normalize(&input.team_code);
    if code.is_empty() {
        violations.push("team_code is required".to_string());
    }
    if input.question_type.is_none() {
        violations.push("question_type is required".to_string());
    }
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations.join("; ")).into());
    }
    let Some(question_type) = input.question_type else {
        return Err(CoreError::Validation("question_type is required".to_string()).into());
    };

    if let Some(existing) = SubmissionRepo::find_summary_by_team_code(&state.pool, &code).await? {
        return Ok(duplicate_response(existing));
    }

    let new_submission = NewSubmission {
        team_code: code.clone(),
        question_type,
        explanation: input.explanation,
        files: input.files,
    };

    match SubmissionRepo::create(&state.pool, &new_submission).await {
        Ok(created) => {
            tracing::info!(
                team_code = %code,
                files = created.file_names.len(),
                "Submission stored"
            );
            Ok((
                StatusCode::CREATED,
                Json(DataResponse {
                    data: SubmissionSummary::from(created),
                }),
            )
                .into_response())
        }
        Err(err) if is_unique_violation(&err, "uq_submissions_team_code") => {
            // Lost a concurrent race; surface the winner's metadata.
            let existing = SubmissionRepo::find_summary_by_team_code(&state.pool, &code)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(
                        "Submission conflict reported but no existing row found".to_string(),
                    )
                })?;
            Ok(duplicate_response(existing))
        }
        Err(err) => Err(err.into()),
    }
}

fn duplicate_response(existing: SubmissionSummary) -> Response {
    let body = json!({
        "error": "A submission already exists for this team",
        "code": "CONFLICT",
        "existing_submission": existing,
    });
    (StatusCode::CONFLICT, Json(body)).into_response()
}

/// Accept either JSON or `multipart/form-data`, sniffed by content type.
async fn parse_create_request(request: Request) -> Result<CreateSubmissionRequest, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?;
        parse_multipart(multipart).await
    } else {
        let Json(input) = Json::<CreateSubmissionRequest>::from_request(request, &())
            .await
            .map_err(|err| AppError::BadRequest(format!("Malformed JSON body: {err}")))?;
        Ok(input)
    }
}

async fn parse_multipart(mut multipart: Multipart) -> Result<CreateSubmissionRequest, AppError> {
    let mut input = CreateSubmissionRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        match field.name().unwrap_or("") {
            "team_code" => input.team_code = read_text(field).await?,
            "question_type" => {
                let text = read_text(field).await?;
                let parsed = text.trim().parse().map_err(|_| {
                    AppError::BadRequest("question_type must be an integer".to_string())
                })?;
                input.question_type = Some(parsed);
            }
            "explanation" => input.explanation = read_text(field).await?,
            "files" => {
                let name = field
                    .file_name()
                    .unwrap_or("unnamed")
                    .to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    AppError::BadRequest(format!("Failed to read file part: {err}"))
                })?;
                input.files.push(SubmissionFile {
                    name,
                    mime_type,
                    size_bytes: bytes.len() as i64,
                    content: BASE64.encode(&bytes),
                    last_modified: None,
                });
            }
            _ => {}
        }
    }

    Ok(input)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(format!("Failed to read form field: {err}")))
}

// ---------------------------------------------------------------------------
// GET /submission
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GetSubmissionParams {
    #[serde(default)]
    pub team_code: String,
    #[serde(default)]
    pub include_file_content: bool,
}

/// Fetch the team's submission. File content is included only when
/// explicitly requested.
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<GetSubmissionParams>,
) -> AppResult<Response> {
    let code = team_code::require(&params.team_code)?;

    if params.include_file_content {
        let submissions: Vec<_> = SubmissionRepo::find_by_team_code(&state.pool, &code)
            .await?
            .into_iter()
            .collect();
        Ok(Json(DataResponse { data: submissions }).into_response())
    } else {
        let submissions: Vec<_> = SubmissionRepo::find_summary_by_team_code(&state.pool, &code)
            .await?
            .into_iter()
            .collect();
        Ok(Json(DataResponse { data: submissions }).into_response())
    }
}

// ---------------------------------------------------------------------------
// GET /submission/check
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CheckSubmissionParams {
    #[serde(default)]
    pub team_code: String,
}

#[derive(Debug, Serialize)]
pub struct CheckSubmissionResponse {
    pub has_submission: bool,
    pub has_file_content: bool,
    pub session_completed: bool,
    pub question_type: Option<i32>,
}

/// Lightweight existence/completion probe.
///
/// Reports submission and session state together so clients can reconcile
/// "submission exists but session not flagged completed" drift in one call.
pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckSubmissionParams>,
) -> AppResult<Json<DataResponse<CheckSubmissionResponse>>> {
    let code = team_code::require(&params.team_code)?;

    let session = SessionRepo::find_by_team_code(&state.pool, &code)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Session",
            key: code.clone(),
        })?;

    let summary = SubmissionRepo::find_summary_by_team_code(&state.pool, &code).await?;
    let has_submission = summary.is_some();
    let has_file_content = summary
        .as_ref()
        .is_some_and(|s| !s.file_names.is_empty());

    Ok(Json(DataResponse {
        data: CheckSubmissionResponse {
            has_submission,
            has_file_content,
            session_completed: session.is_completed,
            question_type: session.question_type,
        },
    }))
}
