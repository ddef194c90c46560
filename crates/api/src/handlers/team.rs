//! Handlers for team registration and listing.
//!
//! Registration validates the roster, issues a unique team code, and
//! persists both rows. The duplicate probe and the insert are not a single
//! transaction; the case-insensitive unique indexes backstop the narrow race
//! window.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use hackgate_core::error::CoreError;
use hackgate_core::registration::{self, TeamRegistration};
use hackgate_core::team_code;
use hackgate_core::types::DbId;
use hackgate_db::models::team::{NewTeam, TeamSummary};
use hackgate_db::repositories::{TeamCodeRepo, TeamRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /team-code
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterTeamRequest {
    pub team_data: TeamRegistration,
}

#[derive(Debug, Serialize)]
pub struct RegisteredTeam {
    pub team_id: DbId,
    pub team_code: String,
}

/// Register a team and issue its code.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterTeamRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegisteredTeam>>)> {
    let team_data = input.team_data;
    registration::validate(&team_data)?;

    let new_team = NewTeam {
        team_name: team_data.team_name.trim().to_string(),
        team_email: team_data.team_email.trim().to_string(),
        contact_number: team_data.contact_number.trim().to_string(),
        university: team_data.university.trim().to_string(),
        members: team_data.complete_members(),
    };

    if TeamRepo::find_duplicate(&state.pool, &new_team.team_name, &new_team.team_email)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(
            "A team with this name or email is already registered".to_string(),
        )
        .into());
    }

    let code = generate_unique_code(&state).await?;
    let code_row = TeamCodeRepo::create(&state.pool, &code, true).await?;

    let team = match TeamRepo::create(&state.pool, &new_team).await {
        Ok(team) => team,
        Err(err)
            if is_unique_violation(&err, "uq_teams_team_name")
                || is_unique_violation(&err, "uq_teams_team_email") =>
        {
            // Lost the duplicate race. The issued code row stays behind as an
            // unusable orphan; acceptable for this window.
            tracing::warn!(%code, "Team insert lost duplicate race, code row orphaned");
            return Err(CoreError::Conflict(
                "A team with this name or email is already registered".to_string(),
            )
            .into());
        }
        Err(err) => return Err(err.into()),
    };

    TeamCodeRepo::attach_team(&state.pool, code_row.id, team.id).await?;

    tracing::info!(team_id = team.id, %code, "Team registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegisteredTeam {
                team_id: team.id,
                team_code: code,
            },
        }),
    ))
}

/// Issue a code not already present in the registry, retrying on collision
/// up to the generation bound.
async fn generate_unique_code(state: &AppState) -> Result<String, AppError> {
    for _ in 0..team_code::MAX_GENERATION_ATTEMPTS {
        let candidate = team_code::generate_code();
        if !TeamCodeRepo::exists(&state.pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(CoreError::Internal("Failed to generate a unique team code".to_string()).into())
}

// ---------------------------------------------------------------------------
// GET /teams
// ---------------------------------------------------------------------------

/// List all teams, newest first, projected to the reduced summary shape;
/// full member records are never exposed in bulk.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TeamSummary>>>> {
    let teams = TeamRepo::list(&state.pool).await?;
    let summaries: Vec<TeamSummary> = teams.into_iter().map(TeamSummary::from).collect();

    tracing::debug!(count = summaries.len(), "Fetched team listing");

    Ok(Json(DataResponse { data: summaries }))
}
