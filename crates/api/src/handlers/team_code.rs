//! Handler for team-code validation.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use hackgate_core::error::CoreError;
use hackgate_core::team_code;
use hackgate_db::repositories::TeamCodeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /validate-teamcode
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ValidateTeamCodeRequest {
    #[serde(default)]
    pub team_code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateTeamCodeResponse {
    pub valid: bool,
    pub is_registered: bool,
    pub team_code: String,
}

/// Check whether a team code exists and is registered. Codes are matched
/// case-insensitively.
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateTeamCodeRequest>,
) -> AppResult<Json<DataResponse<ValidateTeamCodeResponse>>> {
    let code = team_code::require(&input.team_code)?;

    let row = TeamCodeRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Team code",
            key: code,
        })?;

    Ok(Json(DataResponse {
        data: ValidateTeamCodeResponse {
            valid: true,
            is_registered: row.is_registered,
            team_code: row.code,
        },
    }))
}
