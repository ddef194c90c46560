//! Route definition for team-code validation.
//!
//! Mounted under `/api/v1` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::team_code;
use crate::state::AppState;

/// ```text
/// POST   /validate-teamcode   -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/validate-teamcode", post(team_code::validate))
}
