pub mod health;
pub mod session;
pub mod submission;
pub mod team;
pub mod team_code;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /team-code                POST   register team roster, issue team code
/// /teams                    GET    reduced team listing, newest first
/// /validate-teamcode        POST   check a team code exists / is registered
///
/// /session                  POST   start or return the onboarding session
///                           PUT    bind question type / flag completed
///                           PATCH  complete via submission
///
/// /submission               POST   create the single submission (JSON or multipart)
///                           GET    fetch submission (?include_file_content=)
/// /submission/check         GET    existence/completion probe
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(team::router())
        .merge(team_code::router())
        .merge(session::router())
        .merge(submission::router())
}
