//! Route definitions for team registration and listing.
//!
//! Mounted under `/api/v1` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Team routes.
///
/// ```text
/// POST   /team-code   -> register (validate roster, issue code)
/// GET    /teams       -> list (reduced projection)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/team-code", post(team::register))
        .route("/teams", get(team::list))
}
