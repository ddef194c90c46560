//! Route definitions for the onboarding-session lifecycle.
//!
//! Mounted under `/api/v1` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Session routes.
///
/// ```text
/// POST   /session   -> start_or_get (idempotent read / restart)
/// PUT    /session   -> update (bind question, flag completed)
/// PATCH  /session   -> complete_with_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/session",
        post(session::start_or_get)
            .put(session::update)
            .patch(session::complete_with_submission),
    )
}
