//! Route definitions for the `/submission` resource.
//!
//! Mounted under `/api/v1` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::submission;
use crate::state::AppState;

/// Submission routes.
///
/// ```text
/// POST   /submission          -> create (JSON or multipart/form-data)
/// GET    /submission          -> get (?team_code=&include_file_content=)
/// GET    /submission/check    -> check (existence/completion probe)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/submission",
            get(submission::get).post(submission::create),
        )
        .route("/submission/check", get(submission::check))
}
