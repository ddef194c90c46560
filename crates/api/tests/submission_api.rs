//! Integration tests for the `/submission` resource.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_json, register_team};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn submission_body(team_code: &str) -> serde_json::Value {
    json!({
        "team_code": team_code,
        "question_type": 1,
        "explanation": "Notebook attached",
        "files": [{
            "name": "A.ipynb",
            "mime_type": "application/x-ipynb+json",
            "size_bytes": 2,
            "content": "e30=",
            "last_modified": 1754000000000i64
        }]
    })
}

// ---------------------------------------------------------------------------
// Test: creating a submission succeeds once, then 409s with the existing
// submission's metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_submission_returns_existing_metadata(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let code = register_team(&app, "Rustaceans", "team@example.com").await;

    let response = post_json(
        app.clone(),
        "/api/v1/submission",
        submission_body(&code),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["file_names"][0], "A.ipynb");
    // The create response is blob-free.
    assert!(created["data"].get("files").is_none());

    // Immediate retry: conflict carrying the winner's metadata.
    let response = post_json(app, "/api/v1/submission", submission_body(&code)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let conflict = body_json(response).await;
    assert_eq!(conflict["code"], "CONFLICT");
    assert_eq!(conflict["existing_submission"]["file_names"][0], "A.ipynb");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions WHERE team_code = $1")
        .bind(&code)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1, "exactly one submission row may exist");
}

// ---------------------------------------------------------------------------
// Test: missing required fields are a 400 listing every violation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_fields_are_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/submission", json!({ "explanation": "x" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("team_code"));
    assert!(message.contains("question_type"));
}

// ---------------------------------------------------------------------------
// Test: file content is omitted by default and included on request
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn file_content_is_gated(pool: PgPool) {
    let app = common::build_test_app(pool);
    let code = register_team(&app, "Rustaceans", "team@example.com").await;

    post_json(app.clone(), "/api/v1/submission", submission_body(&code)).await;

    let default_fetch = body_json(
        get(app.clone(), &format!("/api/v1/submission?team_code={code}")).await,
    )
    .await;
    let items = default_fetch["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].get("files").is_none());
    assert_eq!(items[0]["file_names"][0], "A.ipynb");

    let full_fetch = body_json(
        get(
            app,
            &format!("/api/v1/submission?team_code={code}&include_file_content=true"),
        )
        .await,
    )
    .await;
    let items = full_fetch["data"].as_array().unwrap();
    assert_eq!(items[0]["files"][0]["content"], "e30=");
}

// ---------------------------------------------------------------------------
// Test: fetching for a team with no submission returns an empty list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_without_submission_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let code = register_team(&app, "Rustaceans", "team@example.com").await;

    let json = body_json(
        get(app, &format!("/api/v1/submission?team_code={code}")).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: the check probe reports submission and session state together
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_probe_reports_drift(pool: PgPool) {
    let app = common::build_test_app(pool);
    let code = register_team(&app, "Rustaceans", "team@example.com").await;

    // No session row yet: 404.
    let response = get(
        app.clone(),
        &format!("/api/v1/submission/check?team_code={code}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    post_json(
        app.clone(),
        "/api/v1/session",
        json!({ "team_code": code, "question_type": 1 }),
    )
    .await;

    // Session but no submission.
    let json = body_json(
        get(
            app.clone(),
            &format!("/api/v1/submission/check?team_code={code}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["has_submission"], false);
    assert_eq!(json["data"]["session_completed"], false);
    assert_eq!(json["data"]["question_type"], 1);

    // Submission stored directly (session flag not yet set): the probe
    // surfaces the drift.
    post_json(app.clone(), "/api/v1/submission", submission_body(&code)).await;

    let json = body_json(
        get(app, &format!("/api/v1/submission/check?team_code={code}")).await,
    )
    .await;
    assert_eq!(json["data"]["has_submission"], true);
    assert_eq!(json["data"]["has_file_content"], true);
    assert_eq!(json["data"]["session_completed"], false);
}

// ---------------------------------------------------------------------------
// Test: multipart submissions are accepted and files are base64-encoded
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn multipart_submission_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let code = register_team(&app, "Rustaceans", "team@example.com").await;

    let boundary = "test-boundary-7d92a1";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"team_code\"\r\n\r\n\
         {code}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"question_type\"\r\n\r\n\
         3\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"explanation\"\r\n\r\n\
         Uploaded via form\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"solution.py\"\r\n\
         Content-Type: text/x-python\r\n\r\n\
         print('hi')\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/submission")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["question_type"], 3);
    assert_eq!(json["data"]["file_names"][0], "solution.py");

    // The stored blob is base64 of the raw part bytes.
    let (files,): (serde_json::Value,) =
        sqlx::query_as("SELECT files FROM submissions WHERE team_code = $1")
            .bind(&code)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(files[0]["name"], "solution.py");
    assert_eq!(files[0]["mime_type"], "text/x-python");
    assert_eq!(files[0]["content"], "cHJpbnQoJ2hpJyk=");
}
