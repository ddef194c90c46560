//! Repository for the `submissions` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::submission::{NewSubmission, Submission, SubmissionSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_code, question_type, explanation, files, file_names, submitted_at";

/// Blob-free column list for summary projections.
const SUMMARY_COLUMNS: &str = "id, team_code, question_type, explanation, file_names, submitted_at";

/// Provides write-once persistence for submissions.
///
/// There is no locking: the `uq_submissions_team_code` index is the sole
/// concurrency guard. A second insert for the same team must fail, never
/// overwrite.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert the team's single submission, returning the created row.
    ///
    /// A duplicate (including the loser of a concurrent race) surfaces as a
    /// unique-violation database error for the caller to classify.
    pub async fn create(pool: &PgPool, input: &NewSubmission) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (team_code, question_type, explanation, files, file_names) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.team_code)
            .bind(input.question_type)
            .bind(&input.explanation)
            .bind(Json(&input.files))
            .bind(input.file_names())
            .fetch_one(pool)
            .await
    }

    /// Fetch the full submission, blobs included.
    pub async fn find_by_team_code(
        pool: &PgPool,
        team_code: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE team_code = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(team_code)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the blob-free projection used by default responses and
    /// duplicate-conflict metadata.
    pub async fn find_summary_by_team_code(
        pool: &PgPool,
        team_code: &str,
    ) -> Result<Option<SubmissionSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM submissions WHERE team_code = $1");
        sqlx::query_as::<_, SubmissionSummary>(&query)
            .bind(team_code)
            .fetch_optional(pool)
            .await
    }

    /// Lightweight existence probe consumed by the session manager and the
    /// check endpoint.
    pub async fn exists(pool: &PgPool, team_code: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM submissions WHERE team_code = $1)")
                .bind(team_code)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
