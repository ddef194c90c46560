//! Repository for the `onboarding_sessions` table.

use sqlx::PgPool;

use crate::models::session::{NewSession, OnboardingSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, team_code, team_id, question_type, start_time, end_time, is_completed, created_at";

/// Provides lifecycle operations for onboarding sessions.
///
/// The `uq_onboarding_sessions_team_code` index enforces "at most one row per
/// team": a start request that loses a creation race observes a 23505 instead
/// of silently inserting a second row.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a fresh session row, returning it.
    pub async fn create(
        pool: &PgPool,
        input: &NewSession,
    ) -> Result<OnboardingSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_sessions (team_code, team_id, question_type, start_time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(&input.team_code)
            .bind(input.team_id)
            .bind(input.question_type)
            .bind(input.start_time)
            .fetch_one(pool)
            .await
    }

    /// Find the session row for a team code.
    pub async fn find_by_team_code(
        pool: &PgPool,
        team_code: &str,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_sessions WHERE team_code = $1");
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(team_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete the session row for a team code ahead of a restart.
    /// Returns `true` if a row was removed.
    pub async fn delete_by_team_code(pool: &PgPool, team_code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM onboarding_sessions WHERE team_code = $1")
            .bind(team_code)
            .execute(pool)
            .await?;
        if result.rows_affected() > 0 {
            tracing::debug!(team_code, "Deleted stale session row");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Bind a question type. The first binding also sets `start_time`, the
    /// sole trigger that starts the 12-hour clock; later bindings keep the
    /// original clock.
    pub async fn bind_question(
        pool: &PgPool,
        team_code: &str,
        question_type: i32,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_sessions \
             SET question_type = $2, start_time = COALESCE(start_time, now()) \
             WHERE team_code = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(team_code)
            .bind(question_type)
            .fetch_optional(pool)
            .await
    }

    /// Flag the session completed. Idempotent: an already-completed session
    /// is returned unchanged, keeping its original `end_time`.
    pub async fn complete(
        pool: &PgPool,
        team_code: &str,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_sessions \
             SET is_completed = TRUE, end_time = COALESCE(end_time, now()) \
             WHERE team_code = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(team_code)
            .fetch_optional(pool)
            .await
    }
}
