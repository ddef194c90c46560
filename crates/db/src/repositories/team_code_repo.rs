//! Repository for the `team_codes` table.

use sqlx::PgPool;

use hackgate_core::types::DbId;

use crate::models::team_code::TeamCode;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, is_registered, team_id, created_at";

/// Provides issuance and lookup operations for team codes.
pub struct TeamCodeRepo;

impl TeamCodeRepo {
    /// Insert a newly issued code, returning the created row.
    ///
    /// The `uq_team_codes_code` index rejects a collision that slipped past
    /// the pre-insert existence probe.
    pub async fn create(
        pool: &PgPool,
        code: &str,
        is_registered: bool,
    ) -> Result<TeamCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_codes (code, is_registered) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamCode>(&query)
            .bind(code)
            .bind(is_registered)
            .fetch_one(pool)
            .await
    }

    /// Find a team code row by its (normalized) code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<TeamCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_codes WHERE code = $1");
        sqlx::query_as::<_, TeamCode>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Lightweight existence probe used by the generation retry loop.
    pub async fn exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM team_codes WHERE code = $1)")
                .bind(code)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Attach the team back-reference after the team row is inserted.
    pub async fn attach_team(
        pool: &PgPool,
        id: DbId,
        team_id: DbId,
    ) -> Result<Option<TeamCode>, sqlx::Error> {
        let query = format!(
            "UPDATE team_codes SET team_id = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamCode>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }
}
