//! Repository for the `teams` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::team::{NewTeam, Team};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, team_name, team_email, contact_number, university, members, registration_date, status";

/// Provides registration and listing operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team, returning the created row.
    ///
    /// The case-insensitive unique indexes on name and email backstop the
    /// caller's duplicate probe; a losing race surfaces as a 23505.
    pub async fn create(pool: &PgPool, input: &NewTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (team_name, team_email, contact_number, university, members) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.team_name)
            .bind(&input.team_email)
            .bind(&input.contact_number)
            .bind(&input.university)
            .bind(Json(&input.members))
            .fetch_one(pool)
            .await
    }

    /// Find a team whose name or email matches case-insensitively.
    pub async fn find_duplicate(
        pool: &PgPool,
        team_name: &str,
        team_email: &str,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teams \
             WHERE LOWER(team_name) = LOWER($1) OR LOWER(team_email) = LOWER($2) \
             LIMIT 1"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(team_name)
            .bind(team_email)
            .fetch_optional(pool)
            .await
    }

    /// All teams, newest registration first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM teams ORDER BY registration_date DESC, id DESC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }
}
