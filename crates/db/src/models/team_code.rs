//! Team code entity model.

use hackgate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `team_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamCode {
    pub id: DbId,
    pub code: String,
    pub is_registered: bool,
    /// Back-reference to the team, attached once after registration.
    pub team_id: Option<DbId>,
    pub created_at: Timestamp,
}
