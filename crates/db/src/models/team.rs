//! Team entity model and DTOs.

use hackgate_core::registration::Member;
use hackgate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub team_name: String,
    pub team_email: String,
    pub contact_number: String,
    pub university: String,
    pub members: Json<Vec<Member>>,
    pub registration_date: Timestamp,
    pub status: String,
}

/// DTO for inserting a new team. Members must already be filtered down to
/// complete entries.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub team_email: String,
    pub contact_number: String,
    pub university: String,
    pub members: Vec<Member>,
}

/// Reduced projection for bulk listing: contact surface and member names
/// only, never full member records.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub id: DbId,
    pub team_name: String,
    pub team_email: String,
    pub member_names: Vec<String>,
    pub registration_date: Timestamp,
    pub status: String,
}

impl From<Team> for TeamSummary {
    fn from(team: Team) -> Self {
        let member_names = team
            .members
            .0
            .iter()
            .map(|m| m.full_name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        TeamSummary {
            id: team.id,
            team_name: team.team_name,
            team_email: team.team_email,
            member_names,
            registration_date: team.registration_date,
            status: team.status,
        }
    }
}
