//! Onboarding session entity model and DTOs.

use hackgate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `onboarding_sessions` table.
///
/// `start_time` stays NULL until a question type is chosen; that moment, not
/// row creation, starts the 12-hour clock.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingSession {
    pub id: DbId,
    pub team_code: String,
    pub team_id: Option<DbId>,
    pub question_type: Option<i32>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub is_completed: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a fresh session row.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub team_code: String,
    pub team_id: Option<DbId>,
    pub question_type: Option<i32>,
    /// Set iff a question type is chosen at creation time.
    pub start_time: Option<Timestamp>,
}
