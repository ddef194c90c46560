//! Onboarding-session state machine.
//!
//! A session moves `PendingQuestion -> Active -> Expired | Completed`. The
//! 12-hour budget starts ticking only when a question type is chosen (that
//! is, when `start_time` is set), never at row creation. The server is
//! passive about time: it reports the remaining budget and replaces stale
//! rows on the next start request, but it never auto-expires a row and never
//! rejects a write purely for being late. Completion is monotonic.

use serde::Serialize;

use crate::types::Timestamp;

/// Session budget: 12 hours, in milliseconds.
pub const SESSION_DURATION_MS: i64 = 12 * 60 * 60 * 1000;

/// Observable session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session row exists but no question chosen yet; clock not running.
    PendingQuestion,
    /// Question chosen, clock running, budget not yet exhausted.
    Active,
    /// Budget exhausted but not flagged complete (expiry is client-driven).
    Expired,
    /// Flagged complete; terminal.
    Completed,
}

/// Outcome of a start/get request against an existing session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDisposition {
    /// Return the existing row unchanged (idempotent read).
    ReturnExisting,
    /// The existing row is completed and still within budget: refuse.
    AlreadyCompleted,
    /// Delete the existing row and insert a fresh one.
    Restart,
}

/// Milliseconds of budget left, clamped to `[0, SESSION_DURATION_MS]`.
///
/// A session that has not started (no question chosen) reports the full
/// budget.
pub fn remaining_time_ms(start_time: Option<Timestamp>, now: Timestamp) -> i64 {
    match start_time {
        None => SESSION_DURATION_MS,
        Some(start) => {
            let elapsed_ms = (now - start).num_milliseconds();
            (SESSION_DURATION_MS - elapsed_ms).clamp(0, SESSION_DURATION_MS)
        }
    }
}

/// Whether the budget has lapsed. A session with no `start_time` never
/// expires; the boundary itself (elapsed == budget) still counts as within.
pub fn is_expired(start_time: Option<Timestamp>, now: Timestamp) -> bool {
    match start_time {
        None => false,
        Some(start) => (now - start).num_milliseconds() > SESSION_DURATION_MS,
    }
}

/// Classify a session row into its observable state.
pub fn classify(
    start_time: Option<Timestamp>,
    is_completed: bool,
    now: Timestamp,
) -> SessionState {
    if is_completed {
        SessionState::Completed
    } else if is_expired(start_time, now) {
        SessionState::Expired
    } else if start_time.is_none() {
        SessionState::PendingQuestion
    } else {
        SessionState::Active
    }
}

/// Decide what a start/get request does to an existing session row.
///
/// `force_restart` and a lapsed budget both replace the row; a completed
/// row within budget is refused; anything else is an idempotent read.
/// Note the ordering: a completed row older than the budget is restartable.
pub fn start_disposition(
    start_time: Option<Timestamp>,
    is_completed: bool,
    force_restart: bool,
    now: Timestamp,
) -> StartDisposition {
    if force_restart || is_expired(start_time, now) {
        StartDisposition::Restart
    } else if is_completed {
        StartDisposition::AlreadyCompleted
    } else {
        StartDisposition::ReturnExisting
    }
}
