//! Team registration payload and validation.
//!
//! Validation collects every violated field into a single error rather than
//! stopping at the first, so a client can fix its whole form in one round
//! trip. Member entries missing any required field are dropped before
//! persisting; a registration is acceptable once at least
//! [`MIN_COMPLETE_MEMBERS`] complete entries remain.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum number of members with complete required fields.
pub const MIN_COMPLETE_MEMBERS: usize = 2;

/// A single roster entry as submitted by the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub food_preference: String,
}

impl Member {
    /// A member counts toward the roster minimum when full name, email, and
    /// food preference are all present.
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.food_preference.trim().is_empty()
    }
}

/// The roster/contact payload submitted at registration time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRegistration {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_email: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TeamRegistration {
    /// The subset of members that will actually be persisted.
    pub fn complete_members(&self) -> Vec<Member> {
        self.members
            .iter()
            .filter(|m| m.is_complete())
            .cloned()
            .collect()
    }
}

/// Validate a registration payload, reporting ALL violated fields.
pub fn validate(registration: &TeamRegistration) -> Result<(), CoreError> {
    let mut violations: Vec<String> = Vec::new();

    if registration.team_name.trim().is_empty() {
        violations.push("team_name is required".to_string());
    }
    if registration.team_email.trim().is_empty() {
        violations.push("team_email is required".to_string());
    }
    if registration.contact_number.trim().is_empty() {
        violations.push("contact_number is required".to_string());
    }

    let complete = registration.members.iter().filter(|m| m.is_complete()).count();
    if complete < MIN_COMPLETE_MEMBERS {
        violations.push(format!(
            "at least {MIN_COMPLETE_MEMBERS} members must have complete information \
             (full name, email, food preference)"
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations.join("; ")))
    }
}
