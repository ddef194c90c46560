//! Team-code token generation and format validation.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API layer and the repository layer. Codes are short shared secrets
//! handed to a team at registration; they are matched case-insensitively by
//! lowercasing on the way in.

use rand::Rng;

use crate::error::CoreError;

/// Length of a team code (lowercase alphanumeric characters).
pub const CODE_LENGTH: usize = 9;

/// Maximum attempts when searching for a code not already issued.
///
/// The caller retries generation against the registry up to this bound and
/// treats exhaustion as an internal failure.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Generate a random team code.
///
/// Uniqueness is NOT guaranteed here; callers must check the registry and
/// regenerate on collision (up to [`MAX_GENERATION_ATTEMPTS`] times).
pub fn generate_code() -> String {
    let code: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect();
    code.to_lowercase()
}

/// Canonical form of a team code as stored and compared: trimmed, lowercase.
pub fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Check that a normalized code has the issued shape: exactly
/// [`CODE_LENGTH`] lowercase alphanumeric characters.
pub fn is_valid_format(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Validate that a team code is present in a request payload.
pub fn require(code: &str) -> Result<String, CoreError> {
    let normalized = normalize(code);
    if normalized.is_empty() {
        return Err(CoreError::Validation("team_code is required".to_string()));
    }
    Ok(normalized)
}
