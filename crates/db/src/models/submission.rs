//! Submission entity model and DTOs.
//!
//! File payloads are stored inline in a JSONB column as base64 blobs; the
//! parallel `file_names` array exists so existence and metadata probes never
//! deserialize the blobs.

use hackgate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A single uploaded file stored inline in the `files` JSONB column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size_bytes: i64,
    /// Base64-encoded file content.
    pub content: String,
    /// Client-reported modification time (epoch milliseconds).
    #[serde(default)]
    pub last_modified: Option<i64>,
}

/// A full row from the `submissions` table, blobs included.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub team_code: String,
    pub question_type: i32,
    pub explanation: String,
    pub files: Json<Vec<SubmissionFile>>,
    pub file_names: Vec<String>,
    pub submitted_at: Timestamp,
}

/// Blob-free projection: the default response shape, and the metadata
/// attached to duplicate-submission conflicts so clients can reconcile
/// without a second round trip.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionSummary {
    pub id: DbId,
    pub team_code: String,
    pub question_type: i32,
    pub explanation: String,
    pub file_names: Vec<String>,
    pub submitted_at: Timestamp,
}

impl From<Submission> for SubmissionSummary {
    fn from(submission: Submission) -> Self {
        SubmissionSummary {
            id: submission.id,
            team_code: submission.team_code,
            question_type: submission.question_type,
            explanation: submission.explanation,
            file_names: submission.file_names,
            submitted_at: submission.submitted_at,
        }
    }
}

/// DTO for inserting a new submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub team_code: String,
    pub question_type: i32,
    pub explanation: String,
    pub files: Vec<SubmissionFile>,
}

impl NewSubmission {
    /// The redundant filename index persisted alongside the blobs.
    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }
}
