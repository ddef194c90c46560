//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Reduced projections for listings and probes where the full row would
//!   leak internals or drag blobs into light-weight responses

pub mod session;
pub mod submission;
pub mod team;
pub mod team_code;
