//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `hackgate_db` and the pure
//! domain logic in `hackgate_core`, and map errors via [`crate::error::AppError`].

pub mod session;
pub mod submission;
pub mod team;
pub mod team_code;
